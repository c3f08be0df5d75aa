//! Compositor capabilities, injected at startup.
//!
//! Effects that need cursor hiding or a screen capture go through this
//! trait; production shells out to the compositor's tools, tests get the
//! no-op implementation. Every failure degrades: no capture means the
//! effect uses its documented fallback.

use std::process::Command;

use crate::texture::Texture;

pub trait Compositor {
    /// Toggle cursor visibility. Implementations must be safe to call on
    /// every exit path; the hook script's signal traps cover the rest.
    fn set_cursor_hidden(&self, hidden: bool);

    /// Capture the screen into a texture, or None when capture is not
    /// available. Transient files are cleaned up before returning.
    fn capture_screen(&self, tag: &str) -> Option<Texture>;
}

/// Shells out to `hyprctl` and `grim`
pub struct Hyprland;

impl Compositor for Hyprland {
    fn set_cursor_hidden(&self, hidden: bool) {
        let value = if hidden { "true" } else { "false" };
        let result = Command::new("hyprctl")
            .args(["keyword", "cursor:invisible", value])
            .output();
        if let Err(e) = result {
            eprintln!("hyprctl unavailable: {}", e);
        }
    }

    fn capture_screen(&self, tag: &str) -> Option<Texture> {
        let path = format!("{}_temp.png", tag);

        let status = Command::new("grim").arg(&path).status();
        match status {
            Ok(s) if s.success() => {},
            Ok(_) | Err(_) => {
                eprintln!("screen capture unavailable, using fallback");
                let _ = std::fs::remove_file(&path);
                return None;
            },
        }

        let bytes = std::fs::read(&path).ok();
        let _ = std::fs::remove_file(&path);
        let tex = bytes.and_then(|b| Texture::from_bytes(&b).ok());
        if tex.is_none() {
            eprintln!("screen capture decode failed, using fallback");
        }
        tex
    }
}

/// No-op implementation for tests and non-Wayland sessions
pub struct Null;

impl Compositor for Null {
    fn set_cursor_hidden(&self, _hidden: bool) {}

    fn capture_screen(&self, _tag: &str) -> Option<Texture> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_compositor_never_captures() {
        assert!(Null.capture_screen("x").is_none());
        Null.set_cursor_hidden(true); // must not panic
    }
}
