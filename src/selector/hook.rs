//! Hook script generation and installation.
//!
//! The compositor fires one shell script when its screensaver trigger
//! goes off; committing an effect means regenerating that script. The
//! script hides the cursor, launches the effect binary under the Wayland
//! video driver, and babysits it: any signal or child exit restores the
//! cursor and tears everything down.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Where the compositor looks for the hook
pub const HOOK_RELATIVE: &str = ".config/omarchy/branding/screensaver/omarchy-cmd-screensaver";
/// Cached copy of the stock hook, fetched once
pub const BACKUP_RELATIVE: &str = ".cache/omarchy-screensaver-backup";
/// Where the stock hook lives upstream
const DEFAULT_HOOK_URL: &str =
    "https://raw.githubusercontent.com/basecamp/omarchy/master/bin/omarchy-cmd-screensaver";

pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn hook_path() -> PathBuf {
    home_dir().join(HOOK_RELATIVE)
}

pub fn backup_path() -> PathBuf {
    home_dir().join(BACKUP_RELATIVE)
}

/// Render the hook script. Pure function of its inputs: regenerating
/// with the same selection yields byte-identical content.
pub fn render_script(effect_dir: &str, key: &str, options: &str) -> String {
    let opts = if options.is_empty() {
        String::new()
    } else {
        format!(" {}", options)
    };

    format!(
        r#"#!/bin/bash
# Screensaver hook. Launches the selected effect and keeps the cursor
# hidden while it runs. Regenerate with the nightwall selector.

hide_cursor() {{ hyprctl keyword cursor:invisible true >/dev/null 2>&1; }}
show_cursor() {{ hyprctl keyword cursor:invisible false >/dev/null 2>&1; }}

cleanup() {{
  show_cursor
  [ -n "$SAVER_PID" ] && kill "$SAVER_PID" 2>/dev/null
  exit 0
}}
trap cleanup INT TERM HUP

hide_cursor
SDL_VIDEODRIVER=wayland {dir}/{key}{opts} >/dev/null 2>&1 &
SAVER_PID=$!

if [ "$1" = "launch" ]; then
  # Invoked by the compositor trigger: follow the child alone
  while kill -0 "$SAVER_PID" 2>/dev/null; do
    sleep 0.5
  done
else
  # Direct launch: also bail out when the saver window loses focus
  while kill -0 "$SAVER_PID" 2>/dev/null; do
    if ! hyprctl activewindow 2>/dev/null | grep -q "{key}"; then
      break
    fi
    sleep 0.5
  done
fi

cleanup
"#,
        dir = effect_dir,
        key = key,
        opts = opts
    )
}

/// Write the hook atomically (tmp + rename) with mode 0755
pub fn install_at(path: &Path, effect_dir: &str, key: &str, options: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = render_script(effect_dir, key, options);
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o755))?;
    }

    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Install the hook for `key` into the standard location. The effect
/// binaries are expected alongside the hook script.
pub fn install(key: &str, options: &str) -> Result<PathBuf> {
    let path = hook_path();
    let dir = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    install_at(&path, &dir, key, options)?;
    Ok(path)
}

/// Fetch the stock hook into the backup cache if it isn't there yet
fn ensure_backup() -> Result<PathBuf> {
    let backup = backup_path();
    if backup.is_file() {
        return Ok(backup);
    }
    if let Some(parent) = backup.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let status = Command::new("curl")
        .args(["-fsSL", "-o"])
        .arg(&backup)
        .arg(DEFAULT_HOOK_URL)
        .status()
        .map_err(|e| Error::Subprocess(format!("curl: {}", e)))?;
    if !status.success() {
        return Err(Error::Subprocess("curl failed to fetch default hook".into()));
    }
    Ok(backup)
}

/// Put the stock hook back, byte for byte, from the cache
pub fn restore_default() -> Result<PathBuf> {
    let backup = ensure_backup()?;
    let path = hook_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(&backup, &path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_single_launch_line() {
        let script = render_script("/opt/savers", "fishsaver", "-t 20 -m 10");
        let launch =
            "SDL_VIDEODRIVER=wayland /opt/savers/fishsaver -t 20 -m 10 >/dev/null 2>&1 &";
        assert_eq!(script.matches(launch).count(), 1);
        assert!(script.starts_with("#!/bin/bash"));
        assert!(script.contains("kill -0 \"$SAVER_PID\""));
        assert!(script.contains("trap cleanup INT TERM HUP"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_script("/x", "balls", "-t 8");
        let b = render_script("/x", "balls", "-t 8");
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_double_space_without_options() {
        let script = render_script("/x", "balls", "");
        assert!(script.contains("SDL_VIDEODRIVER=wayland /x/balls >/dev/null 2>&1 &"));
    }

    #[test]
    fn test_install_at_round_trips_byte_identical() {
        let dir = std::env::temp_dir().join(format!("nightwall-hook-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hook");

        install_at(&path, "/opt/savers", "fishsaver", "-t 20 -m 10").unwrap();
        let first = std::fs::read(&path).unwrap();

        install_at(&path, "/opt/savers", "fishsaver", "-t 20 -m 10").unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
