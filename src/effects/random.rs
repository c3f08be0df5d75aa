//! Effect rotator. Owns a fullscreen banner window and a supervised
//! child: every rotation period the running effect is torn down and a
//! different one launched fullscreen. Input on the rotator exits the
//! whole show.

use std::path::{Path, PathBuf};

use crate::display::{draw_text_centered, PixelBuffer};
use crate::runtime::Effect;
use crate::supervisor::Supervisor;
use crate::util::Rng;

pub const MIN_ROTATE_SECS: f32 = 10.0;
pub const MAX_ROTATE_SECS: f32 = 300.0;
const BANNER_SECS: f32 = 3.0;

/// Effect binaries the rotator looks for next to its own executable
pub const EFFECT_KEYS: &[&str] = &[
    "toasters",
    "fishsaver",
    "matrix",
    "balls",
    "globe",
    "lifeforms",
    "warp",
    "starrynight",
    "rain",
    "hardrain",
    "paperfire",
    "cityscape",
    "logosaver",
    "fadeout",
    "spotlight",
    "wormsaver",
    "messages",
];

/// Pick an index different from `current` (when there's a choice)
fn pick_next(rng: &mut Rng, len: usize, current: Option<usize>) -> usize {
    if len <= 1 {
        return 0;
    }
    loop {
        let idx = rng.index(len);
        if Some(idx) != current {
            return idx;
        }
    }
}

/// Effect binaries present in `dir`
fn discover(dir: &Path) -> Vec<PathBuf> {
    EFFECT_KEYS
        .iter()
        .map(|key| dir.join(key))
        .filter(|p| p.is_file())
        .collect()
}

pub struct RandomSaver {
    binaries: Vec<PathBuf>,
    supervisor: Supervisor,
    current: Option<usize>,
    rotate_secs: f32,
    next_switch: f32,
    banner_until: f32,
    banner: String,
    rng: Rng,
}

impl RandomSaver {
    pub fn new(rotate_secs: f32, seed: u64) -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        let binaries = discover(&dir);
        if binaries.is_empty() {
            eprintln!("randomsaver: no effect binaries found in {}", dir.display());
        }

        Self {
            binaries,
            supervisor: Supervisor::new(),
            current: None,
            rotate_secs: rotate_secs.clamp(MIN_ROTATE_SECS, MAX_ROTATE_SECS),
            next_switch: 0.0,
            banner_until: 0.0,
            banner: String::new(),
            rng: Rng::new(seed),
        }
    }

    fn switch(&mut self, elapsed: f32) {
        if self.binaries.is_empty() {
            return;
        }

        let idx = pick_next(&mut self.rng, self.binaries.len(), self.current);
        self.current = Some(idx);

        let bin = &self.binaries[idx];
        self.banner = bin
            .file_name()
            .map(|n| n.to_string_lossy().to_uppercase())
            .unwrap_or_default();

        let result = self.supervisor.launch(
            &bin.to_string_lossy(),
            &["-f".to_string(), "1".to_string()],
            &[("SDL_VIDEODRIVER", "wayland")],
        );
        if let Err(e) = result {
            eprintln!("randomsaver: {}", e);
        }

        self.banner_until = elapsed + BANNER_SECS;
        self.next_switch = elapsed + self.rotate_secs;
    }
}

impl Effect for RandomSaver {
    fn update(&mut self, _dt: f32, elapsed: f32, _width: u32, _height: u32) {
        let due = self.current.is_none() || elapsed >= self.next_switch;
        let died = self.current.is_some() && !self.supervisor.is_alive();
        if due || died {
            self.switch(elapsed);
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32) {
        buffer.clear(0, 0, 0);
        if elapsed < self.banner_until && !self.banner.is_empty() {
            let y = buffer.height() as i32 / 2 - 16;
            draw_text_centered(buffer, y, "NOW SHOWING", 120, 120, 140, 2);
            draw_text_centered(buffer, y + 28, &self.banner, 230, 230, 240, 4);
        }
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_secs_clamped() {
        assert_eq!(RandomSaver::new(1.0, 1).rotate_secs, MIN_ROTATE_SECS);
        assert_eq!(RandomSaver::new(9999.0, 1).rotate_secs, MAX_ROTATE_SECS);
    }

    #[test]
    fn test_pick_next_avoids_current() {
        let mut rng = Rng::new(77);
        for _ in 0..200 {
            let idx = pick_next(&mut rng, 17, Some(4));
            assert_ne!(idx, 4);
            assert!(idx < 17);
        }
    }

    #[test]
    fn test_pick_next_single_choice() {
        let mut rng = Rng::new(1);
        assert_eq!(pick_next(&mut rng, 1, Some(0)), 0);
    }
}
