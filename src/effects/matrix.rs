//! Glyph rain. A pool of falling character streams; trailing characters
//! decay, random cells re-brighten, retired streams respawn so the pool
//! stays near its cap.

use crate::display::{draw_char_scaled, PixelBuffer, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::runtime::Effect;
use crate::util::Rng;

pub const MAX_STREAMS: usize = 200;
/// The pool refills whenever it drops more than this far below the cap
const REFILL_SLACK: usize = 10;
const GLYPH_SCALE: u32 = 2;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&*+=<>?!";
/// Reference frame for the per-frame fall speeds (16.67 ms)
const BASE_FRAME: f32 = 1.0 / 60.0;

struct Stream {
    active: bool,
    col: i32,
    /// Head position in pixels below the top edge
    head_y: f32,
    /// Pixels per reference frame
    fall_speed: f32,
    chars: Vec<u8>,
    brightness: Vec<u8>,
}

pub struct MatrixRain {
    streams: Vec<Stream>,
    max_streams: usize,
    speed: f32,
    rng: Rng,
}

impl MatrixRain {
    pub fn new(max_streams: usize, speed: f32, seed: u64) -> Self {
        let max_streams = max_streams.clamp(20, MAX_STREAMS);
        let mut streams = Vec::with_capacity(max_streams);
        for _ in 0..max_streams {
            streams.push(Stream {
                active: false,
                col: 0,
                head_y: 0.0,
                fall_speed: 0.0,
                chars: Vec::new(),
                brightness: Vec::new(),
            });
        }

        Self {
            streams,
            max_streams,
            speed,
            rng: Rng::new(seed),
        }
    }

    fn cell_w() -> i32 {
        (GLYPH_WIDTH * GLYPH_SCALE) as i32
    }

    fn cell_h() -> i32 {
        (GLYPH_HEIGHT * GLYPH_SCALE) as i32
    }

    fn spawn_into(&mut self, idx: usize, width: u32) {
        let cols = (width as i32 / Self::cell_w()).max(1);
        let len = self.rng.range_i32(8, 30) as usize;

        let mut chars = Vec::with_capacity(len);
        let mut brightness = Vec::with_capacity(len);
        for i in 0..len {
            chars.push(CHARSET[self.rng.index(CHARSET.len())]);
            // Brightness ramps down the tail
            let fade = 255 - (i * 220 / len) as u8;
            brightness.push(fade);
        }

        let s = &mut self.streams[idx];
        s.active = true;
        s.col = self.rng.range_i32(0, cols - 1);
        s.head_y = -self.rng.range_f32(0.0, 400.0);
        s.fall_speed = self.rng.range_f32(2.0, 8.0);
        s.chars = chars;
        s.brightness = brightness;
    }

    pub fn active_count(&self) -> usize {
        self.streams.iter().filter(|s| s.active).count()
    }
}

impl Effect for MatrixRain {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        let frames = dt / BASE_FRAME;
        let cell_h = Self::cell_h() as f32;

        for i in 0..self.streams.len() {
            if !self.streams[i].active {
                continue;
            }

            self.streams[i].head_y += self.streams[i].fall_speed * self.speed * frames;

            // Decay the tail, occasionally re-fire a cell to full white
            let len = self.streams[i].chars.len();
            for c in 0..len {
                let b = self.streams[i].brightness[c];
                self.streams[i].brightness[c] = b.saturating_sub((frames * 1.2) as u8);
            }
            if self.rng.chance(0.015) {
                let c = self.rng.index(len);
                self.streams[i].brightness[c] = 255;
                self.streams[i].chars[c] = CHARSET[self.rng.index(CHARSET.len())];
            }

            // Retire once the whole trail has left the bottom
            let trail_px = len as f32 * cell_h;
            if self.streams[i].head_y - trail_px > height as f32 {
                self.streams[i].active = false;
            }
        }

        // Keep the pool near its cap
        let mut active = self.active_count();
        if active + REFILL_SLACK <= self.max_streams {
            for i in 0..self.streams.len() {
                if active >= self.max_streams {
                    break;
                }
                if !self.streams[i].active {
                    self.spawn_into(i, width);
                    active += 1;
                }
            }
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(0, 0, 0);
        let cell_w = Self::cell_w();
        let cell_h = Self::cell_h();

        for s in self.streams.iter().filter(|s| s.active) {
            let x = s.col * cell_w;
            for (i, (&ch, &b)) in s.chars.iter().zip(&s.brightness).enumerate() {
                let y = s.head_y as i32 - i as i32 * cell_h;
                if y < -cell_h || y > buffer.height() as i32 {
                    continue;
                }
                if i == 0 {
                    // Head glows white
                    draw_char_scaled(buffer, x, y, ch as char, 220, 255, 220, GLYPH_SCALE);
                } else {
                    draw_char_scaled(buffer, x, y, ch as char, 0, b, b / 4, GLYPH_SCALE);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "Matrix Rain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_stays_near_cap() {
        let mut e = MatrixRain::new(200, 1.0, 5);
        let dt = 0.016;
        // One second of simulation: spawn phase completes immediately,
        // retirements must be refilled within the slack
        for frame in 0..63 {
            e.update(dt, frame as f32 * dt, 1920, 1080);
            let active = e.active_count();
            assert!(active >= 190, "active {} at frame {}", active, frame);
            assert!(active <= 200);
        }
    }

    #[test]
    fn test_cap_clamped() {
        let e = MatrixRain::new(100000, 1.0, 1);
        assert_eq!(e.max_streams, MAX_STREAMS);
        let e = MatrixRain::new(0, 1.0, 1);
        assert_eq!(e.max_streams, 20);
    }

    #[test]
    fn test_streams_retire_below_bottom() {
        let mut e = MatrixRain::new(20, 10.0, 2);
        // Long simulation on a tiny screen forces retirement and respawn
        for frame in 0..2000 {
            e.update(0.016, frame as f32 * 0.016, 320, 200);
        }
        for s in e.streams.iter().filter(|s| s.active) {
            let trail_px = s.chars.len() as f32 * MatrixRain::cell_h() as f32;
            assert!(s.head_y - trail_px <= 200.0 + 1.0);
        }
    }
}
