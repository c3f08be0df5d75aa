//! Night skyline. Each building carries a window grid whose lit
//! population random-walks, but a toggle only commits when the building
//! keeps between 20% and 40% of its windows lit.

use crate::display::PixelBuffer;
use crate::runtime::Effect;
use crate::util::Rng;

const MIN_TOGGLE_SECS: f32 = 0.5;
const MAX_TOGGLE_SECS: f32 = 2.0;
const LIT_MIN_FRACTION: f32 = 0.20;
const LIT_MAX_FRACTION: f32 = 0.40;
const WINDOW_W: u32 = 6;
const WINDOW_H: u32 = 8;
const WINDOW_GAP: u32 = 5;

struct WindowCell {
    lit: bool,
    next_toggle: f32,
}

struct Building {
    x: i32,
    w: u32,
    h: u32,
    cols: u32,
    rows: u32,
    cells: Vec<WindowCell>,
    shade: u8,
}

impl Building {
    fn lit_count(&self) -> usize {
        self.cells.iter().filter(|c| c.lit).count()
    }

    fn lit_bounds(&self) -> (usize, usize) {
        let n = (self.cols * self.rows) as f32;
        (
            (LIT_MIN_FRACTION * n).floor() as usize,
            (LIT_MAX_FRACTION * n).floor() as usize,
        )
    }
}

pub struct Cityscape {
    buildings: Vec<Building>,
    speed: f32,
    needs_spawn: bool,
    rng: Rng,
}

impl Cityscape {
    pub fn new(speed: f32, seed: u64) -> Self {
        Self {
            buildings: Vec::new(),
            speed,
            needs_spawn: true,
            rng: Rng::new(seed),
        }
    }

    fn spawn(&mut self, width: u32, height: u32) {
        let mut x = -(self.rng.range_i32(0, 30));

        while x < width as i32 {
            let cols = self.rng.range_i32(3, 9) as u32;
            let rows = self.rng.range_i32(6, 22) as u32;
            let w = cols * (WINDOW_W + WINDOW_GAP) + WINDOW_GAP;
            let h = rows * (WINDOW_H + WINDOW_GAP) + WINDOW_GAP + 10;
            let h = h.min(height * 4 / 5);

            let n = (cols * rows) as usize;
            let lo = (LIT_MIN_FRACTION * n as f32).floor() as usize;
            let hi = (LIT_MAX_FRACTION * n as f32).floor() as usize;
            let mut lit_left = self.rng.range_i32(lo as i32, hi.max(lo) as i32) as usize;

            let mut cells = Vec::with_capacity(n);
            for i in 0..n {
                // Distribute the initial lit budget across the remainder
                let remaining = n - i;
                let lit = lit_left > 0 && self.rng.chance(lit_left as f32 / remaining as f32);
                if lit {
                    lit_left -= 1;
                }
                cells.push(WindowCell {
                    lit,
                    next_toggle: self.rng.range_f32(MIN_TOGGLE_SECS, MAX_TOGGLE_SECS),
                });
            }

            self.buildings.push(Building {
                x,
                w,
                h,
                cols,
                rows,
                cells,
                shade: self.rng.range_i32(18, 42) as u8,
            });

            x += w as i32 + self.rng.range_i32(2, 14);
        }
    }
}

impl Effect for Cityscape {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        if self.needs_spawn {
            self.needs_spawn = false;
            self.spawn(width, height);
        }

        let step = dt * self.speed;
        let rng = &mut self.rng;

        for b in &mut self.buildings {
            let (lo, hi) = b.lit_bounds();
            let mut lit = b.lit_count();

            for cell in &mut b.cells {
                cell.next_toggle -= step;
                if cell.next_toggle > 0.0 {
                    continue;
                }
                cell.next_toggle = rng.range_f32(MIN_TOGGLE_SECS, MAX_TOGGLE_SECS);

                // Candidate toggle, committed only inside the population band
                if !rng.chance(0.5) {
                    continue;
                }
                let new_lit = if cell.lit { lit - 1 } else { lit + 1 };
                if new_lit >= lo && new_lit <= hi {
                    cell.lit = !cell.lit;
                    lit = new_lit;
                }
            }
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32) {
        // Sky gradient with a few fixed stars
        let h = buffer.height();
        for y in 0..h {
            let t = y as f32 / h as f32;
            buffer.hline(
                0,
                buffer.width() as i32 - 1,
                y as i32,
                (3.0 + 10.0 * t) as u8,
                (4.0 + 8.0 * t) as u8,
                (18.0 + 20.0 * t) as u8,
            );
        }
        for i in 0..60 {
            let sx = (i * 97) % buffer.width() as i32;
            let sy = (i * 53) % (h as i32 / 2);
            let tw = (((elapsed * 1.3 + i as f32).sin() + 1.0) * 60.0) as u8 + 80;
            buffer.set_pixel(sx, sy, tw, tw, tw);
        }

        let ground = h as i32;
        for b in &self.buildings {
            let top = ground - b.h as i32;
            buffer.fill_rect(b.x, top, b.w, b.h, b.shade, b.shade, b.shade + 8);

            for row in 0..b.rows {
                for col in 0..b.cols {
                    let cell = &b.cells[(row * b.cols + col) as usize];
                    let wx = b.x + (WINDOW_GAP + col * (WINDOW_W + WINDOW_GAP)) as i32;
                    let wy = top + (WINDOW_GAP + row * (WINDOW_H + WINDOW_GAP)) as i32;
                    if wy + (WINDOW_H as i32) >= ground {
                        continue;
                    }
                    let (r, g, bl) = if cell.lit {
                        (236, 212, 120)
                    } else {
                        (b.shade / 2, b.shade / 2, b.shade / 2 + 4)
                    };
                    buffer.fill_rect(wx, wy, WINDOW_W, WINDOW_H, r, g, bl);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "Cityscape"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_population_stays_in_band() {
        let mut e = Cityscape::new(1.0, 21);
        let dt = 0.016;

        for frame in 0..3750 {
            // 60 s
            e.update(dt, frame as f32 * dt, 1280, 720);
            for b in &e.buildings {
                let (lo, hi) = b.lit_bounds();
                let lit = b.lit_count();
                assert!(
                    lit >= lo && lit <= hi,
                    "building lit {} outside [{}, {}]",
                    lit,
                    lo,
                    hi
                );
            }
        }
    }

    #[test]
    fn test_windows_actually_toggle() {
        let mut e = Cityscape::new(1.0, 8);
        e.update(0.016, 0.0, 800, 600);
        let before: Vec<bool> = e
            .buildings
            .iter()
            .flat_map(|b| b.cells.iter().map(|c| c.lit))
            .collect();

        for frame in 1..1250 {
            // 20 s
            e.update(0.016, frame as f32 * 0.016, 800, 600);
        }
        let after: Vec<bool> = e
            .buildings
            .iter()
            .flat_map(|b| b.cells.iter().map(|c| c.lit))
            .collect();
        assert_ne!(before, after, "no window toggled in 20 s");
    }

    #[test]
    fn test_initial_population_in_band() {
        let mut e = Cityscape::new(1.0, 30);
        e.update(0.016, 0.0, 1920, 1080);
        for b in &e.buildings {
            let (lo, hi) = b.lit_bounds();
            let lit = b.lit_count();
            assert!(lit >= lo && lit <= hi);
        }
    }
}
