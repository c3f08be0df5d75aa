//! Aquarium. Fish are scripted movers crossing the tank in lanes, with a
//! two-frame tail flap; bubbles rise on their own closed-form paths.

use crate::assets;
use crate::display::PixelBuffer;
use crate::runtime::Effect;
use crate::sprite::SpriteSheet;
use crate::texture::Texture;
use crate::util::Rng;

pub const MAX_FISH: u32 = 40;
pub const MAX_BUBBLES: u32 = 60;
const FLAP_PERIOD: f32 = 0.25;
/// Lane index whose occupants bob between two depths mid-crossing
const BOBBING_ROW: usize = 1;
const ROWS: usize = 5;

struct Fish {
    fly_duration: f32,
    delay: f32,
    /// true swims left-to-right (sprite flipped)
    rightward: bool,
    row: usize,
    species: usize,
}

struct Bubble {
    duration: f32,
    delay: f32,
    x_pct: f32,
    wobble: f32,
}

pub struct Fishtank {
    fish: Vec<Fish>,
    bubbles: Vec<Bubble>,
    sheets: [SpriteSheet; 3],
    bubble_tex: Texture,
    speed: f32,
}

/// Horizontal position over one crossing; the sprite fully exits before
/// re-entering.
fn fish_x(f: &Fish, local: f32, w: f32, sprite_w: f32) -> f32 {
    let cycle = local % f.fly_duration;
    let t = cycle / f.fly_duration;
    if f.rightward {
        -sprite_w + t * (w + 2.0 * sprite_w)
    } else {
        w - t * (w + 2.0 * sprite_w)
    }
}

/// Lane y plus the bobbing-row toggle: that row flips between two depths
/// every half flight duration.
fn fish_y(f: &Fish, local: f32, h: f32) -> f32 {
    let lane_h = h * 0.7 / ROWS as f32;
    let base = h * 0.12 + f.row as f32 * lane_h;
    if f.row == BOBBING_ROW {
        let half = f.fly_duration / 2.0;
        if ((local / half).floor() as i64) % 2 == 1 {
            return base + lane_h * 0.45;
        }
    }
    base
}

impl Fishtank {
    pub fn new(fish_count: u32, bubble_count: u32, speed: f32, seed: u64) -> Self {
        let fish_count = fish_count.clamp(1, MAX_FISH);
        let bubble_count = bubble_count.min(MAX_BUBBLES);
        let mut rng = Rng::new(seed);

        let mut fish = Vec::with_capacity(fish_count as usize);
        for i in 0..fish_count {
            fish.push(Fish {
                fly_duration: rng.range_f32(12.0, 26.0),
                delay: i as f32 * 0.9 + rng.range_f32(0.0, 2.0),
                rightward: rng.chance(0.5),
                row: rng.index(ROWS),
                species: rng.index(3),
            });
        }

        let mut bubbles = Vec::with_capacity(bubble_count as usize);
        for i in 0..bubble_count {
            bubbles.push(Bubble {
                duration: rng.range_f32(5.0, 11.0),
                delay: i as f32 * 0.4 + rng.range_f32(0.0, 1.0),
                x_pct: rng.range_f32(0.03, 0.97),
                wobble: rng.range_f32(4.0, 14.0),
            });
        }

        Self {
            fish,
            bubbles,
            sheets: [
                assets::fish_sheet(0),
                assets::fish_sheet(1),
                assets::fish_sheet(2),
            ],
            bubble_tex: assets::bubble_texture(),
            speed,
        }
    }
}

impl Effect for Fishtank {
    fn update(&mut self, _dt: f32, _elapsed: f32, _width: u32, _height: u32) {
        // Scripted movers only
    }

    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32) {
        let w = buffer.width() as f32;
        let h = buffer.height();

        // Water column: deep blue gradient, sandy floor
        for y in 0..h {
            let t = y as f32 / h as f32;
            let r = (6.0 + 10.0 * t) as u8;
            let g = (30.0 + 40.0 * t) as u8;
            let b = (70.0 + 60.0 * t) as u8;
            buffer.hline(0, buffer.width() as i32 - 1, y as i32, r, g, b);
        }
        let floor_h = (h as f32 * 0.06) as u32;
        buffer.fill_rect(0, (h - floor_h) as i32, buffer.width(), floor_h, 120, 96, 60);

        let t_scaled = elapsed * self.speed;

        for bub in &self.bubbles {
            let local = t_scaled - bub.delay;
            if local < 0.0 {
                continue;
            }
            let f = (local % bub.duration) / bub.duration;
            let x = w * bub.x_pct + (local * 2.2).sin() * bub.wobble;
            let y = h as f32 - f * (h as f32 + 20.0);
            buffer.blit_texture(&self.bubble_tex, None, x as i32, y as i32, false);
        }

        for fish in &self.fish {
            let local = t_scaled - fish.delay;
            if local < 0.0 {
                continue;
            }
            let sheet = &self.sheets[fish.species];
            let x = fish_x(fish, local, w, sheet.frame_w as f32);
            let y = fish_y(fish, local, h as f32);
            let frame = sheet.frame_at(local, FLAP_PERIOD);
            buffer.blit_texture(
                &sheet.texture,
                Some(sheet.src_rect(frame)),
                x as i32,
                y as i32,
                fish.rightward,
            );
        }
    }

    fn name(&self) -> &str {
        "Fish Tank"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane_fish(row: usize) -> Fish {
        Fish {
            fly_duration: 10.0,
            delay: 0.0,
            rightward: true,
            row,
            species: 0,
        }
    }

    #[test]
    fn test_fish_crosses_and_wraps() {
        let f = lane_fish(0);
        let start = fish_x(&f, 0.0, 800.0, 36.0);
        assert!((start + 36.0).abs() < 1e-3);
        let end = fish_x(&f, 9.99, 800.0, 36.0);
        assert!(end > 790.0);
        let wrapped = fish_x(&f, 10.01, 800.0, 36.0);
        assert!(wrapped < 0.0);
    }

    #[test]
    fn test_bobbing_row_toggles_each_half_cycle() {
        let f = lane_fish(BOBBING_ROW);
        let y0 = fish_y(&f, 1.0, 600.0);
        let y1 = fish_y(&f, 6.0, 600.0); // second half of the 10 s flight
        let y2 = fish_y(&f, 11.0, 600.0); // back to the first half
        assert!(y1 > y0);
        assert!((y0 - y2).abs() < 1e-3);
    }

    #[test]
    fn test_other_rows_hold_depth() {
        let f = lane_fish(3);
        let y0 = fish_y(&f, 1.0, 600.0);
        let y1 = fish_y(&f, 6.0, 600.0);
        assert!((y0 - y1).abs() < 1e-3);
    }
}
