//! Warp starfield: stars fly past the camera, projected from a simple
//! 3-D cloud, growing streaks as they close in.

use crate::display::PixelBuffer;
use crate::runtime::Effect;
use crate::util::Rng;

pub const MIN_STARS: u32 = 50;
pub const MAX_STARS: u32 = 2000;
const DEPTH: f32 = 600.0;
const BASE_SPEED: f32 = 220.0;
const MAX_TRAIL: f32 = 36.0;

struct Star {
    x: f32,
    y: f32,
    z: f32,
}

pub struct Warp {
    stars: Vec<Star>,
    speed: f32,
    rng: Rng,
}

impl Warp {
    pub fn new(count: u32, speed: f32, seed: u64) -> Self {
        let count = count.clamp(MIN_STARS, MAX_STARS);
        let mut rng = Rng::new(seed);
        let mut stars = Vec::with_capacity(count as usize);
        for _ in 0..count {
            stars.push(Self::random_star(&mut rng));
        }

        Self { stars, speed, rng }
    }

    fn random_star(rng: &mut Rng) -> Star {
        Star {
            x: (rng.next_f32() - 0.5) * 1000.0,
            y: (rng.next_f32() - 0.5) * 1000.0,
            z: rng.range_f32(80.0, DEPTH),
        }
    }
}

impl Effect for Warp {
    fn update(&mut self, dt: f32, _elapsed: f32, _width: u32, _height: u32) {
        for star in &mut self.stars {
            star.z -= BASE_SPEED * self.speed * dt;

            // Passed the camera: recycle into the far field
            if star.z <= 1.0 {
                *star = Self::random_star(&mut self.rng);
                star.z = DEPTH - 100.0;
            }
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(0, 0, 0);

        let cx = buffer.width() as f32 / 2.0;
        let cy = buffer.height() as f32 / 2.0;
        let vp_scale = buffer.width().min(buffer.height()) as f32 / 480.0;
        let fov = 256.0 * vp_scale;
        let max_trail = MAX_TRAIL * vp_scale;

        for star in &self.stars {
            let sx = (star.x / star.z) * fov + cx;
            let sy = (star.y / star.z) * fov + cy;

            let closeness = (1.0 - star.z / DEPTH).clamp(0.0, 1.0);
            let v = (closeness * 255.0) as u8;

            // Streak away from the vanishing point, longer when close
            let trail_len = (closeness * max_trail).ceil() as i32;
            if trail_len > 1 {
                let dx = (sx - cx) / star.z;
                let dy = (sy - cy) / star.z;
                for i in 1..=trail_len {
                    let fade = 1.0 - i as f32 / (trail_len as f32 + 1.0);
                    let tv = (v as f32 * fade) as u8;
                    buffer.set_pixel(
                        (sx - dx * i as f32) as i32,
                        (sy - dy * i as f32) as i32,
                        tv,
                        tv,
                        tv.saturating_add(20),
                    );
                }
            }

            if star.z < 100.0 {
                // Near stars flare into a small cross
                buffer.set_pixel(sx as i32, sy as i32, 255, 255, 255);
                buffer.set_pixel(sx as i32 - 1, sy as i32, v, v, v);
                buffer.set_pixel(sx as i32 + 1, sy as i32, v, v, v);
                buffer.set_pixel(sx as i32, sy as i32 - 1, v, v, v);
                buffer.set_pixel(sx as i32, sy as i32 + 1, v, v, v);
            } else {
                buffer.set_pixel(sx as i32, sy as i32, v, v, v);
            }
        }
    }

    fn name(&self) -> &str {
        "Warp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_recycle_in_front_of_camera() {
        let mut e = Warp::new(100, 10.0, 3);
        for frame in 0..600 {
            e.update(0.016, frame as f32 * 0.016, 800, 600);
            for s in &e.stars {
                assert!(s.z > 0.0);
                assert!(s.z <= DEPTH);
            }
        }
    }

    #[test]
    fn test_count_clamped() {
        assert_eq!(Warp::new(1, 1.0, 1).stars.len() as u32, MIN_STARS);
        assert_eq!(Warp::new(100000, 1.0, 1).stars.len() as u32, MAX_STARS);
    }
}
