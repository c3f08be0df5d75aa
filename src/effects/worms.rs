//! Worms. Each worm is a kinematic head towing a fixed-length trail;
//! heads wander with a jittering heading, bounce off walls, collide
//! elastically with each other, and ricochet off other worms' bodies.
//! An optional blip plays on collisions.

use crate::assets;
use crate::audio::{AudioPlayer, Chunk};
use crate::display::PixelBuffer;
use crate::geometry::{collide_elastic, reflect, Body, Vec2};
use crate::runtime::Effect;
use crate::util::{hsv_to_rgb, Rng};

pub const MAX_WORMS: u32 = 24;
pub const MAX_TRAIL: u32 = 400;
const HEAD_RADIUS: f32 = 6.0;
/// Segments near the head are ignored for body collisions so a worm
/// doesn't ricochet off its neighbour's neck on every touch
const NECK_SKIP: usize = 6;

struct Worm {
    head: Body,
    /// Trail positions; index 0 is the head, the tail shifts back
    trail: Vec<Vec2>,
    hue: f32,
    hue_speed: f32,
    turn: f32,
}

pub struct Worms {
    worms: Vec<Worm>,
    count: u32,
    trail_len: usize,
    speed: f32,
    rng: Rng,
    needs_spawn: bool,
    audio: Option<(AudioPlayer, Chunk)>,
}

impl Worms {
    pub fn new(count: u32, trail_len: u32, with_audio: bool, speed: f32, seed: u64) -> Self {
        let audio = if with_audio { open_audio() } else { None };

        Self {
            worms: Vec::new(),
            count: count.clamp(1, MAX_WORMS),
            trail_len: trail_len.clamp(10, MAX_TRAIL) as usize,
            speed,
            rng: Rng::new(seed),
            needs_spawn: true,
            audio,
        }
    }

    fn spawn(&mut self, w: f32, h: f32) {
        for _ in 0..self.count {
            let x = self.rng.range_f32(w * 0.1, w * 0.9);
            let y = self.rng.range_f32(h * 0.1, h * 0.9);
            let angle = self.rng.range_f32(0.0, std::f32::consts::TAU);
            let speed = self.rng.range_f32(70.0, 140.0);

            self.worms.push(Worm {
                head: Body::new(x, y, angle.cos() * speed, angle.sin() * speed, HEAD_RADIUS),
                trail: vec![Vec2::new(x, y); self.trail_len],
                hue: self.rng.range_f32(0.0, 360.0),
                hue_speed: self.rng.range_f32(15.0, 50.0),
                turn: 0.0,
            });
        }
    }
}

/// Best-effort audio bring-up; None means mute
fn open_audio() -> Option<(AudioPlayer, Chunk)> {
    let chunk = assets::collision_chunk()?;
    let sdl = sdl2::init().ok()?;
    let subsystem = sdl.audio().ok()?;
    match AudioPlayer::open(&subsystem, &chunk) {
        Ok(player) => Some((player, chunk)),
        Err(e) => {
            eprintln!("audio unavailable: {}", e);
            None
        },
    }
}

impl Effect for Worms {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        let w = width as f32;
        let h = height as f32;

        if self.needs_spawn {
            self.needs_spawn = false;
            self.spawn(w, h);
        }

        let step = dt * self.speed;
        let rng = &mut self.rng;
        let mut collided = false;

        for worm in &mut self.worms {
            // Heading jitter: redraw the turn rate now and then, steer
            // the velocity by it
            if rng.chance(0.02) {
                worm.turn = rng.range_f32(-2.0, 2.0);
            }
            worm.head.vel = worm.head.vel.rotated(worm.turn * step);

            worm.head.integrate(dt, self.speed);
            if worm.head.bounce_walls(w, h) {
                worm.turn = rng.range_f32(-1.5, 1.5);
            }

            // Shift the trail back one slot, head into slot 0
            let len = worm.trail.len();
            worm.trail.copy_within(0..len - 1, 1);
            worm.trail[0] = worm.head.pos;

            worm.hue = (worm.hue + worm.hue_speed * step) % 360.0;
        }

        // Head-head elastic collisions
        for i in 0..self.worms.len() {
            for j in (i + 1)..self.worms.len() {
                let (a, b) = self.worms.split_at_mut(j);
                if collide_elastic(&mut a[i].head, &mut b[0].head) {
                    collided = true;
                }
            }
        }

        // Head against other worms' body segments: reflect the heading
        for i in 0..self.worms.len() {
            let head = self.worms[i].head;
            let mut new_vel = None;

            'search: for (j, other) in self.worms.iter().enumerate() {
                if i == j {
                    continue;
                }
                for seg in other.trail.iter().skip(NECK_SKIP) {
                    let delta = head.pos - *seg;
                    let dist = delta.length();
                    if dist > 0.001 && dist < HEAD_RADIUS * 1.6 {
                        let n = delta * (1.0 / dist);
                        // Only when approaching; once reflected the head
                        // is moving away and the contact is spent
                        if head.vel.dot(n) < 0.0 {
                            new_vel = Some(reflect(head.vel, n));
                        }
                        break 'search;
                    }
                }
            }

            if let Some(v) = new_vel {
                self.worms[i].head.vel = v;
                collided = true;
            }
        }

        if collided {
            if let Some((player, chunk)) = &self.audio {
                player.play(chunk);
            }
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(5, 5, 15);

        for worm in &self.worms {
            let len = worm.trail.len();
            for (i, p) in worm.trail.iter().enumerate().rev() {
                // Thickness tapers linearly head to tail
                let taper = 1.0 - i as f32 / len as f32;
                let radius = (HEAD_RADIUS * (0.35 + 0.65 * taper)) as i32;

                let seg_hue = (worm.hue + i as f32 * 2.0) % 360.0;
                let fade = 0.45 + 0.55 * taper;
                let (r, g, b) = hsv_to_rgb(seg_hue, 0.9, fade);
                buffer.fill_circle(p.x as i32, p.y as i32, radius.max(1), r, g, b);
            }
        }
    }

    fn name(&self) -> &str {
        "Worms"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_shifts_head_first() {
        let mut e = Worms::new(1, 10, false, 1.0, 3);
        e.update(0.016, 0.0, 800, 600);
        let p0 = e.worms[0].trail[0];
        e.update(0.016, 0.016, 800, 600);
        assert_eq!(e.worms[0].trail[1], p0);
        assert_eq!(e.worms[0].trail[0], e.worms[0].head.pos);
    }

    #[test]
    fn test_heads_stay_in_viewport() {
        let mut e = Worms::new(8, 40, false, 5.0, 17);
        for frame in 0..1200 {
            e.update(0.016, frame as f32 * 0.016, 640, 480);
            for worm in &e.worms {
                assert!(worm.head.pos.x >= HEAD_RADIUS - 0.01);
                assert!(worm.head.pos.x <= 640.0 - HEAD_RADIUS + 0.01);
                assert!(worm.head.pos.y >= HEAD_RADIUS - 0.01);
                assert!(worm.head.pos.y <= 480.0 - HEAD_RADIUS + 0.01);
            }
        }
    }

    #[test]
    fn test_heading_jitter_keeps_speed() {
        let mut e = Worms::new(1, 20, false, 1.0, 9);
        e.update(0.016, 0.0, 800, 600);
        let speed0 = e.worms[0].head.vel.length();
        for frame in 1..600 {
            e.update(0.016, frame as f32 * 0.016, 800, 600);
        }
        let speed1 = e.worms[0].head.vel.length();
        // Rotation preserves magnitude; only collisions would change it,
        // and a single worm has nothing to hit
        assert!((speed0 - speed1).abs() / speed0 < 1e-2);
    }

    #[test]
    fn test_counts_clamped() {
        let e = Worms::new(500, 100000, false, 1.0, 1);
        assert_eq!(e.count, MAX_WORMS);
        assert_eq!(e.trail_len, MAX_TRAIL as usize);
    }
}
