//! Bouncing balls: equal-mass elastic collisions against each other and
//! the viewport walls.

use crate::display::PixelBuffer;
use crate::geometry::{collide_elastic, Body};
use crate::runtime::Effect;
use crate::util::{hsv_to_rgb, Rng};

const DEFAULT_COUNT: u32 = 12;
pub const MIN_COUNT: u32 = 2;
pub const MAX_COUNT: u32 = 40;

pub struct Balls {
    bodies: Vec<Body>,
    hues: Vec<f32>,
    count: u32,
    speed: f32,
    rng: Rng,
    needs_spawn: bool,
}

impl Balls {
    pub fn new(count: u32, speed: f32, seed: u64) -> Self {
        let count = count.clamp(MIN_COUNT, MAX_COUNT);
        Self {
            bodies: Vec::with_capacity(count as usize),
            hues: Vec::with_capacity(count as usize),
            count,
            speed,
            rng: Rng::new(seed),
            needs_spawn: true,
        }
    }

    /// Place balls without initial overlap so the first frames don't pop
    fn spawn(&mut self, width: f32, height: f32) {
        let radius = (width.min(height) / 28.0).max(10.0);

        while (self.bodies.len() as u32) < self.count {
            let x = self.rng.range_f32(radius, width - radius);
            let y = self.rng.range_f32(radius, height - radius);
            let candidate = Body::new(x, y, 0.0, 0.0, radius);

            if self.bodies.iter().any(|b| candidate.overlaps(b)) {
                continue;
            }

            let angle = self.rng.range_f32(0.0, std::f32::consts::TAU);
            let speed = self.rng.range_f32(90.0, 220.0);
            let mut body = candidate;
            body.vel.x = angle.cos() * speed;
            body.vel.y = angle.sin() * speed;
            self.bodies.push(body);
            self.hues.push(self.rng.range_f32(0.0, 360.0));
        }
    }
}

impl Effect for Balls {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        let w = width as f32;
        let h = height as f32;

        if self.needs_spawn {
            self.needs_spawn = false;
            self.spawn(w, h);
        }

        for body in &mut self.bodies {
            body.integrate(dt, self.speed);
            body.bounce_walls(w, h);
        }

        // Pairwise elastic collisions
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (left, right) = self.bodies.split_at_mut(j);
                collide_elastic(&mut left[i], &mut right[0]);
            }
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(4, 4, 10);

        for (body, &hue) in self.bodies.iter().zip(&self.hues) {
            let (r, g, b) = hsv_to_rgb(hue, 0.85, 0.95);
            let x = body.pos.x as i32;
            let y = body.pos.y as i32;
            let radius = body.radius as i32;

            buffer.fill_circle(x, y, radius, r, g, b);
            // Specular dot up-left of center
            let hl = (radius as f32 * 0.35) as i32;
            buffer.fill_circle(x - hl, y - hl, radius / 4, 255, 255, 255);
        }
    }

    fn name(&self) -> &str {
        "Bouncing Balls"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two balls head-on: after the collision frame the velocities have
    /// swapped and the centers sit exactly one diameter apart.
    #[test]
    fn test_deterministic_headon_swap() {
        let mut e = Balls::new(2, 1.0, 1);
        e.needs_spawn = false;
        e.bodies = vec![
            Body::new(100.0, 100.0, 100.0, 0.0, 20.0),
            Body::new(300.0, 100.0, -100.0, 0.0, 20.0),
        ];
        e.hues = vec![0.0, 180.0];

        let dt = 0.016;
        let mut swapped_at = None;
        for frame in 0..63 {
            // ~1 s
            e.update(dt, frame as f32 * dt, 800, 600);
            if swapped_at.is_none() && e.bodies[0].vel.x < 0.0 {
                swapped_at = Some(frame);
                let gap = e.bodies[1].pos.x - e.bodies[0].pos.x;
                assert!((gap - 40.0).abs() < 0.5, "gap {} at frame {}", gap, frame);
            }
        }

        assert!(swapped_at.is_some(), "balls never collided");
        assert!((e.bodies[0].vel.x + 100.0).abs() < 1e-3);
        assert!((e.bodies[1].vel.x - 100.0).abs() < 1e-3);
        // No y drift in a perfectly axial collision
        assert!(e.bodies[0].vel.y.abs() < 1e-3);
    }

    #[test]
    fn test_all_bodies_stay_in_viewport() {
        let mut e = Balls::new(10, 3.0, 7);
        let dt = 0.016;
        for frame in 0..600 {
            e.update(dt, frame as f32 * dt, 800, 600);
            for b in &e.bodies {
                assert!(b.pos.x >= b.radius - 0.01 && b.pos.x <= 800.0 - b.radius + 0.01);
                assert!(b.pos.y >= b.radius - 0.01 && b.pos.y <= 600.0 - b.radius + 0.01);
            }
        }
    }

    #[test]
    fn test_spawn_respects_count_clamp() {
        let mut e = Balls::new(1000, 1.0, 3);
        e.update(0.016, 0.0, 800, 600);
        assert_eq!(e.bodies.len() as u32, MAX_COUNT);
    }
}
