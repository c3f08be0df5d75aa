//! Fixed-capacity particle pool with in-place compaction.
//!
//! A contiguous array plus a live count: dead particles are swept out by
//! a write-index pass that preserves the relative order of survivors.

use crate::display::PixelBuffer;
use crate::geometry::Vec2;

#[derive(Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-second vertical acceleration; negative values are buoyant
    pub gravity: f32,
    pub life: f32,
    pub max_life: f32,
    pub color: (u8, u8, u8),
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, color: (u8, u8, u8)) -> Self {
        Self {
            pos,
            vel,
            gravity: 0.0,
            life,
            max_life: life,
            color,
            size: 1.0,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Normalized age: 0 = just born, 1 = about to die
    #[inline]
    pub fn age(&self) -> f32 {
        1.0 - (self.life / self.max_life)
    }
}

pub struct Pool {
    particles: Vec<Particle>,
    cap: usize,
}

impl Pool {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Add a particle; silently dropped when the pool is full
    pub fn emit(&mut self, p: Particle) {
        if self.particles.len() < self.cap {
            self.particles.push(p);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Integrate all particles and compact the dead ones away
    pub fn update(&mut self, dt: f32) {
        let mut write = 0;
        for read in 0..self.particles.len() {
            let mut p = self.particles[read];
            p.life -= dt;
            if p.life <= 0.0 {
                continue;
            }
            p.vel.y += p.gravity * dt;
            p.pos = p.pos + p.vel * dt;
            self.particles[write] = p;
            write += 1;
        }
        self.particles.truncate(write);
    }

    /// Draw particles as soft dots fading with age
    pub fn render(&self, buffer: &mut PixelBuffer) {
        for p in &self.particles {
            let fade = 1.0 - p.age();
            let (r, g, b) = p.color;
            let a = (fade * 255.0) as u8;
            let size = p.size.max(1.0) as i32;
            if size <= 1 {
                buffer.blend_pixel(p.pos.x as i32, p.pos.y as i32, r, g, b, a);
            } else {
                buffer.fill_circle_blend(p.pos.x as i32, p.pos.y as i32, size, r, g, b, a);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_respects_cap() {
        let mut pool = Pool::with_capacity(3);
        for _ in 0..10 {
            pool.emit(Particle::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), 1.0, (255, 0, 0)));
        }
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_compaction_preserves_order() {
        let mut pool = Pool::with_capacity(8);
        for i in 0..4 {
            // Lifetimes 0.05, 1.0, 0.05, 1.0 — every other one dies first
            let life = if i % 2 == 0 { 0.05 } else { 1.0 };
            let mut p = Particle::new(Vec2::new(i as f32, 0.0), Vec2::new(0.0, 0.0), life, (0, 0, 0));
            p.size = i as f32;
            pool.emit(p);
        }
        pool.update(0.1);
        assert_eq!(pool.len(), 2);
        let sizes: Vec<f32> = pool.iter().map(|p| p.size).collect();
        assert_eq!(sizes, vec![1.0, 3.0]);
    }

    #[test]
    fn test_gravity_integration() {
        let mut pool = Pool::with_capacity(1);
        pool.emit(
            Particle::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), 10.0, (0, 0, 0))
                .with_gravity(100.0),
        );
        pool.update(1.0);
        let p = pool.iter().next().unwrap();
        assert!(p.vel.y > 99.0);
        assert!(p.pos.y > 99.0);
    }
}
