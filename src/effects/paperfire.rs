//! Paper fire. A cell grid carries three fields — fire intensity, char
//! burn, and ash — seeded along the bottom edge. Heat bleeds into the
//! four neighbours and decays in place; hot cells char the paper, heavy
//! char turns to ash, and embers, ash flecks, and smoke lift off as
//! particles. When the sheet is spent the simulation resets.

use crate::display::PixelBuffer;
use crate::geometry::Vec2;
use crate::particles::{Particle, Pool};
use crate::runtime::Effect;
use crate::util::{lerp_color, Rng};

/// Screen pixels per fire cell
const CELL: u32 = 8;
/// Fixed simulation rate, accumulated from frame dt like the frame loop
const SIM_STEP: f32 = 1.0 / 60.0;
/// Per-step heat transferred to each 4-neighbour
const SPREAD: f32 = 0.075;
/// Per-step self decay
const DECAY: f32 = 0.1;
/// Intensity below which a cell no longer spreads
const SPREAD_FLOOR: f32 = 0.1;
const PARTICLE_CAP: usize = 600;
/// Idle seconds past the burn duration before the sheet resets
const RESET_SLACK: f32 = 10.0;

#[derive(Clone, Copy)]
enum Species {
    Ember,
    Ash,
    Smoke,
}

pub struct Paperfire {
    intensity: Vec<f32>,
    burn: Vec<f32>,
    ash: Vec<f32>,
    gx: usize,
    gy: usize,
    particles: Pool,
    sim_accum: f32,
    animation_time: f32,
    /// Total burn duration before the reset window opens
    burn_secs: f32,
    speed: f32,
    rng: Rng,
    scratch: Vec<f32>,
}

impl Paperfire {
    pub fn new(burn_secs: f32, speed: f32, seed: u64) -> Self {
        Self {
            intensity: Vec::new(),
            burn: Vec::new(),
            ash: Vec::new(),
            gx: 0,
            gy: 0,
            particles: Pool::with_capacity(PARTICLE_CAP),
            sim_accum: 0.0,
            animation_time: 0.0,
            burn_secs: burn_secs.clamp(10.0, 300.0),
            speed,
            rng: Rng::new(seed),
            scratch: Vec::new(),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let gx = (width / CELL).max(1) as usize;
        let gy = (height / CELL).max(1) as usize;
        if gx != self.gx || gy != self.gy {
            self.gx = gx;
            self.gy = gy;
            self.reset();
        }
    }

    /// Fresh sheet: clear all fields and ignite three bottom-row seeds
    fn reset(&mut self) {
        let n = self.gx * self.gy;
        self.intensity = vec![0.0; n];
        self.burn = vec![0.0; n];
        self.ash = vec![0.0; n];
        self.scratch = vec![0.0; n];
        self.animation_time = 0.0;
        self.ignite();
    }

    /// The three ignition points. They start on the bottom row and climb
    /// the sheet over the burn duration, charring as they go.
    fn ignite(&mut self) {
        let frac = (self.animation_time / self.burn_secs).clamp(0.0, 1.0);
        let row = self.gy - 1 - (frac * (self.gy - 1) as f32) as usize;
        for k in 0..3 {
            let x = (self.gx * (k * 2 + 1)) / 6;
            let i = row * self.gx + x.min(self.gx - 1);
            self.intensity[i] = self.intensity[i].max(self.rng.range_f32(0.6, 0.8));
        }
    }

    fn step(&mut self) {
        let gx = self.gx;
        let gy = self.gy;

        // The seeds keep feeding heat until the burn duration is spent,
        // then the fire is left to die down
        if self.animation_time < self.burn_secs {
            self.ignite();
        }

        // Spread pass writes into scratch so a step observes a consistent
        // snapshot: spreading cells transfer heat to their 4-neighbours
        // (deducted from themselves) and every cell decays in place, so
        // an unfed fire always dies down
        self.scratch.copy_from_slice(&self.intensity);
        for y in 0..gy {
            for x in 0..gx {
                let i = y * gx + x;
                let heat = self.intensity[i];
                self.scratch[i] -= DECAY * heat;
                if heat <= SPREAD_FLOOR {
                    continue;
                }

                let share = SPREAD * heat;
                if x > 0 {
                    self.scratch[i - 1] += share;
                    self.scratch[i] -= share;
                }
                if x + 1 < gx {
                    self.scratch[i + 1] += share;
                    self.scratch[i] -= share;
                }
                if y > 0 {
                    self.scratch[i - gx] += share;
                    self.scratch[i] -= share;
                }
                if y + 1 < gy {
                    self.scratch[i + gx] += share;
                    self.scratch[i] -= share;
                }
            }
        }
        for (dst, &src) in self.intensity.iter_mut().zip(&self.scratch) {
            *dst = src.clamp(0.0, 1.0);
        }

        // Char and ash accumulate where it's hot; both saturate
        for i in 0..gx * gy {
            if self.intensity[i] > 0.5 {
                self.burn[i] = (self.burn[i] + 0.012).min(1.0);
            }
            if self.burn[i] > 0.8 {
                self.ash[i] = (self.ash[i] + 0.008).min(1.0);
            }
        }

        // Particle emission off hot cells
        for y in 0..gy {
            for x in 0..gx {
                let i = y * gx + x;
                if self.intensity[i] <= 0.5 || !self.rng.chance(0.004) {
                    continue;
                }

                let px = (x as u32 * CELL) as f32 + CELL as f32 / 2.0;
                let py = (y as u32 * CELL) as f32;
                let species = match self.rng.range_i32(0, 2) {
                    0 => Species::Ember,
                    1 => Species::Ash,
                    _ => Species::Smoke,
                };

                let p = match species {
                    Species::Ember => Particle::new(
                        Vec2::new(px, py),
                        Vec2::new(self.rng.range_f32(-20.0, 20.0), self.rng.range_f32(-90.0, -40.0)),
                        self.rng.range_f32(0.5, 1.4),
                        (255, 150, 40),
                    )
                    .with_gravity(60.0),
                    Species::Ash => Particle::new(
                        Vec2::new(px, py),
                        Vec2::new(self.rng.range_f32(-12.0, 12.0), self.rng.range_f32(-25.0, 0.0)),
                        self.rng.range_f32(1.5, 3.0),
                        (120, 115, 110),
                    )
                    .with_gravity(25.0),
                    Species::Smoke => Particle::new(
                        Vec2::new(px, py),
                        Vec2::new(self.rng.range_f32(-8.0, 8.0), self.rng.range_f32(-50.0, -25.0)),
                        self.rng.range_f32(2.0, 4.0),
                        (70, 70, 78),
                    )
                    .with_gravity(-15.0)
                    .with_size(2.0),
                };
                self.particles.emit(p);
            }
        }
    }
}

impl Effect for Paperfire {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        self.resize(width, height);
        self.animation_time += dt * self.speed;
        self.sim_accum += dt * self.speed;

        // Fixed timestep with a step cap so stalls don't spiral
        let mut steps = 0;
        while self.sim_accum >= SIM_STEP && steps < 4 {
            self.sim_accum -= SIM_STEP;
            steps += 1;
            self.step();
        }
        if steps >= 4 {
            self.sim_accum = 0.0;
        }

        self.particles.update(dt * self.speed);

        if self.animation_time > self.burn_secs + RESET_SLACK && self.particles.is_empty() {
            self.reset();
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(12, 10, 10);

        let paper = (222, 214, 196);
        let char_color = (35, 28, 24);
        let ash_color = (105, 102, 100);

        for y in 0..self.gy {
            for x in 0..self.gx {
                let i = y * self.gx + x;

                // Paper chars, then ashes over
                let mut c = lerp_color(paper, char_color, self.burn[i]);
                c = lerp_color(c, ash_color, self.ash[i]);

                // Active flame glows through
                let heat = self.intensity[i];
                if heat > 0.05 {
                    let flame = if heat > 0.6 {
                        lerp_color((255, 120, 20), (255, 235, 160), (heat - 0.6) / 0.4)
                    } else {
                        lerp_color(c, (255, 120, 20), heat / 0.6)
                    };
                    c = flame;
                }

                buffer.fill_rect(
                    (x as u32 * CELL) as i32,
                    (y as u32 * CELL) as i32,
                    CELL,
                    CELL,
                    c.0,
                    c.1,
                    c.2,
                );
            }
        }

        self.particles.render(buffer);
    }

    fn name(&self) -> &str {
        "Paper Fire"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_stay_normalized_and_ash_monotonic() {
        let mut e = Paperfire::new(45.0, 1.0, 13);
        let dt = 0.016;
        let mut last_ash_total = 0.0f32;

        for frame in 0..1800 {
            // 30 s
            e.update(dt, frame as f32 * dt, 400, 300);

            for i in 0..e.gx * e.gy {
                assert!((0.0..=1.0).contains(&e.intensity[i]), "intensity out of range");
                assert!((0.0..=1.0).contains(&e.burn[i]));
                assert!((0.0..=1.0).contains(&e.ash[i]));
            }

            let ash_total: f32 = e.ash.iter().sum();
            assert!(ash_total >= last_ash_total - 1e-4, "ash decreased");
            last_ash_total = ash_total;

            assert!(e.particles.len() <= PARTICLE_CAP);
        }
    }

    #[test]
    fn test_single_seed_burns_out() {
        let mut e = Paperfire::new(10.0, 1.0, 5);
        e.resize(160, 120);
        // Past the burn window, so the seeds stop feeding
        e.animation_time = 100.0;
        e.intensity.iter_mut().for_each(|v| *v = 0.0);
        let center = (e.gy / 2) * e.gx + e.gx / 2;
        e.intensity[center] = 0.7;

        // A lone seed loses more heat than it receives back; eventually
        // the whole grid sits below the spread threshold
        for _ in 0..6000 {
            e.step();
        }
        assert!(e.intensity.iter().all(|&v| v < SPREAD_FLOOR));
    }

    #[test]
    fn test_reset_reseeds_bottom_row() {
        let mut e = Paperfire::new(10.0, 1.0, 2);
        e.resize(160, 120);
        let bottom_heat: f32 = e.intensity[(e.gy - 1) * e.gx..].iter().sum();
        assert!(bottom_heat >= 0.6 * 3.0 * 0.9, "three seeds expected");
    }
}
