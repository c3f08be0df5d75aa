//! Rotating globe. A procedurally textured sphere (value-noise
//! continents, ice caps, shaded oceans) spins while drifting around the
//! viewport as a bouncing body.

use std::f32::consts::{PI, TAU};

use crate::display::PixelBuffer;
use crate::geometry::Body;
use crate::runtime::Effect;
use crate::texture::Texture;

const TEX_W: u32 = 512;
const TEX_H: u32 = 256;
const LAND_THRESHOLD: f32 = 0.45;

// ============================================================================
// Value noise (sampled on the unit sphere so the texture has no seam)
// ============================================================================

fn noise_hash(x: i32, y: i32, z: i32, seed: i32) -> f32 {
    let mut h = x.wrapping_mul(374761393)
        ^ y.wrapping_mul(668265263)
        ^ z.wrapping_mul(1911520717)
        ^ seed.wrapping_mul(1274126177);
    h = (h ^ (h >> 13)).wrapping_mul(1103515245);
    ((h ^ (h >> 16)) & 0x7FFFFFFF) as f32 / 0x7FFFFFFF as f32
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn value_noise(x: f32, y: f32, z: f32, seed: i32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let zi = z.floor() as i32;
    let fx = smoothstep(x - xi as f32);
    let fy = smoothstep(y - yi as f32);
    let fz = smoothstep(z - zi as f32);

    let mut corners = [0.0f32; 8];
    for (k, corner) in corners.iter_mut().enumerate() {
        let (dx, dy, dz) = ((k & 1) as i32, ((k >> 1) & 1) as i32, ((k >> 2) & 1) as i32);
        *corner = noise_hash(xi + dx, yi + dy, zi + dz, seed);
    }

    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    let x00 = lerp(corners[0], corners[1], fx);
    let x10 = lerp(corners[2], corners[3], fx);
    let x01 = lerp(corners[4], corners[5], fx);
    let x11 = lerp(corners[6], corners[7], fx);
    let y0 = lerp(x00, x10, fy);
    let y1 = lerp(x01, x11, fy);
    lerp(y0, y1, fz)
}

fn fbm(x: f32, y: f32, z: f32, octaves: u32, seed: i32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..octaves {
        value += amplitude * value_noise(x * frequency, y * frequency, z * frequency, seed);
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    value
}

// ============================================================================
// Texture generation
// ============================================================================

/// Equirectangular UV to a point on the unit sphere
fn uv_to_sphere(u: f32, v: f32) -> (f32, f32, f32) {
    let lon = u * TAU;
    let lat = (v - 0.5) * PI;
    let cos_lat = lat.cos();
    (cos_lat * lon.cos(), lat.sin(), cos_lat * lon.sin())
}

fn generate_surface() -> Texture {
    let mut tex = Texture::new(TEX_W, TEX_H);
    let seed = 42;
    let noise_scale = 3.0;

    for py in 0..TEX_H {
        let v = py as f32 / TEX_H as f32;
        let latitude = (v - 0.5) * PI;
        let abs_lat = latitude.abs();

        for px in 0..TEX_W {
            let u = px as f32 / TEX_W as f32;
            let (sx, sy, sz) = uv_to_sphere(u, v);
            let n = fbm(sx * noise_scale, sy * noise_scale, sz * noise_scale, 4, seed);

            let (r, g, b) = if abs_lat > 1.2 {
                // Ice caps
                let t = ((abs_lat - 1.2) / 0.2).min(1.0);
                (
                    200 + (55.0 * t) as u8,
                    210 + (45.0 * t) as u8,
                    220 + (35.0 * t) as u8,
                )
            } else if n > LAND_THRESHOLD {
                // Land shades from green lowlands to rocky highlands
                let t = ((n - LAND_THRESHOLD) / (1.0 - LAND_THRESHOLD)).min(1.0);
                (
                    (40.0 + t * 90.0) as u8,
                    (115.0 - t * 35.0) as u8,
                    (32.0 + t * 24.0) as u8,
                )
            } else {
                // Ocean depth
                let depth = 1.0 - n / LAND_THRESHOLD;
                (
                    (10.0 + depth * 15.0) as u8,
                    (30.0 + depth * 40.0 + n * 30.0) as u8,
                    (80.0 + depth * 80.0 + n * 20.0) as u8,
                )
            };

            tex.set_pixel(px, py, r, g, b, 255);
        }
    }

    tex
}

// ============================================================================
// Effect
// ============================================================================

pub struct Globe {
    surface: Texture,
    body: Body,
    spin: f32,
    spin_rate: f32,
    speed: f32,
    sized: bool,
}

impl Globe {
    pub fn new(spin_rate: f32, speed: f32) -> Self {
        Self {
            surface: generate_surface(),
            body: Body::new(240.0, 200.0, 60.0, 40.0, 100.0),
            spin: 0.0,
            spin_rate: spin_rate.clamp(0.02, 4.0),
            speed,
            sized: false,
        }
    }
}

impl Effect for Globe {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        if !self.sized {
            self.sized = true;
            self.body.radius = (width.min(height) / 5) as f32;
        }

        self.spin += self.spin_rate * self.speed * dt;
        self.body.integrate(dt, self.speed);
        self.body.bounce_walls(width as f32, height as f32);
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(0, 0, 4);

        let cx = self.body.pos.x;
        let cy = self.body.pos.y;
        let radius = self.body.radius;
        let r_i = radius as i32;

        // Key light from the upper left, slightly toward the camera
        let (lx, ly, lz) = (-0.45, -0.5, 0.74);

        for dy in -r_i..=r_i {
            let py = cy as i32 + dy;
            let ny = dy as f32 / radius;
            let chord = 1.0 - ny * ny;
            if chord <= 0.0 {
                continue;
            }
            let half = (chord.sqrt() * radius) as i32;

            for dx in -half..=half {
                let px = cx as i32 + dx;
                let nx = dx as f32 / radius;
                let nz2 = 1.0 - nx * nx - ny * ny;
                if nz2 <= 0.0 {
                    continue;
                }
                let nz = nz2.sqrt();

                // Spin shifts longitude; latitude is fixed by ny
                let lon = nx.atan2(nz) + self.spin;
                let lat = ny.asin();
                let u = (lon / TAU).rem_euclid(1.0);
                let v = lat / PI + 0.5;

                let (r, g, b, _) = self.surface.sample_wrapped(
                    (u * TEX_W as f32) as i32,
                    (v * TEX_H as f32) as i32,
                );

                let shade = (nx * lx + ny * ly + nz * lz).max(0.08);
                buffer.set_pixel(
                    px,
                    py,
                    (r as f32 * shade) as u8,
                    (g as f32 * shade) as u8,
                    (b as f32 * shade) as u8,
                );
            }
        }

        // Thin atmosphere rim
        buffer.draw_circle(cx as i32, cy as i32, r_i + 1, 40, 70, 130);
        buffer.draw_circle(cx as i32, cy as i32, r_i + 2, 20, 35, 70);
    }

    fn name(&self) -> &str {
        "Globe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic_and_bounded() {
        for i in 0..200 {
            let x = i as f32 * 0.13;
            let a = value_noise(x, 0.5, 1.5, 42);
            let b = value_noise(x, 0.5, 1.5, 42);
            assert_eq!(a, b);
            assert!((0.0..=1.0).contains(&a));
        }
    }

    #[test]
    fn test_surface_texture_dimensions() {
        let tex = generate_surface();
        assert_eq!(tex.width(), TEX_W);
        assert_eq!(tex.height(), TEX_H);
    }

    #[test]
    fn test_globe_bounces_in_viewport() {
        let mut e = Globe::new(0.3, 2.0);
        for frame in 0..1500 {
            e.update(0.016, frame as f32 * 0.016, 800, 600);
            let r = e.body.radius;
            assert!(e.body.pos.x >= r - 0.01 && e.body.pos.x <= 800.0 - r + 0.01);
            assert!(e.body.pos.y >= r - 0.01 && e.body.pos.y <= 600.0 - r + 0.01);
        }
    }
}
