//! Roving spotlight: a disc-shaped window onto a screen capture wanders
//! the dark viewport as a bouncing body. With no capture available the
//! light roams over the embedded logo on a dim backdrop.

use crate::assets;
use crate::compositor::Compositor;
use crate::display::PixelBuffer;
use crate::geometry::Body;
use crate::runtime::Effect;
use crate::texture::Texture;

const FALLBACK_W: u32 = 800;
const FALLBACK_H: u32 = 600;

pub struct Spotlight {
    backdrop: Texture,
    light: Body,
    radius_override: Option<u32>,
    speed: f32,
    sized: bool,
}

/// Dim panel with the logo plate centered, used when capture fails
fn fallback_backdrop() -> Texture {
    let mut tex = Texture::new(FALLBACK_W, FALLBACK_H);
    tex.fill_rect(0, 0, FALLBACK_W, FALLBACK_H, 30, 32, 44, 255);

    let logo = assets::logo_texture();
    let ox = (FALLBACK_W - logo.width()) / 2;
    let oy = (FALLBACK_H - logo.height()) / 2;
    for y in 0..logo.height() {
        for x in 0..logo.width() {
            let (r, g, b, a) = logo.sample_clamped(x as i32, y as i32);
            if a > 0 {
                tex.set_pixel(ox + x, oy + y, r, g, b, a);
            }
        }
    }
    tex
}

impl Spotlight {
    pub fn new(radius: Option<u32>, speed: f32, compositor: &dyn Compositor) -> Self {
        let backdrop = compositor
            .capture_screen("spotlight")
            .unwrap_or_else(fallback_backdrop);

        Self {
            backdrop,
            light: Body::new(200.0, 160.0, 150.0, 110.0, 100.0),
            radius_override: radius,
            speed,
            sized: false,
        }
    }
}

impl Effect for Spotlight {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        if !self.sized {
            self.sized = true;
            self.light.radius = match self.radius_override {
                Some(r) => r.clamp(20, width.min(height) / 2) as f32,
                None => (width.min(height) / 5) as f32,
            };
        }

        self.light.integrate(dt, self.speed);
        self.light.bounce_walls(width as f32, height as f32);
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(0, 0, 0);
        buffer.fill_circle_textured(
            self.light.pos.x as i32,
            self.light.pos.y as i32,
            self.light.radius as i32,
            &self.backdrop,
        );
        // Soft rim so the disc doesn't end in a hard pixel edge
        buffer.draw_circle(
            self.light.pos.x as i32,
            self.light.pos.y as i32,
            self.light.radius as i32,
            40,
            40,
            46,
        );
    }

    fn name(&self) -> &str {
        "Spotlight"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Null;

    #[test]
    fn test_light_bounces_inside_viewport() {
        let mut e = Spotlight::new(Some(60), 3.0, &Null);
        for frame in 0..1500 {
            e.update(0.016, frame as f32 * 0.016, 800, 600);
            let r = e.light.radius;
            assert!(e.light.pos.x >= r - 0.01 && e.light.pos.x <= 800.0 - r + 0.01);
            assert!(e.light.pos.y >= r - 0.01 && e.light.pos.y <= 600.0 - r + 0.01);
        }
    }

    #[test]
    fn test_fallback_backdrop_used_without_capture() {
        let e = Spotlight::new(None, 1.0, &Null);
        assert_eq!(e.backdrop.width(), FALLBACK_W);
        assert_eq!(e.backdrop.height(), FALLBACK_H);
    }

    #[test]
    fn test_spotlight_reveals_backdrop() {
        let mut e = Spotlight::new(Some(50), 1.0, &Null);
        e.update(0.016, 0.0, 800, 600);
        let mut buf = PixelBuffer::with_size(800, 600);
        e.render(&mut buf, 0.0);

        // Inside the disc: backdrop colors; far outside: black
        let cx = e.light.pos.x as i32;
        let cy = e.light.pos.y as i32;
        assert_ne!(buf.get_pixel(cx, cy), Some((0, 0, 0)));
        assert_eq!(buf.get_pixel(10, 590), Some((0, 0, 0)));
    }
}
