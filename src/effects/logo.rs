//! Bouncing logo plate. The plate drifts as a kinematic body, and every
//! wall hit jumps its accent hue.

use crate::assets;
use crate::display::PixelBuffer;
use crate::geometry::Vec2;
use crate::runtime::Effect;
use crate::texture::Texture;
use crate::util::hsv_to_rgb;

pub struct LogoBounce {
    pos: Vec2,
    vel: Vec2,
    hue: f32,
    logo: Texture,
    speed: f32,
}

impl LogoBounce {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::new(80.0, 60.0),
            vel: Vec2::new(120.0, 80.0),
            hue: 0.0,
            logo: assets::logo_texture(),
            speed,
        }
    }

    fn bounce_hue(&mut self) {
        self.hue = (self.hue + 47.0) % 360.0;
    }
}

impl Effect for LogoBounce {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        let w = width as f32;
        let h = height as f32;
        let lw = self.logo.width() as f32;
        let lh = self.logo.height() as f32;

        self.pos = self.pos + self.vel * (dt * self.speed);

        let mut bounced = false;
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
            bounced = true;
        } else if self.pos.x + lw >= w {
            self.pos.x = w - lw;
            self.vel.x = -self.vel.x.abs();
            bounced = true;
        }
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.abs();
            bounced = true;
        } else if self.pos.y + lh >= h {
            self.pos.y = h - lh;
            self.vel.y = -self.vel.y.abs();
            bounced = true;
        }

        if bounced {
            self.bounce_hue();
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, _elapsed: f32) {
        buffer.clear(0, 0, 0);

        let x = self.pos.x as i32;
        let y = self.pos.y as i32;
        let w = self.logo.width();
        let h = self.logo.height();

        buffer.blit_texture(&self.logo, None, x, y, false);

        // Accent frame in the current hue
        let (r, g, b) = hsv_to_rgb(self.hue, 0.85, 0.95);
        buffer.fill_rect(x, y, w, 2, r, g, b);
        buffer.fill_rect(x, y + h as i32 - 2, w, 2, r, g, b);
        buffer.fill_rect(x, y, 2, h, r, g, b);
        buffer.fill_rect(x + w as i32 - 2, y, 2, h, r, g, b);
    }

    fn name(&self) -> &str {
        "Logo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_stays_inside_and_hue_advances() {
        let mut e = LogoBounce::new(4.0);
        let hue0 = e.hue;
        let lw = e.logo.width() as f32;
        let lh = e.logo.height() as f32;

        for frame in 0..1200 {
            e.update(0.016, frame as f32 * 0.016, 800, 600);
            assert!(e.pos.x >= -0.01 && e.pos.x + lw <= 800.01);
            assert!(e.pos.y >= -0.01 && e.pos.y + lh <= 600.01);
        }
        assert_ne!(e.hue, hue0, "no bounce in 19 s at 4x speed");
    }
}
