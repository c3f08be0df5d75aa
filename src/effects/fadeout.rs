//! Fade to black. Captures the screen through the compositor capability
//! and dims it over the configured duration; without a capture it fades
//! a neutral panel instead.

use crate::compositor::Compositor;
use crate::display::PixelBuffer;
use crate::runtime::Effect;
use crate::texture::Texture;

pub struct Fadeout {
    backdrop: Option<Texture>,
    fade_secs: f32,
    speed: f32,
}

impl Fadeout {
    pub fn new(fade_secs: f32, speed: f32, compositor: &dyn Compositor) -> Self {
        Self {
            backdrop: compositor.capture_screen("fadeout"),
            fade_secs: fade_secs.clamp(1.0, 60.0),
            speed,
        }
    }

    /// Remaining brightness at `elapsed`, linear down to zero
    fn factor(&self, elapsed: f32) -> f32 {
        (1.0 - elapsed * self.speed / self.fade_secs).clamp(0.0, 1.0)
    }
}

impl Effect for Fadeout {
    fn update(&mut self, _dt: f32, _elapsed: f32, _width: u32, _height: u32) {}

    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32) {
        let factor = self.factor(elapsed);
        if factor <= 0.0 {
            buffer.clear(0, 0, 0);
            return;
        }

        match &self.backdrop {
            Some(tex) => {
                buffer.blit_texture_scaled(tex, 0, 0, buffer.width(), buffer.height());
            },
            None => {
                buffer.clear(44, 44, 52);
            },
        }
        buffer.fade(factor);
    }

    fn name(&self) -> &str {
        "Fade Out"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Null;

    #[test]
    fn test_fade_reaches_black_and_stays() {
        let e = Fadeout::new(4.0, 1.0, &Null);
        assert_eq!(e.factor(0.0), 1.0);
        assert!((e.factor(2.0) - 0.5).abs() < 1e-3);
        assert_eq!(e.factor(4.0), 0.0);
        assert_eq!(e.factor(100.0), 0.0);

        let mut buf = PixelBuffer::with_size(4, 4);
        e.render(&mut buf, 100.0);
        assert_eq!(buf.get_pixel(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_speed_mult_shortens_fade() {
        let e = Fadeout::new(4.0, 2.0, &Null);
        assert_eq!(e.factor(2.0), 0.0);
    }
}
