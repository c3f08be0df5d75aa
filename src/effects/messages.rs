//! Message marquee. The text sweeps right to left on a ten-second
//! cycle and steps between three heights; the glyph texture is rendered
//! once per text change, never per frame.

use std::process::Command;

use crate::assets;
use crate::display::{render_text, PixelBuffer};
use crate::runtime::Effect;
use crate::texture::Texture;
use crate::util::Rng;

/// One full horizontal sweep
pub const CYCLE_SECS: f32 = 10.0;
/// Vertical step positions as fractions of the viewport height
pub const Y_FRACTIONS: [f32; 3] = [0.2, 0.467, 0.733];
const TEXT_SCALE: u32 = 4;
/// External quote source: any program that prints the quote to stdout
const QUOTE_COMMAND: &str = "omarchy-screensaver-quote";

/// Marquee x for elapsed `t`: starts at the right edge, fully exits left
pub fn marquee_x(t: f32, viewport_w: f32, text_w: f32) -> f32 {
    let f = (t / CYCLE_SECS).rem_euclid(1.0);
    viewport_w - (viewport_w + text_w) * f
}

/// Which of the three heights the current cycle uses
pub fn marquee_y_index(t: f32) -> usize {
    ((t / CYCLE_SECS).floor() as i64).rem_euclid(3) as usize
}

enum Source {
    Fixed(String),
    RandomQuote,
}

pub struct Messages {
    source: Source,
    text: String,
    rendered: Texture,
    cycle: i64,
    speed: f32,
    rng: Rng,
}

/// First stdout line of the external quote program, if it works
fn fetch_quote() -> Option<String> {
    let output = Command::new(QUOTE_COMMAND).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout);
    let line = text.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

impl Messages {
    pub fn new(text: Option<&str>, random_quote: bool, speed: f32, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let source = if random_quote {
            Source::RandomQuote
        } else {
            Source::Fixed(text.unwrap_or("OMARCHY").to_string())
        };

        let text = match &source {
            Source::Fixed(t) => t.clone(),
            Source::RandomQuote => fetch_quote().unwrap_or_else(|| {
                let quotes = assets::quotes();
                quotes[rng.index(quotes.len())].to_string()
            }),
        };
        let rendered = render_text(&text, 230, 230, 240, TEXT_SCALE);

        Self {
            source,
            text,
            rendered,
            cycle: 0,
            speed,
            rng,
        }
    }

    fn next_text(&mut self) -> Option<String> {
        match self.source {
            Source::Fixed(_) => None,
            Source::RandomQuote => Some(fetch_quote().unwrap_or_else(|| {
                let quotes = assets::quotes();
                quotes[self.rng.index(quotes.len())].to_string()
            })),
        }
    }
}

impl Effect for Messages {
    fn update(&mut self, _dt: f32, elapsed: f32, _width: u32, _height: u32) {
        let cycle = ((elapsed * self.speed) / CYCLE_SECS).floor() as i64;
        if cycle != self.cycle {
            self.cycle = cycle;
            if let Some(text) = self.next_text() {
                if text != self.text {
                    self.text = text;
                    self.rendered = render_text(&self.text, 230, 230, 240, TEXT_SCALE);
                }
            }
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32) {
        buffer.clear(0, 0, 0);

        let t = elapsed * self.speed;
        let w = buffer.width() as f32;
        let h = buffer.height() as f32;

        let x = marquee_x(t, w, self.rendered.width() as f32);
        let y = h * Y_FRACTIONS[marquee_y_index(t)];

        buffer.blit_texture(&self.rendered, None, x as i32, y as i32, false);
    }

    fn name(&self) -> &str {
        "Messages"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marquee_sweep_positions() {
        // 400 px of text on a 1600 px viewport
        assert_eq!(marquee_x(0.0, 1600.0, 400.0), 1600.0);
        assert!((marquee_x(5.0, 1600.0, 400.0) - 600.0).abs() < 1e-3);
        // End of cycle wraps back; just before it the text has exited
        assert!((marquee_x(9.999, 1600.0, 400.0) - -399.8).abs() < 0.5);
    }

    #[test]
    fn test_y_steps_cycle_three_heights() {
        assert_eq!(marquee_y_index(0.0), 0);
        assert_eq!(marquee_y_index(10.5), 1);
        assert_eq!(marquee_y_index(20.5), 2);
        assert_eq!(marquee_y_index(30.5), 0);
    }

    #[test]
    fn test_fixed_text_never_rerenders() {
        let mut e = Messages::new(Some("HELLO"), false, 1.0, 1);
        let w0 = e.rendered.width();
        for frame in 0..800 {
            e.update(0.016, frame as f32 * 0.25, 1600, 900);
        }
        assert_eq!(e.text, "HELLO");
        assert_eq!(e.rendered.width(), w0);
    }

    #[test]
    fn test_fallback_quote_from_embedded_list() {
        // The external command won't exist in test environments, so the
        // embedded list must provide the text
        let e = Messages::new(None, true, 1.0, 5);
        assert!(!e.text.is_empty());
    }
}
