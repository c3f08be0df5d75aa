//! Flying toasters. Scripted movers: each toaster's position is a pure
//! function of elapsed time, repeating modulo its flight duration, with
//! a four-frame ping-pong wing flap.

use crate::assets;
use crate::display::PixelBuffer;
use crate::runtime::Effect;
use crate::sprite::SpriteSheet;
use crate::texture::Texture;
use crate::util::Rng;

pub const MAX_TOASTERS: u32 = 24;
pub const MAX_TOAST: u32 = 16;
const FLAP_PERIOD: f32 = 0.09;

/// Closed-form flight parameters
struct AnimParam {
    fly_duration: f32,
    delay: f32,
    /// false: top-right to bottom-left (the classic), true: mirrored
    reverse: bool,
}

/// Launch anchor as percentages of the viewport
struct Pose {
    anchor_x_pct: f32,
    anchor_y_pct: f32,
}

struct Mover {
    anim: AnimParam,
    pose: Pose,
    /// Wing flap rate varies slightly per toaster
    flap_scale: f32,
}

pub struct Toasters {
    toasters: Vec<Mover>,
    toast: Vec<Mover>,
    sheet: SpriteSheet,
    toast_tex: Texture,
    speed: f32,
}

/// Where a mover is at `elapsed`, or None while its delay hasn't passed.
/// The path runs diagonally across the full viewport; fraction `f` of
/// the cycle maps linearly onto it.
fn mover_pos(m: &Mover, elapsed: f32, speed: f32, w: f32, h: f32) -> Option<(f32, f32, f32)> {
    let local = elapsed * speed - m.anim.delay;
    if local < 0.0 {
        return None;
    }

    let cycle = local % m.anim.fly_duration;
    let f = cycle / m.anim.fly_duration;

    // Anchors spread launch points along the top and right edges
    let start_x = w * m.pose.anchor_x_pct;
    let start_y = h * m.pose.anchor_y_pct - h * 0.25;

    // Full crossing plus margins so sprites enter and leave off-screen
    let span_x = w * 1.3;
    let span_y = h * 0.8;

    let (x, y) = if m.anim.reverse {
        (w - start_x - span_x * (1.0 - f) - 60.0, start_y + span_y * f)
    } else {
        (start_x - span_x * f, start_y + span_y * f)
    };

    Some((x, y, local))
}

impl Toasters {
    pub fn new(toaster_count: u32, toast_count: u32, speed: f32, seed: u64) -> Self {
        let toaster_count = toaster_count.clamp(1, MAX_TOASTERS);
        let toast_count = toast_count.min(MAX_TOAST);
        let mut rng = Rng::new(seed);

        let mut toasters = Vec::with_capacity(toaster_count as usize);
        for i in 0..toaster_count {
            toasters.push(Mover {
                anim: AnimParam {
                    fly_duration: rng.range_f32(9.0, 16.0),
                    delay: i as f32 * 1.1 + rng.range_f32(0.0, 0.8),
                    reverse: rng.chance(0.15),
                },
                pose: Pose {
                    anchor_x_pct: rng.range_f32(0.25, 1.45),
                    anchor_y_pct: rng.range_f32(0.0, 0.9),
                },
                flap_scale: rng.range_f32(0.8, 1.3),
            });
        }

        let mut toast = Vec::with_capacity(toast_count as usize);
        for i in 0..toast_count {
            toast.push(Mover {
                anim: AnimParam {
                    // Toast drifts slower than the toasters carrying it
                    fly_duration: rng.range_f32(14.0, 22.0),
                    delay: 2.0 + i as f32 * 2.3 + rng.range_f32(0.0, 1.5),
                    reverse: false,
                },
                pose: Pose {
                    anchor_x_pct: rng.range_f32(0.3, 1.4),
                    anchor_y_pct: rng.range_f32(0.0, 0.9),
                },
                flap_scale: 1.0,
            });
        }

        Self {
            toasters,
            toast,
            sheet: assets::toaster_sheet(),
            toast_tex: assets::toast_texture(),
            speed,
        }
    }
}

impl Effect for Toasters {
    fn update(&mut self, _dt: f32, _elapsed: f32, _width: u32, _height: u32) {
        // Pure scripted movers: position is derived in render
    }

    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32) {
        buffer.clear(0, 0, 0);
        let w = buffer.width() as f32;
        let h = buffer.height() as f32;

        for m in &self.toast {
            if let Some((x, y, _)) = mover_pos(m, elapsed, self.speed, w, h) {
                buffer.blit_texture(&self.toast_tex, None, x as i32, y as i32, false);
            }
        }

        for m in &self.toasters {
            if let Some((x, y, local)) = mover_pos(m, elapsed, self.speed, w, h) {
                let frame = self.sheet.pingpong_at(local * m.flap_scale, FLAP_PERIOD);
                buffer.blit_texture(
                    &self.sheet.texture,
                    Some(self.sheet.src_rect(frame)),
                    x as i32,
                    y as i32,
                    m.anim.reverse,
                );
            }
        }
    }

    fn name(&self) -> &str {
        "Flying Toasters"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_hides_mover() {
        let m = Mover {
            anim: AnimParam {
                fly_duration: 10.0,
                delay: 3.0,
                reverse: false,
            },
            pose: Pose {
                anchor_x_pct: 1.0,
                anchor_y_pct: 0.2,
            },
            flap_scale: 1.0,
        };
        assert!(mover_pos(&m, 2.9, 1.0, 800.0, 600.0).is_none());
        assert!(mover_pos(&m, 3.1, 1.0, 800.0, 600.0).is_some());
    }

    #[test]
    fn test_flight_repeats_modulo_duration() {
        let m = Mover {
            anim: AnimParam {
                fly_duration: 10.0,
                delay: 0.0,
                reverse: false,
            },
            pose: Pose {
                anchor_x_pct: 1.0,
                anchor_y_pct: 0.3,
            },
            flap_scale: 1.0,
        };
        let (x1, y1, _) = mover_pos(&m, 2.5, 1.0, 800.0, 600.0).unwrap();
        let (x2, y2, _) = mover_pos(&m, 12.5, 1.0, 800.0, 600.0).unwrap();
        assert!((x1 - x2).abs() < 1e-3);
        assert!((y1 - y2).abs() < 1e-3);
    }

    #[test]
    fn test_speed_mult_compresses_cycle() {
        let m = Mover {
            anim: AnimParam {
                fly_duration: 10.0,
                delay: 0.0,
                reverse: false,
            },
            pose: Pose {
                anchor_x_pct: 1.0,
                anchor_y_pct: 0.3,
            },
            flap_scale: 1.0,
        };
        // Double speed at t reaches the same spot as single speed at 2t
        let (a, _, _) = mover_pos(&m, 2.0, 2.0, 800.0, 600.0).unwrap();
        let (b, _, _) = mover_pos(&m, 4.0, 1.0, 800.0, 600.0).unwrap();
        assert!((a - b).abs() < 1e-3);
    }

    #[test]
    fn test_counts_clamped() {
        let e = Toasters::new(100, 100, 1.0, 1);
        assert_eq!(e.toasters.len() as u32, MAX_TOASTERS);
        assert_eq!(e.toast.len() as u32, MAX_TOAST);
    }
}
