//! The shared effect main loop.
//!
//! One effect per process: open the window, drive fixed-period frames
//! (poll, update, render, present, sleep), and exit on user input. A
//! short grace window keeps stray pointer motion at launch from
//! dismissing the saver instantly.

use std::time::{Duration, Instant};

use crate::display::{Display, InputEvent, PixelBuffer, RenderTarget};
use crate::error::Result;
use crate::options::Options;

/// Target frame period
pub const FRAME_MS: u64 = 16;
/// Pointer motion is ignored for this long after launch
pub const GRACE_MS: u64 = 2000;
/// Longest dt an effect will ever see; pauses don't teleport entities
pub const MAX_DT: f32 = 0.05;

/// The effect contract. Construction (`init`) is the type's constructor;
/// teardown is `Drop`.
pub trait Effect {
    /// Advance simulation. `dt` is clamped; `elapsed` is wall-clock
    /// seconds since launch. Viewport dimensions are passed every frame
    /// so effects can lazily size their state.
    fn update(&mut self, dt: f32, elapsed: f32, width: u32, height: u32);

    /// Draw the current state. Strictly read-only with respect to the
    /// simulation; `update` has already run this frame.
    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32);

    fn name(&self) -> &str;
}

/// Decides whether an input event ends the run, as a pure function of
/// the event and the elapsed time so the grace boundary is testable.
pub struct ExitArbiter {
    grace: Duration,
}

impl ExitArbiter {
    pub fn new() -> Self {
        Self {
            grace: Duration::from_millis(GRACE_MS),
        }
    }

    pub fn should_exit(&self, event: InputEvent, elapsed: Duration) -> bool {
        match event {
            InputEvent::Quit | InputEvent::KeyDown | InputEvent::MouseDown => true,
            InputEvent::MouseMove => elapsed >= self.grace,
        }
    }
}

impl Default for ExitArbiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run an effect to completion. Returns once the user dismisses it.
pub fn run<E: Effect>(title: &str, opts: &Options, mut effect: E) -> Result<()> {
    let (mut display, texture_creator) = Display::open(title, opts.fullscreen)?;
    let width = display.width();
    let height = display.height();
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;
    let mut buffer = PixelBuffer::with_size(width, height);

    let arbiter = ExitArbiter::new();
    let start = Instant::now();
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_t = 0.0f32;

    'main: loop {
        let elapsed = start.elapsed();
        for event in display.poll_events() {
            if arbiter.should_exit(event, elapsed) {
                break 'main;
            }
        }

        let t = elapsed.as_secs_f32();
        let dt = (t - last_t).min(MAX_DT);
        last_t = t;

        effect.update(dt, t, width, height);
        buffer.clear(0, 0, 0);
        effect.render(&mut buffer, t);
        display.present(&mut target, &buffer)?;

        std::thread::sleep(frame);
    }

    Ok(())
}

/// Shared tail of every effect binary: run, report failures on stderr,
/// exit with the conventional codes (0 normal, 1 init failure).
pub fn run_or_exit<E: Effect>(title: &str, opts: &Options, effect: E) -> ! {
    match run(title, opts, effect) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", title, e);
            std::process::exit(1);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grace_blocks_motion_until_boundary() {
        let arbiter = ExitArbiter::new();
        assert!(!arbiter.should_exit(InputEvent::MouseMove, Duration::from_millis(0)));
        assert!(!arbiter.should_exit(InputEvent::MouseMove, Duration::from_millis(1999)));
        assert!(arbiter.should_exit(InputEvent::MouseMove, Duration::from_millis(2000)));
        assert!(arbiter.should_exit(InputEvent::MouseMove, Duration::from_millis(2500)));
    }

    #[test]
    fn test_keys_and_buttons_always_exit() {
        let arbiter = ExitArbiter::new();
        for ev in [InputEvent::Quit, InputEvent::KeyDown, InputEvent::MouseDown] {
            assert!(arbiter.should_exit(ev, Duration::from_millis(0)));
            assert!(arbiter.should_exit(ev, Duration::from_millis(5000)));
        }
    }
}
