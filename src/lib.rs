//! nightwall — a suite of SDL2 screensaver effects plus the terminal
//! selector that installs one of them as the compositor's screensaver
//! hook.
//!
//! Layers, bottom up:
//! - `display`, `texture`, `audio`: the SDL2 platform surface and the
//!   software pixel buffer every effect renders into.
//! - `runtime`, `options`, `assets`, `geometry`, `particles`, `sprite`:
//!   the shared effect framework (main loop, CLI convention, asset
//!   registry, simulation vocabulary).
//! - `effects`: the effect library, one type per screensaver binary.
//! - `selector`: the catalog/configurator TUI and hook-script writer.

pub mod assets;
pub mod audio;
pub mod compositor;
pub mod display;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod options;
pub mod particles;
pub mod runtime;
pub mod selector;
pub mod sprite;
pub mod supervisor;
pub mod texture;
pub mod util;

pub use error::Error;
