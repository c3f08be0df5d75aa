//! The effect library. One type per screensaver binary, all implementing
//! the runtime `Effect` contract.

mod balls;
mod cityscape;
mod fadeout;
mod fishtank;
mod globe;
mod lifeforms;
mod logo;
mod matrix;
mod messages;
mod paperfire;
mod rain;
mod random;
mod spotlight;
mod starrynight;
mod toasters;
mod warp;
mod worms;

pub use balls::Balls;
pub use cityscape::Cityscape;
pub use fadeout::Fadeout;
pub use fishtank::Fishtank;
pub use globe::Globe;
pub use lifeforms::Lifeforms;
pub use logo::LogoBounce;
pub use matrix::MatrixRain;
pub use messages::Messages;
pub use paperfire::Paperfire;
pub use rain::{Rain, RainMode};
pub use random::{RandomSaver, EFFECT_KEYS};
pub use spotlight::Spotlight;
pub use starrynight::StarryNight;
pub use toasters::Toasters;
pub use warp::Warp;
pub use worms::Worms;
