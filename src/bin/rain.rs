//! Rainstorm screensaver binary.

use nightwall::effects::{Rain, RainMode};
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[
    FlagSpec::value('m', "Raindrops (50-2000, default 350)"),
    FlagSpec::value('w', "Wind slant factor (0.0-3.0, default 1.0)"),
];

fn main() {
    let opts = options::parse_or_exit("rain", FLAGS);
    let drops = opts.get_str('m').map(|_| opts.get_u32('m', 350, 50, 2000));
    let wind = opts.get_f32('w', 1.0, 0.0, 3.0);
    let effect = Rain::new(RainMode::Steady, drops, wind, opts.speed, util::time_seed());
    runtime::run_or_exit("rain", &opts, effect);
}
