//! Starry night screensaver binary.

use nightwall::effects::StarryNight;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[FlagSpec::value('t', "Number of stars (50-1500, default 400)")];

fn main() {
    let opts = options::parse_or_exit("starrynight", FLAGS);
    let stars = opts.get_u32('t', 400, 50, 1500);
    let effect = StarryNight::new(stars, opts.speed, util::time_seed());
    runtime::run_or_exit("starrynight", &opts, effect);
}
