//! Warp starfield screensaver binary.

use nightwall::effects::Warp;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[FlagSpec::value('t', "Number of stars (50-2000, default 300)")];

fn main() {
    let opts = options::parse_or_exit("warp", FLAGS);
    let stars = opts.get_u32('t', 300, 50, 2000);
    let effect = Warp::new(stars, opts.speed, util::time_seed());
    runtime::run_or_exit("warp", &opts, effect);
}
