//! Worms screensaver binary.

use nightwall::effects::Worms;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[
    FlagSpec::value('t', "Number of worms (1-24, default 6)"),
    FlagSpec::value('l', "Trail length in segments (10-400, default 80)"),
    FlagSpec::value('a', "Collision audio, 0|1 (default 0)"),
];

fn main() {
    let opts = options::parse_or_exit("wormsaver", FLAGS);
    let worms = opts.get_u32('t', 6, 1, 24);
    let trail = opts.get_u32('l', 80, 10, 400);
    let audio = opts.get_bool('a', false);
    let effect = Worms::new(worms, trail, audio, opts.speed, util::time_seed());
    runtime::run_or_exit("wormsaver", &opts, effect);
}
