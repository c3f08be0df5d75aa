//! Aquarium screensaver binary.

use nightwall::effects::Fishtank;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[
    FlagSpec::value('t', "Number of fish (1-40, default 12)"),
    FlagSpec::value('m', "Number of bubbles (0-60, default 20)"),
];

fn main() {
    let opts = options::parse_or_exit("fishsaver", FLAGS);
    let fish = opts.get_u32('t', 12, 1, 40);
    let bubbles = opts.get_u32('m', 20, 0, 60);
    let effect = Fishtank::new(fish, bubbles, opts.speed, util::time_seed());
    runtime::run_or_exit("fishsaver", &opts, effect);
}
