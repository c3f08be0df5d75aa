//! Bouncing balls screensaver binary.

use nightwall::effects::Balls;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[FlagSpec::value('t', "Number of balls (2-40, default 12)")];

fn main() {
    let opts = options::parse_or_exit("balls", FLAGS);
    let count = opts.get_u32('t', 12, 2, 40);
    let effect = Balls::new(count, opts.speed, util::time_seed());
    runtime::run_or_exit("balls", &opts, effect);
}
