//! Paper fire screensaver binary.

use nightwall::effects::Paperfire;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] =
    &[FlagSpec::value('d', "Burn duration in seconds (10-300, default 45)")];

fn main() {
    let opts = options::parse_or_exit("paperfire", FLAGS);
    let burn = opts.get_f32('d', 45.0, 10.0, 300.0);
    let effect = Paperfire::new(burn, opts.speed, util::time_seed());
    runtime::run_or_exit("paperfire", &opts, effect);
}
