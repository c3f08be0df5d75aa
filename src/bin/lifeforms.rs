//! Constellation morph screensaver binary.

use nightwall::effects::Lifeforms;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] =
    &[FlagSpec::value('n', "Constellation groups, 1 or 3 (default 1)")];

fn main() {
    let opts = options::parse_or_exit("lifeforms", FLAGS);
    let groups = opts.get_u32('n', 1, 1, 3);
    let effect = Lifeforms::new(groups, opts.speed, util::time_seed());
    runtime::run_or_exit("lifeforms", &opts, effect);
}
