//! Flying toasters screensaver binary.

use nightwall::effects::Toasters;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[
    FlagSpec::value('t', "Number of toasters (1-24, default 8)"),
    FlagSpec::value('m', "Slices of toast (0-16, default 4)"),
];

fn main() {
    let opts = options::parse_or_exit("toasters", FLAGS);
    let toasters = opts.get_u32('t', 8, 1, 24);
    let toast = opts.get_u32('m', 4, 0, 16);
    let effect = Toasters::new(toasters, toast, opts.speed, util::time_seed());
    runtime::run_or_exit("toasters", &opts, effect);
}
