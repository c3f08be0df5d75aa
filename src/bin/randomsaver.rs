//! Effect rotator binary: cycles through the installed screensavers.

use nightwall::effects::RandomSaver;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] =
    &[FlagSpec::value('d', "Seconds per effect (10-300, default 120)")];

fn main() {
    let opts = options::parse_or_exit("randomsaver", FLAGS);
    let rotate = opts.get_f32('d', 120.0, 10.0, 300.0);
    let effect = RandomSaver::new(rotate, util::time_seed());
    runtime::run_or_exit("randomsaver", &opts, effect);
}
