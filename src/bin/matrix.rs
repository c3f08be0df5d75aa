//! Matrix rain screensaver binary.

use nightwall::effects::MatrixRain;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] =
    &[FlagSpec::value('m', "Maximum glyph streams (20-200, default 200)")];

fn main() {
    let opts = options::parse_or_exit("matrix", FLAGS);
    let streams = opts.get_u32('m', 200, 20, 200);
    let effect = MatrixRain::new(streams as usize, opts.speed, util::time_seed());
    runtime::run_or_exit("matrix", &opts, effect);
}
