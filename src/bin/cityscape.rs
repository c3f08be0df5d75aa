//! Night skyline screensaver binary.

use nightwall::effects::Cityscape;
use nightwall::options;
use nightwall::runtime;
use nightwall::util;

fn main() {
    let opts = options::parse_or_exit("cityscape", &[]);
    let effect = Cityscape::new(opts.speed, util::time_seed());
    runtime::run_or_exit("cityscape", &opts, effect);
}
