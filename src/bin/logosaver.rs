//! Bouncing logo screensaver binary.

use nightwall::effects::LogoBounce;
use nightwall::options;
use nightwall::runtime;

fn main() {
    let opts = options::parse_or_exit("logosaver", &[]);
    let effect = LogoBounce::new(opts.speed);
    runtime::run_or_exit("logosaver", &opts, effect);
}
