//! Rotating globe screensaver binary.

use nightwall::effects::Globe;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;

const FLAGS: &[FlagSpec] =
    &[FlagSpec::value('d', "Spin rate in radians per second (0.02-4.0, default 0.3)")];

fn main() {
    let opts = options::parse_or_exit("globe", FLAGS);
    let spin = opts.get_f32('d', 0.3, 0.02, 4.0);
    let effect = Globe::new(spin, opts.speed);
    runtime::run_or_exit("globe", &opts, effect);
}
