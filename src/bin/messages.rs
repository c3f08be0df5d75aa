//! Message marquee screensaver binary.

use nightwall::effects::Messages;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;
use nightwall::util;

const FLAGS: &[FlagSpec] = &[
    FlagSpec::value('t', "Marquee text (default OMARCHY)"),
    FlagSpec::switch('r', "Pull a random quote each sweep"),
];

fn main() {
    let opts = options::parse_or_exit("messages", FLAGS);
    let text = opts.get_str('t');
    let random_quote = opts.has_switch('r');
    let effect = Messages::new(text, random_quote, opts.speed, util::time_seed());
    runtime::run_or_exit("messages", &opts, effect);
}
