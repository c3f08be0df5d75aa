//! Fade-to-black screensaver binary.

use nightwall::compositor::{Compositor, Hyprland};
use nightwall::effects::Fadeout;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;

const FLAGS: &[FlagSpec] =
    &[FlagSpec::value('d', "Seconds until fully black (1-60, default 4)")];

fn main() {
    let opts = options::parse_or_exit("fadeout", FLAGS);
    let secs = opts.get_f32('d', 4.0, 1.0, 60.0);

    let compositor = Hyprland;
    let effect = Fadeout::new(secs, opts.speed, &compositor);

    compositor.set_cursor_hidden(true);
    let result = runtime::run("fadeout", &opts, effect);
    compositor.set_cursor_hidden(false);

    if let Err(e) = result {
        eprintln!("fadeout: {}", e);
        std::process::exit(1);
    }
}
