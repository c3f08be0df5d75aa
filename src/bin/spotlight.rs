//! Spotlight screensaver binary.

use nightwall::compositor::{Compositor, Hyprland};
use nightwall::effects::Spotlight;
use nightwall::options::{self, FlagSpec};
use nightwall::runtime;

const FLAGS: &[FlagSpec] =
    &[FlagSpec::value('l', "Spotlight radius in pixels (20-400, default auto)")];

fn main() {
    let opts = options::parse_or_exit("spotlight", FLAGS);
    let radius = opts.get_str('l').map(|_| opts.get_u32('l', 120, 20, 400));

    let compositor = Hyprland;
    let effect = Spotlight::new(radius, opts.speed, &compositor);

    compositor.set_cursor_hidden(true);
    let result = runtime::run("spotlight", &opts, effect);
    compositor.set_cursor_hidden(false);

    if let Err(e) = result {
        eprintln!("spotlight: {}", e);
        std::process::exit(1);
    }
}
