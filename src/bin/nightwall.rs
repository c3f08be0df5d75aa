//! The selector/configurator TUI.

fn main() {
    if let Err(e) = nightwall::selector::run() {
        eprintln!("nightwall: {}", e);
        std::process::exit(1);
    }
}
