//! The shared CLI convention for effect binaries.
//!
//! Every effect understands `-s F` (speed multiplier), `-f 0|1`
//! (fullscreen, default on) and `-h` (usage). Effect-specific flags are
//! declared per binary. Out-of-range values are silently clamped; only
//! unknown flags are an error (usage + exit 2).

use std::collections::HashMap;

pub const SPEED_MIN: f32 = 0.1;
pub const SPEED_MAX: f32 = 10.0;

/// An effect-specific flag: its letter, whether it takes a value, and a
/// one-line description for the usage text.
pub struct FlagSpec {
    pub flag: char,
    pub takes_value: bool,
    pub help: &'static str,
}

impl FlagSpec {
    pub const fn value(flag: char, help: &'static str) -> Self {
        Self {
            flag,
            takes_value: true,
            help,
        }
    }

    pub const fn switch(flag: char, help: &'static str) -> Self {
        Self {
            flag,
            takes_value: false,
            help,
        }
    }
}

/// Parsed options with typed, clamped getters
pub struct Options {
    pub speed: f32,
    pub fullscreen: bool,
    values: HashMap<char, String>,
    switches: Vec<char>,
}

impl Options {
    pub fn get_f32(&self, flag: char, default: f32, min: f32, max: f32) -> f32 {
        self.values
            .get(&flag)
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(default)
            .clamp(min, max)
    }

    pub fn get_u32(&self, flag: char, default: u32, min: u32, max: u32) -> u32 {
        self.values
            .get(&flag)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(default)
            .clamp(min, max)
    }

    pub fn get_str(&self, flag: char) -> Option<&str> {
        self.values.get(&flag).map(String::as_str)
    }

    pub fn get_bool(&self, flag: char, default: bool) -> bool {
        match self.values.get(&flag).map(String::as_str) {
            Some("0") => false,
            Some(_) => true,
            None => default,
        }
    }

    pub fn has_switch(&self, flag: char) -> bool {
        self.switches.contains(&flag)
    }
}

/// Result of an argv walk
pub enum Outcome {
    Run(Options),
    /// `-h`: caller prints usage and exits 0
    Help,
    /// Unknown or malformed flag: caller prints usage and exits 2
    BadFlag(String),
}

/// Walk argv (without the program name)
pub fn parse(args: &[String], effect_flags: &[FlagSpec]) -> Outcome {
    let mut speed = 1.0f32;
    let mut fullscreen = true;
    let mut values = HashMap::new();
    let mut switches = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" => return Outcome::Help,
            "-s" => {
                if i + 1 >= args.len() {
                    return Outcome::BadFlag("-s requires a value".into());
                }
                if let Ok(v) = args[i + 1].parse::<f32>() {
                    speed = v.clamp(SPEED_MIN, SPEED_MAX);
                }
                i += 1;
            },
            "-f" => {
                if i + 1 >= args.len() {
                    return Outcome::BadFlag("-f requires a value".into());
                }
                fullscreen = args[i + 1] != "0";
                i += 1;
            },
            _ => {
                // Stray non-flag tokens are ignored, getopt style; only
                // unrecognized flags are an error
                if !arg.starts_with('-') {
                    i += 1;
                    continue;
                }
                let known = arg.len() == 2
                    && effect_flags
                        .iter()
                        .any(|f| f.flag == arg.chars().nth(1).unwrap());
                if !known {
                    return Outcome::BadFlag(format!("unknown flag {}", arg));
                }

                let flag = arg.chars().nth(1).unwrap();
                let spec = effect_flags.iter().find(|f| f.flag == flag).unwrap();
                if spec.takes_value {
                    if i + 1 >= args.len() {
                        return Outcome::BadFlag(format!("-{} requires a value", flag));
                    }
                    values.insert(flag, args[i + 1].clone());
                    i += 1;
                } else {
                    switches.push(flag);
                }
            },
        }
        i += 1;
    }

    Outcome::Run(Options {
        speed,
        fullscreen,
        values,
        switches,
    })
}

/// Print usage for an effect binary
pub fn print_usage(name: &str, effect_flags: &[FlagSpec]) {
    println!("Usage: {} [OPTIONS]", name);
    println!();
    println!("Options:");
    println!("  -s F     Speed multiplier ({} to {})", SPEED_MIN, SPEED_MAX);
    println!("  -f 0|1   Fullscreen (default 1)");
    for spec in effect_flags {
        if spec.takes_value {
            println!("  -{} V     {}", spec.flag, spec.help);
        } else {
            println!("  -{}       {}", spec.flag, spec.help);
        }
    }
    println!("  -h       Show this help");
}

/// Standard top of every effect main: parse or exit with the
/// conventional codes (0 for help, 2 for bad flags).
pub fn parse_or_exit(name: &str, effect_flags: &[FlagSpec]) -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse(&args, effect_flags) {
        Outcome::Run(opts) => opts,
        Outcome::Help => {
            print_usage(name, effect_flags);
            std::process::exit(0);
        },
        Outcome::BadFlag(msg) => {
            eprintln!("{}: {}", name, msg);
            print_usage(name, effect_flags);
            std::process::exit(2);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_speed_clamps_low_and_high() {
        let Outcome::Run(o) = parse(&argv(&["-s", "0"]), &[]) else {
            panic!("expected run");
        };
        assert_eq!(o.speed, 0.1);

        let Outcome::Run(o) = parse(&argv(&["-s", "1e9"]), &[]) else {
            panic!("expected run");
        };
        assert_eq!(o.speed, 10.0);
    }

    #[test]
    fn test_fullscreen_default_and_off() {
        let Outcome::Run(o) = parse(&argv(&[]), &[]) else {
            panic!("expected run");
        };
        assert!(o.fullscreen);

        let Outcome::Run(o) = parse(&argv(&["-f", "0"]), &[]) else {
            panic!("expected run");
        };
        assert!(!o.fullscreen);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(matches!(parse(&argv(&["-z"]), &[]), Outcome::BadFlag(_)));
    }

    #[test]
    fn test_stray_tokens_ignored() {
        // The hook line may carry unquoted text (e.g. a two-word marquee
        // message); the extra words are not flags and must not abort
        let flags = [FlagSpec::value('t', "text")];
        let Outcome::Run(o) = parse(&argv(&["-t", "HELLO", "WORLD"]), &flags) else {
            panic!("expected run");
        };
        assert_eq!(o.get_str('t'), Some("HELLO"));
    }

    #[test]
    fn test_effect_flag_value_and_clamp() {
        let flags = [FlagSpec::value('t', "count")];
        let Outcome::Run(o) = parse(&argv(&["-t", "500"]), &flags) else {
            panic!("expected run");
        };
        assert_eq!(o.get_u32('t', 10, 1, 100), 100);
    }

    #[test]
    fn test_help() {
        assert!(matches!(parse(&argv(&["-h"]), &[]), Outcome::Help));
    }
}
