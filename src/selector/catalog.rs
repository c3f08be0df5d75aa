//! The effect catalog: one descriptor per installable effect binary,
//! including the typed option schema the editor works from.

/// Option kinds the editor understands
#[derive(Debug, Clone, Copy)]
pub enum OptKind {
    /// Numeric, adjusted in fixed steps and clamped
    Float {
        min: f32,
        max: f32,
        step: f32,
        default: f32,
    },
    IntRange {
        min: u32,
        max: u32,
        step: u32,
        default: u32,
    },
    /// 0|1 flag passed as `-x 0` / `-x 1`
    Toggle { default: bool },
    /// Bare switch included only when enabled
    Switch,
    /// Free text, edited inline
    Text { default: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct OptSpec {
    pub flag: char,
    pub label: &'static str,
    pub kind: OptKind,
    pub description: &'static str,
}

pub struct CatalogEntry {
    pub key: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub options: &'static [OptSpec],
    /// The saved option string shown in the browser and written into the
    /// hook script
    pub option_string: String,
}

const SPEED: OptSpec = OptSpec {
    flag: 's',
    label: "Speed",
    kind: OptKind::Float {
        min: 0.1,
        max: 10.0,
        step: 0.1,
        default: 1.0,
    },
    description: "Global speed multiplier",
};

macro_rules! count_opt {
    ($flag:expr, $label:expr, $min:expr, $max:expr, $default:expr, $desc:expr) => {
        OptSpec {
            flag: $flag,
            label: $label,
            kind: OptKind::IntRange {
                min: $min,
                max: $max,
                step: 1,
                default: $default,
            },
            description: $desc,
        }
    };
}

static TOASTERS_OPTS: [OptSpec; 3] = [
    count_opt!('t', "Toasters", 1, 24, 8, "How many toasters are airborne"),
    count_opt!('m', "Toast", 0, 16, 4, "Slices of toast drifting along"),
    SPEED,
];
static FISH_OPTS: [OptSpec; 3] = [
    count_opt!('t', "Fish", 1, 40, 12, "Fish crossing the tank"),
    count_opt!('m', "Bubbles", 0, 60, 20, "Bubbles rising from the floor"),
    SPEED,
];
static MATRIX_OPTS: [OptSpec; 2] = [
    count_opt!('m', "Streams", 20, 200, 200, "Maximum concurrent glyph streams"),
    SPEED,
];
static BALLS_OPTS: [OptSpec; 2] = [
    count_opt!('t', "Balls", 2, 40, 12, "Number of balls"),
    SPEED,
];
static GLOBE_OPTS: [OptSpec; 2] = [
    OptSpec {
        flag: 'd',
        label: "Spin",
        kind: OptKind::Float {
            min: 0.02,
            max: 4.0,
            step: 0.1,
            default: 0.3,
        },
        description: "Rotation rate in radians per second",
    },
    SPEED,
];
static LIFEFORMS_OPTS: [OptSpec; 2] = [
    count_opt!('n', "Groups", 1, 3, 1, "Constellations shown at once (1 or 3)"),
    SPEED,
];
static WARP_OPTS: [OptSpec; 2] = [
    count_opt!('t', "Stars", 50, 2000, 300, "Stars in the warp field"),
    SPEED,
];
static STARRY_OPTS: [OptSpec; 2] = [
    count_opt!('t', "Stars", 50, 1500, 400, "Stars in the sky"),
    SPEED,
];
static RAIN_OPTS: [OptSpec; 3] = [
    count_opt!('m', "Drops", 50, 2000, 350, "Raindrops in flight"),
    OptSpec {
        flag: 'w',
        label: "Wind",
        kind: OptKind::Float {
            min: 0.0,
            max: 3.0,
            step: 0.1,
            default: 1.0,
        },
        description: "Slant factor",
    },
    SPEED,
];
static HARDRAIN_OPTS: [OptSpec; 3] = [
    count_opt!('m', "Drops", 50, 2000, 800, "Raindrops in flight"),
    OptSpec {
        flag: 'w',
        label: "Wind",
        kind: OptKind::Float {
            min: 0.0,
            max: 3.0,
            step: 0.1,
            default: 1.0,
        },
        description: "Slant factor",
    },
    SPEED,
];
static PAPERFIRE_OPTS: [OptSpec; 2] = [
    OptSpec {
        flag: 'd',
        label: "Burn time",
        kind: OptKind::Float {
            min: 10.0,
            max: 300.0,
            step: 5.0,
            default: 45.0,
        },
        description: "Seconds the sheet keeps burning",
    },
    SPEED,
];
static SPEED_ONLY: [OptSpec; 1] = [SPEED];
static FADEOUT_OPTS: [OptSpec; 2] = [
    OptSpec {
        flag: 'd',
        label: "Fade time",
        kind: OptKind::Float {
            min: 1.0,
            max: 60.0,
            step: 1.0,
            default: 4.0,
        },
        description: "Seconds until fully black",
    },
    SPEED,
];
static SPOTLIGHT_OPTS: [OptSpec; 2] = [
    count_opt!('l', "Radius", 20, 400, 120, "Spotlight radius in pixels"),
    SPEED,
];
static WORMS_OPTS: [OptSpec; 4] = [
    count_opt!('t', "Worms", 1, 24, 6, "Number of worms"),
    count_opt!('l', "Trail", 10, 400, 80, "Trail length in segments"),
    OptSpec {
        flag: 'a',
        label: "Audio",
        kind: OptKind::Toggle { default: false },
        description: "Blip on collisions",
    },
    SPEED,
];
static MESSAGES_OPTS: [OptSpec; 3] = [
    OptSpec {
        flag: 't',
        label: "Text",
        kind: OptKind::Text { default: "OMARCHY" },
        description: "Marquee text",
    },
    OptSpec {
        flag: 'r',
        label: "Random quote",
        kind: OptKind::Switch,
        description: "Pull a fresh quote each sweep",
    },
    SPEED,
];
static RANDOM_OPTS: [OptSpec; 2] = [
    OptSpec {
        flag: 'd',
        label: "Rotate",
        kind: OptKind::Float {
            min: 10.0,
            max: 300.0,
            step: 10.0,
            default: 120.0,
        },
        description: "Seconds per effect",
    },
    SPEED,
];

pub fn catalog() -> Vec<CatalogEntry> {
    let entries: [(&str, &str, &str, &str, &'static [OptSpec]); 18] = [
        (
            "toasters",
            "\u{1F35E}",
            "Flying Toasters",
            "Chrome toasters wing their way across the screen, pursued by drifting slices of toast.",
            &TOASTERS_OPTS,
        ),
        (
            "fishsaver",
            "\u{1F420}",
            "Fish Tank",
            "A quiet aquarium: fish cruise their lanes, one school bobs between depths, bubbles climb the water column.",
            &FISH_OPTS,
        ),
        (
            "matrix",
            "\u{1F4BB}",
            "Matrix Rain",
            "Green glyph streams pour down the screen, their tails fading while stray characters flare back to life.",
            &MATRIX_OPTS,
        ),
        (
            "balls",
            "\u{1F3B1}",
            "Bouncing Balls",
            "Colored balls ricochet off the walls and each other with clean elastic physics.",
            &BALLS_OPTS,
        ),
        (
            "globe",
            "\u{1F30D}",
            "Globe",
            "A little procedurally generated planet spins on its axis while drifting around the dark.",
            &GLOBE_OPTS,
        ),
        (
            "lifeforms",
            "\u{2728}",
            "Life Forms",
            "Stars gather into constellations, hold their shape a while, then dissolve and regroup as something else.",
            &LIFEFORMS_OPTS,
        ),
        (
            "warp",
            "\u{1F680}",
            "Warp",
            "The classic starfield at warp: stars streak past the camera and flare as they go by.",
            &WARP_OPTS,
        ),
        (
            "starrynight",
            "\u{1F30C}",
            "Starry Night",
            "A still night sky. Stars twinkle and drift; the bright ones wear a four-point glow.",
            &STARRY_OPTS,
        ),
        (
            "rain",
            "\u{1F327}",
            "Rain",
            "Slanted rain falls through the dark, with distant lightning whiting the sky out now and then.",
            &RAIN_OPTS,
        ),
        (
            "hardrain",
            "\u{26C8}",
            "Hard Rain",
            "The same storm, but angry: denser, faster, streaking rain.",
            &HARDRAIN_OPTS,
        ),
        (
            "paperfire",
            "\u{1F525}",
            "Paper Fire",
            "A sheet of paper chars from the bottom edge up, shedding embers, ash, and smoke until nothing is left.",
            &PAPERFIRE_OPTS,
        ),
        (
            "cityscape",
            "\u{1F3D9}",
            "Cityscape",
            "A night skyline where apartment windows blink on and off, but the city never quite goes dark.",
            &SPEED_ONLY,
        ),
        (
            "logosaver",
            "\u{1F4BF}",
            "Logo",
            "The logo plate wanders and bounces, changing its accent color on every wall hit.",
            &SPEED_ONLY,
        ),
        (
            "fadeout",
            "\u{1F312}",
            "Fade Out",
            "Your screen, exactly as you left it, slowly fading to black.",
            &FADEOUT_OPTS,
        ),
        (
            "spotlight",
            "\u{1F526}",
            "Spotlight",
            "A roving spotlight sweeps over a frozen capture of your desktop.",
            &SPOTLIGHT_OPTS,
        ),
        (
            "wormsaver",
            "\u{1FAB1}",
            "Worms",
            "Iridescent worms roam the screen, bouncing off the walls and ricocheting off each other.",
            &WORMS_OPTS,
        ),
        (
            "messages",
            "\u{1F4AC}",
            "Messages",
            "A message marquee sweeps across the screen at changing heights. Bring your own text or pull random quotes.",
            &MESSAGES_OPTS,
        ),
        (
            "randomsaver",
            "\u{1F3B2}",
            "Random",
            "Can't pick? Rotates through the whole collection, a few minutes per effect.",
            &RANDOM_OPTS,
        ),
    ];

    entries
        .into_iter()
        .map(|(key, icon, title, description, options)| CatalogEntry {
            key,
            icon,
            title,
            description,
            options,
            option_string: String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EFFECT_KEYS;

    #[test]
    fn test_catalog_keys_match_rotator_inventory() {
        let cat = catalog();
        for entry in cat.iter().filter(|e| e.key != "randomsaver") {
            assert!(
                EFFECT_KEYS.contains(&entry.key),
                "{} missing from rotator keys",
                entry.key
            );
        }
        assert_eq!(cat.len(), EFFECT_KEYS.len() + 1);
    }

    #[test]
    fn test_every_entry_has_speed_option() {
        for entry in catalog() {
            assert!(
                entry.options.iter().any(|o| o.flag == 's'),
                "{} lacks -s",
                entry.key
            );
        }
    }
}
