//! The per-effect option editor: typed values adjusted with +/- (or
//! edited inline for text), composed back into the option string the
//! hook script receives.

use super::catalog::{CatalogEntry, OptKind, OptSpec};

#[derive(Debug, Clone, PartialEq)]
pub enum OptValue {
    Float(f32),
    Int(u32),
    Bool(bool),
    Text(String),
}

pub struct EditorState {
    pub specs: &'static [OptSpec],
    pub values: Vec<OptValue>,
    pub cursor: usize,
    /// Some while an inline text edit is open
    pub text_input: Option<String>,
}

/// Split an option string like "-t 20 -r -m 10" into (flag, value) pairs
fn parse_option_string(s: &str) -> Vec<(char, Option<String>)> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let tok = tokens[i];
        if tok.len() == 2 && tok.starts_with('-') {
            let flag = tok.chars().nth(1).unwrap();
            let value = tokens.get(i + 1).filter(|v| !v.starts_with('-'));
            match value {
                Some(v) => {
                    out.push((flag, Some((*v).to_string())));
                    i += 2;
                },
                None => {
                    out.push((flag, None));
                    i += 1;
                },
            }
        } else {
            i += 1;
        }
    }
    out
}

fn default_value(kind: &OptKind) -> OptValue {
    match kind {
        OptKind::Float { default, .. } => OptValue::Float(*default),
        OptKind::IntRange { default, .. } => OptValue::Int(*default),
        OptKind::Toggle { default } => OptValue::Bool(*default),
        OptKind::Switch => OptValue::Bool(false),
        OptKind::Text { default } => OptValue::Text((*default).to_string()),
    }
}

impl EditorState {
    /// Seed the editor from the entry's saved option string
    pub fn open(entry: &CatalogEntry) -> Self {
        let saved = parse_option_string(&entry.option_string);
        let values = entry
            .options
            .iter()
            .map(|spec| {
                let mut value = default_value(&spec.kind);
                if let Some((_, raw)) = saved.iter().find(|(f, _)| *f == spec.flag) {
                    value = match (&spec.kind, raw) {
                        (OptKind::Float { min, max, .. }, Some(raw)) => raw
                            .parse::<f32>()
                            .map(|v| OptValue::Float(v.clamp(*min, *max)))
                            .unwrap_or(value),
                        (OptKind::IntRange { min, max, .. }, Some(raw)) => raw
                            .parse::<u32>()
                            .map(|v| OptValue::Int(v.clamp(*min, *max)))
                            .unwrap_or(value),
                        (OptKind::Toggle { .. }, Some(raw)) => OptValue::Bool(raw != "0"),
                        (OptKind::Switch, _) => OptValue::Bool(true),
                        (OptKind::Text { .. }, Some(raw)) => OptValue::Text(raw.clone()),
                        _ => value,
                    };
                }
                value
            })
            .collect();

        Self {
            specs: entry.options,
            values,
            cursor: 0,
            text_input: None,
        }
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.specs.len() as i32;
        self.cursor = (self.cursor as i32 + delta).rem_euclid(len) as usize;
    }

    /// `+`/`-`: step numerics within range, flip toggles and switches
    pub fn adjust(&mut self, up: bool) {
        let spec = &self.specs[self.cursor];
        let value = &mut self.values[self.cursor];
        let sign = if up { 1.0f32 } else { -1.0 };

        match (&spec.kind, value) {
            (OptKind::Float { min, max, step, .. }, OptValue::Float(v)) => {
                *v = (*v + step * sign).clamp(*min, *max);
                // Keep one decimal of precision so 0.1 steps compose cleanly
                *v = (*v * 10.0).round() / 10.0;
            },
            (OptKind::IntRange { min, max, step, .. }, OptValue::Int(v)) => {
                let next = if up {
                    v.saturating_add(*step)
                } else {
                    v.saturating_sub(*step)
                };
                *v = next.clamp(*min, *max);
            },
            (OptKind::Toggle { .. } | OptKind::Switch, OptValue::Bool(v)) => *v = !*v,
            _ => {},
        }
    }

    /// True when the cursor sits on a text option (Enter opens the input)
    pub fn on_text_option(&self) -> bool {
        matches!(self.specs[self.cursor].kind, OptKind::Text { .. })
    }

    pub fn begin_text_input(&mut self) {
        if let OptValue::Text(current) = &self.values[self.cursor] {
            self.text_input = Some(current.clone());
        }
    }

    pub fn commit_text_input(&mut self) {
        if let Some(text) = self.text_input.take() {
            self.values[self.cursor] = OptValue::Text(text);
        }
    }

    /// Compose the option string: values at their defaults are omitted
    pub fn compose(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        for (spec, value) in self.specs.iter().zip(&self.values) {
            let default = default_value(&spec.kind);
            if *value == default {
                continue;
            }
            match value {
                OptValue::Float(v) => parts.push(format!("-{} {}", spec.flag, v)),
                OptValue::Int(v) => parts.push(format!("-{} {}", spec.flag, v)),
                OptValue::Bool(v) => match spec.kind {
                    OptKind::Switch => {
                        if *v {
                            parts.push(format!("-{}", spec.flag));
                        }
                    },
                    _ => parts.push(format!("-{} {}", spec.flag, u32::from(*v))),
                },
                OptValue::Text(v) => parts.push(format!("-{} {}", spec.flag, v)),
            }
        }

        parts.join(" ")
    }

    /// Display form of a value for the editor pane
    pub fn value_label(&self, idx: usize) -> String {
        match &self.values[idx] {
            OptValue::Float(v) => format!("{:.1}", v),
            OptValue::Int(v) => v.to_string(),
            OptValue::Bool(v) => if *v { "on" } else { "off" }.to_string(),
            OptValue::Text(v) => v.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::catalog::catalog;

    fn entry(key: &str) -> CatalogEntry {
        catalog().into_iter().find(|e| e.key == key).unwrap()
    }

    #[test]
    fn test_compose_omits_defaults() {
        let e = entry("fishsaver");
        let editor = EditorState::open(&e);
        assert_eq!(editor.compose(), "");
    }

    #[test]
    fn test_adjust_and_compose() {
        let e = entry("fishsaver");
        let mut editor = EditorState::open(&e);
        // First option is fish count (default 12)
        for _ in 0..8 {
            editor.adjust(true);
        }
        assert_eq!(editor.compose(), "-t 20");
    }

    #[test]
    fn test_saved_string_round_trips() {
        let mut e = entry("fishsaver");
        e.option_string = "-t 20 -m 10".to_string();
        let editor = EditorState::open(&e);
        assert_eq!(editor.compose(), "-t 20 -m 10");
    }

    #[test]
    fn test_numeric_clamps_at_range_edge() {
        let e = entry("balls");
        let mut editor = EditorState::open(&e);
        for _ in 0..100 {
            editor.adjust(true);
        }
        assert_eq!(editor.compose(), "-t 40");
    }

    #[test]
    fn test_float_step_keeps_one_decimal() {
        let e = entry("globe");
        let mut editor = EditorState::open(&e);
        editor.adjust(true);
        // 0.3 + 0.1 composes as 0.4, not 0.4000001
        assert_eq!(editor.compose(), "-d 0.4");
    }

    #[test]
    fn test_switch_composes_bare_flag() {
        let e = entry("messages");
        let mut editor = EditorState::open(&e);
        // Move to the -r switch
        while editor.specs[editor.cursor].flag != 'r' {
            editor.move_cursor(1);
        }
        editor.adjust(true);
        assert_eq!(editor.compose(), "-r");
    }

    #[test]
    fn test_text_input_commit() {
        let e = entry("messages");
        let mut editor = EditorState::open(&e);
        assert!(editor.on_text_option());
        editor.begin_text_input();
        editor.text_input = Some("HELLO WORLD".to_string());
        editor.commit_text_input();
        assert_eq!(editor.compose(), "-t HELLO WORLD");
    }
}
