use once_cell::sync::Lazy;
use regex::Regex;

/// An uppercase letter followed by a lowercase one starts a word.
static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Lu}\p{Ll}").expect("valid regex"));

/// Splits a tile name into one line per word, breaking right before each
/// capital that begins a word. Never produces an empty leading segment.
///
/// `"Super Mario Bros."` becomes `["Super ", "Mario ", "Bros."]`; runs of
/// capitals such as `"NBA"` stay together, so `"NBAJam"` is `["NBA", "Jam"]`.
pub fn split_label(name: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for found in WORD_START.find_iter(name) {
        if found.start() > start {
            segments.push(&name[start..found.start()]);
            start = found.start();
        }
    }
    if start < name.len() || segments.is_empty() {
        segments.push(&name[start..]);
    }
    segments
}

/// One positioned line of a tile label, relative to the tile origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

pub fn label_lines(
    name: &str,
    inset_x: f64,
    first_baseline: f64,
    line_height: f64,
) -> Vec<LabelLine> {
    split_label(name)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| LabelLine {
            text: text.to_string(),
            x: inset_x,
            y: first_baseline + idx as f64 * line_height,
        })
        .collect()
}
