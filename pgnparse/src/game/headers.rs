use crate::error::MalformedTagLine;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{trace, warn};

pub const HEADER_COUNT: usize = 17;

/// Recognized tags, in record order.
pub const HEADERS: [&str; HEADER_COUNT] = [
    "Event",
    "Site",
    "Date",
    "Round",
    "White",
    "Black",
    "Result",
    "WhiteTitle",
    "BlackTitle",
    "WhiteElo",
    "BlackElo",
    "ECO",
    "Opening",
    "Variation",
    "WhiteFideId",
    "BlackFideId",
    "EventDate",
];

pub const DEFAULT_VALUES: [&str; HEADER_COUNT] = [
    "?", "?", "?", "?", "?", "?", "*", "?", "?", "?", "?", "?", "?", "?", "?", "?", "?",
];

pub const RESULT_INDEX: usize = 6;

pub const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

lazy_static! {
    static ref TAG_RE: Regex =
        Regex::new(r#"^\[\s*([A-Za-z0-9_+#=:-]+)\s+"((?:[^"\\]|\\.)*)"\s*\]$"#)
            .expect("tag pair regex");
}

pub fn header_index(name: &str) -> Option<usize> {
    HEADERS.iter().position(|header| *header == name)
}

pub fn is_result(value: &str) -> bool {
    RESULTS.contains(&value)
}

/// Whether the line is a complete `[Tag "Value"]` pair.
pub fn is_tag_line(line: &str) -> bool {
    TAG_RE.is_match(line.trim())
}

/// Splits a `[Tag "Value"]` line into its name and unescaped value.
pub fn parse_tag_line(line: &str) -> Result<(String, String), MalformedTagLine> {
    let line = line.trim();
    let captures = TAG_RE
        .captures(line)
        .ok_or_else(|| MalformedTagLine(line.to_string()))?;

    let name = captures[1].to_string();
    let mut value = String::with_capacity(captures[2].len());
    let mut chars = captures[2].chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.extend(chars.next()),
            c => value.push(c),
        }
    }

    Ok((name, value))
}

/// Tag values of one game laid out in the fixed schema order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Headers {
    values: [String; HEADER_COUNT],
    result_known: bool,
}

impl Default for Headers {
    fn default() -> Self {
        Headers {
            values: DEFAULT_VALUES.map(String::from),
            result_known: false,
        }
    }
}

impl Headers {
    /// Stores a tag value. Unknown tags and illegal results are dropped.
    pub fn set(&mut self, name: &str, value: String) {
        let Some(index) = header_index(name) else {
            trace!("ignoring tag {}", name);
            return;
        };

        if index == RESULT_INDEX {
            if !is_result(&value) {
                warn!("ignoring invalid result \"{}\"", value);
                return;
            }
            self.result_known = true;
        }

        self.values[index] = value;
    }

    /// Whether a valid `Result` tag has been seen.
    pub fn has_result(&self) -> bool {
        self.result_known
    }

    /// Uses `result` as the game result unless a valid tag already set one.
    pub fn fill_result(&mut self, result: &str) {
        if !self.result_known && is_result(result) {
            self.values[RESULT_INDEX] = result.to_string();
            self.result_known = true;
        }
    }

    pub fn into_values(self) -> [String; HEADER_COUNT] {
        self.values
    }
}
