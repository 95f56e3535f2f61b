pub mod headers;
mod reader;

pub use self::headers::{Headers, DEFAULT_VALUES, HEADERS, HEADER_COUNT, RESULTS};
pub use self::reader::GameReader;

use crate::movetext::CommentEntry;

/// One game: tag values in schema order plus its moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub headers: [String; HEADER_COUNT],
    /// Plain moves separated by single spaces.
    pub moves: String,
    pub comments: Vec<CommentEntry>,
}

impl GameRecord {
    pub fn header(&self, name: &str) -> Option<&str> {
        headers::header_index(name).map(|index| self.headers[index].as_str())
    }

    pub fn result(&self) -> &str {
        &self.headers[headers::RESULT_INDEX]
    }

    /// Iterates over `(tag, value)` pairs in schema order.
    pub fn tags(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        HEADERS
            .iter()
            .copied()
            .zip(self.headers.iter().map(String::as_str))
    }
}
