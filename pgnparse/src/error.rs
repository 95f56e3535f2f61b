use std::{error::Error, fmt};

/// Error produced while splitting movetext into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovetextError {
    /// A `{` or `(` that is never closed, or a `}` or `)` that closes
    /// nothing. `offset` is the byte position of the offending character.
    UnbalancedDelimiter { delimiter: char, offset: usize },
}

impl fmt::Display for MovetextError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MovetextError::UnbalancedDelimiter { delimiter, offset } => {
                write!(f, "unbalanced '{}' at offset {}", delimiter, offset)
            }
        }
    }
}

impl Error for MovetextError {}

/// A header line that is not a `[Tag "Value"]` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTagLine(pub String);

impl fmt::Display for MalformedTagLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "malformed tag pair: {}", self.0)
    }
}

impl Error for MalformedTagLine {}

/// A game containing bytes that are not valid UTF-8. The rest of the game
/// is consumed so reading can resume at the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEncoding {
    /// 1-based line number of the first undecodable line.
    pub line: usize,
}

impl fmt::Display for InvalidEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {} is not valid UTF-8", self.line)
    }
}

impl Error for InvalidEncoding {}
