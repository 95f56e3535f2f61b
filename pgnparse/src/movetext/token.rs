use std::fmt;

/// Lexical unit of a movetext block. Text is borrowed verbatim from the
/// input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// `12.` (White to move) or `12...` (Black to move).
    MoveNumber { number: u32, black: bool },
    /// A move with whatever glyphs are glued to it, e.g. `Qxf7#` or `Nf6??`.
    Move(&'a str),
    /// `{...}` with both braces (`delimited`), or a `;` comment up to the
    /// end of the line.
    Comment { text: &'a str, delimited: bool },
    /// The outermost `(...)` group, parentheses included.
    Variation(&'a str),
    /// Numeric annotation glyph such as `$14`.
    Nag(&'a str),
    /// `1-0`, `0-1`, `1/2-1/2` or `*`.
    Result(&'a str),
}

impl<'a> Token<'a> {
    /// Everything except move numbers and moves ends up in the comment list.
    pub fn is_comment_like(&self) -> bool {
        !matches!(self, Token::MoveNumber { .. } | Token::Move(_))
    }

    /// Verbatim source text, or `None` for move numbers whose spelling is
    /// not preserved.
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Token::MoveNumber { .. } => None,
            Token::Move(text)
            | Token::Comment { text, .. }
            | Token::Variation(text)
            | Token::Nag(text)
            | Token::Result(text) => Some(text),
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::MoveNumber {
                number,
                black: false,
            } => write!(f, "{}.", number),
            Token::MoveNumber {
                number,
                black: true,
            } => write!(f, "{}...", number),
            _ => write!(f, "{}", self.text().unwrap_or_default()),
        }
    }
}
