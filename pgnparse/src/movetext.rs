mod parser;
mod token;
mod tokenizer;


pub use self::parser::parse;
pub use self::token::Token;
pub use self::tokenizer::tokenize;

use crate::error::MovetextError;

use serde::Serialize;
use std::{fmt, ops::Not};

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Color::White => "white",
                Color::Black => "black",
            }
        )
    }
}

/// Comment-like material (comments, variations, glyphs, results) attached
/// to the move played by `color` at `move_number`.
///
/// Move number 0 holds whatever appears before the first move.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CommentEntry {
    pub move_number: u32,
    pub color: Color,
    pub text: String,
}

impl CommentEntry {
    pub fn new(move_number: u32, color: Color, text: impl Into<String>) -> Self {
        CommentEntry {
            move_number,
            color,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ParsedMovetext {
    pub moves: Vec<String>,
    pub comments: Vec<CommentEntry>,
}

impl ParsedMovetext {
    /// The moves joined by single spaces.
    pub fn moves_text(&self) -> String {
        self.moves.join(" ")
    }
}

/// Tokenizes and parses a movetext block in one go.
pub fn parse_movetext(movetext: &str) -> Result<ParsedMovetext, MovetextError> {
    let tokens = tokenize(movetext)?;
    Ok(parse(&tokens))
}
