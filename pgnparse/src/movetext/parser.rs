use super::token::Token;
use super::{Color, CommentEntry, ParsedMovetext};
use crate::game::headers::is_result;

use tracing::debug;

// Suffix annotations glued to a move: `!`, `?`, `!!`, `??`, `!?`, `?!`
fn split_annotation(text: &str) -> (&str, &str) {
    text.split_at(text.trim_end_matches(|c: char| c == '!' || c == '?').len())
}

struct ParserState {
    move_number: u32,
    color: Color,
    // Where the next comment-like token goes: the last move played, if any
    last_move: Option<(u32, Color)>,
    // Whether the previous token was comment-like and may be merged into
    merge_open: bool,
    parsed: ParsedMovetext,
}

impl Default for ParserState {
    fn default() -> Self {
        ParserState {
            move_number: 0,
            color: Color::White,
            last_move: None,
            merge_open: false,
            parsed: ParsedMovetext::default(),
        }
    }
}

impl ParserState {
    fn move_number(&mut self, number: u32, black: bool) {
        if number < self.move_number {
            debug!(
                "move number goes back from {} to {}",
                self.move_number, number
            );
        }

        self.move_number = number;
        self.color = if black { Color::Black } else { Color::White };
        self.merge_open = false;
    }

    fn san_move(&mut self, text: &str) {
        let (mv, annotation) = split_annotation(text);
        if mv.is_empty() || mv.starts_with('$') || is_result(mv) {
            // Lone annotation, malformed glyph or annotated result
            self.comment(text);
            return;
        }

        if self.move_number == 0 {
            self.move_number = 1;
        }

        self.parsed.moves.push(mv.to_string());
        self.last_move = Some((self.move_number, self.color));
        self.merge_open = false;

        if self.color == Color::Black {
            self.move_number = self.move_number.saturating_add(1);
        }
        self.color = !self.color;

        if !annotation.is_empty() {
            self.comment(annotation);
        }
    }

    fn comment(&mut self, text: &str) {
        let (move_number, color) = self.last_move.unwrap_or((0, Color::White));

        if self.merge_open {
            if let Some(entry) = self.parsed.comments.last_mut() {
                if entry.move_number == move_number && entry.color == color {
                    entry.text.push(' ');
                    entry.text.push_str(text);
                    return;
                }
            }
        }

        self.parsed
            .comments
            .push(CommentEntry::new(move_number, color, text));
        self.merge_open = true;
    }

    fn token(mut self, token: &Token) -> Self {
        match *token {
            Token::MoveNumber { number, black } => self.move_number(number, black),
            Token::Move(text) => self.san_move(text),
            Token::Comment { text, .. }
            | Token::Variation(text)
            | Token::Nag(text)
            | Token::Result(text) => self.comment(text),
        }
        self
    }
}

/// Separates the moves of a token stream from its comment-like material.
///
/// Comment-like tokens are attributed to the move they follow and
/// consecutive ones at the same position are merged into a single entry.
pub fn parse(tokens: &[Token]) -> ParsedMovetext {
    tokens
        .iter()
        .fold(ParserState::default(), ParserState::token)
        .parsed
}
