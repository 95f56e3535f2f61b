pub mod error;
pub mod game;
pub mod movetext;

pub use error::{InvalidEncoding, MalformedTagLine, MovetextError};
pub use game::{GameReader, GameRecord};
pub use movetext::{parse_movetext, tokenize, Color, CommentEntry, ParsedMovetext, Token};
