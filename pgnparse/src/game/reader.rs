use super::headers::{self, Headers};
use super::GameRecord;
use crate::error::InvalidEncoding;
use crate::movetext::{self, ParsedMovetext, Token};

use anyhow::{Context, Result};
use std::io::BufRead;
use tracing::{debug, warn};

const BYTE_ORDER_MARK: &[u8] = b"\xef\xbb\xbf";

// Tracks comments and variations left open at the end of a line
#[derive(Default)]
struct Nesting {
    in_comment: bool,
    depth: usize,
}

impl Nesting {
    fn scan(&mut self, line: &str) {
        if line.starts_with('%') {
            return;
        }

        for c in line.chars() {
            if self.in_comment {
                self.in_comment = c != '}';
                continue;
            }

            match c {
                '{' => self.in_comment = true,
                '(' => self.depth += 1,
                ')' => self.depth = self.depth.saturating_sub(1),
                ';' => break,
                _ => (),
            }
        }
    }

    fn is_open(&self) -> bool {
        self.in_comment || self.depth > 0
    }
}

// Undecodable bytes are replaced, the line remembers it was not UTF-8
struct Line {
    text: String,
    number: usize,
    utf8: bool,
}

/// Reads PGN games one at a time from a buffered source.
///
/// Each call to [`GameReader::read_game`] consumes exactly one game, so the
/// reader can be driven in a loop (or used as an iterator) over arbitrarily
/// large inputs.
pub struct GameReader<R> {
    reader: R,
    // First line of the next game, read while looking for the end of the
    // previous one
    pending: Option<Line>,
    lines: usize,
    games: usize,
    // First undecodable line of the game being read
    invalid_line: Option<usize>,
}

impl<R: BufRead> GameReader<R> {
    pub fn new(reader: R) -> Self {
        GameReader {
            reader,
            pending: None,
            lines: 0,
            games: 0,
            invalid_line: None,
        }
    }

    /// Number of games returned so far, including malformed ones.
    pub fn games_read(&self) -> usize {
        self.games
    }

    /// Returns the underlying reader. A line that was already read ahead
    /// is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_line(&mut self) -> Result<Option<Line>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        let mut bytes = Vec::new();
        if self
            .reader
            .read_until(b'\n', &mut bytes)
            .context("Unable to read PGN data")?
            == 0
        {
            return Ok(None);
        }

        self.lines += 1;
        if self.lines == 1 && bytes.starts_with(BYTE_ORDER_MARK) {
            bytes.drain(..BYTE_ORDER_MARK.len());
        }

        let (text, utf8) = match String::from_utf8(bytes) {
            Ok(text) => (text, true),
            Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), false),
        };

        Ok(Some(Line {
            text,
            number: self.lines,
            utf8,
        }))
    }

    fn push_back(&mut self, line: Line) {
        self.pending = Some(line);
    }

    // Called for every line that becomes part of the current game
    fn accept(&mut self, line: &Line) {
        if !line.utf8 && self.invalid_line.is_none() {
            self.invalid_line = Some(line.number);
        }
    }

    // Returns the headers and the number of tag lines read
    fn read_headers(&mut self, game: usize) -> Result<(Headers, usize)> {
        let mut headers = Headers::default();
        let mut tag_lines = 0;

        while let Some(line) = self.next_line()? {
            if !line.text.trim_start().starts_with('[') {
                self.push_back(line);
                break;
            }

            self.accept(&line);
            tag_lines += 1;
            match headers::parse_tag_line(&line.text) {
                Ok((name, value)) => headers.set(&name, value),
                Err(err) => warn!("game {}: skipping line: {}", game, err),
            }
        }

        Ok((headers, tag_lines))
    }

    fn read_movetext(&mut self) -> Result<String> {
        let mut movetext = String::new();
        let mut nesting = Nesting::default();

        while let Some(line) = self.next_line()? {
            // Inside an unterminated comment or variation only a complete
            // tag pair ends the game
            let next_game = if nesting.is_open() {
                headers::is_tag_line(&line.text)
            } else {
                line.text.trim_start().starts_with('[')
            };

            if next_game {
                self.push_back(line);
                break;
            }

            self.accept(&line);
            nesting.scan(&line.text);
            movetext.push_str(&line.text);
        }

        Ok(movetext)
    }

    /// Reads the next game.
    ///
    /// Returns `Ok(None)` once only whitespace is left. A game with
    /// malformed movetext or bytes that are not UTF-8 is reported as an
    /// error, after which the reader is positioned at the following game.
    pub fn read_game(&mut self) -> Result<Option<GameRecord>> {
        loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.text.trim().is_empty() => continue,
                Some(line) => {
                    self.push_back(line);
                    break;
                }
            }
        }

        self.games += 1;
        self.invalid_line = None;
        let game = self.games;

        let (mut headers, tag_lines) = self.read_headers(game)?;
        let movetext = self.read_movetext()?;

        if let Some(line) = self.invalid_line {
            return Err(InvalidEncoding { line })
                .with_context(|| format!("Unreadable game {}", game));
        }

        let tokens = movetext::tokenize(&movetext)
            .with_context(|| format!("Malformed movetext in game {}", game))?;

        if !headers.has_result() {
            if let Some(Token::Result(result)) = tokens.last() {
                debug!("game {}: result {} taken from movetext", game, result);
                headers.fill_result(result);
            }
        }

        // Headerless text with neither move numbers nor a result
        let is_movetext = tag_lines > 0
            || tokens.iter().all(Token::is_comment_like)
            || tokens
                .iter()
                .any(|token| matches!(token, Token::MoveNumber { .. } | Token::Result(_)));

        let parsed = if is_movetext {
            movetext::parse(&tokens)
        } else {
            warn!(
                "game {}: no headers, move numbers or result, ignoring {:?}",
                game,
                movetext.trim()
            );
            ParsedMovetext::default()
        };

        debug!(
            "game {}: {} moves, {} comments",
            game,
            parsed.moves.len(),
            parsed.comments.len()
        );

        Ok(Some(GameRecord {
            headers: headers.into_values(),
            moves: parsed.moves_text(),
            comments: parsed.comments,
        }))
    }
}

impl<R: BufRead> Iterator for GameReader<R> {
    type Item = Result<GameRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_game().transpose()
    }
}
