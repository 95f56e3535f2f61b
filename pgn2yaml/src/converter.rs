mod serializer;
mod text;

use self::serializer::{write_json, write_yaml, SerializedGame};
use self::text::write_text;
use anyhow::{Context, Result};
use clap::ValueEnum;
use pgnparse::GameRecord;
use std::io::Write;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
pub enum Format {
    /// One YAML document per game
    Yaml,
    /// One JSON object per line
    Json,
    /// Human readable listing
    Text,
}

impl Format {
    /// File extension used when no output path is given. Text goes to
    /// stdout.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Format::Yaml => Some("yaml"),
            Format::Json => Some("json"),
            Format::Text => None,
        }
    }
}

pub struct Converter<W> {
    output: W,
    format: Format,
    comments: bool,
    games: usize,
}

impl<W: Write> Converter<W> {
    pub fn new(output: W, format: Format, comments: bool) -> Self {
        Converter {
            output,
            format,
            comments,
            games: 0,
        }
    }

    pub fn write_game(&mut self, record: &GameRecord) -> Result<()> {
        self.games += 1;

        let game = SerializedGame {
            record,
            comments: self.comments,
        };

        let written = match self.format {
            Format::Yaml => write_yaml(&mut self.output, &game),
            Format::Json => write_json(&mut self.output, &game),
            Format::Text => write_text(&mut self.output, self.games, record, self.comments),
        };

        written.with_context(|| format!("Cannot write game {}", self.games))
    }

    /// Flushes the output and returns the number of games written.
    pub fn finish(mut self) -> Result<usize> {
        self.output.flush().context("Cannot flush output")?;
        Ok(self.games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgnparse::GameReader;

    #[test]
    fn converts_every_game() {
        let pgn = "[Event \"A\"]\n\n1. e4 *\n\n[Event \"B\"]\n\n1. d4 *\n";

        let mut converter = Converter::new(Vec::new(), Format::Json, false);
        for record in GameReader::new(pgn.as_bytes()) {
            converter.write_game(&record.unwrap()).unwrap();
        }

        assert_eq!(converter.games, 2);
        let output = String::from_utf8(converter.output.clone()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert_eq!(converter.finish().unwrap(), 2);
    }

    #[test]
    fn extensions() {
        assert_eq!(Format::Yaml.extension(), Some("yaml"));
        assert_eq!(Format::Json.extension(), Some("json"));
        assert_eq!(Format::Text.extension(), None);
    }
}
