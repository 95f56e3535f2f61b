use anyhow::{Context, Result};
use pgnparse::GameRecord;
use serde::ser::SerializeMap;
use serde::Serialize;
use std::io::Write;

pub struct SerializedGame<'a> {
    pub record: &'a GameRecord,
    pub comments: bool,
}

struct SerializedTags<'a>(&'a GameRecord);

impl<'a> Serialize for SerializedTags<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.headers.len()))?;

        for (tag, value) in self.0.tags() {
            map.serialize_entry(tag, value)?;
        }

        map.end()
    }
}

impl<'a> Serialize for SerializedGame<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let entries = if self.comments { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(entries))?;

        map.serialize_entry("tags", &SerializedTags(self.record))?;
        map.serialize_entry("moves", &self.record.moves)?;
        if self.comments {
            map.serialize_entry("comments", &self.record.comments)?;
        }

        map.end()
    }
}

/// Writes the game as one document of a YAML stream.
pub fn write_yaml<W: Write>(output: &mut W, game: &SerializedGame) -> Result<()> {
    writeln!(output, "---")?;
    serde_yaml::to_writer(&mut *output, game).context("Error writing YAML data")
}

/// Writes the game as a single line of JSON.
pub fn write_json<W: Write>(output: &mut W, game: &SerializedGame) -> Result<()> {
    serde_json::to_writer(&mut *output, game).context("Error writing JSON data")?;
    writeln!(output)?;
    Ok(())
}
