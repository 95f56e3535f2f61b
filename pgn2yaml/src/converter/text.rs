use anyhow::Result;
use colored::Colorize;
use pgnparse::{Color, GameRecord};
use std::io::Write;

pub fn write_text<W: Write>(
    output: &mut W,
    number: usize,
    record: &GameRecord,
    comments: bool,
) -> Result<()> {
    writeln!(output, "{}", format!("Game {}", number).bold())?;

    for (tag, value) in record.tags() {
        writeln!(output, "{}: {}", tag.cyan(), value)?;
    }

    writeln!(output)?;
    writeln!(output, "{}", "Moves:".bold())?;
    writeln!(output, "{}", record.moves)?;

    if comments && !record.comments.is_empty() {
        writeln!(output)?;
        writeln!(output, "{}", "Comments:".bold())?;
        for entry in &record.comments {
            let marker = match entry.color {
                Color::White => format!("{}.", entry.move_number),
                Color::Black => format!("{}...", entry.move_number),
            };
            writeln!(output, "{} {}", marker.yellow(), entry.text)?;
        }
    }

    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgnparse::GameReader;

    #[test]
    fn plain_text() {
        colored::control::set_override(false);

        let record = GameReader::new("[Event \"Test\"]\n\n{Intro} 1. e4 e5 $1 *\n".as_bytes())
            .read_game()
            .unwrap()
            .unwrap();

        let mut output = Vec::new();
        write_text(&mut output, 3, &record, true).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("Game 3\nEvent: Test\nSite: ?\n"));
        assert!(text.contains("Result: *\n"));
        assert!(text.contains("\nMoves:\ne4 e5\n"));
        assert!(text.contains("\nComments:\n0. {Intro}\n1... $1 *\n"));
    }
}
