use anyhow::{Context, Result};
use pgnparse::{GameReader, InvalidEncoding, MovetextError};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

pub fn open_pgn_file(pgn_file_path: &PathBuf) -> Result<GameReader<BufReader<File>>> {
    let file = File::open(pgn_file_path).with_context(|| {
        format!(
            "Could not open file {} for reading",
            pgn_file_path.to_string_lossy()
        )
    })?;

    Ok(GameReader::new(BufReader::new(file)))
}

/// Whether the error only affects the game it was read from.
pub fn is_game_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<MovetextError>().is_some()
        || err.downcast_ref::<InvalidEncoding>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_errors() {
        let pgn: &[u8] = b"[White \"\xf6\"]\n\n1. e4 *\n\n\
            [Event \"Open\"]\n\n1. e4 {\n\n\
            [Event \"Last\"]\n\n1. d4 *\n";
        let results: Vec<Result<_>> = GameReader::new(pgn).collect();

        assert_eq!(results.len(), 3);
        assert!(is_game_error(results[0].as_ref().unwrap_err()));
        assert!(is_game_error(results[1].as_ref().unwrap_err()));
        assert_eq!(results[2].as_ref().unwrap().header("Event"), Some("Last"));

        let io_error = anyhow::Error::new(std::io::Error::from(std::io::ErrorKind::InvalidData));
        assert!(!is_game_error(&io_error));
    }
}
