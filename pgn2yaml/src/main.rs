mod converter;
mod reader;

use converter::{Converter, Format};
use reader::{is_game_error, open_pgn_file};

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PGN file
    file: String,

    /// Output path (if not specified, same as the PGN file with the extension changed, or stdout for text)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Include comments, variations and annotations of every move
    #[arg(long)]
    comments: bool,

    /// Log more details to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn output_path(cli: &Cli, pgn_path: &PathBuf) -> Option<PathBuf> {
    cli.output.as_ref().map(PathBuf::from).or_else(|| {
        cli.format.extension().map(|extension| {
            let mut path = pgn_path.clone();
            path.set_extension(extension);
            path
        })
    })
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| {
                format!(
                    "Could not open file {} for writing",
                    path.to_string_lossy()
                )
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let pgn_path = PathBuf::from(&cli.file);
    let output_path = output_path(&cli, &pgn_path);

    if let Some(path) = &output_path {
        info!("Writing {:?} to {}", cli.format, path.to_string_lossy());
    }

    if output_path.is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let mut converter = Converter::new(
        open_output(output_path.as_ref())?,
        cli.format,
        cli.comments,
    );

    let mut skipped = 0usize;
    for result in open_pgn_file(&pgn_path)? {
        match result {
            Ok(record) => converter.write_game(&record)?,
            Err(err) if is_game_error(&err) => {
                error!("{:#}", err);
                skipped += 1;
            }
            Err(err) => return Err(err.context("Unable to parse PGN file")),
        }
    }

    let written = converter.finish()?;
    eprintln!("Converted {} games ({} skipped)", written, skipped);

    Ok(())
}
