//! Command-line front end: reads a puzzle description and prints its clauses or its solution.
//!
//! Usage:
//!   linkcnf solve <puzzle.json> [--records]
//!   linkcnf cnf --stdin
//!
//! A puzzle file looks like `{"width": 5, "height": 5, "endpoints": [[0, 0], [1, 4], ...]}`, where consecutive
//! endpoints share a color.

use std::fs;
use std::io::{self, Read};
use std::num::NonZero;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use serde::Deserialize;

use linkcnf::{decode, encode, solve_clauses, Location, Puzzle, SolverFailure, VarisatBackend};

#[derive(Parser)]
#[command(name = "linkcnf")]
#[command(about = "Solve Numberlink puzzles with a SAT solver")]
#[command(version)]
struct Cli {
    /// Log encoder and solver progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle and print the solved grid
    Solve {
        #[command(flatten)]
        input: Input,

        /// Print one satisfied color variable per line with its links instead of the grid
        #[arg(long)]
        records: bool,
    },
    /// Print the CNF clauses for a puzzle, one per line
    Cnf {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args)]
struct Input {
    /// Path to puzzle JSON file (use --stdin to read from stdin)
    #[arg(value_name = "FILE", required_unless_present = "stdin")]
    file: Option<PathBuf>,

    /// Read puzzle from stdin instead of file
    #[arg(long)]
    stdin: bool,
}

#[derive(Debug, Deserialize)]
struct PuzzleFile {
    width: usize,
    height: usize,
    endpoints: Vec<[usize; 2]>,
}

impl PuzzleFile {
    fn into_puzzle(self) -> Result<Puzzle> {
        let width = NonZero::new(self.width).context("width must be positive")?;
        let height = NonZero::new(self.height).context("height must be positive")?;
        let endpoints = self.endpoints.into_iter()
            .map(|[x, y]| Location(x, y))
            .collect();

        Ok(Puzzle::new((width, height), endpoints)?)
    }
}

impl Input {
    fn read(&self) -> Result<Puzzle> {
        let text = match (&self.file, self.stdin) {
            (_, true) | (None, _) => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
                buf
            }
            (Some(path), false) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        };

        let file: PuzzleFile = serde_json::from_str(&text).context("failed to parse puzzle JSON")?;
        file.into_puzzle()
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Cnf { input } => {
            let puzzle = input.read()?;
            for clause in encode(&puzzle) {
                println!("{}", clause);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Solve { input, records } => {
            let puzzle = input.read()?;
            info!("solving {}x{} puzzle with {} colors", puzzle.width(), puzzle.height(), puzzle.color_count());

            let solved = solve_clauses(&encode(&puzzle), VarisatBackend::default());
            match solved {
                Ok(found) if records => {
                    found.iter().for_each(|record| println!("{}", record));
                    Ok(ExitCode::SUCCESS)
                }
                Ok(found) => {
                    print!("{}", decode(puzzle.dims(), &found));
                    Ok(ExitCode::SUCCESS)
                }
                Err(failure @ (SolverFailure::Unsatisfiable | SolverFailure::Indeterminate)) => {
                    eprintln!("{}", failure);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
