//! Beetle Battle CLI - play, replay and benchmark games from the terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "BEETLE_LOG";

/// Beetle Battle - a chain-reaction territory game
#[derive(Parser, Debug)]
#[command(name = "beetle-battle")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine activity (overridden by BEETLE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Board dimension
        #[arg(short = 'n', long, default_value = "5")]
        size: u16,

        /// Who plays red
        #[arg(long, default_value = "human")]
        red: cli::PlayerKind,

        /// Who plays blue
        #[arg(long, default_value = "greedy")]
        blue: cli::PlayerKind,

        /// Random seed for computer players (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print every engine notification
        #[arg(short, long)]
        events: bool,

        /// Save the finished game to a file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Record format for --save
        #[arg(long, default_value = "text")]
        record_format: cli::RecordFormat,
    },

    /// Replay a recorded game
    Replay {
        /// Record file (text or JSON)
        #[arg(required = true)]
        record: PathBuf,

        /// Output format: step, text, or plain
        #[arg(short, long, default_value = "text")]
        format: cli::ReplayFormat,

        /// Start after this many moves
        #[arg(short = 'm', long = "move")]
        start: Option<usize>,
    },

    /// Run mass parallel games and aggregate statistics
    Tournament {
        /// Strategy playing red
        #[arg(long, default_value = "greedy")]
        red: cli::StrategyArg,

        /// Strategy playing blue
        #[arg(long, default_value = "random")]
        blue: cli::StrategyArg,

        /// Number of games to run
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Board dimension
        #[arg(short = 'n', long, default_value = "5")]
        size: u16,

        /// Moves per game before it is scored as a draw
        #[arg(short = 'm', long, default_value = "500")]
        max_moves: usize,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Play {
            size,
            red,
            blue,
            seed,
            events,
            save,
            record_format,
        } => cli::play::execute(size, [red, blue], seed, events, save, record_format),

        Commands::Replay {
            record,
            format,
            start,
        } => cli::replay::execute(record, format, start),

        Commands::Tournament {
            red,
            blue,
            games,
            seed,
            threads,
            size,
            max_moves,
            format,
            progress,
        } => cli::tournament::execute(
            [red, blue],
            games,
            seed,
            threads,
            size,
            max_moves,
            format,
            progress,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
