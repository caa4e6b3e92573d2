//! Tournament command implementation.

use super::output::{JsonTournamentResult, format_tournament_csv, format_tournament_text};
use super::{CliError, StrategyArg, TournamentFormat, clock_seed};
use beetle_battle::tournament::{MatchConfig, Strategy, run_tournament};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    players: [StrategyArg; 2],
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    size: u16,
    max_moves: usize,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let strategies: [Strategy; 2] = players.map(Strategy::from);

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(clock_seed);

    let config = MatchConfig {
        dimension: size,
        max_moves,
        ..MatchConfig::default()
    };

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})",
            )
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let stats = run_tournament(games, base_seed, strategies, &config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, strategies));
            println!();
            println!("Base seed: {base_seed}");
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats, strategies);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, strategies));
        }
    }

    Ok(())
}
