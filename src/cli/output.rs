//! Output formatting utilities for CLI.

use beetle_battle::Color;
use beetle_battle::tournament::{Strategy, TournamentStats};
use serde::Serialize;

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Per-color statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Number of games stopped by the move cap.
    draws: u64,
    /// Average game length in moves.
    avg_moves: f64,
}

/// JSON-serializable per-color tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Color played.
    color: Color,
    /// Strategy used.
    strategy: Strategy,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl JsonTournamentResult {
    /// Create from stats and strategies.
    pub(super) fn from_stats(stats: &TournamentStats, strategies: [Strategy; 2]) -> Self {
        let players = seats(strategies)
            .map(|(color, strategy)| JsonTournamentPlayer {
                color,
                strategy,
                wins: stats.wins(color),
                win_rate: stats.win_rate(color),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            players,
            draws: stats.draws,
            avg_moves: stats.avg_moves(),
        }
    }
}

fn seats(strategies: [Strategy; 2]) -> impl Iterator<Item = (Color, Strategy)> {
    [Color::Red, Color::Blue].into_iter().zip(strategies)
}

#[allow(clippy::cast_precision_loss)]
fn draw_rate(stats: &TournamentStats) -> f64 {
    if stats.games_played == 0 {
        return 0.0;
    }
    stats.draws as f64 / stats.games_played as f64
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, strategies: [Strategy; 2]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (color, strategy) in seats(strategies) {
        output.push_str(&format!(
            "  {color:<4} ({strategy}): {:.1}% ({} wins)\n",
            stats.win_rate(color) * 100.0,
            stats.wins(color)
        ));
    }
    output.push_str(&format!(
        "  Draws: {} ({:.1}%)\n",
        stats.draws,
        draw_rate(stats) * 100.0
    ));

    output.push_str(&format!("\nAverage Game Length: {:.1} moves\n", stats.avg_moves()));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, strategies: [Strategy; 2]) -> String {
    let mut output = String::new();

    output.push_str("color,strategy,wins,win_rate,draws,avg_moves\n");

    for (color, strategy) in seats(strategies) {
        output.push_str(&format!(
            "{color},{strategy},{},{:.4},{},{:.2}\n",
            stats.wins(color),
            stats.win_rate(color),
            stats.draws,
            stats.avg_moves()
        ));
    }

    output
}
