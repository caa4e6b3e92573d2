//! Play command implementation.

use super::{CliError, PlayerKind, RecordFormat, clock_seed};
use beetle_battle::ai::Evaluator;
use beetle_battle::replay::{GameRecord, render_ascii};
use beetle_battle::{Color, Game, GameObserver, Location, PieceId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Observer that prints engine notifications as they happen.
#[derive(Debug, Clone, Copy)]
struct ConsoleObserver {
    enabled: bool,
}

impl GameObserver for ConsoleObserver {
    fn turn_changed(&mut self, color: Color) {
        if self.enabled {
            println!("  turn -> {color}");
        }
    }

    fn piece_added(&mut self, piece: PieceId, color: Color, location: Location) {
        if self.enabled {
            println!("  + #{piece} {color} at {location}");
        }
    }

    fn piece_moved(&mut self, from: Location, to: Location) {
        if self.enabled {
            println!("  ~ {from} -> {to}");
        }
    }

    fn piece_recolored(&mut self, piece: PieceId, color: Color) {
        if self.enabled {
            println!("  * #{piece} is now {color}");
        }
    }

    fn winner_announced(&mut self, color: Color) {
        if self.enabled {
            println!("  ! {color} wins");
        }
    }
}

/// What a human typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HumanInput {
    Place(Location),
    Hint,
    Quit,
}

/// Parse one prompt line.
fn parse_input(line: &str) -> Result<HumanInput, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(HumanInput::Quit),
        "h" | "hint" => return Ok(HumanInput::Hint),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [row, column] = parts.as_slice() else {
        return Err(format!("expected `row column`, got {line:?}"));
    };
    let row = row.parse().map_err(|_| format!("bad row {row:?}"))?;
    let column = column.parse().map_err(|_| format!("bad column {column:?}"))?;
    Ok(HumanInput::Place(Location::new(row, column)))
}

/// Prompt until a legal move is entered. Returns `None` on quit or end of
/// input.
fn prompt_human<O: GameObserver>(
    game: &Game<O>,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<Location>, CliError> {
    loop {
        print!("{} to move (row column, hint, quit): ", game.turn());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };

        match parse_input(&line?) {
            Ok(HumanInput::Quit) => return Ok(None),
            Ok(HumanInput::Hint) => match game.get_best_move() {
                Some(location) => println!("Suggested move: {location}"),
                None => println!("No legal moves."),
            },
            Ok(HumanInput::Place(location)) if game.check_move(location) => {
                return Ok(Some(location));
            }
            Ok(HumanInput::Place(location)) => println!("Illegal move at {location}."),
            Err(message) => println!("{message}"),
        }
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the board size is invalid, stdin fails, or the
/// record cannot be saved.
pub(crate) fn execute(
    size: u16,
    players: [PlayerKind; 2],
    seed: Option<u64>,
    events: bool,
    save: Option<PathBuf>,
    record_format: RecordFormat,
) -> Result<(), CliError> {
    let mut game = Game::with_observer(size, ConsoleObserver { enabled: events })?;
    let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(clock_seed));
    let evaluator = Evaluator::default();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", render_ascii(&game, 0, 0));

    while !game.is_over() {
        let kind = match game.turn() {
            Color::Red => players[0],
            Color::Blue => players[1],
        };

        let location = match kind.strategy() {
            Some(strategy) => strategy
                .choose_move(&evaluator, &game, &mut rng)
                .ok_or_else(|| CliError::new("No legal move available"))?,
            None => match prompt_human(&game, &mut lines)? {
                Some(location) => location,
                None => {
                    println!("Game abandoned.");
                    break;
                }
            },
        };

        println!("{} plays {location}", game.turn());
        if !game.do_move(location) {
            return Err(CliError::new(format!("Engine rejected move at {location}")));
        }

        let played = game.history().len();
        println!("{}", render_ascii(&game, played, played));
    }

    match game.get_winner() {
        Some(winner) => println!("{winner} wins after {} moves.", game.history().len()),
        None => println!("No winner after {} moves.", game.history().len()),
    }

    if let Some(path) = save {
        let record = GameRecord::from_game(&game);
        match record_format {
            RecordFormat::Text => record.save(&path)?,
            RecordFormat::Json => record.save_json(&path)?,
        }
        println!("Saved record to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("1 2"), Ok(HumanInput::Place(Location::new(1, 2))));
        assert_eq!(parse_input(" 3,4 "), Ok(HumanInput::Place(Location::new(3, 4))));
        assert_eq!(parse_input("HINT"), Ok(HumanInput::Hint));
        assert_eq!(parse_input("q"), Ok(HumanInput::Quit));
        assert!(parse_input("1").is_err());
        assert!(parse_input("a b").is_err());
    }
}
