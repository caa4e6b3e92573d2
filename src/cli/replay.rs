//! Replay command implementation.

use super::{CliError, ReplayFormat};
use beetle_battle::replay::{GameRecord, ReplayEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the record cannot be loaded or does not replay.
pub(crate) fn execute(
    record_path: PathBuf,
    format: ReplayFormat,
    start: Option<usize>,
) -> Result<(), CliError> {
    let record = GameRecord::load(&record_path).map_err(|e| {
        CliError::new(format!("Failed to load record {}: {e}", record_path.display()))
    })?;

    let engine = ReplayEngine::new_at_move(record, start.unwrap_or(0))?;

    match format {
        ReplayFormat::Step => run_stepper(engine),
        ReplayFormat::Text => print_replay(engine, ReplayEngine::render_ascii),
        ReplayFormat::Plain => print_replay(engine, ReplayEngine::render_plain),
    }
}

fn print_replay(
    mut engine: ReplayEngine,
    render: fn(&ReplayEngine) -> String,
) -> Result<(), CliError> {
    let record = engine.record();
    println!(
        "Replay of {0}x{0} game ({1} moves)",
        record.dimension,
        record.moves.len()
    );
    println!();

    loop {
        println!("=== Move {} ===", engine.current_move());
        print!("{}", render(&engine));
        println!();

        if engine.is_at_end() {
            break;
        }
        engine.step_forward()?;
    }

    match engine.state().get_winner() {
        Some(winner) => println!("=== {winner} wins ==="),
        None => println!("=== No winner ==="),
    }

    Ok(())
}

/// A stepper command read from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepCommand {
    Forward,
    Backward,
    Goto(usize),
    Quit,
}

fn parse_step(line: &str) -> Option<StepCommand> {
    let mut words = line.split_whitespace();
    match words.next() {
        None | Some("n" | "next") => Some(StepCommand::Forward),
        Some("p" | "prev") => Some(StepCommand::Backward),
        Some("g" | "goto") => words.next()?.parse().ok().map(StepCommand::Goto),
        Some("q" | "quit") => Some(StepCommand::Quit),
        Some(_) => None,
    }
}

fn run_stepper(mut engine: ReplayEngine) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", engine.render_ascii());
        print!("[Enter/n] Forward  [p] Back  [g N] Goto move  [q] Quit: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };

        let result = match parse_step(&line?) {
            Some(StepCommand::Forward) => engine.step_forward(),
            Some(StepCommand::Backward) => engine.step_backward(),
            Some(StepCommand::Goto(target)) => engine.goto_move(target),
            Some(StepCommand::Quit) => return Ok(()),
            None => {
                println!("Unknown command.");
                continue;
            }
        };

        if let Err(e) = result {
            println!("{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step() {
        assert_eq!(parse_step(""), Some(StepCommand::Forward));
        assert_eq!(parse_step("n"), Some(StepCommand::Forward));
        assert_eq!(parse_step("prev"), Some(StepCommand::Backward));
        assert_eq!(parse_step("g 12"), Some(StepCommand::Goto(12)));
        assert_eq!(parse_step("g"), None);
        assert_eq!(parse_step("q"), Some(StepCommand::Quit));
        assert_eq!(parse_step("jump"), None);
    }
}
