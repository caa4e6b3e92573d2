//! Board renderers for terminal viewing.

use crate::game::{Board, Cell, Color, Game, GameObserver, Location};

const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GRAY: &str = "\x1b[90m";

/// Render a game position with ANSI colors.
///
/// Output format:
/// ```text
/// Move 5/12                               Red to move
/// ┌──────────┐
/// │ R1  .  . │
/// │  . B2  . │
/// │  .  . R1 │
/// └──────────┘
///
/// Red:  2 cells  2 pieces
/// Blue: 1 cells  2 pieces
/// ```
#[must_use]
pub fn render_ascii<O: GameObserver>(game: &Game<O>, move_number: usize, total_moves: usize) -> String {
    let mut output = String::new();
    let board = game.board();

    render_header(&mut output, game, move_number, total_moves);

    let inner_width = usize::from(board.dimension()) * 3 + 1;
    output.push('┌');
    output.push_str(&"─".repeat(inner_width));
    output.push_str("┐\n");

    for row in 0..board.dimension() {
        output.push('│');
        for column in 0..board.dimension() {
            output.push(' ');
            render_cell(&mut output, board.cell(Location::new(row, column)));
        }
        output.push_str(" │\n");
    }

    output.push('└');
    output.push_str(&"─".repeat(inner_width));
    output.push_str("┘\n\n");

    for color in [Color::Red, Color::Blue] {
        let pieces: usize = board.cells_owned_by(color).map(Cell::len).sum();
        output.push_str(&format!(
            "{}{:<5}{RESET} {} cells  {pieces} pieces\n",
            ansi(color),
            format!("{}:", title(color)),
            board.count_cells(color),
        ));
    }

    output
}

/// Render a board without colors, one line per row.
///
/// Empty cells show as `.`, occupied cells as the owner's initial followed
/// by the piece count.
#[must_use]
pub fn render_plain(board: &Board) -> String {
    let mut output = String::new();
    for row in 0..board.dimension() {
        let line: Vec<String> = (0..board.dimension())
            .map(|column| format!("{:>2}", cell_token(board.cell(Location::new(row, column)))))
            .collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }
    output
}

fn render_header<O: GameObserver>(
    output: &mut String,
    game: &Game<O>,
    move_number: usize,
    total_moves: usize,
) {
    let progress = format!("Move {move_number}/{total_moves}");
    output.push_str(&format!("{progress:<40}"));

    let color = game.get_winner().unwrap_or(game.turn());
    let status = if game.is_over() { "wins" } else { "to move" };
    output.push_str(&format!("{BOLD}{}{} {status}{RESET}\n", ansi(color), title(color)));
}

fn render_cell(output: &mut String, cell: Option<&Cell>) {
    let token = cell_token(cell);
    match cell.and_then(Cell::color) {
        Some(color) => output.push_str(&format!("{}{token:>2}{RESET}", ansi(color))),
        None => output.push_str(&format!("{GRAY}{token:>2}{RESET}")),
    }
}

fn cell_token(cell: Option<&Cell>) -> String {
    match cell {
        Some(cell) => match cell.color() {
            Some(color) => format!("{}{}", initial(color), cell.len()),
            None => ".".to_string(),
        },
        None => "?".to_string(),
    }
}

const fn ansi(color: Color) -> &'static str {
    match color {
        Color::Red => RED,
        Color::Blue => BLUE,
    }
}

const fn initial(color: Color) -> char {
    match color {
        Color::Red => 'R',
        Color::Blue => 'B',
    }
}

const fn title(color: Color) -> &'static str {
    match color {
        Color::Red => "Red",
        Color::Blue => "Blue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game() -> Game {
        let mut game = Game::new(3).unwrap();
        for (row, column) in [(0, 0), (1, 1), (2, 2), (1, 1)] {
            assert!(game.do_move(Location::new(row, column)));
        }
        game
    }

    #[test]
    fn test_render_plain() {
        let game = sample_game();
        assert_eq!(render_plain(game.board()), "R1  .  .\n . B2  .\n .  . R1\n");
    }

    #[test]
    fn test_render_plain_empty_board() {
        let board = Board::new(2).unwrap();
        assert_eq!(render_plain(&board), " .  .\n .  .\n");
    }

    #[test]
    fn test_render_ascii_basic() {
        let game = sample_game();
        let output = render_ascii(&game, 4, 10);

        assert!(output.contains("Move 4/10"));
        assert!(output.contains("Red to move"));
        assert!(output.contains('┌'));
        assert!(output.contains('┘'));
        assert!(output.contains(&format!("{RED}R1{RESET}")));
        assert!(output.contains(&format!("{BLUE}B2{RESET}")));
        assert!(output.contains("2 cells  2 pieces"));
        assert!(output.contains("1 cells  2 pieces"));
        // Header, top border, three rows, bottom border, blank, two totals.
        assert_eq!(output.lines().count(), 9);
    }

    #[test]
    fn test_render_ascii_announces_winner() {
        let mut game = Game::new(3).unwrap();
        for (row, column) in [(0, 0), (0, 1), (2, 2), (0, 1), (0, 0)] {
            assert!(game.do_move(Location::new(row, column)));
        }
        let output = render_ascii(&game, 5, 5);
        assert!(output.contains("Red wins"));
    }
}
