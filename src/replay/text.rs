//! Flat text encoding of a game record.
//!
//! ```text
//! dimension: 3
//! winner: red
//!
//! move_number,color,row,column
//! 1,red,0,0
//! 2,blue,2,2
//! ```
//!
//! `winner` is `none` for an unfinished game. Lines are trimmed, and
//! trailing blank lines are ignored.

use std::fmt;

use crate::game::{Color, Location, Move};

use super::GameRecord;

/// Header row of the move table.
pub const MOVES_HEADER: &str = "move_number,color,row,column";

/// Errors raised while parsing the text encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A required `key: value` line is missing.
    MissingField(&'static str),
    /// A field value could not be parsed.
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Offending text.
        value: String,
    },
    /// The move table header is missing or wrong.
    MissingHeader,
    /// A move row is malformed.
    InvalidMove {
        /// 1-based line number in the input.
        line: usize,
        /// What is wrong with it.
        reason: String,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing `{field}:` line"),
            Self::InvalidField { field, value } => {
                write!(f, "invalid {field} value {value:?}")
            }
            Self::MissingHeader => write!(f, "missing move header `{MOVES_HEADER}`"),
            Self::InvalidMove { line, reason } => write!(f, "line {line}: {reason}"),
        }
    }
}

impl std::error::Error for RecordError {}

/// Encode a record in the flat text format.
#[must_use]
pub(crate) fn to_text(record: &GameRecord) -> String {
    let mut output = String::new();
    output.push_str(&format!("dimension: {}\n", record.dimension));
    let winner = record.winner.map_or("none", Color::name);
    output.push_str(&format!("winner: {winner}\n\n"));
    output.push_str(MOVES_HEADER);
    output.push('\n');
    for (index, mv) in record.moves.iter().enumerate() {
        output.push_str(&format!(
            "{},{},{},{}\n",
            index + 1,
            mv.color,
            mv.location.row,
            mv.location.column
        ));
    }
    output
}

/// Parse the flat text format.
///
/// # Errors
///
/// Returns an error if a header line is missing, a value does not parse,
/// or a move row is malformed or out of sequence.
pub(crate) fn parse(input: &str) -> Result<GameRecord, RecordError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let dimension_text = header_value(lines.next(), "dimension")?;
    let dimension = dimension_text
        .parse::<u16>()
        .map_err(|_| RecordError::InvalidField {
            field: "dimension",
            value: dimension_text.to_string(),
        })?;

    let winner_text = header_value(lines.next(), "winner")?;
    let winner = if winner_text.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(
            winner_text
                .parse::<Color>()
                .map_err(|_| RecordError::InvalidField {
                    field: "winner",
                    value: winner_text.to_string(),
                })?,
        )
    };

    match lines.next() {
        Some((_, header)) if header == MOVES_HEADER => {}
        _ => return Err(RecordError::MissingHeader),
    }

    let mut moves = Vec::new();
    for (line, row) in lines {
        moves.push(parse_move(line, row, moves.len() + 1)?);
    }

    Ok(GameRecord {
        dimension,
        winner,
        moves,
    })
}

fn header_value<'a>(
    line: Option<(usize, &'a str)>,
    field: &'static str,
) -> Result<&'a str, RecordError> {
    let (_, text) = line.ok_or(RecordError::MissingField(field))?;
    let (key, value) = text
        .split_once(':')
        .ok_or(RecordError::MissingField(field))?;
    if key.trim() != field {
        return Err(RecordError::MissingField(field));
    }
    Ok(value.trim())
}

fn parse_move(line: usize, text: &str, expected_number: usize) -> Result<Move, RecordError> {
    let invalid = |reason: String| RecordError::InvalidMove { line, reason };

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let [number, color, row, column] = fields.as_slice() else {
        return Err(invalid(format!("expected 4 fields, found {}", fields.len())));
    };

    let number: usize = number
        .parse()
        .map_err(|_| invalid(format!("bad move number {number:?}")))?;
    if number != expected_number {
        return Err(invalid(format!(
            "move number {number} out of sequence (expected {expected_number})"
        )));
    }

    let color: Color = color.parse().map_err(|e| invalid(format!("{e}")))?;
    let row: u16 = row.parse().map_err(|_| invalid(format!("bad row {row:?}")))?;
    let column: u16 = column
        .parse()
        .map_err(|_| invalid(format!("bad column {column:?}")))?;

    Ok(Move::new(color, Location::new(row, column)))
}
