#![no_main]

//! Move sequence fuzzer.
//!
//! Feeds arbitrary placements (legal or not) through the engine and checks
//! the board invariants after every accepted move. Illegal placements must
//! leave the game untouched.

use arbitrary::Arbitrary;
use beetle_battle::game::{check_invariants, Game, Location};
use libfuzzer_sys::fuzz_target;

/// Structured input for move sequence fuzzing.
#[derive(Arbitrary, Debug)]
struct MovesInput {
    /// Board dimension, folded into 2..=9.
    dimension: u8,
    /// Raw placements; coordinates may fall off the board.
    moves: Vec<(u8, u8)>,
}

fuzz_target!(|input: MovesInput| {
    let dimension = 2 + u16::from(input.dimension % 8);
    let Ok(mut game) = Game::new(dimension) else {
        return;
    };

    for &(row, column) in input.moves.iter().take(400) {
        let location = Location::new(u16::from(row % 12), u16::from(column % 12));
        let before = game.history().len();
        let legal = game.check_move(location);

        let accepted = game.do_move(location);
        assert_eq!(accepted, legal, "check_move and do_move disagree at {location}");

        if accepted {
            assert_eq!(game.history().len(), before + 1);
            let violations = check_invariants(&game);
            assert!(violations.is_empty(), "{violations:?}");
        } else {
            assert_eq!(game.history().len(), before);
        }
    }
});
