use crate::{
    moves::{MoveSequence, MoveSet},
    puzzle::PuzzleState,
};

/// `op_count` moves drawn uniformly from `move_set`.
#[must_use]
pub fn random_scramble(op_count: usize, move_set: MoveSet, rng: &mut fastrand::Rng) -> MoveSequence {
    let moves = move_set.moves();
    (0..op_count)
        .map(|_| moves[rng.usize(..moves.len())])
        .collect()
}

/// Apply a random scramble to the solved cube.
#[must_use]
pub fn random_state(op_count: usize, move_set: MoveSet, rng: &mut fastrand::Rng) -> PuzzleState {
    random_scramble(op_count, move_set, rng).apply_to(PuzzleState::SOLVED)
}
