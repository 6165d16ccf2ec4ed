#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! A 2x2 "pocket cube" model packed into a single `u128`, together with a
//! breadth-first solver that finds shortest face-turn solutions.

pub mod bits;
pub mod goal;
pub mod moves;
pub mod puzzle;
pub mod render;
pub mod scramble;
pub mod solver;
pub mod validate;

pub use goal::GoalSet;
pub use moves::{Axis, Direction, Move, MoveError, MoveSequence, MoveSet, Operation};
pub use puzzle::{CodecError, Color, Face, PuzzleState};
pub use solver::{BfsSolver, SolveError, SolverStatus, solve};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
