use crate::{
    bits::BitRegion,
    puzzle::{Face, PuzzleState, STICKER_BITS},
};
use itertools::Itertools;
use std::{fmt, ops::Deref, str::FromStr};
use thiserror::Error;

/// The two stickers on each of the four neighbouring faces that travel when a
/// face is turned, as packed slot indices. Each lane `[p0, p1, p2, p3]` is a
/// 4-cycle under a clockwise turn: the sticker in `p0` moves to `p1`, `p1` to
/// `p2`, and so on.
const RINGS: [[[u8; 4]; 2]; 6] = [
    // Left
    [[4, 20, 14, 16], [7, 23, 13, 19]],
    // Front
    [[1, 18, 11, 20], [2, 19, 8, 21]],
    // Right
    [[5, 17, 15, 21], [6, 18, 12, 22]],
    // Back
    [[0, 23, 10, 17], [3, 22, 9, 16]],
    // Up
    [[0, 12, 8, 4], [1, 13, 9, 5]],
    // Down
    [[2, 6, 10, 14], [3, 7, 11, 15]],
];

const fn slot_region(slot: u8) -> BitRegion {
    BitRegion::new(slot as u32 * STICKER_BITS, STICKER_BITS)
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid operation: face index {0} is outside 0..=5")]
    InvalidFace(u8),
    #[error("Invalid operation: axis index {0} is outside 0..=2")]
    InvalidAxis(u8),
    #[error("Invalid operation: unexpected symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("Invalid operation: modifier {symbol:?} at position {position} does not follow a move")]
    DanglingModifier { symbol: char, position: usize },
}

impl TryFrom<u8> for Face {
    type Error = MoveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Face::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(MoveError::InvalidFace(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub const fn inverse(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    #[must_use]
    pub const fn quarter_turns(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// A quarter turn of one outer face, clockwise as seen looking at that face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

impl Move {
    #[must_use]
    pub const fn new(face: Face, direction: Direction) -> Move {
        Move { face, direction }
    }

    #[must_use]
    pub const fn cw(face: Face) -> Move {
        Move::new(face, Direction::Clockwise)
    }

    #[must_use]
    pub const fn ccw(face: Face) -> Move {
        Move::new(face, Direction::CounterClockwise)
    }

    #[must_use]
    pub const fn inverse(self) -> Move {
        Move::new(self.face, self.direction.inverse())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Clockwise => write!(f, "{}", self.face.letter()),
            Direction::CounterClockwise => write!(f, "{}'", self.face.letter()),
        }
    }
}

/// A whole-cube rotation axis, named after the standard `x`, `y`, `z`
/// reorientations. Each turns like the face it is named after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Turns like `R`.
    X,
    /// Turns like `U`.
    Y,
    /// Turns like `F`.
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[must_use]
    pub const fn face(self) -> Face {
        match self {
            Axis::X => Face::Right,
            Axis::Y => Face::Up,
            Axis::Z => Face::Front,
        }
    }

    const fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

impl TryFrom<u8> for Axis {
    type Error = MoveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Axis::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(MoveError::InvalidAxis(value))
    }
}

/// Anything the transition engine can apply to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Turn(Move),
    Reorient { axis: Axis, quarter_turns: i8 },
}

impl From<Move> for Operation {
    fn from(move_: Move) -> Self {
        Operation::Turn(move_)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operation::Turn(move_) => fmt::Display::fmt(&move_, f),
            Operation::Reorient {
                axis,
                quarter_turns,
            } => match quarter_turns.rem_euclid(4) {
                0 => Ok(()),
                1 => write!(f, "{}", axis.letter()),
                2 => write!(f, "{}2", axis.letter()),
                _ => write!(f, "{}'", axis.letter()),
            },
        }
    }
}

/// The moves the solver is allowed to expand, in expansion order. The order
/// decides which of several equally short solutions is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveSet {
    /// Both directions of all six faces.
    #[default]
    Full,
    /// Both directions of `L`, `F` and `U` only. The down-back-right corner
    /// never moves, which removes the 24 orientations from the state graph.
    Reduced,
}

const FULL_MOVES: [Move; 12] = [
    Move::cw(Face::Left),
    Move::ccw(Face::Left),
    Move::cw(Face::Front),
    Move::ccw(Face::Front),
    Move::cw(Face::Right),
    Move::ccw(Face::Right),
    Move::cw(Face::Back),
    Move::ccw(Face::Back),
    Move::cw(Face::Up),
    Move::ccw(Face::Up),
    Move::cw(Face::Down),
    Move::ccw(Face::Down),
];

const REDUCED_MOVES: [Move; 6] = [
    Move::cw(Face::Left),
    Move::ccw(Face::Left),
    Move::cw(Face::Front),
    Move::ccw(Face::Front),
    Move::cw(Face::Up),
    Move::ccw(Face::Up),
];

/// Distinct 2x2 positions once the cube's orientation is factored out.
pub const POSITIONS_UP_TO_ORIENTATION: usize = 3_674_160;

impl MoveSet {
    #[must_use]
    pub const fn moves(self) -> &'static [Move] {
        match self {
            MoveSet::Full => &FULL_MOVES,
            MoveSet::Reduced => &REDUCED_MOVES,
        }
    }

    /// Upper bound on the number of states reachable from any start state.
    #[must_use]
    pub const fn reachable_states(self) -> usize {
        match self {
            MoveSet::Full => POSITIONS_UP_TO_ORIENTATION * 24,
            MoveSet::Reduced => POSITIONS_UP_TO_ORIENTATION,
        }
    }
}

impl PuzzleState {
    /// Turn `face` by `quarter_turns` clockwise quarter turns. Negative values
    /// turn counter-clockwise and the count is taken modulo four, so zero and
    /// four are both the identity.
    #[must_use]
    pub fn apply_face_turn(self, face: Face, quarter_turns: i8) -> PuzzleState {
        match quarter_turns.rem_euclid(4) {
            0 => self,
            1 => self.turn_clockwise(face),
            2 => self.turn_clockwise(face).turn_clockwise(face),
            _ => self.turn_counter_clockwise(face),
        }
    }

    #[must_use]
    pub fn apply_move(self, move_: Move) -> PuzzleState {
        match move_.direction {
            Direction::Clockwise => self.turn_clockwise(move_.face),
            Direction::CounterClockwise => self.turn_counter_clockwise(move_.face),
        }
    }

    /// Rotate the whole cube. On a 2x2 there is no middle layer, so this is
    /// the axis face turned one way and the opposite face turned the other.
    #[must_use]
    pub fn apply_reorientation(self, axis: Axis, quarter_turns: i8) -> PuzzleState {
        let quarter_turns = quarter_turns.rem_euclid(4);
        let face = axis.face();
        self.apply_face_turn(face, quarter_turns)
            .apply_face_turn(face.opposite(), -quarter_turns)
    }

    #[must_use]
    pub fn apply_operation(self, operation: Operation) -> PuzzleState {
        match operation {
            Operation::Turn(move_) => self.apply_move(move_),
            Operation::Reorient {
                axis,
                quarter_turns,
            } => self.apply_reorientation(axis, quarter_turns),
        }
    }

    #[must_use]
    pub fn apply_sequence(self, operations: &[Operation]) -> PuzzleState {
        operations
            .iter()
            .fold(self, |state, &operation| state.apply_operation(operation))
    }

    #[must_use]
    pub fn apply_moves(self, moves: &[Move]) -> PuzzleState {
        moves
            .iter()
            .fold(self, |state, &move_| state.apply_move(move_))
    }

    // Every swap below permutes whole sticker slots, so the composition reads
    // each sticker from the pre-turn state exactly once.

    fn turn_clockwise(self, face: Face) -> PuzzleState {
        let region = face.region();
        #[allow(clippy::cast_possible_wrap)]
        let mut next = self.rotate_field(region.start, region.end(), STICKER_BITS as i32);
        for [p0, p1, p2, p3] in RINGS[face as usize] {
            next = next
                .swap_fields(slot_region(p0), slot_region(p3))
                .swap_fields(slot_region(p3), slot_region(p2))
                .swap_fields(slot_region(p2), slot_region(p1));
        }
        next
    }

    fn turn_counter_clockwise(self, face: Face) -> PuzzleState {
        let region = face.region();
        #[allow(clippy::cast_possible_wrap)]
        let mut next = self.rotate_field(region.start, region.end(), -(STICKER_BITS as i32));
        for [p0, p1, p2, p3] in RINGS[face as usize] {
            next = next
                .swap_fields(slot_region(p0), slot_region(p1))
                .swap_fields(slot_region(p1), slot_region(p2))
                .swap_fields(slot_region(p2), slot_region(p3));
        }
        next
    }
}

/// An ordered list of face turns, printed in standard notation (`F U' L`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveSequence(pub Vec<Move>);

impl MoveSequence {
    #[must_use]
    pub fn new() -> MoveSequence {
        MoveSequence(Vec::new())
    }

    /// The sequence that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> MoveSequence {
        MoveSequence(self.0.iter().rev().map(|move_| move_.inverse()).collect())
    }

    #[must_use]
    pub fn apply_to(&self, state: PuzzleState) -> PuzzleState {
        state.apply_moves(&self.0)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Move> {
        self.0
    }
}

impl Deref for MoveSequence {
    type Target = [Move];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        MoveSequence(moves)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        MoveSequence(iter.into_iter().collect())
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for MoveSequence {
    type Err = MoveError;

    /// Accepts standard notation (`F U' R2`) as well as the compact form
    /// where a lowercase letter is a counter-clockwise turn (`FUr`).
    /// Whitespace is optional between moves. A prime after a half turn
    /// (`F2'`) leaves it a half turn.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut moves = Vec::new();
        let mut half_turn = false;
        for (position, symbol) in s.chars().enumerate() {
            if symbol.is_whitespace() {
                continue;
            }
            let face = match symbol.to_ascii_uppercase() {
                'L' => Some(Face::Left),
                'F' => Some(Face::Front),
                'R' => Some(Face::Right),
                'B' => Some(Face::Back),
                'U' => Some(Face::Up),
                'D' => Some(Face::Down),
                _ => None,
            };
            if let Some(face) = face {
                half_turn = false;
                if symbol.is_ascii_uppercase() {
                    moves.push(Move::cw(face));
                } else {
                    moves.push(Move::ccw(face));
                }
                continue;
            }
            let Some(&last) = moves.last() else {
                return Err(if symbol == '\'' || symbol == '2' {
                    MoveError::DanglingModifier { symbol, position }
                } else {
                    MoveError::UnknownSymbol { symbol, position }
                });
            };
            match symbol {
                '\'' if half_turn => half_turn = false,
                '\'' => {
                    moves.pop();
                    moves.push(last.inverse());
                }
                '2' => {
                    moves.push(last);
                    half_turn = true;
                }
                _ => return Err(MoveError::UnknownSymbol { symbol, position }),
            }
        }
        Ok(MoveSequence(moves))
    }
}
