use crate::bits::{self, BitRegion};
use std::fmt;
use thiserror::Error;

/// Bits used by one sticker.
pub const STICKER_BITS: u32 = 4;
/// Stickers on one face of a 2x2 cube.
pub const STICKERS_PER_FACE: usize = 4;
/// Bits used by one face.
pub const FACE_BITS: u32 = STICKER_BITS * STICKERS_PER_FACE as u32;
pub const FACE_COUNT: usize = 6;
pub const STICKER_COUNT: usize = FACE_COUNT * STICKERS_PER_FACE;
/// Bits of the `u128` that carry stickers. Everything above is always zero.
pub const USED_BITS: u32 = FACE_BITS * FACE_COUNT as u32;

/// Maps a row-major `(row, col)` position to its packed slot. Slots run
/// clockwise around the face so that a quarter turn is a single rotation of
/// the face's 16 bit field.
const SLOT_OF: [[usize; 2]; 2] = [[0, 1], [3, 2]];

/// Row-major grid of color labels, indexed `[face][row][col]`.
pub type LabelGrid = [[[u8; 2]; 2]; FACE_COUNT];
/// Row-major grid of colors, indexed `[face][row][col]`.
pub type ColorGrid = [[[Color; 2]; 2]; FACE_COUNT];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error(
        "Invalid color value {value} at face {face}, row {row}, column {col}; expected a value between 0 and 5"
    )]
    InvalidColorValue {
        face: usize,
        row: usize,
        col: usize,
        value: u8,
    },
    #[error("Bits above the first 96 must be zero, got {0:#x}")]
    UnusedBitsSet(u128),
}

/// One of the six sticker colors. The discriminant is the packed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    Orange = 0,
    Green = 1,
    Red = 2,
    Yellow = 3,
    White = 4,
    Blue = 5,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Orange,
        Color::Green,
        Color::Red,
        Color::Yellow,
        Color::White,
        Color::Blue,
    ];

    /// Single-letter abbreviation used by the text renderer.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Orange => 'O',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::White => 'W',
            Color::Blue => 'B',
        }
    }

    /// The color every sticker of `face` has on the solved cube.
    #[must_use]
    pub const fn of_solved_face(face: Face) -> Color {
        Color::ALL[face as usize]
    }
}

impl TryFrom<u8> for Color {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Color::ALL.get(value as usize).copied().ok_or(value)
    }
}

/// The six outer faces, in packing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    Left = 0,
    Front = 1,
    Right = 2,
    Back = 3,
    Up = 4,
    Down = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Front,
        Face::Right,
        Face::Back,
        Face::Up,
        Face::Down,
    ];

    #[must_use]
    pub const fn opposite(self) -> Face {
        match self {
            Face::Left => Face::Right,
            Face::Front => Face::Back,
            Face::Right => Face::Left,
            Face::Back => Face::Front,
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::Left => 'L',
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Back => 'B',
            Face::Up => 'U',
            Face::Down => 'D',
        }
    }

    /// The bit region holding this face's four stickers.
    #[must_use]
    pub const fn region(self) -> BitRegion {
        BitRegion::new(self as u32 * FACE_BITS, FACE_BITS)
    }
}

/// A complete cube configuration: 24 stickers of 4 bits each.
///
/// Sticker slot `s` lives at bits `[4s, 4s + 4)` where `s = face * 4 + k` and
/// `k` walks the face clockwise starting at the top-left sticker. Equality and
/// hashing are those of the raw integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleState(u128);

impl PuzzleState {
    /// Every face a single color, face `i` colored with label `i`.
    pub const SOLVED: PuzzleState = {
        let mut raw = 0;
        let mut slot = 0;
        while slot < STICKER_COUNT {
            raw |= ((slot / STICKERS_PER_FACE) as u128) << (slot as u32 * STICKER_BITS);
            slot += 1;
        }
        PuzzleState(raw)
    };

    /// Pack a grid of color labels.
    ///
    /// # Errors
    ///
    /// `CodecError::InvalidColorValue` if any label is outside `0..=5`.
    pub fn encode(labels: &LabelGrid) -> Result<PuzzleState, CodecError> {
        let mut raw = 0;
        for (face, rows) in labels.iter().enumerate() {
            for (row, cols) in rows.iter().enumerate() {
                for (col, &value) in cols.iter().enumerate() {
                    if Color::try_from(value).is_err() {
                        return Err(CodecError::InvalidColorValue {
                            face,
                            row,
                            col,
                            value,
                        });
                    }
                    raw |= u128::from(value) << Self::sticker_start(face, row, col);
                }
            }
        }
        Ok(PuzzleState(raw))
    }

    /// Unpack into a grid of color labels. Exact inverse of `encode`.
    #[must_use]
    pub fn decode(self) -> LabelGrid {
        let mut labels = [[[0; 2]; 2]; FACE_COUNT];
        for (face, rows) in labels.iter_mut().enumerate() {
            for (row, cols) in rows.iter_mut().enumerate() {
                for (col, label) in cols.iter_mut().enumerate() {
                    #[allow(clippy::cast_possible_truncation)]
                    let value = self.extract_field(Self::sticker_start(face, row, col), STICKER_BITS)
                        as u8;
                    *label = value;
                }
            }
        }
        labels
    }

    #[must_use]
    pub fn from_grid(grid: &ColorGrid) -> PuzzleState {
        let mut raw = 0;
        for (face, rows) in grid.iter().enumerate() {
            for (row, cols) in rows.iter().enumerate() {
                for (col, &color) in cols.iter().enumerate() {
                    raw |= u128::from(color as u8) << Self::sticker_start(face, row, col);
                }
            }
        }
        PuzzleState(raw)
    }

    #[must_use]
    pub fn grid(self) -> ColorGrid {
        self.decode().map(|rows| {
            rows.map(|cols| cols.map(|label| Color::ALL[usize::from(label)]))
        })
    }

    /// Wrap a raw packed value after checking that it could have come from
    /// `encode`.
    ///
    /// # Errors
    ///
    /// If a sticker holds a label above 5 or any bit above `USED_BITS` is set.
    pub fn try_from_raw(raw: u128) -> Result<PuzzleState, CodecError> {
        if raw >> USED_BITS != 0 {
            return Err(CodecError::UnusedBitsSet(raw));
        }
        let state = PuzzleState(raw);
        for slot in 0..STICKER_COUNT {
            let value = state.sticker_at_slot(slot);
            if Color::try_from(value).is_err() {
                let (row, col) = slot_position(slot % STICKERS_PER_FACE);
                return Err(CodecError::InvalidColorValue {
                    face: slot / STICKERS_PER_FACE,
                    row,
                    col,
                    value,
                });
            }
        }
        Ok(state)
    }

    #[must_use]
    pub const fn raw(self) -> u128 {
        self.0
    }

    /// The color at `(row, col)` of `face`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is not 0 or 1.
    #[must_use]
    pub fn sticker(self, face: Face, row: usize, col: usize) -> Color {
        let slot = face as usize * STICKERS_PER_FACE + SLOT_OF[row][col];
        Color::ALL[usize::from(self.sticker_at_slot(slot))]
    }

    /// The raw label stored in packed slot `slot`.
    #[must_use]
    pub(crate) fn sticker_at_slot(self, slot: usize) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let start = slot as u32 * STICKER_BITS;
        #[allow(clippy::cast_possible_truncation)]
        let value = self.extract_field(start, STICKER_BITS) as u8;
        value
    }

    #[must_use]
    pub const fn extract_field(self, start: u32, len: u32) -> u128 {
        bits::extract_field(self.0, start, len)
    }

    #[must_use]
    pub const fn rotate_field(self, start: u32, end: u32, amount: i32) -> PuzzleState {
        PuzzleState(bits::rotate_field(self.0, start, end, amount))
    }

    #[must_use]
    pub const fn swap_fields(self, a: BitRegion, b: BitRegion) -> PuzzleState {
        PuzzleState(bits::swap_fields(self.0, a, b))
    }

    fn sticker_start(face: usize, row: usize, col: usize) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let slot = (face * STICKERS_PER_FACE + SLOT_OF[row][col]) as u32;
        slot * STICKER_BITS
    }
}

/// Inverse of `SLOT_OF`.
fn slot_position(slot_in_face: usize) -> (usize, usize) {
    match slot_in_face {
        0 => (0, 0),
        1 => (0, 1),
        2 => (1, 1),
        _ => (1, 0),
    }
}

impl Default for PuzzleState {
    fn default() -> Self {
        PuzzleState::SOLVED
    }
}

impl fmt::Debug for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PuzzleState({:#026x})", self.0)
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(*self))
    }
}
