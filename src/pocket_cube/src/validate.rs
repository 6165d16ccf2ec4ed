//! Checks that reject states no sequence of face turns can produce.

use crate::puzzle::{Color, PuzzleState, STICKER_COUNT, STICKERS_PER_FACE};
use thiserror::Error;

/// The three packed sticker slots of each of the eight corner positions. The
/// up or down slot comes first and the other two follow in the same rotational
/// sense for every corner, so the index of a corner's up or down colored
/// sticker is its twist.
const CORNERS: [[usize; 3]; 8] = [
    [16, 0, 13],
    [19, 4, 1],
    [20, 2, 7],
    [23, 14, 3],
    [18, 8, 5],
    [21, 6, 11],
    [17, 12, 9],
    [22, 10, 15],
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expected exactly 4 {color:?} stickers, found {count}")]
    ColorCount { color: Color, count: usize },
    #[error("The corner at slots {slots:?} has colors {colors:?}, which no corner piece has")]
    ImpossibleCorner {
        slots: [usize; 3],
        colors: [Color; 3],
    },
    #[error("The corner piece with colors {colors:?} appears more than once")]
    DuplicateCorner { colors: [Color; 3] },
    #[error("The corners are twisted by {twist} thirds of a turn in total, which no sequence of turns can undo")]
    TwistedCorner { twist: usize },
}

/// How many stickers of each color the state has, indexed by label.
#[must_use]
pub fn color_counts(state: PuzzleState) -> [usize; 6] {
    let mut counts = [0; 6];
    for slot in 0..STICKER_COUNT {
        counts[usize::from(state.sticker_at_slot(slot))] += 1;
    }
    counts
}

/// A bitmask of the colors present on a corner.
fn color_mask(colors: [Color; 3]) -> u8 {
    colors.iter().fold(0, |mask, &color| mask | (1 << color as u8))
}

/// Index of the up or down colored sticker among a corner's colors, in
/// thirds of a turn. Only meaningful for a legal corner piece.
fn corner_twist(colors: [Color; 3]) -> usize {
    colors
        .iter()
        .position(|&color| matches!(color, Color::White | Color::Blue))
        .unwrap_or(0)
}

fn corner_colors(state: PuzzleState, slots: [usize; 3]) -> [Color; 3] {
    slots.map(|slot| Color::ALL[usize::from(state.sticker_at_slot(slot))])
}

/// Check that every color appears exactly four times.
///
/// # Errors
///
/// `ValidationError::ColorCount` for the first color with a wrong count.
pub fn verify_color_counts(state: PuzzleState) -> Result<(), ValidationError> {
    let counts = color_counts(state);
    for color in Color::ALL {
        let count = counts[color as usize];
        if count != STICKERS_PER_FACE {
            return Err(ValidationError::ColorCount { color, count });
        }
    }
    Ok(())
}

/// Check color counts, that the eight corners are exactly the eight corner
/// pieces of the solved cube, and that their twists sum to a whole turn.
///
/// # Errors
///
/// The first violated condition.
pub fn verify(state: PuzzleState) -> Result<(), ValidationError> {
    verify_color_counts(state)?;

    let legal: Vec<u8> = CORNERS
        .iter()
        .map(|&slots| color_mask(corner_colors(PuzzleState::SOLVED, slots)))
        .collect();
    let mut seen = [false; CORNERS.len()];
    let mut twist = 0;
    for slots in CORNERS {
        let colors = corner_colors(state, slots);
        let Some(piece) = legal.iter().position(|&mask| mask == color_mask(colors)) else {
            return Err(ValidationError::ImpossibleCorner { slots, colors });
        };
        if seen[piece] {
            return Err(ValidationError::DuplicateCorner { colors });
        }
        seen[piece] = true;
        twist += corner_twist(colors);
    }
    if twist % 3 != 0 {
        return Err(ValidationError::TwistedCorner { twist: twist % 3 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveSequence, puzzle::LabelGrid};

    #[test]
    fn solved_and_scrambled_states_pass() {
        assert_eq!(verify(PuzzleState::SOLVED), Ok(()));
        let scrambled = "F R U' B D L' F' U2 R"
            .parse::<MoveSequence>()
            .unwrap()
            .apply_to(PuzzleState::SOLVED);
        assert_eq!(color_counts(scrambled), [4; 6]);
        assert_eq!(verify(scrambled), Ok(()));
    }

    #[test]
    fn rejects_wrong_color_count() {
        let mut labels = PuzzleState::SOLVED.decode();
        labels[0][0][0] = 1;
        let state = PuzzleState::encode(&labels).unwrap();
        assert_eq!(
            verify(state),
            Err(ValidationError::ColorCount {
                color: Color::Orange,
                count: 3
            })
        );
    }

    #[test]
    fn rejects_impossible_corner() {
        // Swap a left sticker with a down sticker: counts stay correct but the
        // left-back-up corner now shows both up and down colors.
        let mut labels: LabelGrid = PuzzleState::SOLVED.decode();
        labels[0][0][0] = 5;
        labels[5][0][0] = 0;
        let state = PuzzleState::encode(&labels).unwrap();
        assert_eq!(verify_color_counts(state), Ok(()));
        assert_eq!(
            verify(state),
            Err(ValidationError::ImpossibleCorner {
                slots: [16, 0, 13],
                colors: [Color::White, Color::Blue, Color::Yellow],
            })
        );
    }

    #[test]
    fn rejects_single_twisted_corner() {
        // Cycle the stickers of the left-back-up corner in place.
        let mut labels: LabelGrid = PuzzleState::SOLVED.decode();
        labels[0][0][0] = 3;
        labels[3][0][1] = 4;
        labels[4][0][0] = 0;
        let state = PuzzleState::encode(&labels).unwrap();
        assert_eq!(
            verify(state),
            Err(ValidationError::TwistedCorner { twist: 2 })
        );

        labels[0][0][0] = 4;
        labels[3][0][1] = 0;
        labels[4][0][0] = 3;
        let state = PuzzleState::encode(&labels).unwrap();
        assert_eq!(
            verify(state),
            Err(ValidationError::TwistedCorner { twist: 1 })
        );
    }

    #[test]
    fn every_orientation_of_the_solved_cube_passes() {
        for &goal in crate::GoalSet::new().iter() {
            assert_eq!(verify(goal), Ok(()));
        }
    }
}
