//! Plain-text layout of the unfolded cube:
//!
//! ```text
//!   WW
//!   WW
//! OOGGRRYY
//! OOGGRRYY
//!   BB
//!   BB
//! ```

use crate::puzzle::{Color, Face, PuzzleState};

/// Render `state` as an unfolded net with one letter per sticker. The up face
/// sits above the front face and the down face below it.
#[must_use]
pub fn render(state: PuzzleState) -> String {
    render_with(state, |color| color.letter().to_string())
}

/// Like `render` but lets the caller choose how each sticker is drawn, for
/// example to add terminal colors. Blank cells are one space per sticker, so
/// `sticker` should produce a single visible character.
pub fn render_with(state: PuzzleState, mut sticker: impl FnMut(Color) -> String) -> String {
    let grid = state.grid();
    let mut lines = Vec::with_capacity(6);
    for row in 0..2 {
        let mut line = String::from("  ");
        for col in 0..2 {
            line.push_str(&sticker(grid[Face::Up as usize][row][col]));
        }
        lines.push(line);
    }
    for row in 0..2 {
        let mut line = String::new();
        for face in [Face::Left, Face::Front, Face::Right, Face::Back] {
            for col in 0..2 {
                line.push_str(&sticker(grid[face as usize][row][col]));
            }
        }
        lines.push(line);
    }
    for row in 0..2 {
        let mut line = String::from("  ");
        for col in 0..2 {
            line.push_str(&sticker(grid[Face::Down as usize][row][col]));
        }
        lines.push(line);
    }
    lines.join("\n")
}
