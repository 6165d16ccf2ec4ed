use crate::{
    moves::{Axis, Operation},
    puzzle::PuzzleState,
};
use fxhash::FxHashSet;

const fn reorient(axis: Axis, quarter_turns: i8) -> Operation {
    Operation::Reorient {
        axis,
        quarter_turns,
    }
}

/// Reorientations that bring each of the six faces to the top. Following each
/// with zero to three `y` turns visits all 24 orientations of the cube.
const UP_FACE_CHOICES: [&[Operation]; 6] = [
    &[],
    &[reorient(Axis::X, 1)],
    &[reorient(Axis::X, -1)],
    &[reorient(Axis::Z, 1)],
    &[reorient(Axis::Z, -1)],
    &[reorient(Axis::X, 2)],
];

/// Every state that counts as solved: the solved cube in each of its 24
/// orientations.
#[derive(Debug, Clone)]
pub struct GoalSet {
    states: FxHashSet<PuzzleState>,
}

impl GoalSet {
    /// The order of the cube's rotation group.
    pub const ORIENTATIONS: usize = 24;

    #[must_use]
    pub fn new() -> GoalSet {
        let mut states = FxHashSet::default();
        states.reserve(Self::ORIENTATIONS);
        for up_face in UP_FACE_CHOICES {
            let upright = PuzzleState::SOLVED.apply_sequence(up_face);
            for quarter_turns in 0..4 {
                states.insert(upright.apply_reorientation(Axis::Y, quarter_turns));
            }
        }
        debug_assert_eq!(states.len(), Self::ORIENTATIONS);
        GoalSet { states }
    }

    #[must_use]
    pub fn contains(&self, state: &PuzzleState) -> bool {
        self.states.contains(state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PuzzleState> {
        self.states.iter()
    }
}

impl Default for GoalSet {
    fn default() -> Self {
        GoalSet::new()
    }
}
