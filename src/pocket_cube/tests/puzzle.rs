use pocket_cube::{
    Axis, Face, GoalSet, MoveSet, PuzzleState,
    puzzle::LabelGrid,
    scramble::random_state,
    validate::{color_counts, verify},
};

fn random_labels(rng: &mut fastrand::Rng) -> LabelGrid {
    let mut labels = [[[0; 2]; 2]; 6];
    for label in labels.iter_mut().flatten().flatten() {
        *label = rng.u8(..6);
    }
    labels
}

#[test_log::test]
fn test_decode_inverts_encode() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..500 {
        let labels = random_labels(&mut rng);
        let state = PuzzleState::encode(&labels).unwrap();
        assert_eq!(state.decode(), labels);
        assert_eq!(PuzzleState::try_from_raw(state.raw()), Ok(state));
    }
}

#[test_log::test]
fn test_turn_closure_on_arbitrary_grids() {
    // Closure holds for any sticker assignment, reachable or not.
    let mut rng = fastrand::Rng::with_seed(12);
    for _ in 0..100 {
        let state = PuzzleState::encode(&random_labels(&mut rng)).unwrap();
        for face in Face::ALL {
            let four = (0..4).fold(state, |state, _| state.apply_face_turn(face, 1));
            assert_eq!(four, state);
            assert_eq!(state.apply_face_turn(face, -1).apply_face_turn(face, 1), state);
        }
        for axis in Axis::ALL {
            let four = (0..4).fold(state, |state, _| state.apply_reorientation(axis, 1));
            assert_eq!(four, state);
        }
    }
}

#[test_log::test]
fn test_colors_are_conserved() {
    let mut rng = fastrand::Rng::with_seed(13);
    for _ in 0..200 {
        let state = random_state(rng.usize(..60), MoveSet::Full, &mut rng);
        assert_eq!(color_counts(state), [4; 6]);
        assert_eq!(verify(state), Ok(()));
    }
}

#[test_log::test]
fn test_goal_set_is_the_orientation_orbit() {
    let goals = GoalSet::new();
    assert_eq!(goals.len(), 24);
    // Walking reorientations from the solved cube never leaves the set and
    // eventually visits all of it.
    let mut seen = vec![PuzzleState::SOLVED];
    let mut index = 0;
    while let Some(&state) = seen.get(index) {
        for axis in Axis::ALL {
            let next = state.apply_reorientation(axis, 1);
            assert!(goals.contains(&next));
            if !seen.contains(&next) {
                seen.push(next);
            }
        }
        index += 1;
    }
    assert_eq!(seen.len(), 24);
}
