use crate::{
    goal::GoalSet,
    moves::{Move, MoveSequence, MoveSet},
    puzzle::PuzzleState,
    start, success, working,
};
use fxhash::FxHashMap;
use log::{Level, debug, info, log_enabled};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};
use thiserror::Error;

/// Upper bound on how many visited entries are reserved up front. Shallow
/// scrambles finish long before the state graph is exhausted, so reserving the
/// full reachable-state estimate would waste memory in the common case.
const DEFAULT_VISITED_CAPACITY: usize = 1 << 20;

/// How many frontier pops happen between two time limit checks.
const TIME_CHECK_INTERVAL: u64 = 1 << 12;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError {
    #[error(
        "The frontier was exhausted without reaching a solved state after visiting {visited} states; the start state is not reachable from a solved cube"
    )]
    Exhausted { visited: usize },
    #[error("No solution within {0} moves")]
    MaxDepthExceeded(usize),
    #[error("Time limit exceeded")]
    TimeLimitExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Idle,
    Running,
    Solved,
    Exhausted,
}

/// Back-pointer recorded the first time a state is discovered. Following the
/// parents from any visited state ends at the start state.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    parent: Option<(PuzzleState, Move)>,
    depth: u8,
}

impl SearchNode {
    const ROOT: SearchNode = SearchNode {
        parent: None,
        depth: 0,
    };
}

/// The frontier and visited map of one `solve` call.
struct SearchState {
    frontier: VecDeque<PuzzleState>,
    visited: FxHashMap<PuzzleState, SearchNode>,
    nodes_expanded: u64,
    duplicates: u64,
}

impl SearchState {
    fn new(start: PuzzleState, capacity: usize) -> SearchState {
        let mut visited = FxHashMap::default();
        visited.reserve(capacity);
        visited.insert(start, SearchNode::ROOT);
        SearchState {
            frontier: VecDeque::from([start]),
            visited,
            nodes_expanded: 0,
            duplicates: 0,
        }
    }

    /// Walk the back-pointers from `end` to the start state.
    fn reconstruct(&self, mut end: PuzzleState) -> MoveSequence {
        let mut moves = Vec::new();
        while let Some(&SearchNode {
            parent: Some((parent, move_)),
            ..
        }) = self.visited.get(&end)
        {
            moves.push(move_);
            end = parent;
        }
        moves.reverse();
        MoveSequence(moves)
    }
}

/// Breadth-first search over face turns toward any orientation of the solved
/// cube. The frontier is strictly FIFO and moves are expanded in the order of
/// the configured `MoveSet`, so the returned solution is the shortest one and,
/// among equally short ones, the first in move order.
pub struct BfsSolver {
    start: PuzzleState,
    goal_set: GoalSet,
    move_set: MoveSet,
    max_depth: Option<usize>,
    time_limit: Option<Duration>,
    visited_capacity: Option<usize>,
    status: SolverStatus,
    search: SearchState,
}

impl BfsSolver {
    #[must_use]
    pub fn new(start: PuzzleState) -> BfsSolver {
        BfsSolver {
            start,
            goal_set: GoalSet::new(),
            move_set: MoveSet::default(),
            max_depth: None,
            time_limit: None,
            visited_capacity: None,
            status: SolverStatus::Idle,
            search: SearchState::new(start, 0),
        }
    }

    #[must_use]
    pub fn with_move_set(mut self, move_set: MoveSet) -> Self {
        self.move_set = move_set;
        self
    }

    /// Give up with `SolveError::MaxDepthExceeded` instead of searching past
    /// `max_depth` moves.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// How many visited entries to reserve before searching. Clamped to the
    /// number of states the move set can reach.
    #[must_use]
    pub fn with_visited_capacity(mut self, visited_capacity: usize) -> Self {
        self.visited_capacity = Some(visited_capacity);
        self
    }

    fn initial_capacity(&self) -> usize {
        self.visited_capacity
            .unwrap_or(DEFAULT_VISITED_CAPACITY)
            .min(self.move_set.reachable_states())
    }

    #[must_use]
    pub fn status(&self) -> SolverStatus {
        self.status
    }

    #[must_use]
    pub fn start(&self) -> PuzzleState {
        self.start
    }

    #[must_use]
    pub fn goal_set(&self) -> &GoalSet {
        &self.goal_set
    }

    /// Number of distinct states discovered by the last `solve` call.
    #[must_use]
    pub fn visited_len(&self) -> usize {
        self.search.visited.len()
    }

    /// Find a shortest sequence of moves from the start state to any goal
    /// state. Calling this again restarts the search from scratch.
    ///
    /// # Errors
    ///
    /// `SolveError::Exhausted` if every reachable state was visited without
    /// finding a goal, which means the start state was not a legal cube.
    /// `SolveError::MaxDepthExceeded` and `SolveError::TimeLimitExceeded` when
    /// the configured limits are hit first.
    pub fn solve(&mut self) -> Result<MoveSequence, SolveError> {
        let result = self.search_for_solution();
        self.status = match &result {
            Ok(_) => SolverStatus::Solved,
            Err(_) => SolverStatus::Exhausted,
        };
        result
    }

    fn search_for_solution(&mut self) -> Result<MoveSequence, SolveError> {
        self.status = SolverStatus::Running;
        if self.goal_set.contains(&self.start) {
            self.search = SearchState::new(self.start, 0);
            info!(success!("Start state is already solved"));
            return Ok(MoveSequence::new());
        }
        self.search = SearchState::new(self.start, self.initial_capacity());

        info!(start!("Searching for a solution using {:?} moves"), self.move_set);
        let start_time = Instant::now();
        let mut current_depth = 0;

        while let Some(state) = self.search.frontier.pop_front() {
            self.search.nodes_expanded += 1;
            if let Some(time_limit) = self.time_limit {
                if self.search.nodes_expanded % TIME_CHECK_INTERVAL == 0
                    && start_time.elapsed() > time_limit
                {
                    return Err(SolveError::TimeLimitExceeded);
                }
            }

            let depth = self.search.visited[&state].depth;
            if depth != current_depth {
                current_depth = depth;
                debug!(
                    working!("Expanding depth {} with {} frontier states and {} visited"),
                    current_depth,
                    self.search.frontier.len() + 1,
                    self.search.visited.len()
                );
            }
            if self
                .max_depth
                .is_some_and(|max_depth| usize::from(depth) >= max_depth)
            {
                return Err(SolveError::MaxDepthExceeded(usize::from(depth)));
            }

            for &move_ in self.move_set.moves() {
                let next = state.apply_move(move_);
                if self.search.visited.contains_key(&next) {
                    if log_enabled!(Level::Debug) {
                        self.search.duplicates += 1;
                    }
                    continue;
                }
                self.search.visited.insert(
                    next,
                    SearchNode {
                        parent: Some((state, move_)),
                        depth: depth + 1,
                    },
                );
                if self.goal_set.contains(&next) {
                    let solution = self.search.reconstruct(next);
                    info!(
                        success!("Found a {} move solution in {:.3?} after visiting {} states"),
                        solution.len(),
                        start_time.elapsed(),
                        self.search.visited.len()
                    );
                    debug!(
                        "Expanded {} nodes, skipped {} already visited neighbors",
                        self.search.nodes_expanded, self.search.duplicates
                    );
                    return Ok(solution);
                }
                self.search.frontier.push_back(next);
            }
        }

        Err(SolveError::Exhausted {
            visited: self.search.visited.len(),
        })
    }
}

/// Solve `start` with the default full move set.
///
/// # Errors
///
/// See `BfsSolver::solve`.
pub fn solve(start: PuzzleState) -> Result<MoveSequence, SolveError> {
    BfsSolver::new(start).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Face;

    #[test]
    fn starts_idle() {
        let solver = BfsSolver::new(PuzzleState::SOLVED);
        assert_eq!(solver.status(), SolverStatus::Idle);
        assert_eq!(solver.goal_set().len(), 24);
    }

    #[test]
    fn solved_start_needs_no_moves() {
        let mut solver = BfsSolver::new(PuzzleState::SOLVED);
        assert_eq!(solver.solve(), Ok(MoveSequence::new()));
        assert_eq!(solver.status(), SolverStatus::Solved);
        assert_eq!(solver.visited_len(), 1);
    }

    #[test]
    fn single_turn_is_undone() {
        let start = PuzzleState::SOLVED.apply_face_turn(Face::Front, 1);
        let solution = solve(start).unwrap();
        assert_eq!(solution.0, vec![Move::ccw(Face::Front)]);
    }

    #[test]
    fn solved_start_reserves_nothing() {
        let mut solver = BfsSolver::new(PuzzleState::SOLVED);
        solver.solve().unwrap();
        assert!(solver.search.visited.capacity() < solver.initial_capacity());

        let mut solver = BfsSolver::new(PuzzleState::SOLVED.apply_move(Move::cw(Face::Up)));
        solver.solve().unwrap();
        assert!(solver.search.visited.capacity() >= solver.initial_capacity());
    }

    #[test]
    fn reconstruct_follows_parents() {
        let start = PuzzleState::SOLVED;
        let mut search = SearchState::new(start, 0);
        let first = start.apply_move(Move::cw(Face::Up));
        let second = first.apply_move(Move::ccw(Face::Left));
        search.visited.insert(
            first,
            SearchNode {
                parent: Some((start, Move::cw(Face::Up))),
                depth: 1,
            },
        );
        search.visited.insert(
            second,
            SearchNode {
                parent: Some((first, Move::ccw(Face::Left))),
                depth: 2,
            },
        );
        assert_eq!(
            search.reconstruct(second).0,
            vec![Move::cw(Face::Up), Move::ccw(Face::Left)]
        );
    }

    #[test]
    fn single_color_cube_exhausts() {
        // Every move maps this state to itself.
        let start = PuzzleState::encode(&[[[0; 2]; 2]; 6]).unwrap();
        let mut solver = BfsSolver::new(start);
        assert_eq!(solver.solve(), Err(SolveError::Exhausted { visited: 1 }));
        assert_eq!(solver.status(), SolverStatus::Exhausted);
    }
}
