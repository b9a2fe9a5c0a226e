use rustc_hash::FxHashSet;

use crate::algorithms::common::{Progress, SearchProcess, SearchState, IDA_STAR_ORDER};
use crate::grid::{Grid, Position};
use crate::heuristic::manhattan;

/// Upper bound on threshold increases before the search gives up.
pub const MAX_ITERATIONS: usize = 1000;

/// One level of the depth-first descent.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: Position,
    g: u32,
    /// Index of the next direction in [`IDA_STAR_ORDER`] to try.
    next: usize,
}

/// Iterative deepening A*.
///
/// Each iteration is a depth-first descent that enters a node only while
/// `g + h` stays within the threshold. The smallest `f` that overshot becomes
/// the next threshold. Cycles are avoided against the current path only, so
/// positions may be entered many times across branches and iterations.
pub struct IdaStar<'a> {
    grid: &'a Grid,
    goals: Vec<Position>,
    threshold: u32,
    iteration: usize,
    max_iterations: usize,
    frames: Vec<Frame>,
    on_path: FxHashSet<Position>,
    /// Smallest pruned `f` seen in the current iteration.
    next_threshold: Option<u32>,
    visited: FxHashSet<Position>,
    message: Option<String>,
    path: Option<Vec<Position>>,
    outcome: Option<Progress>,
}

impl<'a> IdaStar<'a> {
    pub fn new(grid: &'a Grid, goals: &[Position]) -> Self {
        Self::with_max_iterations(grid, goals, MAX_ITERATIONS)
    }

    pub(crate) fn with_max_iterations(
        grid: &'a Grid,
        goals: &[Position],
        max_iterations: usize,
    ) -> Self {
        IdaStar {
            grid,
            goals: goals.to_vec(),
            threshold: manhattan(grid.start, goals),
            iteration: 0,
            max_iterations,
            frames: Vec::new(),
            on_path: FxHashSet::default(),
            next_threshold: None,
            visited: FxHashSet::default(),
            message: None,
            path: None,
            outcome: None,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Tries to enter `node` reached with cost `g`. Returns `None` when the
    /// node is pruned and the descent should move on to the next candidate.
    fn enter(&mut self, node: Position, g: u32) -> Option<Progress> {
        let f = g.saturating_add(manhattan(node, &self.goals));
        if f > self.threshold {
            self.next_threshold = Some(self.next_threshold.map_or(f, |t| t.min(f)));
            return None;
        }

        self.visited.insert(node);
        if self.goals.contains(&node) {
            let mut path: Vec<Position> = self.frames.iter().map(|frame| frame.node).collect();
            path.push(node);
            self.path = Some(path);
            self.frames.clear();
            self.on_path.clear();
            return Some(self.finish(Progress::Found));
        }

        self.frames.push(Frame { node, g, next: 0 });
        self.on_path.insert(node);
        Some(Progress::Expanded)
    }

    /// Closes an iteration whose descent has fully unwound.
    fn end_iteration(&mut self) -> Progress {
        match self.next_threshold.take() {
            None => {
                self.message = Some("No solution found".to_string());
                self.finish(Progress::Exhausted)
            }
            Some(next) => {
                self.message = Some(format!(
                    "Increasing threshold from {} to {}",
                    self.threshold, next
                ));
                self.threshold = next;
                self.iteration += 1;
                Progress::Expanded
            }
        }
    }

    fn finish(&mut self, outcome: Progress) -> Progress {
        self.outcome = Some(outcome);
        outcome
    }
}

impl SearchProcess for IdaStar<'_> {
    fn name(&self) -> &'static str {
        "ida_star"
    }

    fn advance(&mut self) -> Progress {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        self.message = None;
        if self.goals.is_empty() {
            return self.finish(Progress::Exhausted);
        }
        let grid = self.grid;

        if self.frames.is_empty() {
            if self.iteration >= self.max_iterations {
                log::warn!("ida_star: gave up after {} iterations", self.max_iterations);
                self.message = Some("Maximum iterations reached".to_string());
                return self.finish(Progress::Exhausted);
            }
            if let Some(progress) = self.enter(grid.start, 0) {
                return progress;
            }
            return self.end_iteration();
        }

        loop {
            let Some(top) = self.frames.last_mut() else {
                return self.end_iteration();
            };

            if top.next < IDA_STAR_ORDER.len() {
                let next = top.node.step(IDA_STAR_ORDER[top.next]);
                let g = top.g + 1;
                top.next += 1;
                let Some(node) = next.filter(|&n| grid.is_valid(n) && !self.on_path.contains(&n))
                else {
                    continue;
                };
                if let Some(progress) = self.enter(node, g) {
                    return progress;
                }
            } else if let Some(done) = self.frames.pop() {
                self.on_path.remove(&done.node);
            }
        }
    }

    fn snapshot(&self) -> SearchState {
        SearchState {
            visited: self.visited.clone(),
            frontier: self.frames.iter().map(|frame| frame.node).collect(),
            path: self.path.clone(),
            bound: Some(self.threshold),
            message: self.message.clone(),
        }
    }

    fn nodes_expanded(&self) -> usize {
        self.visited.len()
    }

    fn path(&self) -> Option<&[Position]> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::common::{run, Steps};

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn prefers_down_before_right() {
        let grid = Grid::new(3, 3, p(0, 0), vec![p(2, 2)], []).unwrap();
        let mut ida = IdaStar::new(&grid, &grid.goals);
        let result = run(&mut ida);
        assert_eq!(result.path, vec![p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2)]);
        assert_eq!(ida.threshold(), 4);
        assert_eq!(ida.iteration(), 0);
    }

    #[test]
    fn raises_the_threshold_around_walls() {
        // S # G
        // . # .
        // . . .
        let grid = Grid::new(3, 3, p(0, 0), vec![p(2, 0)], [p(1, 0), p(1, 1)]).unwrap();
        let mut ida = IdaStar::new(&grid, &grid.goals);
        let messages: Vec<String> = Steps::new(&mut ida).filter_map(|s| s.message).collect();
        assert_eq!(
            messages,
            vec![
                "Increasing threshold from 2 to 4".to_string(),
                "Increasing threshold from 4 to 6".to_string(),
            ]
        );
        assert_eq!(ida.path().map(<[Position]>::len), Some(7));
        assert_eq!(ida.threshold(), 6);
    }

    #[test]
    fn stops_at_the_iteration_cap() {
        let grid = Grid::new(3, 3, p(0, 0), vec![p(2, 0)], [p(1, 0), p(1, 1)]).unwrap();
        let mut ida = IdaStar::with_max_iterations(&grid, &grid.goals, 1);
        let messages: Vec<String> = Steps::new(&mut ida).filter_map(|s| s.message).collect();
        assert_eq!(
            messages,
            vec![
                "Increasing threshold from 2 to 4".to_string(),
                "Maximum iterations reached".to_string(),
            ]
        );
        assert_eq!(ida.advance(), Progress::Exhausted);
        assert_eq!(ida.path(), None);
        assert_eq!(ida.iteration(), 1);
        assert_eq!(ida.threshold(), 4);
    }

    #[test]
    fn frontier_is_the_current_descent() {
        let grid = Grid::new(3, 3, p(0, 0), vec![p(2, 2)], []).unwrap();
        let mut ida = IdaStar::new(&grid, &grid.goals);
        ida.advance();
        ida.advance();
        let state = ida.snapshot();
        assert_eq!(state.frontier, vec![p(0, 0), p(0, 1)]);
        assert_eq!(state.bound, Some(4));
    }

    #[test]
    fn proves_an_enclosed_goal_unreachable() {
        let grid = Grid::new(3, 3, p(0, 0), vec![p(2, 2)], [p(1, 0), p(1, 1), p(1, 2)]).unwrap();
        let mut ida = IdaStar::new(&grid, &grid.goals);
        let result = run(&mut ida);
        assert!(result.path.is_empty());
        assert_eq!(result.nodes_expanded, 3);
        assert_eq!(ida.snapshot().message.as_deref(), Some("No solution found"));
    }
}
