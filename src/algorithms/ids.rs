use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    reconstruct_path, Progress, SearchProcess, SearchState, EXPANSION_ORDER,
};
use crate::grid::{Grid, Position};
use crate::heuristic::manhattan;

/// Iterative deepening depth-first search.
///
/// Runs depth-limited DFS passes with limits `0..=max_depth`, where
/// `max_depth` is twice the Manhattan distance from the start to the
/// farthest goal. Each pass starts from scratch; `all_visited` accumulates
/// every expansion for reporting.
pub struct Ids<'a> {
    grid: &'a Grid,
    goals: Vec<Position>,
    depth_limit: usize,
    max_depth: usize,
    stack: Vec<(Position, usize)>,
    /// Shallowest depth each position has been pushed at in this pass.
    depths: FxHashMap<Position, usize>,
    parents: FxHashMap<Position, Option<Position>>,
    visited: FxHashSet<Position>,
    frontier: Vec<Position>,
    in_frontier: FxHashSet<Position>,
    all_visited: FxHashSet<Position>,
    message: Option<String>,
    path: Option<Vec<Position>>,
    outcome: Option<Progress>,
}

impl<'a> Ids<'a> {
    pub fn new(grid: &'a Grid, goals: &[Position]) -> Self {
        let max_depth = goals
            .iter()
            .map(|&goal| manhattan(grid.start, &[goal]) as usize)
            .max()
            .unwrap_or(0)
            .saturating_mul(2);
        let mut ids = Ids {
            grid,
            goals: goals.to_vec(),
            depth_limit: 0,
            max_depth,
            stack: Vec::new(),
            depths: FxHashMap::default(),
            parents: FxHashMap::default(),
            visited: FxHashSet::default(),
            frontier: Vec::new(),
            in_frontier: FxHashSet::default(),
            all_visited: FxHashSet::default(),
            message: None,
            path: None,
            outcome: None,
        };
        if !ids.goals.is_empty() {
            ids.begin_pass();
        }
        ids
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    fn begin_pass(&mut self) {
        let start = self.grid.start;
        self.stack.clear();
        self.depths.clear();
        self.parents.clear();
        self.visited.clear();
        self.frontier.clear();
        self.in_frontier.clear();

        self.stack.push((start, 0));
        self.depths.insert(start, 0);
        self.parents.insert(start, None);
        self.frontier.push(start);
        self.in_frontier.insert(start);
    }

    fn finish(&mut self, outcome: Progress) -> Progress {
        self.outcome = Some(outcome);
        outcome
    }
}

impl SearchProcess for Ids<'_> {
    fn name(&self) -> &'static str {
        "ids"
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

        while let Some((current, depth)) = self.stack.pop() {
            if self.in_frontier.remove(&current) {
                self.frontier.retain(|&p| p != current);
            }
            if !self.visited.insert(current) {
                continue;
            }
            self.all_visited.insert(current);

            if self.goals.contains(&current) {
                self.path = Some(reconstruct_path(&self.parents, current));
                return self.finish(Progress::Found);
            }

            if depth < self.depth_limit {
                let candidates: Vec<Position> = grid
                    .neighbors(current, &EXPANSION_ORDER)
                    .filter(|next| !self.visited.contains(next))
                    .collect();
                for next in candidates.into_iter().rev() {
                    let shallower = self.depths.get(&next).map_or(true, |&d| depth + 1 < d);
                    if !shallower {
                        continue;
                    }
                    self.parents.insert(next, Some(current));
                    self.depths.insert(next, depth + 1);
                    self.stack.push((next, depth + 1));
                    if self.in_frontier.insert(next) {
                        self.frontier.push(next);
                    }
                }
            }
            return Progress::Expanded;
        }

        // The pass ran dry without reaching a goal.
        if self.depth_limit >= self.max_depth {
            self.message = Some(format!("No solution within depth {}", self.max_depth));
            log::debug!("ids: depth cap {} reached", self.max_depth);
            return self.finish(Progress::Exhausted);
        }
        self.message = Some(format!(
            "Increasing depth limit from {} to {}",
            self.depth_limit,
            self.depth_limit + 1
        ));
        self.depth_limit += 1;
        self.begin_pass();
        Progress::Expanded
    }

    fn snapshot(&self) -> SearchState {
        let frontier = if self.outcome == Some(Progress::Exhausted) {
            Vec::new()
        } else {
            self.frontier.clone()
        };
        SearchState {
            visited: self.all_visited.clone(),
            frontier,
            path: self.path.clone(),
            bound: None,
            message: self.message.clone(),
        }
    }

    fn nodes_expanded(&self) -> usize {
        self.all_visited.len()
    }

    fn path(&self) -> Option<&[Position]> {
        self.path.as_deref()
    }
}
