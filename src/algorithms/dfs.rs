use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    reconstruct_path, Progress, SearchProcess, SearchState, EXPANSION_ORDER,
};
use crate::grid::{Grid, Position};

/// Depth-first search with an explicit stack.
///
/// Neighbours are pushed in reverse expansion order so that RIGHT is popped
/// first. A position is pushed at most once: only when it has no parent yet.
pub struct Dfs<'a> {
    grid: &'a Grid,
    goals: Vec<Position>,
    stack: Vec<Position>,
    visited: FxHashSet<Position>,
    parents: FxHashMap<Position, Option<Position>>,
    path: Option<Vec<Position>>,
    outcome: Option<Progress>,
}

impl<'a> Dfs<'a> {
    pub fn new(grid: &'a Grid, goals: &[Position]) -> Self {
        let mut dfs = Dfs {
            grid,
            goals: goals.to_vec(),
            stack: Vec::new(),
            visited: FxHashSet::default(),
            parents: FxHashMap::default(),
            path: None,
            outcome: None,
        };
        if !dfs.goals.is_empty() {
            dfs.stack.push(grid.start);
            dfs.parents.insert(grid.start, None);
        }
        dfs
    }

    fn finish(&mut self, outcome: Progress) -> Progress {
        self.outcome = Some(outcome);
        outcome
    }
}

impl SearchProcess for Dfs<'_> {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn advance(&mut self) -> Progress {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let grid = self.grid;

        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current) {
                continue;
            }

            if self.goals.contains(&current) {
                self.path = Some(reconstruct_path(&self.parents, current));
                return self.finish(Progress::Found);
            }

            let candidates: Vec<Position> = grid
                .neighbors(current, &EXPANSION_ORDER)
                .filter(|next| !self.visited.contains(next))
                .collect();
            for next in candidates.into_iter().rev() {
                if !self.parents.contains_key(&next) {
                    self.parents.insert(next, Some(current));
                    self.stack.push(next);
                }
            }
            return Progress::Expanded;
        }

        self.finish(Progress::Exhausted)
    }

    fn snapshot(&self) -> SearchState {
        SearchState {
            visited: self.visited.clone(),
            frontier: self.stack.clone(),
            path: self.path.clone(),
            ..SearchState::default()
        }
    }

    fn nodes_expanded(&self) -> usize {
        self.visited.len()
    }

    fn path(&self) -> Option<&[Position]> {
        self.path.as_deref()
    }
}
