use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    reconstruct_path, Progress, SearchProcess, SearchState, EXPANSION_ORDER,
};
use crate::grid::{Grid, Position};

/// Breadth-first search. Every move costs 1, so the first goal dequeued is
/// reached by a shortest path.
pub struct Bfs<'a> {
    grid: &'a Grid,
    goals: Vec<Position>,
    queue: VecDeque<Position>,
    queued: FxHashSet<Position>,
    visited: FxHashSet<Position>,
    parents: FxHashMap<Position, Option<Position>>,
    path: Option<Vec<Position>>,
    outcome: Option<Progress>,
}

impl<'a> Bfs<'a> {
    pub fn new(grid: &'a Grid, goals: &[Position]) -> Self {
        let mut bfs = Bfs {
            grid,
            goals: goals.to_vec(),
            queue: VecDeque::new(),
            queued: FxHashSet::default(),
            visited: FxHashSet::default(),
            parents: FxHashMap::default(),
            path: None,
            outcome: None,
        };
        if !bfs.goals.is_empty() {
            bfs.queue.push_back(grid.start);
            bfs.queued.insert(grid.start);
            bfs.parents.insert(grid.start, None);
        }
        bfs
    }

    fn finish(&mut self, outcome: Progress) -> Progress {
        self.outcome = Some(outcome);
        outcome
    }
}

impl SearchProcess for Bfs<'_> {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn advance(&mut self) -> Progress {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let grid = self.grid;

        while let Some(current) = self.queue.pop_front() {
            self.queued.remove(&current);
            if !self.visited.insert(current) {
                continue;
            }

            if self.goals.contains(&current) {
                self.path = Some(reconstruct_path(&self.parents, current));
                return self.finish(Progress::Found);
            }

            for next in grid.neighbors(current, &EXPANSION_ORDER) {
                if !self.visited.contains(&next) && self.queued.insert(next) {
                    self.parents.insert(next, Some(current));
                    self.queue.push_back(next);
                }
            }
            return Progress::Expanded;
        }

        self.finish(Progress::Exhausted)
    }

    fn snapshot(&self) -> SearchState {
        SearchState {
            visited: self.visited.clone(),
            frontier: self.queue.iter().copied().collect(),
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
