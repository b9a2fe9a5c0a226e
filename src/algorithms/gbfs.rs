use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    reconstruct_path, Progress, SearchProcess, SearchState, EXPANSION_ORDER,
};
use crate::grid::{Grid, Position};
use crate::heuristic::manhattan;

/// Heap key: heuristic first, then the expansion that discovered the node,
/// then the direction it was discovered in.
type Key = (u32, u64, usize, Position);

/// Greedy best-first search ordered purely by the Manhattan heuristic.
pub struct Gbfs<'a> {
    grid: &'a Grid,
    goals: Vec<Position>,
    heap: BinaryHeap<Reverse<Key>>,
    /// Pending positions in discovery order.
    frontier: Vec<Position>,
    visited: FxHashSet<Position>,
    parents: FxHashMap<Position, Option<Position>>,
    seq: u64,
    path: Option<Vec<Position>>,
    outcome: Option<Progress>,
}

impl<'a> Gbfs<'a> {
    pub fn new(grid: &'a Grid, goals: &[Position]) -> Self {
        let mut gbfs = Gbfs {
            grid,
            goals: goals.to_vec(),
            heap: BinaryHeap::new(),
            frontier: Vec::new(),
            visited: FxHashSet::default(),
            parents: FxHashMap::default(),
            seq: 0,
            path: None,
            outcome: None,
        };
        if !gbfs.goals.is_empty() {
            let h = manhattan(grid.start, &gbfs.goals);
            gbfs.heap.push(Reverse((h, 0, 0, grid.start)));
            gbfs.frontier.push(grid.start);
            gbfs.parents.insert(grid.start, None);
            gbfs.seq = 1;
        }
        gbfs
    }

    fn finish(&mut self, outcome: Progress) -> Progress {
        self.outcome = Some(outcome);
        outcome
    }
}

impl SearchProcess for Gbfs<'_> {
    fn name(&self) -> &'static str {
        "gbfs"
    }

    fn advance(&mut self) -> Progress {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let grid = self.grid;

        while let Some(Reverse((_, _, _, current))) = self.heap.pop() {
            if let Some(i) = self.frontier.iter().position(|&p| p == current) {
                self.frontier.remove(i);
            }
            if !self.visited.insert(current) {
                continue;
            }

            if self.goals.contains(&current) {
                self.path = Some(reconstruct_path(&self.parents, current));
                return self.finish(Progress::Found);
            }

            for (rank, &dir) in EXPANSION_ORDER.iter().enumerate() {
                let Some(next) = current.step(dir) else {
                    continue;
                };
                if !grid.is_valid(next)
                    || self.visited.contains(&next)
                    || self.parents.contains_key(&next)
                {
                    continue;
                }
                self.parents.insert(next, Some(current));
                let h = manhattan(next, &self.goals);
                self.heap.push(Reverse((h, self.seq, rank, next)));
                self.frontier.push(next);
            }
            self.seq += 1;
            return Progress::Expanded;
        }

        self.finish(Progress::Exhausted)
    }

    fn snapshot(&self) -> SearchState {
        SearchState {
            visited: self.visited.clone(),
            frontier: self.frontier.clone(),
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
