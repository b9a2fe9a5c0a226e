use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithms::common::{
    reconstruct_path, Progress, SearchProcess, SearchState, EXPANSION_ORDER,
};
use crate::grid::{Grid, Position};
use crate::heuristic::manhattan;

/// Heap key `(f, h, insertion sequence, position)`: lowest f wins, ties go to
/// the node closer to the goal, then to the one pushed first.
type Key = (u32, u32, u64, Position);

/// A* over unit-cost moves with the Manhattan heuristic.
///
/// A neighbour is pushed again whenever a strictly cheaper route to it is
/// found; outdated heap entries are dropped when popped.
pub struct AStar<'a> {
    grid: &'a Grid,
    goals: Vec<Position>,
    heap: BinaryHeap<Reverse<Key>>,
    frontier: Vec<Position>,
    in_frontier: FxHashSet<Position>,
    visited: FxHashSet<Position>,
    parents: FxHashMap<Position, Option<Position>>,
    g_scores: FxHashMap<Position, u32>,
    seq: u64,
    path: Option<Vec<Position>>,
    outcome: Option<Progress>,
}

impl<'a> AStar<'a> {
    pub fn new(grid: &'a Grid, goals: &[Position]) -> Self {
        let mut a_star = AStar {
            grid,
            goals: goals.to_vec(),
            heap: BinaryHeap::new(),
            frontier: Vec::new(),
            in_frontier: FxHashSet::default(),
            visited: FxHashSet::default(),
            parents: FxHashMap::default(),
            g_scores: FxHashMap::default(),
            seq: 0,
            path: None,
            outcome: None,
        };
        if !a_star.goals.is_empty() {
            let h = manhattan(grid.start, &a_star.goals);
            a_star.parents.insert(grid.start, None);
            a_star.g_scores.insert(grid.start, 0);
            a_star.push(grid.start, 0, h);
        }
        a_star
    }

    fn push(&mut self, pos: Position, g: u32, h: u32) {
        self.heap.push(Reverse((g.saturating_add(h), h, self.seq, pos)));
        self.seq += 1;
        if self.in_frontier.insert(pos) {
            self.frontier.push(pos);
        }
    }

    fn finish(&mut self, outcome: Progress) -> Progress {
        self.outcome = Some(outcome);
        outcome
    }
}

impl SearchProcess for AStar<'_> {
    fn name(&self) -> &'static str {
        "as"
    }

    fn advance(&mut self) -> Progress {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let grid = self.grid;

        while let Some(Reverse((_, _, _, current))) = self.heap.pop() {
            if self.in_frontier.remove(&current) {
                self.frontier.retain(|&p| p != current);
            }
            if !self.visited.insert(current) {
                continue;
            }

            if self.goals.contains(&current) {
                self.path = Some(reconstruct_path(&self.parents, current));
                return self.finish(Progress::Found);
            }

            let tentative = self.g_scores.get(&current).copied().unwrap_or_default() + 1;
            for next in grid.neighbors(current, &EXPANSION_ORDER) {
                let improves = self
                    .g_scores
                    .get(&next)
                    .map_or(true, |&known| tentative < known);
                if improves {
                    self.parents.insert(next, Some(current));
                    self.g_scores.insert(next, tentative);
                    let h = manhattan(next, &self.goals);
                    self.push(next, tentative, h);
                }
            }
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
