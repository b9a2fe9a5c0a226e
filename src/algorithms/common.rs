use std::iter::FusedIterator;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::grid::Position;
use crate::moves::Move;

/// Neighbour order shared by BFS, DFS, GBFS, A* and IDS.
pub const EXPANSION_ORDER: [Move; 4] = [Move::Right, Move::Down, Move::Left, Move::Up];

/// Neighbour order used by IDA*. It differs from [`EXPANSION_ORDER`] and is
/// kept as is: changing it changes which of several equal-cost paths wins.
pub const IDA_STAR_ORDER: [Move; 4] = [Move::Down, Move::Right, Move::Up, Move::Left];

/// Outcome of a single [`SearchProcess::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// One unit of work was done and the search can continue.
    Expanded,
    /// A goal was reached; the path is available.
    Found,
    /// The search space (or a runaway cap) was exhausted without a path.
    Exhausted,
}

impl Progress {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Progress::Expanded)
    }
}

/// What a search looks like after one event, for visualization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub visited: FxHashSet<Position>,
    pub frontier: Vec<Position>,
    /// Present only on the terminal snapshot of a successful search.
    pub path: Option<Vec<Position>>,
    /// Current IDA* cost threshold.
    pub bound: Option<u32>,
    pub message: Option<String>,
}

/// Final outcome of a search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Start-to-goal positions; empty when no goal is reachable.
    pub path: Vec<Position>,
    pub nodes_expanded: usize,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path.
    pub fn path_length(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

impl From<&SearchState> for SearchResult {
    fn from(state: &SearchState) -> Self {
        SearchResult {
            path: state.path.clone().unwrap_or_default(),
            nodes_expanded: state.visited.len(),
        }
    }
}

/// A resumable search over a grid.
///
/// Each `advance` performs a bounded amount of work: one node expansion, or
/// one bookkeeping step between iterative-deepening passes. Once `Found` or
/// `Exhausted` is returned every later call returns the same value.
pub trait SearchProcess {
    fn name(&self) -> &'static str;

    fn advance(&mut self) -> Progress;

    fn snapshot(&self) -> SearchState;

    /// Distinct positions expanded so far.
    fn nodes_expanded(&self) -> usize;

    fn path(&self) -> Option<&[Position]>;
}

impl<S: SearchProcess + ?Sized> SearchProcess for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn advance(&mut self) -> Progress {
        (**self).advance()
    }

    fn snapshot(&self) -> SearchState {
        (**self).snapshot()
    }

    fn nodes_expanded(&self) -> usize {
        (**self).nodes_expanded()
    }

    fn path(&self) -> Option<&[Position]> {
        (**self).path()
    }
}

impl<S: SearchProcess + ?Sized> SearchProcess for &mut S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn advance(&mut self) -> Progress {
        (**self).advance()
    }

    fn snapshot(&self) -> SearchState {
        (**self).snapshot()
    }

    fn nodes_expanded(&self) -> usize {
        (**self).nodes_expanded()
    }

    fn path(&self) -> Option<&[Position]> {
        (**self).path()
    }
}

/// Drives `search` until it terminates.
pub fn run<S: SearchProcess + ?Sized>(search: &mut S) -> SearchResult {
    let outcome = loop {
        let progress = search.advance();
        if progress.is_terminal() {
            break progress;
        }
    };
    let result = SearchResult {
        path: search.path().map(<[Position]>::to_vec).unwrap_or_default(),
        nodes_expanded: search.nodes_expanded(),
    };
    log::debug!(
        "{}: {:?} after {} expansions",
        search.name(),
        outcome,
        result.nodes_expanded
    );
    result
}

/// Forward-only sequence of snapshots, one per search event.
///
/// The last item carries `path` when a goal was reached; a sequence that ends
/// without one means no solution.
pub struct Steps<S> {
    search: S,
    finished: bool,
}

impl<S: SearchProcess> Steps<S> {
    pub fn new(search: S) -> Self {
        Steps {
            search,
            finished: false,
        }
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Result of the search so far; final once the sequence is exhausted.
    pub fn result(&self) -> SearchResult {
        SearchResult {
            path: self.search.path().map(<[Position]>::to_vec).unwrap_or_default(),
            nodes_expanded: self.search.nodes_expanded(),
        }
    }
}

impl<S: SearchProcess> Iterator for Steps<S> {
    type Item = SearchState;

    fn next(&mut self) -> Option<SearchState> {
        if self.finished {
            return None;
        }
        if self.search.advance().is_terminal() {
            self.finished = true;
        }
        Some(self.search.snapshot())
    }
}

impl<S: SearchProcess> FusedIterator for Steps<S> {}

/// Walks the parent chain back from `goal`. The root maps to `None`.
pub(crate) fn reconstruct_path(
    parents: &FxHashMap<Position, Option<Position>>,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&Some(parent)) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
