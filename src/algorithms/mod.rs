pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod gbfs;
pub mod ida_star;
pub mod ids;

use std::fmt;
use std::str::FromStr;

use crate::error::CliError;
use crate::grid::{Grid, Position};

pub use a_star::AStar;
pub use bfs::Bfs;
pub use common::{
    run, Progress, SearchProcess, SearchResult, SearchState, Steps, EXPANSION_ORDER,
    IDA_STAR_ORDER,
};
pub use dfs::Dfs;
pub use gbfs::Gbfs;
pub use ida_star::IdaStar;
pub use ids::Ids;

/// Selects one of the six search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Bfs,
    Dfs,
    Gbfs,
    AStar,
    Ids,
    IdaStar,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Bfs,
        Method::Dfs,
        Method::Gbfs,
        Method::AStar,
        Method::Ids,
        Method::IdaStar,
    ];

    /// Name used on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Method::Bfs => "bfs",
            Method::Dfs => "dfs",
            Method::Gbfs => "gbfs",
            Method::AStar => "as",
            Method::Ids => "ids",
            Method::IdaStar => "ida_star",
        }
    }

    /// Whether the returned path is guaranteed to be a shortest one.
    pub fn is_optimal(self) -> bool {
        matches!(self, Method::Bfs | Method::AStar)
    }

    /// Starts a search on `grid` targeting only `goals`.
    pub fn start<'a>(self, grid: &'a Grid, goals: &[Position]) -> Box<dyn SearchProcess + 'a> {
        match self {
            Method::Bfs => Box::new(Bfs::new(grid, goals)),
            Method::Dfs => Box::new(Dfs::new(grid, goals)),
            Method::Gbfs => Box::new(Gbfs::new(grid, goals)),
            Method::AStar => Box::new(AStar::new(grid, goals)),
            Method::Ids => Box::new(Ids::new(grid, goals)),
            Method::IdaStar => Box::new(IdaStar::new(grid, goals)),
        }
    }

    /// Runs a search to completion.
    pub fn solve(self, grid: &Grid, goals: &[Position]) -> SearchResult {
        run(&mut self.start(grid, goals))
    }

    /// Stepwise view of a search, one snapshot per expansion event.
    pub fn steps<'a>(
        self,
        grid: &'a Grid,
        goals: &[Position],
    ) -> Steps<Box<dyn SearchProcess + 'a>> {
        Steps::new(self.start(grid, goals))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Method {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Method::ALL
            .into_iter()
            .find(|m| m.code() == wanted)
            .ok_or_else(|| CliError::UnknownMethod(s.to_string()))
    }
}
