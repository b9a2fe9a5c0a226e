//! Grid pathfinding with six interchangeable, steppable search strategies.
//!
//! Every search is an explicit state machine implementing
//! [`algorithms::SearchProcess`]: it can be driven to completion with
//! [`algorithms::run`] or one expansion at a time through
//! [`algorithms::Steps`] for live visualization.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod logger;
pub mod map;
pub mod moves;
pub mod simulation;
pub mod statistics;

pub use algorithms::{run, Method, Progress, SearchProcess, SearchResult, SearchState, Steps};
pub use error::{CliError, MapError};
pub use grid::{Grid, Position};
pub use moves::{apply_moves, to_moves, Move};
pub use simulation::Simulation;
