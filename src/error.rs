use std::path::PathBuf;

use thiserror::Error;

/// Failure to build a [`crate::grid::Grid`] from a map description.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to read map file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: missing {what}")]
    MissingLine { line: usize, what: &'static str },
    #[error("line {line}: invalid dimensions {text:?}, expected <width>x<height>")]
    Dimensions { line: usize, text: String },
    #[error("line {line}: invalid coordinate {text:?}, expected <x>,<y>")]
    Coordinate { line: usize, text: String },
    #[error("grid dimensions must be positive, got {width}x{height}")]
    NonPositiveSize { width: i32, height: i32 },
    #[error("map declares no goal positions")]
    NoGoals,
}

pub type MapResult<T> = Result<T, MapError>;

/// Errors reported by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("file {0:?} not found in current directory or 'map/' directory")]
    MapNotFound(String),
    #[error("unknown method {0:?}, please use: bfs, dfs, gbfs, as, ids, ida_star or all")]
    UnknownMethod(String),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
