//! Text map format.
//!
//! ```text
//! 5x5          <width>x<height>
//! 0,0          start
//! 4,4; 0,4     goals, separated by "; "
//! 2,1          one wall per remaining non-blank line
//! ```
//!
//! Coordinates are not bounds-checked here; [`Grid::is_valid`] is the only
//! runtime check.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{MapError, MapResult};
use crate::grid::{Grid, Position};

/// Reads and parses a map file.
pub fn load(path: &Path) -> MapResult<Grid> {
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Finds `name` in the working directory, falling back to `map/<name>`.
pub fn resolve(name: &str) -> Option<PathBuf> {
    let direct = PathBuf::from(name);
    if direct.is_file() {
        return Some(direct);
    }
    let under_map = Path::new("map").join(name);
    under_map.is_file().then_some(under_map)
}

pub fn parse(text: &str) -> MapResult<Grid> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (line, size) = lines.next().ok_or(MapError::MissingLine {
        line: 1,
        what: "grid dimensions",
    })?;
    let (width, height) = parse_size(line, size)?;

    let (line, start) = lines.next().ok_or(MapError::MissingLine {
        line: 2,
        what: "start position",
    })?;
    let start = parse_position(line, start)?;

    let (line, goals) = lines.next().ok_or(MapError::MissingLine {
        line: 3,
        what: "goal positions",
    })?;
    let goals = goals
        .split(';')
        .map(|part| parse_position(line, part))
        .collect::<MapResult<Vec<_>>>()?;

    let walls = lines
        .filter(|(_, l)| !l.is_empty())
        .map(|(line, l)| parse_position(line, l))
        .collect::<MapResult<Vec<_>>>()?;

    Grid::new(width, height, start, goals, walls)
}

impl FromStr for Grid {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Serializes `grid` back into the map format. Walls are written sorted so
/// the output is stable.
pub fn to_map_string(grid: &Grid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}x{}", grid.width, grid.height);
    let _ = writeln!(out, "{},{}", grid.start.x, grid.start.y);
    let goals: Vec<String> = grid
        .goals
        .iter()
        .map(|g| format!("{},{}", g.x, g.y))
        .collect();
    let _ = writeln!(out, "{}", goals.join("; "));

    let mut walls: Vec<&Position> = grid.walls.iter().collect();
    walls.sort();
    for wall in walls {
        let _ = writeln!(out, "{},{}", wall.x, wall.y);
    }
    out
}

fn parse_size(line: usize, text: &str) -> MapResult<(i32, i32)> {
    let err = || MapError::Dimensions {
        line,
        text: text.to_string(),
    };
    let (w, h) = text.split_once(['x', 'X']).ok_or_else(err)?;
    let width = w.trim().parse().map_err(|_| err())?;
    let height = h.trim().parse().map_err(|_| err())?;
    Ok((width, height))
}

fn parse_position(line: usize, text: &str) -> MapResult<Position> {
    let err = || MapError::Coordinate {
        line,
        text: text.trim().to_string(),
    };
    let (x, y) = text.split_once(',').ok_or_else(err)?;
    let x = x.trim().parse().map_err(|_| err())?;
    let y = y.trim().parse().map_err(|_| err())?;
    Ok(Position { x, y })
}
