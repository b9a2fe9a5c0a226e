use std::fmt::{self, Write as _};

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::algorithms::SearchState;
use crate::error::{MapError, MapResult};
use crate::moves::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The adjacent position one step in direction `m`, or `None` when a
    /// coordinate would leave the `i32` range.
    pub fn step(self, m: Move) -> Option<Position> {
        let (dx, dy) = m.delta();
        Some(Position {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position { x, y }
    }
}

/// Static map: dimensions, walls, one start and an ordered goal list.
///
/// Search algorithms only read a grid. Narrowing the searched goals is done
/// by handing an algorithm a goal slice, never by mutating `goals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub start: Position,
    pub goals: Vec<Position>,
    pub walls: FxHashSet<Position>,
}

impl Grid {
    pub fn new(
        width: i32,
        height: i32,
        start: Position,
        goals: Vec<Position>,
        walls: impl IntoIterator<Item = Position>,
    ) -> MapResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(MapError::NonPositiveSize { width, height });
        }
        if goals.is_empty() {
            return Err(MapError::NoGoals);
        }
        Ok(Grid {
            width,
            height,
            start,
            goals,
            walls: walls.into_iter().collect(),
        })
    }

    /// Generates a random grid with the start in the top-left quadrant and the
    /// first goal in the bottom-right one. Walls never cover start or goals.
    pub fn random<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        num_walls: usize,
        num_goals: usize,
        rng: &mut R,
    ) -> MapResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(MapError::NonPositiveSize { width, height });
        }

        let cells = (width as usize).saturating_mul(height as usize);

        let start = Position {
            x: rng.gen_range(0..(width / 2).max(1)),
            y: rng.gen_range(0..(height / 2).max(1)),
        };

        let mut goals = Vec::new();
        if width == 1 && height == 1 {
            goals.push(start);
        } else {
            let first = Position {
                x: rng.gen_range(width / 2..width),
                y: rng.gen_range(height / 2..height),
            };
            if first != start {
                goals.push(first);
            }
            let mut attempts = 0;
            let wanted = num_goals.clamp(1, cells);
            while goals.len() < wanted && attempts < wanted.saturating_mul(10) {
                let pos = Position {
                    x: rng.gen_range(0..width),
                    y: rng.gen_range(0..height),
                };
                if pos != start && !goals.contains(&pos) {
                    goals.push(pos);
                }
                attempts += 1;
            }
            if goals.is_empty() {
                // Only reachable on tiny grids where the quadrants overlap.
                let fallback = if start.x + 1 < width {
                    Position::new(start.x + 1, start.y)
                } else {
                    Position::new(start.x, start.y + 1)
                };
                goals.push(fallback);
            }
        }

        let mut walls = FxHashSet::default();
        let mut attempts = 0;
        let num_walls = num_walls.min(cells);
        while walls.len() < num_walls && attempts < num_walls.saturating_mul(3) {
            let pos = Position {
                x: rng.gen_range(0..width),
                y: rng.gen_range(0..height),
            };
            if pos != start && !goals.contains(&pos) {
                walls.insert(pos);
            }
            attempts += 1;
        }

        Grid::new(width, height, start, goals, walls)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// A position can be entered iff it lies on the grid and is not a wall.
    pub fn is_valid(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.walls.contains(&pos)
    }

    /// Valid neighbours of `pos`, enumerated in `order`.
    pub fn neighbors<'a>(
        &'a self,
        pos: Position,
        order: &'a [Move],
    ) -> impl Iterator<Item = Position> + 'a {
        order
            .iter()
            .filter_map(move |&m| pos.step(m))
            .filter(move |next| self.is_valid(*next))
    }

    /// Text picture of the grid, optionally overlaid with a search snapshot.
    ///
    /// `S` start, `G` active goal, `g` other goals, `#` wall, `*` path,
    /// `+` frontier, `o` visited, `.` empty.
    pub fn render(&self, state: Option<&SearchState>, active_goal: Option<Position>) -> String {
        let path: FxHashSet<Position> = state
            .and_then(|s| s.path.as_ref())
            .map(|p| p.iter().copied().collect())
            .unwrap_or_default();
        let frontier: FxHashSet<Position> = state
            .map(|s| s.frontier.iter().copied().collect())
            .unwrap_or_default();

        let mut out = String::new();
        out.push_str("   ");
        for x in 0..self.width {
            let _ = write!(out, "{:2}", x % 10);
        }
        out.push('\n');

        for y in 0..self.height {
            let _ = write!(out, "{:2} ", y);
            for x in 0..self.width {
                let pos = Position { x, y };
                let c = if pos == self.start {
                    'S'
                } else if Some(pos) == active_goal {
                    'G'
                } else if self.goals.contains(&pos) {
                    'g'
                } else if self.walls.contains(&pos) {
                    '#'
                } else if path.contains(&pos) {
                    '*'
                } else if frontier.contains(&pos) {
                    '+'
                } else if state.is_some_and(|s| s.visited.contains(&pos)) {
                    'o'
                } else {
                    '.'
                };
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}
