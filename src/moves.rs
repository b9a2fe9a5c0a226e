use std::fmt;
use std::str::FromStr;

use crate::grid::Position;

/// A single cardinal step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Unit displacement `(dx, dy)`; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
        }
    }

    /// The move that takes `from` to the adjacent cell `to`, if they are
    /// exactly one cardinal step apart.
    pub fn between(from: Position, to: Position) -> Option<Move> {
        match (to.x.checked_sub(from.x)?, to.y.checked_sub(from.y)?) {
            (1, 0) => Some(Move::Right),
            (-1, 0) => Some(Move::Left),
            (0, 1) => Some(Move::Down),
            (0, -1) => Some(Move::Up),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            other => Err(format!("unknown move {other:?}")),
        }
    }
}

/// Translates a path into the moves walking it.
///
/// Search algorithms only ever produce unit cardinal steps; any other pair of
/// consecutive positions contributes no move.
pub fn to_moves(path: &[Position]) -> Vec<Move> {
    path.windows(2)
        .filter_map(|pair| Move::between(pair[0], pair[1]))
        .collect()
}

/// Replays `moves` from `start`, returning every visited position including
/// `start` itself. Replay stops at a move that would leave the `i32` range.
pub fn apply_moves(start: Position, moves: &[Move]) -> Vec<Position> {
    let steps = moves.iter().scan(start, |current, &m| {
        *current = current.step(m)?;
        Some(*current)
    });
    std::iter::once(start).chain(steps).collect()
}

/// Joins moves the way the batch report prints them: `right; down; ...`.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.label())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn translates_each_direction() {
        let path = [p(1, 1), p(2, 1), p(2, 2), p(1, 2), p(1, 1)];
        assert_eq!(
            to_moves(&path),
            vec![Move::Right, Move::Down, Move::Left, Move::Up]
        );
    }

    #[test]
    fn single_cell_path_has_no_moves() {
        assert!(to_moves(&[p(3, 3)]).is_empty());
        assert!(to_moves(&[]).is_empty());
    }

    #[test]
    fn replaying_moves_rebuilds_the_path() {
        let path = vec![p(0, 0), p(1, 0), p(1, 1), p(1, 2), p(0, 2)];
        let moves = to_moves(&path);
        assert_eq!(apply_moves(path[0], &moves), path);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for m in [Move::Up, Move::Down, Move::Left, Move::Right] {
            assert_eq!(m.to_string().parse::<Move>(), Ok(m));
        }
        assert!("north".parse::<Move>().is_err());
    }

    #[test]
    fn formats_moves_with_semicolons() {
        assert_eq!(format_moves(&[Move::Right, Move::Down]), "right; down");
        assert_eq!(format_moves(&[]), "");
    }

    #[test]
    fn rejects_non_adjacent_pairs() {
        assert_eq!(Move::between(p(0, 0), p(1, 1)), None);
        assert_eq!(Move::between(p(0, 0), p(0, 0)), None);
        assert_eq!(Move::between(p(0, 0), p(2, 0)), None);
        assert_eq!(Move::between(p(i32::MIN, 0), p(i32::MAX, 0)), None);
    }

    #[test]
    fn replay_stops_at_the_edge_of_the_coordinate_range() {
        let start = p(i32::MAX - 1, 0);
        let moves = [Move::Right, Move::Right, Move::Down];
        assert_eq!(apply_moves(start, &moves), vec![start, p(i32::MAX, 0)]);
    }
}
