use std::fmt::{self, Write as _};
use std::time::Duration;

use pathfinding::prelude::bfs;

use crate::algorithms::{Method, SearchResult, EXPANSION_ORDER};
use crate::grid::{Grid, Position};
use crate::moves::{format_moves, to_moves, Move};

/// Outcome of one method against one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalReport {
    pub method: Method,
    /// Zero-based index into the grid's goal list.
    pub goal_index: usize,
    pub start: Position,
    pub goal: Position,
    pub path: Vec<Position>,
    pub nodes_expanded: usize,
    pub moves: Vec<Move>,
}

impl GoalReport {
    pub fn new(
        method: Method,
        goal_index: usize,
        start: Position,
        goal: Position,
        result: SearchResult,
    ) -> Self {
        let moves = to_moves(&result.path);
        GoalReport {
            method,
            goal_index,
            start,
            goal,
            path: result.path,
            nodes_expanded: result.nodes_expanded,
            moves,
        }
    }

    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves, or `None` when no path was found.
    pub fn path_length(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }

    /// The batch-mode block for this goal, headed by the map name.
    pub fn render(&self, map_name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {} [Goal {}]",
            map_name,
            self.method.code().to_uppercase(),
            self.goal_index + 1
        );
        let _ = write!(out, "{self}");
        out
    }
}

impl fmt::Display for GoalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start at {}", self.start)?;
        writeln!(f, "Goal at {}", self.goal)?;
        writeln!(f, "{} nodes expanded", self.nodes_expanded)?;
        match self.path_length() {
            Some(length) => {
                writeln!(f, "Path length: {}", length)?;
                writeln!(f, "{}", format_moves(&self.moves))?;
            }
            None => writeln!(f, "No solution found.")?,
        }
        writeln!(f, "-----------------------")
    }
}

/// Length of a shortest path from `start` to `goal`, if one exists.
pub fn optimal_path_length(grid: &Grid, start: Position, goal: Position) -> Option<usize> {
    bfs(
        &start,
        |p| grid.neighbors(*p, &EXPANSION_ORDER).collect::<Vec<_>>(),
        |p| *p == goal,
    )
    .map(|path| path.len() - 1)
}

/// One line of a multi-method comparison.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub report: GoalReport,
    pub optimal_length: Option<usize>,
    pub elapsed: Duration,
}

impl ComparisonRow {
    /// Moves taken relative to the shortest possible route; 1.0 is optimal.
    pub fn route_efficiency(&self) -> Option<f64> {
        let taken = self.report.path_length()?;
        match self.optimal_length? {
            0 => Some(1.0),
            optimal => Some(taken as f64 / optimal as f64),
        }
    }
}

/// Formats comparison rows as a table followed by a short analysis.
pub fn comparison_table(rows: &[ComparisonRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== ALGORITHM COMPARISON RESULTS ===");
    let _ = writeln!(
        out,
        "{:<10} {:<6} {:<8} {:<10} {:<8} {:<8} {:<12} {:<12}",
        "Method", "Goal", "Success", "Expanded", "Length", "Optimal", "Efficiency", "Time"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));

    for row in rows {
        let report = &row.report;
        let success = if report.found() { "yes" } else { "no" };
        let length = report
            .path_length()
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        let optimal = row
            .optimal_length
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        let efficiency = row
            .route_efficiency()
            .map_or_else(|| "-".to_string(), |e| format!("{:.3}", e));
        let _ = writeln!(
            out,
            "{:<10} {:<6} {:<8} {:<10} {:<8} {:<8} {:<12} {:<12}",
            report.method.code(),
            report.goal_index + 1,
            success,
            report.nodes_expanded,
            length,
            optimal,
            efficiency,
            format!("{:.2?}", row.elapsed)
        );
    }

    let successful: Vec<&ComparisonRow> = rows.iter().filter(|r| r.report.found()).collect();
    let _ = writeln!(out);
    if let Some(fewest) = successful.iter().min_by_key(|r| r.report.nodes_expanded) {
        let _ = writeln!(out, "=== PERFORMANCE ANALYSIS ===");
        let _ = writeln!(
            out,
            "Fewest expansions: {} on goal {} ({} nodes)",
            fewest.report.method.code(),
            fewest.report.goal_index + 1,
            fewest.report.nodes_expanded
        );
        let suboptimal = successful
            .iter()
            .filter(|r| r.route_efficiency().is_some_and(|e| e > 1.0))
            .count();
        let _ = writeln!(
            out,
            "Suboptimal routes: {} of {} solved searches",
            suboptimal,
            successful.len()
        );
    } else {
        let _ = writeln!(out, "No method reached any goal.");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn report(path: Vec<Position>, nodes_expanded: usize) -> GoalReport {
        GoalReport::new(
            Method::Bfs,
            0,
            p(0, 0),
            p(2, 0),
            SearchResult {
                path,
                nodes_expanded,
            },
        )
    }

    #[test]
    fn renders_a_solved_goal() {
        let text = report(vec![p(0, 0), p(1, 0), p(2, 0)], 3).render("maze.txt");
        assert_eq!(
            text,
            "maze.txt BFS [Goal 1]\n\
             Start at (0, 0)\n\
             Goal at (2, 0)\n\
             3 nodes expanded\n\
             Path length: 2\n\
             right; right\n\
             -----------------------\n"
        );
    }

    #[test]
    fn renders_an_unsolved_goal() {
        let text = report(Vec::new(), 5).render("maze.txt");
        assert!(text.contains("5 nodes expanded\nNo solution found.\n"));
        assert!(!text.contains("Path length"));
    }

    #[test]
    fn optimal_length_matches_hand_count() {
        let grid = Grid::new(3, 3, p(0, 0), vec![p(2, 0)], [p(1, 0), p(1, 1)]).unwrap();
        assert_eq!(optimal_path_length(&grid, p(0, 0), p(2, 0)), Some(6));
        assert_eq!(optimal_path_length(&grid, p(0, 0), p(0, 0)), Some(0));

        let sealed = Grid::new(3, 1, p(0, 0), vec![p(2, 0)], [p(1, 0)]).unwrap();
        assert_eq!(optimal_path_length(&sealed, p(0, 0), p(2, 0)), None);
    }

    #[test]
    fn efficiency_compares_against_the_optimum() {
        let row = ComparisonRow {
            report: report(vec![p(0, 0), p(0, 1), p(1, 1), p(1, 0), p(2, 0)], 5),
            optimal_length: Some(2),
            elapsed: Duration::ZERO,
        };
        assert_eq!(row.route_efficiency(), Some(2.0));

        let unsolved = ComparisonRow {
            report: report(Vec::new(), 1),
            optimal_length: None,
            elapsed: Duration::ZERO,
        };
        assert_eq!(unsolved.route_efficiency(), None);

        let table = comparison_table(&[row, unsolved]);
        assert!(table.contains("Suboptimal routes: 1 of 1 solved searches"));
    }
}
