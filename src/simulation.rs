use std::slice;
use std::time::Instant;

use crate::algorithms::{run, Method, SearchProcess, SearchResult, Steps};
use crate::grid::{Grid, Position};
use crate::statistics::{optimal_path_length, ComparisonRow, GoalReport};

/// Runs one search method against each goal of a grid in turn.
///
/// Every search starts from the grid's own start and targets exactly one
/// goal; the grid itself is never modified.
pub struct Simulation<'a> {
    grid: &'a Grid,
    method: Method,
}

impl<'a> Simulation<'a> {
    pub fn new(grid: &'a Grid, method: Method) -> Self {
        Simulation { grid, method }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn goal_count(&self) -> usize {
        self.grid.goals.len()
    }

    /// Starts a search narrowed to the goal at `goal_index`.
    pub fn search(&self, goal_index: usize) -> Option<Box<dyn SearchProcess + 'a>> {
        let goal = self.grid.goals.get(goal_index)?;
        Some(self.method.start(self.grid, slice::from_ref(goal)))
    }

    /// Stepwise search for one goal, for interactive drivers.
    pub fn steps(&self, goal_index: usize) -> Option<Steps<Box<dyn SearchProcess + 'a>>> {
        self.search(goal_index).map(Steps::new)
    }

    /// Packages a finished search for the goal at `goal_index`.
    pub fn report(&self, goal_index: usize, result: SearchResult) -> Option<GoalReport> {
        let goal = *self.grid.goals.get(goal_index)?;
        Some(GoalReport::new(self.method, goal_index, self.grid.start, goal, result))
    }

    /// Solves every goal eagerly, in goal-list order. A failed goal does not
    /// stop the remaining ones.
    pub fn run(&self) -> Vec<GoalReport> {
        (0..self.goal_count())
            .filter_map(|index| {
                let mut search = self.search(index)?;
                let result = run(&mut search);
                let report = self.report(index, result)?;
                log::info!(
                    "{} goal {} at {}: {}",
                    self.method,
                    index + 1,
                    report.goal,
                    if report.found() { "solved" } else { "no solution" }
                );
                Some(report)
            })
            .collect()
    }

    /// Runs every method against every goal and measures each search.
    pub fn compare(grid: &Grid) -> Vec<ComparisonRow> {
        let optimal: Vec<Option<usize>> = grid
            .goals
            .iter()
            .map(|&goal| optimal_path_length(grid, grid.start, goal))
            .collect();

        let mut rows = Vec::new();
        for method in Method::ALL {
            let simulation = Simulation::new(grid, method);
            for (index, goal_optimal) in optimal.iter().enumerate() {
                let Some(mut search) = simulation.search(index) else {
                    continue;
                };
                let started = Instant::now();
                let result = run(&mut search);
                let elapsed = started.elapsed();
                if let Some(report) = simulation.report(index, result) {
                    rows.push(ComparisonRow {
                        report,
                        optimal_length: *goal_optimal,
                        elapsed,
                    });
                }
            }
        }
        rows
    }
}

/// Drives the goals of a [`Simulation`] one at a time, for callers that show
/// every step and wait for an operator before moving to the next goal.
pub struct GoalSession<'a> {
    simulation: Simulation<'a>,
    next_goal: usize,
    reports: Vec<GoalReport>,
}

impl<'a> GoalSession<'a> {
    pub fn new(simulation: Simulation<'a>) -> Self {
        GoalSession {
            simulation,
            next_goal: 0,
            reports: Vec::new(),
        }
    }

    pub fn simulation(&self) -> &Simulation<'a> {
        &self.simulation
    }

    /// Goal the next call to [`GoalSession::begin_next`] will target.
    pub fn upcoming_goal(&self) -> Option<(usize, Position)> {
        let goal = *self.simulation.grid.goals.get(self.next_goal)?;
        Some((self.next_goal, goal))
    }

    pub fn is_done(&self) -> bool {
        self.next_goal >= self.simulation.goal_count()
    }

    /// Starts the search for the next goal, or `None` once all were tried.
    pub fn begin_next(&mut self) -> Option<(usize, Steps<Box<dyn SearchProcess + 'a>>)> {
        let index = self.next_goal;
        let steps = self.simulation.steps(index)?;
        self.next_goal += 1;
        Some((index, steps))
    }

    /// Records the outcome of a finished goal and returns its report, or
    /// `None` when the grid has no goal at `goal_index`.
    pub fn record(&mut self, goal_index: usize, result: SearchResult) -> Option<&GoalReport> {
        let report = self.simulation.report(goal_index, result)?;
        self.reports.push(report);
        self.reports.last()
    }

    pub fn reports(&self) -> &[GoalReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<GoalReport> {
        self.reports
    }
}
