use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

use grid_pathfinding::statistics::optimal_path_length;
use grid_pathfinding::{apply_moves, to_moves, Grid, Method, Position, SearchResult, Simulation};

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn assert_valid_path(grid: &Grid, goal: Position, result: &SearchResult) {
    let path = &result.path;
    assert_eq!(path.first(), Some(&grid.start));
    assert_eq!(path.last(), Some(&goal));
    for pair in path.windows(2) {
        let step = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
        assert_eq!(step, 1, "{} -> {} is not a unit step", pair[0], pair[1]);
    }
    for pos in &path[1..] {
        assert!(grid.is_valid(*pos), "{pos} is not walkable");
    }
}

/// 5x5 grid cut in two by a full wall column at x = 2.
fn split_grid() -> Grid {
    let walls = (0..5).map(|y| p(2, y));
    Grid::new(5, 5, p(0, 0), vec![p(4, 4)], walls).unwrap()
}

#[rstest]
fn open_grid_corner_to_corner(
    #[values(
        Method::Bfs,
        Method::Dfs,
        Method::Gbfs,
        Method::AStar,
        Method::Ids,
        Method::IdaStar
    )]
    method: Method,
) {
    let grid = Grid::new(5, 5, p(0, 0), vec![p(4, 4)], []).unwrap();
    let result = method.solve(&grid, &grid.goals);
    assert_valid_path(&grid, p(4, 4), &result);
    assert!(result.nodes_expanded >= 1);
    assert!(result.nodes_expanded <= 25);
    if method.is_optimal() {
        assert_eq!(result.path_length(), Some(8));
    }
}

#[rstest]
fn separated_goal_exhausts_the_start_component(
    #[values(
        Method::Bfs,
        Method::Dfs,
        Method::Gbfs,
        Method::AStar,
        Method::Ids,
        Method::IdaStar
    )]
    method: Method,
) {
    let grid = split_grid();
    let result = method.solve(&grid, &grid.goals);
    assert!(result.path.is_empty(), "{method} found a path through a wall");
    assert_eq!(result.nodes_expanded, 10, "{method}");
}

#[rstest]
fn start_on_the_goal(
    #[values(
        Method::Bfs,
        Method::Dfs,
        Method::Gbfs,
        Method::AStar,
        Method::Ids,
        Method::IdaStar
    )]
    method: Method,
) {
    let grid = Grid::new(4, 4, p(2, 1), vec![p(2, 1)], []).unwrap();
    let result = method.solve(&grid, &grid.goals);
    assert_eq!(result.path, vec![p(2, 1)]);
    assert!(result.nodes_expanded >= 1);
    assert!(to_moves(&result.path).is_empty());
}

#[rstest]
fn searches_are_deterministic(
    #[values(
        Method::Bfs,
        Method::Dfs,
        Method::Gbfs,
        Method::AStar,
        Method::Ids,
        Method::IdaStar
    )]
    method: Method,
    #[values(3, 17, 2024)] seed: u64,
) {
    let grid = Grid::random(5, 5, 6, 1, &mut StdRng::seed_from_u64(seed)).unwrap();
    let goal = grid.goals[0];
    if method == Method::IdaStar && optimal_path_length(&grid, grid.start, goal).is_none() {
        return;
    }
    let first = method.solve(&grid, &grid.goals);
    let second = method.solve(&grid, &grid.goals);
    assert_eq!(first, second);
}

#[rstest]
fn random_grids_yield_valid_paths(
    #[values(1, 2, 3, 5, 8, 13, 21, 34, 55, 89)] seed: u64,
) {
    let grid = Grid::random(5, 5, 6, 1, &mut StdRng::seed_from_u64(seed)).unwrap();
    let goal = grid.goals[0];
    let optimal = optimal_path_length(&grid, grid.start, goal);

    for method in Method::ALL {
        if method == Method::IdaStar && optimal.is_none() {
            // Proving unreachability enumerates every simple path.
            continue;
        }
        let result = method.solve(&grid, &grid.goals);
        assert!(result.nodes_expanded >= 1, "{method} seed {seed}");

        match optimal {
            None => assert!(result.path.is_empty(), "{method} seed {seed}"),
            Some(length) => {
                // IDS stops deepening at twice the Manhattan distance.
                if method == Method::Ids && result.path.is_empty() {
                    continue;
                }
                assert_valid_path(&grid, goal, &result);
                if method.is_optimal() {
                    assert_eq!(result.path_length(), Some(length), "{method} seed {seed}");
                } else {
                    assert!(result.path_length() >= Some(length));
                }
            }
        }
    }
}

#[rstest]
fn moves_replay_onto_the_path(#[values(4, 9, 16)] seed: u64) {
    let grid = Grid::random(8, 8, 12, 1, &mut StdRng::seed_from_u64(seed)).unwrap();
    for method in [Method::Bfs, Method::Dfs, Method::Gbfs, Method::AStar] {
        let result = method.solve(&grid, &grid.goals);
        let moves = to_moves(&result.path);
        if result.path.is_empty() {
            assert!(moves.is_empty());
        } else {
            assert_eq!(moves.len(), result.path.len() - 1);
            assert_eq!(apply_moves(grid.start, &moves), result.path);
        }
    }
}

#[test]
fn multiple_goals_are_independent() {
    let grid = Grid::new(5, 5, p(0, 0), vec![p(4, 4), p(0, 4)], []).unwrap();
    let reports = Simulation::new(&grid, Method::Gbfs).run();
    assert_eq!(reports.len(), 2);
    for (report, goal) in reports.iter().zip([p(4, 4), p(0, 4)]) {
        assert_eq!(report.goal, goal);
        assert_eq!(report.start, p(0, 0));
        assert_eq!(report.path.last(), Some(&goal));
    }
    assert_eq!(reports[1].path_length(), Some(4));
}

#[test]
fn stepwise_and_eager_runs_agree() {
    let grid = Grid::new(6, 4, p(0, 0), vec![p(5, 3)], [p(2, 0), p(2, 1), p(2, 2)]).unwrap();
    for method in Method::ALL {
        let eager = method.solve(&grid, &grid.goals);
        let states: Vec<_> = method.steps(&grid, &grid.goals).collect();
        let last = states.last().expect("at least one snapshot");
        assert_eq!(SearchResult::from(last), eager, "{method}");
        assert!(
            states[..states.len() - 1].iter().all(|s| s.path.is_none()),
            "{method} exposed a path before finishing"
        );
    }
}

#[test]
fn ida_star_reports_its_bound_on_every_step() {
    let grid = Grid::new(4, 4, p(0, 0), vec![p(3, 3)], [p(1, 1), p(2, 1)]).unwrap();
    for state in Method::IdaStar.steps(&grid, &grid.goals) {
        assert!(state.bound.is_some());
    }
    for state in Method::Bfs.steps(&grid, &grid.goals) {
        assert!(state.bound.is_none());
    }
}

#[rstest]
#[case("3x3\n2147483647,0\n2,2\n")]
#[case("3x3\n-2147483648,-2147483648\n2147483647,2147483647\n")]
fn coordinates_at_the_edge_of_i32_find_no_route(
    #[case] map: &str,
    #[values(Method::Bfs, Method::Dfs, Method::Gbfs, Method::AStar, Method::IdaStar)]
    method: Method,
) {
    let grid: Grid = map.parse().unwrap();
    let result = method.solve(&grid, &grid.goals);
    assert!(result.path.is_empty(), "{method}");
    assert_eq!(result.nodes_expanded, 1, "{method}");
}

#[test]
fn ids_steps_through_an_off_grid_start() {
    // The depth cap is twice an enormous Manhattan distance, so only the
    // first passes are driven here.
    let grid: Grid = "3x3\n2147483647,0\n2,2\n".parse().unwrap();
    let states: Vec<_> = Method::Ids.steps(&grid, &grid.goals).take(50).collect();
    assert_eq!(states.len(), 50);
    assert!(states.iter().all(|s| s.path.is_none() && s.visited.len() == 1));
}
