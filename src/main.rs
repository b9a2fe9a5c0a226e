use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use grid_pathfinding::config::{Command, Config};
use grid_pathfinding::error::CliError;
use grid_pathfinding::grid::Grid;
use grid_pathfinding::simulation::{GoalSession, Simulation};
use grid_pathfinding::statistics::comparison_table;
use grid_pathfinding::{logger, map, Method};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

fn main() {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // Usage errors exit with 1; --help and --version are not errors.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logger::init(config.verbose);

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), CliError> {
    if let Some(Command::Generate {
        width,
        height,
        walls,
        goals,
        seed,
        output,
    }) = &config.command
    {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::random(*width, *height, *walls, *goals, &mut rng)?;
        let text = map::to_map_string(&grid);
        log::info!(
            "generated {}x{} map with {} walls and {} goals (seed {})",
            grid.width,
            grid.height,
            grid.walls.len(),
            grid.goals.len(),
            seed
        );
        match output {
            Some(path) => std::fs::write(path, text)?,
            None => print!("{}", text),
        }
        return Ok(());
    }

    // Both positionals are required by clap whenever no subcommand is given.
    let (Some(map_name), Some(method_name)) = (&config.map_file, &config.method) else {
        return Err(CliError::Usage("grid_pathfinding <map-file> <method>"));
    };

    let path = map::resolve(map_name).ok_or_else(|| CliError::MapNotFound(map_name.clone()))?;
    let grid = map::load(&path)?;
    log::info!(
        "loaded {} ({}x{}, {} goals, {} walls)",
        path.display(),
        grid.width,
        grid.height,
        grid.goals.len(),
        grid.walls.len()
    );

    if method_name.eq_ignore_ascii_case("all") {
        let rows = Simulation::compare(&grid);
        print!("{}", comparison_table(&rows));
        return Ok(());
    }

    let method: Method = method_name.parse()?;
    let simulation = Simulation::new(&grid, method);
    if config.visualize {
        visualize(config, map_name, simulation)?;
    } else {
        for report in simulation.run() {
            print!("{}", report.render(map_name));
        }
    }
    Ok(())
}

/// Replays each goal's search step by step in the terminal.
fn visualize(config: &Config, map_name: &str, simulation: Simulation<'_>) -> io::Result<()> {
    let grid = simulation.grid();
    let method = simulation.method();
    let total = simulation.goal_count();
    let delay = Duration::from_millis(config.delay_ms);
    let mut session = GoalSession::new(simulation);

    while let Some((index, mut steps)) = session.begin_next() {
        let goal = grid.goals[index];
        for (step, state) in steps.by_ref().enumerate() {
            clear_screen();
            println!(
                "=== {} | Goal {}/{} at {} | Step {} ===",
                method.code().to_uppercase(),
                index + 1,
                total,
                goal,
                step + 1
            );
            println!("Legend: S=Start, G=Goal, g=Other goal, #=Wall, *=Path, +=Frontier, o=Visited");
            print!("{}", grid.render(Some(&state), Some(goal)));
            println!(
                "Nodes expanded: {} | Frontier size: {} | Goal: {}/{}",
                state.visited.len(),
                state.frontier.len(),
                index + 1,
                total
            );
            if let Some(bound) = state.bound {
                println!("Bound: {}", bound);
            }
            if let Some(message) = &state.message {
                println!("{}", message);
            }
            io::stdout().flush()?;
            thread::sleep(delay);
        }

        println!();
        if let Some(report) = session.record(index, steps.result()) {
            print!("{}", report.render(map_name));
        }

        if config.pause && !session.is_done() {
            println!("Press Enter to continue to the next goal...");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
        }
    }

    let solved = session.reports().iter().filter(|r| r.found()).count();
    println!("All goals attempted: {}/{} solved.", solved, total);
    Ok(())
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
