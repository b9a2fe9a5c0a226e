use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Config {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Map file, looked up in the working directory and then under `map/`
    #[arg(required = true)]
    pub map_file: Option<String>,

    /// bfs, dfs, gbfs, as, ids, ida_star, or all
    #[arg(required = true)]
    pub method: Option<String>,

    /// Redraw the grid after every search step
    #[arg(long, default_value_t = false)]
    pub visualize: bool,

    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Wait for Enter before moving on to the next goal
    #[arg(long, default_value_t = false)]
    pub pause: bool,

    /// Log to stderr; repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a random map in the map file format
    Generate {
        #[arg(long, default_value_t = 20)]
        width: i32,

        #[arg(long, default_value_t = 20)]
        height: i32,

        #[arg(long, default_value_t = 50)]
        walls: usize,

        #[arg(long, default_value_t = 1)]
        goals: usize,

        /// Seed for reproducible maps; random when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Destination file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_invocation() {
        let config = Config::try_parse_from(["grid_pathfinding", "maze.txt", "AS"]).unwrap();
        assert_eq!(config.map_file.as_deref(), Some("maze.txt"));
        assert_eq!(config.method.as_deref(), Some("AS"));
        assert!(!config.visualize);
        assert_eq!(config.delay_ms, 50);
        assert!(config.command.is_none());
    }

    #[test]
    fn both_positionals_are_required() {
        assert!(Config::try_parse_from(["grid_pathfinding", "maze.txt"]).is_err());
        assert!(Config::try_parse_from(["grid_pathfinding"]).is_err());
    }

    #[test]
    fn visualizer_flags() {
        let config = Config::try_parse_from([
            "grid_pathfinding",
            "maze.txt",
            "ida_star",
            "--visualize",
            "--delay-ms",
            "5",
            "--pause",
            "-vv",
        ])
        .unwrap();
        assert!(config.visualize && config.pause);
        assert_eq!(config.delay_ms, 5);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn generate_subcommand() {
        let config = Config::try_parse_from([
            "grid_pathfinding",
            "generate",
            "--width",
            "8",
            "--goals",
            "3",
            "--seed",
            "9",
        ])
        .unwrap();
        match config.command {
            Some(Command::Generate {
                width,
                height,
                goals,
                seed,
                output,
                ..
            }) => {
                assert_eq!((width, height, goals, seed), (8, 20, 3, Some(9)));
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
