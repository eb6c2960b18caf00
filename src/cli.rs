//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// AutoAgent - single-agent task-decomposition loop
#[derive(Parser)]
#[command(
    name = "autoagent",
    about = "Decompose and work through a goal with an LLM reasoning service",
    version
)]
pub struct Cli {
    /// The goal to work towards
    pub goal: String,

    /// Agent name, used in log output
    #[arg(short, long, default_value = "agent")]
    pub name: String,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Abort after this many outer loop iterations (overrides config)
    #[arg(short = 'l', long)]
    pub max_loops: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_is_positional() {
        let cli = Cli::parse_from(["autoagent", "write a haiku about rust"]);
        assert_eq!(cli.goal, "write a haiku about rust");
        assert_eq!(cli.name, "agent");
        assert!(cli.max_loops.is_none());
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["autoagent", "goal", "-n", "scout", "-l", "3", "-v"]);
        assert_eq!(cli.name, "scout");
        assert_eq!(cli.max_loops, Some(3));
        assert!(cli.verbose);
    }
}
