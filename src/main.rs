//! AutoAgent CLI entry point
//!
//! The binary is the "host" side of the callback contract: it prints task
//! transitions, enforces the loop budget by failing `before_loop`, and routes
//! Ctrl-C to `on_shutdown`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, bail};
use tracing::info;

use autoagent::agent::{AgentCallbacks, AutonomousAgent, Task, TaskStatus};
use autoagent::cli::Cli;
use autoagent::config::Config;

/// Callbacks printing task transitions and enforcing the loop budget
struct ConsoleCallbacks {
    max_loops: u32,
    loops: AtomicU32,
}

impl ConsoleCallbacks {
    fn new(max_loops: u32) -> Self {
        Self {
            max_loops,
            loops: AtomicU32::new(0),
        }
    }
}

impl AgentCallbacks for ConsoleCallbacks {
    fn before_loop(&self) -> Result<()> {
        let loops = self.loops.fetch_add(1, Ordering::SeqCst) + 1;
        if loops > self.max_loops {
            bail!("loop budget of {} iterations exceeded", self.max_loops);
        }
        println!("{}", format!("--- iteration {loops} ---").dimmed());
        Ok(())
    }

    fn on_task_update(&self, task: &Task) {
        let status = match task.status {
            TaskStatus::New => "new".yellow(),
            TaskStatus::Running => "running".cyan(),
            TaskStatus::Finished => "finished".green(),
        };
        println!("[{}] task {}: {}", status, task.id, task.input);
        if task.status == TaskStatus::Finished && !task.output.is_empty() {
            println!("    {}", task.output);
        }
    }

    fn on_shutdown(&self) {
        println!("{}", "shutting down".red());
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let max_loops = cli.max_loops.unwrap_or(config.max_loops);

    info!(goal = %cli.goal, model = %config.llm.model, max_loops, "autoagent starting");

    let callbacks = Arc::new(ConsoleCallbacks::new(max_loops));
    let mut agent = AutonomousAgent::new(&cli.name, &cli.goal, callbacks.clone(), &config.llm)
        .context("Failed to create agent")?;

    tokio::select! {
        result = agent.run() => result?,
        _ = tokio::signal::ctrl_c() => callbacks.on_shutdown(),
    }

    let finished = agent
        .task_queue()
        .iter()
        .filter(|t| t.status == TaskStatus::Finished)
        .count();
    println!(
        "{}",
        format!("{finished}/{} tasks finished", agent.task_queue().len()).bold()
    );

    Ok(())
}
