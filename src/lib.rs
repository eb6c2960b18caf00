//! AutoAgent - single-agent task-decomposition loop
//!
//! Given a natural-language goal, an agent repeatedly asks an external
//! reasoning service to analyze, execute, and expand a queue of subtasks
//! until none remain in `new` status.
//!
//! # Core Concepts
//!
//! - **Depth-first decomposition**: the execution record derived from a task
//!   is spliced directly after it, ahead of shallower work queued earlier
//! - **Audit-trail queue**: tasks are never deleted; the queue only grows and
//!   records every analysis and execution of one run
//! - **Fail loudly**: no catching, no retry - any service or callback failure
//!   unwinds the run and leaves the queue as it was
//!
//! # Modules
//!
//! - [`agent`] - task queue, loop engine, and lifecycle callbacks
//! - [`reasoning`] - the reasoning-service trait and OpenAI implementation
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod reasoning;

// Re-export commonly used types
pub use agent::{AgentCallbacks, AutonomousAgent, NoopCallbacks, Task, TaskQueue, TaskStatus};
pub use config::{Config, ModelSettings};
pub use reasoning::{OpenAiService, ReasoningError, ReasoningService, TaskAnalysis, TaskContext, create_service};
