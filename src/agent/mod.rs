//! Agent core: task queue, loop engine, and lifecycle callbacks

mod callbacks;
mod engine;
mod task;

pub use callbacks::{AgentCallbacks, NoopCallbacks};
pub use engine::AutonomousAgent;
pub use task::{Task, TaskQueue, TaskStatus};
