//! Lifecycle callback interface between the engine and its host

use eyre::Result;

use super::task::Task;

/// Observer interface the engine notifies at every observable transition
///
/// `before_loop` and `after_loop` bracket each outer iteration; returning an
/// error from either aborts the run and propagates out of
/// [`AutonomousAgent::run`](super::AutonomousAgent::run). Hosts use this to
/// enforce an iteration budget. `on_task_update` fires synchronously after
/// every status or output mutation, before the engine awaits anything else;
/// the task is a read-only snapshot of the post-transition state.
///
/// `on_shutdown` is never called by the engine itself. It exists for a
/// caller-driven external abort (the CLI wires it to Ctrl-C).
pub trait AgentCallbacks: Send + Sync {
    fn before_loop(&self) -> Result<()> {
        Ok(())
    }

    fn after_loop(&self) -> Result<()> {
        Ok(())
    }

    fn on_task_update(&self, _task: &Task) {}

    fn on_shutdown(&self) {}
}

/// Callbacks that ignore every notification
pub struct NoopCallbacks;

impl AgentCallbacks for NoopCallbacks {}
