//! Loop engine driving the task queue
//!
//! One engine instance owns one goal. `run` seeds the queue from the
//! reasoning service, then drives each queued task through three phases
//! (analyze, execute, expand) until no task is left in `New` status. The
//! analysis of a task and its execution are recorded as two separate queue
//! entries, so the reasoning narrative stays addressable in the audit trail.

use std::sync::Arc;

use eyre::{Result, bail};
use tracing::{debug, info};

use crate::config::ModelSettings;
use crate::reasoning::{ReasoningService, TaskContext, create_service};

use super::callbacks::AgentCallbacks;
use super::task::{Task, TaskQueue, TaskStatus};

/// Single-goal autonomous agent
///
/// The loop is strictly sequential: it suspends only while awaiting the
/// reasoning service, and between awaits all queue mutation and notification
/// happens synchronously. A new goal requires a new instance; there is no
/// reset.
pub struct AutonomousAgent {
    name: String,
    goal: String,
    callbacks: Arc<dyn AgentCallbacks>,
    service: Arc<dyn ReasoningService>,
    queue: TaskQueue,
}

impl AutonomousAgent {
    /// Create an agent with the default reasoning service for the settings
    ///
    /// The settings are opaque to the engine; they are consumed only by the
    /// reasoning-service constructor.
    pub fn new(
        name: impl Into<String>,
        goal: impl Into<String>,
        callbacks: Arc<dyn AgentCallbacks>,
        settings: &ModelSettings,
    ) -> Result<Self> {
        let goal = goal.into();
        let service = create_service(&goal, settings)?;
        Ok(Self::with_service(name, goal, callbacks, service))
    }

    /// Create an agent with an injected reasoning service
    pub fn with_service(
        name: impl Into<String>,
        goal: impl Into<String>,
        callbacks: Arc<dyn AgentCallbacks>,
        service: Arc<dyn ReasoningService>,
    ) -> Self {
        Self {
            name: name.into(),
            goal: goal.into(),
            callbacks,
            service,
            queue: TaskQueue::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Read-only view of the queue, the audit trail of the run
    pub fn task_queue(&self) -> &[Task] {
        self.queue.tasks()
    }

    /// Drive the queue until no task is left in `New` status
    ///
    /// Any failure, whether from the reasoning service or from a lifecycle
    /// callback, aborts immediately and leaves the queue in whatever
    /// partially-mutated state it reached.
    pub async fn run(&mut self) -> Result<()> {
        info!(agent = %self.name, goal = %self.goal, "starting run");

        for input in self.service.initial_tasks().await? {
            self.queue.push_new(input);
        }
        debug!(seeded = self.queue.len(), "queue seeded with initial tasks");

        while self.queue.has_pending() {
            self.step().await?;
        }

        info!(agent = %self.name, tasks = self.queue.len(), "run complete");
        Ok(())
    }

    /// One outer iteration: consume the task at the cursor and the execution
    /// record derived from it
    async fn step(&mut self) -> Result<()> {
        self.callbacks.before_loop()?;

        // Analysis phase for the queued task.
        self.current_mut()?.status = TaskStatus::Running;
        self.notify_current()?;

        let input = self.current()?.input.clone();
        let analysis = self.service.analyze_task(&input).await?;
        {
            let task = self.current_mut()?;
            task.status = TaskStatus::Finished;
            task.output = analysis.reasoning.clone();
        }
        self.notify_current()?;

        // The reasoning becomes the input of a fresh execution record spliced
        // ahead of everything queued behind the cursor.
        self.queue.insert_running_after_cursor(analysis.reasoning.clone());
        self.notify_current()?;

        // Execution phase. The record's own output is still empty at this
        // point; the analysis carries the context.
        let exec_input = self.current()?.output.clone();
        let result = self.service.execute_task(&exec_input, &analysis).await?;
        {
            let task = self.current_mut()?;
            task.status = TaskStatus::Finished;
            task.output = result.clone();
        }
        self.notify_current()?;

        // Expansion phase: proposed follow-ups go to the back of the queue.
        let context = TaskContext {
            current: self.current()?.input.clone(),
            remaining: self.queue.remaining(),
            completed: self.queue.completed(),
        };
        let proposed = self.service.additional_tasks(&context, &result).await?;
        debug!(count = proposed.len(), "expansion proposed follow-up tasks");
        for input in proposed {
            self.queue.push_new(input);
        }

        // Step past the execution record; together with the splice above the
        // cursor moved two positions this iteration.
        self.queue.advance();

        self.callbacks.after_loop()?;
        Ok(())
    }

    fn current(&self) -> Result<&Task> {
        match self.queue.current() {
            Some(task) => Ok(task),
            None => bail!("cursor {} points past the end of the task queue", self.queue.cursor()),
        }
    }

    fn current_mut(&mut self) -> Result<&mut Task> {
        match self.queue.current_mut() {
            Some(task) => Ok(task),
            None => bail!("cursor points past the end of the task queue"),
        }
    }

    fn notify_current(&self) -> Result<()> {
        let task = self.current()?;
        self.callbacks.on_task_update(task);
        Ok(())
    }
}
