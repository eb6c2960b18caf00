//! ReasoningService trait definition

use async_trait::async_trait;

use super::{ReasoningError, TaskAnalysis, TaskContext};

/// The four-operation contract the loop engine depends on
///
/// Every call may suspend indefinitely and may fail; the engine does not
/// assume idempotence and never retries. Implementations own transport,
/// prompting, and timeout policy.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Seed the queue for a new goal
    async fn initial_tasks(&self) -> Result<Vec<String>, ReasoningError>;

    /// Produce a reasoning narrative for a task without executing it
    async fn analyze_task(&self, task: &str) -> Result<TaskAnalysis, ReasoningError>;

    /// Produce the task's final textual output given the prior analysis
    async fn execute_task(&self, task: &str, analysis: &TaskAnalysis) -> Result<String, ReasoningError>;

    /// Propose zero or more follow-up tasks given full queue context and the
    /// just-produced result
    async fn additional_tasks(
        &self,
        context: &TaskContext,
        last_result: &str,
    ) -> Result<Vec<String>, ReasoningError>;
}
