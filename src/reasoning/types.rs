//! Types exchanged with the reasoning service

use serde::{Deserialize, Serialize};

/// Reasoning narrative produced by the analysis phase
///
/// Analysis settles how a task should be approached without producing the
/// final result; the narrative seeds the execution phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAnalysis {
    pub reasoning: String,
}

/// Snapshot of the queue handed to the decomposition call
///
/// `remaining` and `completed` are task inputs in queue order, filtered by
/// status at the moment the current task's execution finished.
#[derive(Debug, Clone, Serialize)]
pub struct TaskContext {
    pub current: String,
    pub remaining: Vec<String>,
    pub completed: Vec<String>,
}
