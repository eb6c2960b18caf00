//! Task records and the ordered task queue

use serde::{Deserialize, Serialize};

/// Status of a task in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Queued, not yet picked up by the loop
    New,
    /// Under analysis or execution
    Running,
    /// Carrying a final output
    Finished,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Running => write!(f, "running"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// One unit of queued work
///
/// Tasks are mutated in place as the loop progresses and are never removed
/// from the queue; the queue doubles as the audit trail for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique, monotonically assigned by the owning queue, never reused
    pub id: u64,
    /// What the task should accomplish
    pub input: String,
    /// Result of execution; empty until the task finishes
    pub output: String,
    /// Current state machine position
    pub status: TaskStatus,
}

/// Ordered task queue with an explicit cursor and id counter
///
/// Insertion order is execution priority: a task derived from the task at the
/// cursor is spliced directly after it, so decomposition is processed
/// depth-first rather than breadth-first. The cursor and the id counter live
/// here, not on the engine, so the queue transitions are testable on their own.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    cursor: usize,
    next_id: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Append a task in `New` status to the end of the queue
    pub fn push_new(&mut self, input: impl Into<String>) -> u64 {
        let id = self.fresh_id();
        self.tasks.push(Task {
            id,
            input: input.into(),
            output: String::new(),
            status: TaskStatus::New,
        });
        id
    }

    /// Splice a `Running` task directly after the cursor and move the cursor
    /// onto it
    ///
    /// This is the derivation step of the loop: the analysis of the task at
    /// the cursor becomes the input of a fresh execution record, which takes
    /// priority over everything queued behind it.
    pub fn insert_running_after_cursor(&mut self, input: impl Into<String>) -> u64 {
        let id = self.fresh_id();
        let at = self.cursor + 1;
        self.tasks.insert(
            at,
            Task {
                id,
                input: input.into(),
                output: String::new(),
                status: TaskStatus::Running,
            },
        );
        self.cursor = at;
        id
    }

    /// Move the cursor forward by one position
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Task at the cursor, if the cursor is in bounds
    pub fn current(&self) -> Option<&Task> {
        self.tasks.get(self.cursor)
    }

    pub fn current_mut(&mut self) -> Option<&mut Task> {
        self.tasks.get_mut(self.cursor)
    }

    /// True while at least one task is still in `New` status
    pub fn has_pending(&self) -> bool {
        self.tasks.iter().any(|t| t.status == TaskStatus::New)
    }

    /// Inputs of all `New` tasks, in queue order
    pub fn remaining(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::New)
            .map(|t| t.input.clone())
            .collect()
    }

    /// Inputs of all `Finished` tasks, in queue order
    pub fn completed(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Finished)
            .map(|t| t.input.clone())
            .collect()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut queue = TaskQueue::new();
        let a = queue.push_new("a");
        let b = queue.push_new("b");
        let c = queue.insert_running_after_cursor("c");

        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(c, 3);
    }

    #[test]
    fn test_push_new_appends_in_order() {
        let mut queue = TaskQueue::new();
        queue.push_new("first");
        queue.push_new("second");

        let inputs: Vec<&str> = queue.tasks().iter().map(|t| t.input.as_str()).collect();
        assert_eq!(inputs, vec!["first", "second"]);
        assert!(queue.tasks().iter().all(|t| t.status == TaskStatus::New));
    }

    #[test]
    fn test_insert_after_cursor_splices_not_appends() {
        let mut queue = TaskQueue::new();
        queue.push_new("head");
        queue.push_new("tail");

        queue.insert_running_after_cursor("derived");

        let inputs: Vec<&str> = queue.tasks().iter().map(|t| t.input.as_str()).collect();
        assert_eq!(inputs, vec!["head", "derived", "tail"]);
        assert_eq!(queue.cursor(), 1);
        assert_eq!(queue.current().unwrap().input, "derived");
        assert_eq!(queue.current().unwrap().status, TaskStatus::Running);
    }

    #[test]
    fn test_remaining_and_completed_filter_by_status() {
        let mut queue = TaskQueue::new();
        queue.push_new("a");
        queue.push_new("b");
        queue.push_new("c");

        queue.current_mut().unwrap().status = TaskStatus::Finished;
        queue.advance();
        queue.current_mut().unwrap().status = TaskStatus::Running;

        assert_eq!(queue.remaining(), vec!["c"]);
        assert_eq!(queue.completed(), vec!["a"]);
        assert!(queue.has_pending());
    }

    #[test]
    fn test_has_pending_false_once_all_tasks_settle() {
        let mut queue = TaskQueue::new();
        assert!(!queue.has_pending());

        queue.push_new("only");
        assert!(queue.has_pending());

        queue.current_mut().unwrap().status = TaskStatus::Finished;
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Finished).unwrap();
        assert_eq!(json, "\"finished\"");
        assert_eq!(TaskStatus::Running.to_string(), "running");
    }
}
