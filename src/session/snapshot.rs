use serde::{Deserialize, Serialize};

/// Persisted form of a [`Task`](crate::session::task::Task).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub word: String,
    pub randomized_word: String,
    pub word_progress: String,
    pub current_letter_index: usize,
    pub current_err_count: u32,
    /// Written for completeness; restoring takes the budget from the training.
    pub max_error_count: u32,
}

/// Persisted form of a [`Training`](crate::session::training::Training).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSnapshot {
    pub max_err_count: u32,
    pub max_task_count: usize,
    pub current_task_index: usize,
    pub tasks: Vec<TaskSnapshot>,
}
