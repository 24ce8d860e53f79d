use std::cmp::Reverse;

use rand::Rng;

use crate::error::{RestoreError, TrainingError};
use crate::generator::dictionary::Dictionary;
use crate::generator::scramble::pick_distinct_indices;
use crate::session::result::InputResult;
use crate::session::snapshot::TrainingSnapshot;
use crate::session::task::Task;

pub const DEFAULT_MAX_TASK_COUNT: usize = 6;
pub const DEFAULT_MAX_ERR_COUNT: u32 = 3;

/// Size of a training and the error budget of each of its tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainingSettings {
    pub max_task_count: usize,
    pub max_err_count: u32,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            max_task_count: DEFAULT_MAX_TASK_COUNT,
            max_err_count: DEFAULT_MAX_ERR_COUNT,
        }
    }
}

/// An ordered run of tasks, played one after another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Training {
    tasks: Vec<Task>,
    current_task_index: usize,
    max_err_count: u32,
    max_task_count: usize,
}

impl Training {
    /// Start a fresh training with words sampled from `dictionary` without
    /// repetition.
    pub fn generate<R: Rng + ?Sized>(
        dictionary: &Dictionary,
        settings: TrainingSettings,
        rng: &mut R,
    ) -> Result<Self, TrainingError> {
        if settings.max_task_count == 0 {
            return Err(TrainingError::NoTasks);
        }
        if settings.max_err_count == 0 {
            return Err(TrainingError::ZeroErrorBudget);
        }

        let words = dictionary.words();
        let picked = pick_distinct_indices(rng, words.len(), settings.max_task_count)?;
        let tasks = picked
            .into_iter()
            .map(|i| Task::new(&words[i], settings.max_err_count, rng))
            .collect();

        Ok(Self {
            tasks,
            current_task_index: 0,
            max_err_count: settings.max_err_count,
            max_task_count: settings.max_task_count,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn current_task_index(&self) -> usize {
        self.current_task_index
    }

    /// `None` once every task is finished.
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.get(self.current_task_index)
    }

    pub fn max_task_count(&self) -> usize {
        self.max_task_count
    }

    pub fn max_err_count(&self) -> u32 {
        self.max_err_count
    }

    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(Task::is_finished)
    }

    pub fn error_count(&self) -> u32 {
        self.tasks.iter().map(Task::current_err_count).sum()
    }

    pub fn tasks_without_errors(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.current_err_count() == 0)
            .count()
    }

    /// Word of the first task with the most errors.
    pub fn most_broken_task(&self) -> Option<&str> {
        // min_by_key keeps the first of equal keys, max_by_key the last
        self.tasks
            .iter()
            .min_by_key(|t| Reverse(t.current_err_count()))
            .map(Task::word)
    }

    /// Feed one letter to the current task, moving on when it finishes.
    ///
    /// Returns `None` when there is no task left to play.
    pub fn handle_input(&mut self, letter: char) -> Option<InputResult> {
        let index = self.current_task_index;
        let task = self.tasks.get_mut(index)?;
        let success = task.handle_letter(letter);
        let mut result = InputResult {
            success,
            task_complete: task.is_complete(),
            task_error: task.is_error(),
            training_complete: false,
        };

        if result.task_finished() {
            self.current_task_index += 1;
            result.training_complete = self.is_complete();
            tracing::debug!(
                task = index,
                failed = result.task_error,
                training_complete = result.training_complete,
                "task finished"
            );
        }

        Some(result)
    }

    pub fn snapshot(&self) -> TrainingSnapshot {
        TrainingSnapshot {
            max_err_count: self.max_err_count,
            max_task_count: self.max_task_count,
            current_task_index: self.current_task_index,
            tasks: self.tasks.iter().map(Task::snapshot).collect(),
        }
    }

    /// Rebuild a training exactly as persisted. Nothing is re-scrambled.
    pub fn restore(snapshot: &TrainingSnapshot) -> Result<Self, RestoreError> {
        if snapshot.max_task_count == 0 {
            return Err(RestoreError::NoTasks);
        }
        if snapshot.max_err_count == 0 {
            return Err(RestoreError::ZeroErrorBudget);
        }
        if snapshot.tasks.len() != snapshot.max_task_count {
            return Err(RestoreError::TaskCountMismatch {
                expected: snapshot.max_task_count,
                actual: snapshot.tasks.len(),
            });
        }
        if snapshot.current_task_index > snapshot.tasks.len() {
            return Err(RestoreError::TaskIndexOutOfRange {
                index: snapshot.current_task_index,
                len: snapshot.tasks.len(),
            });
        }

        let mut tasks = Vec::with_capacity(snapshot.tasks.len());
        for (position, task_snapshot) in snapshot.tasks.iter().enumerate() {
            let task = Task::restore(position, task_snapshot, snapshot.max_err_count)?;
            match position.cmp(&snapshot.current_task_index) {
                std::cmp::Ordering::Less if !task.is_finished() => {
                    return Err(RestoreError::UnfinishedTaskBehindCursor { task: position });
                }
                std::cmp::Ordering::Equal if task.is_finished() => {
                    return Err(RestoreError::FinishedTaskAtCursor { task: position });
                }
                std::cmp::Ordering::Greater
                    if task.current_letter_index() > 0 || task.current_err_count() > 0 =>
                {
                    return Err(RestoreError::PendingTaskHasInput { task: position });
                }
                _ => {}
            }
            tasks.push(task);
        }

        Ok(Self {
            tasks,
            current_task_index: snapshot.current_task_index,
            max_err_count: snapshot.max_err_count,
            max_task_count: snapshot.max_task_count,
        })
    }
}
