use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrambleError {
    #[error("cannot pick {requested} distinct indices out of {available}")]
    NotEnoughCandidates { requested: usize, available: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordListError {
    #[error("word list is empty")]
    Empty,

    #[error("word {word:?} is shorter than 2 letters")]
    TooShort { word: String },

    #[error("word {word:?} must contain only lowercase ascii letters")]
    NotLowercase { word: String },

    #[error("word {word:?} has no scramble that differs from it")]
    NoDistinctScramble { word: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainingError {
    #[error("training needs at least one task")]
    NoTasks,

    #[error("error budget must be at least 1")]
    ZeroErrorBudget,

    #[error(transparent)]
    Scramble(#[from] ScrambleError),
}

/// Reasons a persisted snapshot cannot be turned back into a training.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("snapshot declares {expected} tasks but holds {actual}")]
    TaskCountMismatch { expected: usize, actual: usize },

    #[error("current task index {index} is past the {len} tasks")]
    TaskIndexOutOfRange { index: usize, len: usize },

    #[error("error budget must be at least 1")]
    ZeroErrorBudget,

    #[error("snapshot holds no tasks")]
    NoTasks,

    #[error("task {task}: {source}")]
    InvalidWord {
        task: usize,
        #[source]
        source: WordListError,
    },

    #[error("task {task}: letter index {index} is past the word length {len}")]
    LetterIndexOutOfRange { task: usize, index: usize, len: usize },

    #[error("task {task}: {count} errors exceed the budget of {max}")]
    ErrorCountExceedsBudget { task: usize, count: u32, max: u32 },

    #[error("task {task}: typed progress does not match the word")]
    ProgressMismatch { task: usize },

    #[error("task {task}: remaining letters do not match the untyped part of the word")]
    ScrambleMismatch { task: usize },

    #[error("task {task} is behind the current task but not finished")]
    UnfinishedTaskBehindCursor { task: usize },

    #[error("task {task} is the current task but already finished")]
    FinishedTaskAtCursor { task: usize },

    #[error("task {task} is ahead of the current task but has input")]
    PendingTaskHasInput { task: usize },
}
