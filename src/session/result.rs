/// Outcome of one letter fed to a training.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputResult {
    pub success: bool,
    pub task_complete: bool,
    pub task_error: bool,
    pub training_complete: bool,
}

impl InputResult {
    /// The letter ended its task, one way or the other.
    pub fn task_finished(&self) -> bool {
        self.task_complete || self.task_error
    }
}
