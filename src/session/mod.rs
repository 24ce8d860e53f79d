pub mod result;
pub mod snapshot;
pub mod task;
pub mod training;
