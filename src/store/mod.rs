pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::session::snapshot::TrainingSnapshot;

/// Where an unfinished training waits to be resumed.
pub trait SessionStore {
    fn load(&self) -> Option<TrainingSnapshot>;
    fn save(&self, snapshot: &TrainingSnapshot) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
