use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::snapshot::TrainingSnapshot;

pub const SCHEMA_VERSION: u32 = 1;

/// On-disk envelope around an in-progress training.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedSession {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub training: TrainingSnapshot,
}

impl SavedSession {
    pub fn new(training: TrainingSnapshot) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            training,
        }
    }

    /// Check if loaded data was written by an incompatible version.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
