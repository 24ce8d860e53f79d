use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::session::snapshot::TrainingSnapshot;
use crate::store::SessionStore;
use crate::store::schema::SavedSession;

const SESSION_FILE: &str = "last-training-state.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    pub fn session_path(&self) -> PathBuf {
        self.file_path(SESSION_FILE)
    }

    /// Read the envelope. `None` when there is no file, or it cannot be
    /// parsed, or it was written by another schema version.
    pub fn load_saved(&self) -> Option<SavedSession> {
        let path = self.session_path();
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot read saved session: {e}");
                return None;
            }
        };
        match serde_json::from_str::<SavedSession>(&content) {
            Ok(saved) if saved.needs_reset() => {
                tracing::warn!(
                    version = saved.schema_version,
                    "ignoring saved session from another schema version"
                );
                None
            }
            Ok(saved) => Some(saved),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring corrupt saved session: {e}");
                None
            }
        }
    }

    fn write_atomic(&self, name: &str, json: &str) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl SessionStore for JsonStore {
    fn load(&self) -> Option<TrainingSnapshot> {
        self.load_saved().map(|saved| saved.training)
    }

    fn save(&self, snapshot: &TrainingSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(&SavedSession::new(snapshot.clone()))?;
        self.write_atomic(SESSION_FILE, &json)
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
