use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::training::{DEFAULT_MAX_ERR_COUNT, DEFAULT_MAX_TASK_COUNT, TrainingSettings};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_task_count")]
    pub max_task_count: usize,
    #[serde(default = "default_max_err_count")]
    pub max_err_count: u32,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    /// JSON array of words to draw from instead of the bundled list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_list: Option<String>,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_max_task_count() -> usize {
    DEFAULT_MAX_TASK_COUNT
}
fn default_max_err_count() -> u32 {
    DEFAULT_MAX_ERR_COUNT
}
fn default_pause_ms() -> u64 {
    1000
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scramble")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_task_count: default_max_task_count(),
            max_err_count: default_max_err_count(),
            pause_ms: default_pause_ms(),
            word_list: None,
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scramble")
            .join("config.toml")
    }

    /// Clamp values edited by hand into playable ranges.
    pub fn validate(&mut self) {
        self.max_task_count = self.max_task_count.clamp(1, 50);
        self.max_err_count = self.max_err_count.clamp(1, 10);
        self.pause_ms = self.pause_ms.min(5000);
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }

    pub fn training_settings(&self) -> TrainingSettings {
        TrainingSettings {
            max_task_count: self.max_task_count,
            max_err_count: self.max_err_count,
        }
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}
