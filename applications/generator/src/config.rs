//! Generator configuration

use crate::error::{GeneratorError, Result};
use cadence_generation::{
    ClientConfig, TaskFile, DEFAULT_BASE_URL, DEFAULT_CALLBACK_URL, DEFAULT_MODEL,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_tasks")]
    pub tasks: TaskSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_callback_url")]
    pub callback_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskSettings {
    #[serde(default = "default_task_path")]
    pub path: PathBuf,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_check_delay_ms")]
    pub check_delay_ms: u64,
}

impl GeneratorConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `cadence.toml` is read if
    /// present. Environment variables override the file, e.g.
    /// `CADENCE_API__API_KEY` or `CADENCE_TASKS__POLL_INTERVAL_SECS`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, None)
    }

    /// Load with an explicit environment instead of the process one
    pub fn from_sources(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| GeneratorError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GeneratorError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.api_key.trim().is_empty() {
            return Err(GeneratorError::Config(
                "API key is required (set CADENCE_API__API_KEY)".to_string(),
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(GeneratorError::Config(format!(
                "API base URL must start with http:// or https://, got {:?}",
                self.api.base_url
            )));
        }

        Ok(())
    }

    /// Settings for the generation API client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api.base_url, &self.api.api_key)
            .with_model(&self.api.model)
            .with_callback_url(&self.api.callback_url)
    }

    pub fn task_file(&self) -> TaskFile {
        TaskFile::new(&self.tasks.path)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.tasks.poll_interval_secs)
    }

    pub fn check_delay(&self) -> Duration {
        Duration::from_millis(self.tasks.check_delay_ms)
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        api_key: String::new(),
        model: default_model(),
        callback_url: default_callback_url(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_callback_url() -> String {
    DEFAULT_CALLBACK_URL.to_string()
}

fn default_tasks() -> TaskSettings {
    TaskSettings {
        path: default_task_path(),
        poll_interval_secs: default_poll_interval_secs(),
        check_delay_ms: default_check_delay_ms(),
    }
}

fn default_task_path() -> PathBuf {
    PathBuf::from("./tasks.json")
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_check_delay_ms() -> u64 {
    1000
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            tasks: default_tasks(),
        }
    }
}
