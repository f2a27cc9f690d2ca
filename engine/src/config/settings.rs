// Engine settings, loaded from the embedded default JSON or a file named by
// the WEIGHT_ENGINE_CONFIG environment variable.
use serde::Deserialize;
use std::path::Path;

use crate::error::EngineError;

pub const CONFIG_ENV_VAR: &str = "WEIGHT_ENGINE_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Largest accepted ConvertFile request, in bytes.
    pub max_upload_bytes: usize,
    pub preview: PreviewSettings,
}

/// How many rows each report section shows.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PreviewSettings {
    pub original_rows: usize,
    pub converted_rows: usize,
    pub unconvertible_rows: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            max_upload_bytes: 16 * 1024 * 1024,
            preview: PreviewSettings::default(),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        PreviewSettings {
            original_rows: 5,
            converted_rows: 10,
            unconvertible_rows: 5,
        }
    }
}

impl EngineSettings {
    /// Settings from `$WEIGHT_ENGINE_CONFIG` when set, otherwise the embedded defaults.
    pub fn load() -> Result<Self, EngineError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_path(Path::new(&path)),
            None => Self::load_default(),
        }
    }

    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Fields missing from `raw` keep their default values.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        serde_json::from_str(raw).map_err(|e| EngineError::ConfigError(e.to_string()))
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
