use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for [`crate::HuggingFaceDetector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub endpoint: String,
    pub model: String,
    pub source: String,
    /// Input is cut to this many chars before submission.
    pub max_input_chars: usize,
    pub timeout_secs: u64,
    pub wait_for_model: bool,
    pub api_token: Option<String>,
    /// Extra attempts made only while the model reports it is loading.
    pub loading_retries: u32,
    pub retry_delay_ms: u64,
}

impl DetectorConfig {
    pub const DEFAULT_MODEL: &'static str = "roberta-base-openai-detector";
    pub const DEFAULT_MAX_INPUT_CHARS: usize = 5000;

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: format!(
                "https://api-inference.huggingface.co/models/{}",
                Self::DEFAULT_MODEL
            ),
            model: Self::DEFAULT_MODEL.to_string(),
            source: "huggingface".to_string(),
            max_input_chars: Self::DEFAULT_MAX_INPUT_CHARS,
            timeout_secs: 30,
            wait_for_model: true,
            api_token: None,
            loading_retries: 0,
            retry_delay_ms: 2000,
        }
    }
}
