use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-native-audio-preview-09-2025";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Settings for the remote transformation service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            connect_timeout_secs: 10,
            timeout_secs: 120,
        }
    }
}

impl RemoteConfig {
    /// Defaults overridden by `GEMINI_API_KEY` (or `API_KEY`), `STEM_RESTYLE_MODEL`
    /// and `STEM_RESTYLE_BASE_URL`.
    pub fn from_env() -> Self {
        let mut cfg = Self {
            api_key: non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY")),
            ..Self::default()
        };
        if let Some(model) = non_empty_var("STEM_RESTYLE_MODEL") {
            cfg.model = model;
        }
        if let Some(url) = non_empty_var("STEM_RESTYLE_BASE_URL") {
            cfg.base_url = url;
        }
        cfg
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Base URL without trailing slashes.
    pub fn endpoint_base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
