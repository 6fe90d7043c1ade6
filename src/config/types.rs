use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub runtime: RuntimeConfig,
    pub invocation: InvocationConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationConfig {
    #[serde(alias = "endpoint_name")]
    pub endpoint_reference: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub accept: Option<String>,
    #[serde(default)]
    pub custom_attributes: Option<String>,
    #[serde(default = "default_payload")]
    pub payload: PayloadConfig,
    // Takes precedence over `payload` when set
    #[serde(default)]
    pub payload_file: Option<String>,
}

/// Request body as written in the config file.
///
/// A string is sent byte for byte. Anything else is serialized as JSON,
/// keeping the key order of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadConfig {
    Raw(String),
    Json(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl RuntimeConfig {
    /// Base URL of the runtime, either configured directly or derived from the region.
    pub fn resolve_base_url(&self) -> Option<String> {
        match (&self.base_url, &self.region) {
            (Some(url), _) if !url.is_empty() => Some(url.clone()),
            (_, Some(region)) if !region.is_empty() => {
                Some(format!("https://runtime.sagemaker.{region}.amazonaws.com"))
            }
            _ => None,
        }
    }
}

impl PayloadConfig {
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Raw(s) => Ok(s.as_bytes().to_vec()),
            Self::Json(value) => serde_json::to_vec(value),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub fn default_content_type() -> String {
    "application/json".to_string()
}

fn default_payload() -> PayloadConfig {
    PayloadConfig::Raw(r#"{"key": "value"}"#.to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}
