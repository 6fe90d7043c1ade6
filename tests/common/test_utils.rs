use endpoint_invoker::{
    Result,
    config::{Config, InvocationConfig, LogsConfig, PayloadConfig, RuntimeConfig},
};
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration pointing at the given runtime URL
pub fn create_test_config(base_url: &str, endpoint: &str, payload: &str) -> Config {
    Config {
        runtime: RuntimeConfig {
            base_url: Some(base_url.to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        },
        invocation: InvocationConfig {
            endpoint_reference: endpoint.to_string(),
            content_type: "application/json".to_string(),
            accept: None,
            custom_attributes: None,
            payload: PayloadConfig::Raw(payload.to_string()),
            payload_file: None,
        },
        logs: LogsConfig {
            level: "debug".to_string(),
        },
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Path of the invocation route for an endpoint
pub fn invocation_path(endpoint: &str) -> String {
    format!("/endpoints/{endpoint}/invocations")
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
runtime:
  region: "us-east-1"
  timeout_secs: 30
  headers:
    x-api-key: "test-key"

invocation:
  endpoint_reference: "your-model-endpoint-name"
  content_type: "application/json"
  payload: '{"key": "value"}'

logs:
  level: "debug"
"#;

/// Sample configuration with a structured payload and CSV accept header
pub const SAMPLE_CONFIG_WITH_STRUCTURED_PAYLOAD: &str = r#"
runtime:
  base_url: "http://localhost:8080"

invocation:
  endpoint_name: "structured"
  accept: "text/csv"
  custom_attributes: "c000b4f9-df62-4c85-a0bf-7c525f9104a4"
  payload:
    instances:
      - features: [1.5, 2.0]
    configuration:
      k: 3
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
runtime:
  timeout_secs: "not-a-number"

invocation:
  content_type: "application/json"
  # missing endpoint reference
"#;
