mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    load_with_env(|key| env::var(key).ok()).await
}

/// Same as [`load`], reading environment variables through `lookup`.
pub async fn load_with_env<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = load_from_path(&config_path(&lookup)).await?;
    apply_env_overrides(&mut config, &lookup);

    Ok(config)
}

fn config_path<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("CONFIG_PATH").unwrap_or_else(|| "config.yaml".to_string())
}

pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    // ENDPOINT_NAME overrides whatever the file says
    if let Some(endpoint) = lookup("ENDPOINT_NAME") {
        debug!("Overriding endpoint reference from ENDPOINT_NAME");
        config.invocation.endpoint_reference = endpoint;
    }

    let unset = |value: &Option<String>| value.as_deref().is_none_or(str::is_empty);
    if unset(&config.runtime.base_url) && unset(&config.runtime.region) {
        let region = ["AWS_REGION", "AWS_DEFAULT_REGION"]
            .into_iter()
            .find_map(|key| lookup(key).filter(|v| !v.is_empty()));
        if let Some(region) = region {
            debug!("Using region {} from the environment", region);
            config.runtime.region = Some(region);
        }
    }
}

pub async fn load_from_path(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
