use anyhow::Result;
use endpoint_invoker::{config, invoker};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses a log level or `RUST_LOG` style directive list into a filter
fn build_env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        anyhow::anyhow!(
            "Invalid log filter '{}': {}. Use a level (error, warn, info, debug, trace) or target=level directives",
            directives,
            e
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    let env_filter = match build_env_filter(&log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // stdout is reserved for the response body
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Configuration loaded with log level: {}", log_level);

    let response = invoker::run(&config).await?;
    invoker::write_body(&response, &mut std::io::stdout().lock())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_levels_accepted() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(build_env_filter(level).is_ok(), "{level} should parse");
        }
    }

    #[test]
    fn test_directive_syntax_accepted() {
        assert!(build_env_filter("endpoint_invoker=debug").is_ok());
        assert!(build_env_filter("info,reqwest=warn,endpoint_invoker::runtime=trace").is_ok());
    }

    #[test]
    fn test_invalid_directive_rejected() {
        let err = build_env_filter("endpoint_invoker=loud").unwrap_err();
        assert!(err.to_string().contains("Invalid log filter"));
    }
}
