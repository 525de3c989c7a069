//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::PingerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid probe url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<PingerConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Deserialize a TOML file without semantic checks, for callers that
/// layer overrides on top before validating.
pub fn read_config(path: &Path) -> Result<PingerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<PingerConfig, ConfigError> {
    let config: PingerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogFormat, ProbeConfig};
    use std::time::Duration;

    #[test]
    fn parses_full_http_config() {
        let config = parse_config(
            r#"
            [worker]
            interval_ms = 250

            [probe]
            kind = "http"
            url = "http://127.0.0.1:8080/health"
            method = "GET"
            timeout_ms = 1000
            headers = [
                { name = "X-A", value = "foo" },
                { name = "X-A", value = "bar" },
            ]

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.worker.interval(), Duration::from_millis(250));
        assert_eq!(config.logging.format, LogFormat::Json);
        match &config.probe {
            ProbeConfig::Http(http) => {
                assert_eq!(http.method, "GET");
                assert_eq!(http.timeout_ms, Some(1000));
                let names: Vec<_> = http.headers.iter().map(|h| h.name.as_str()).collect();
                assert_eq!(names, vec!["X-A", "X-A"]);
            }
            other => panic!("expected http probe, got {other:?}"),
        }
    }

    #[test]
    fn parses_tcp_config_with_defaults() {
        let config = parse_config(
            r#"
            [probe]
            kind = "tcp"
            address = "db.internal:5432"
            "#,
        )
        .unwrap();

        assert_eq!(config.worker.interval(), Duration::from_secs(10));
        match &config.probe {
            ProbeConfig::Tcp(tcp) => {
                assert_eq!(tcp.address, "db.internal:5432");
                assert_eq!(tcp.timeout_ms, 5000);
            }
            other => panic!("expected tcp probe, got {other:?}"),
        }
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let err = parse_config("[worker\ninterval_ms = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn semantic_errors_are_collected() {
        let err = parse_config(
            r#"
            [worker]
            interval_ms = 0

            [probe]
            kind = "http"
            url = "ftp://example.com"
            method = "BAD METHOD"
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3, "{errors:?}"),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/pinger.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
