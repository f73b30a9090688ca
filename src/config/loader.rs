//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `app.base_url`.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load, apply environment overrides and validate a TOML config file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config = parse_config(&content)?;
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Built-in defaults plus environment overrides, validated.
pub fn default_config() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse TOML text without validating it.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Apply values taken from the build/runtime environment.
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides looked up by variable name through `lookup`.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(BASE_URL_ENV) {
        tracing::debug!(base_url = %base_url, "Base URL taken from environment");
        config.app.base_url = base_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{AssetLoader, HistoryKind, Router};
    use std::sync::Arc;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [app]
            base_url = "/planner/"
            history = "hash"

            [[app.routes]]
            path = "/"
            name = "home"
            component = "FlightSearchView"

            [[app.routes]]
            path = "/flights/seats/:flightId"
            name = "FlightSeats"
            component = "FlightSeatSelectionView"
            lazy = true
            props = true

            [flights]
            seed = 7

            [booking]
            first_class_surcharge = 75
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.listener.max_connections, 10_000);
        assert_eq!(config.app.history, HistoryKind::Hash);
        assert_eq!(config.app.routes.len(), 2);
        assert_eq!(config.app.routes[0].name, "home");
        assert!(config.app.routes[1].lazy);
        assert_eq!(config.app.routes[1].chunk, None);
        assert_eq!(config.flights.seed, Some(7));
        assert_eq!(config.flights.sample_count, 20);
        assert_eq!(config.booking.first_class_surcharge, rust_decimal::Decimal::from(75));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.app.routes.len(), 2);
        assert_eq!(config.app.routes[1].name, "FlightSeats");
        assert_eq!(config.seats.total_rows, 25);
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config = parse_config(include_str!("../../config/flight-planner.toml")).unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.app.routes.len(), 2);
        assert_eq!(
            config.app.routes[1].chunk.as_deref(),
            Some("assets/FlightSeatSelectionView.js")
        );
    }

    #[test]
    fn test_base_url_override() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, |key| {
            (key == BASE_URL_ENV).then(|| "/planner/".to_string())
        });
        assert_eq!(config.app.base_url, "/planner/");
        assert!(validate_config(&config).is_ok());

        let loader = Arc::new(AssetLoader::new(&config.app.assets_dir));
        let router = Router::from_config(&config.app, loader).unwrap();
        let matched = router.resolve_url("/planner/flights/seats/42").unwrap();
        assert_eq!(matched.name(), "FlightSeats");
        assert_eq!(matched.params["flightId"], "42");
        assert_eq!(router.resolve_url("/planner").unwrap().name(), "FlightSearch");
        assert!(router.resolve_url("/flights/seats/42").is_err());
    }

    #[test]
    fn test_no_override_keeps_configured_base() {
        let mut config = parse_config("[app]\nbase_url = \"/app\"").unwrap();
        apply_overrides(&mut config, |_| None);
        assert_eq!(config.app.base_url, "/app");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_config("[listener\nbind_address = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/planner.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
