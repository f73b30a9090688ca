//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Unique route names and well-formed path patterns
//! - Validate value ranges (timeouts > 0, rates within 0..=1, rows in layout)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{AppConfig, SeatLayoutConfig};
use crate::routing::RoutePattern;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::new("listener.max_connections", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    validate_routes(config, &mut errors);
    validate_layout(&config.seats, &mut errors);

    let rate = config.flights.occupancy_rate;
    if !(0.0..=1.0).contains(&rate) {
        errors.push(ValidationError::new(
            "flights.occupancy_rate",
            format!("{rate} is outside 0.0..=1.0"),
        ));
    }
    if config.booking.first_class_surcharge.is_sign_negative() {
        errors.push(ValidationError::new(
            "booking.first_class_surcharge",
            "must not be negative",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(config: &AppConfig, errors: &mut Vec<ValidationError>) {
    let base = &config.app.base_url;
    if base.contains(['?', '#']) {
        errors.push(ValidationError::new(
            "app.base_url",
            format!("'{base}' must be a plain path"),
        ));
    }

    let mut names = HashSet::new();
    for (i, route) in config.app.routes.iter().enumerate() {
        let field = format!("app.routes[{i}]");
        if route.name.trim().is_empty() {
            errors.push(ValidationError::new(format!("{field}.name"), "must not be empty"));
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::new(
                format!("{field}.name"),
                format!("duplicate route name '{}'", route.name),
            ));
        }
        if route.component.trim().is_empty() {
            errors.push(ValidationError::new(format!("{field}.component"), "must not be empty"));
        }
        if let Err(e) = RoutePattern::parse(&route.path) {
            errors.push(ValidationError::new(
                format!("{field}.path"),
                format!("'{}': {e}", route.path),
            ));
        }
        if route.chunk.is_some() && !route.lazy {
            errors.push(ValidationError::new(
                format!("{field}.chunk"),
                "only lazy routes load a chunk",
            ));
        }
    }
}

fn validate_layout(layout: &SeatLayoutConfig, errors: &mut Vec<ValidationError>) {
    if layout.total_rows == 0 {
        errors.push(ValidationError::new("seats.total_rows", "must be greater than 0"));
    }
    if layout.columns.is_empty() {
        errors.push(ValidationError::new("seats.columns", "must not be empty"));
    }

    let mut seen = HashSet::new();
    for column in &layout.columns {
        let mut chars = column.chars();
        let single_letter = matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if c.is_ascii_uppercase()
        );
        if !single_letter {
            errors.push(ValidationError::new(
                "seats.columns",
                format!("'{column}' is not a single uppercase letter"),
            ));
        }
        if !seen.insert(column) {
            errors.push(ValidationError::new(
                "seats.columns",
                format!("'{column}' listed twice"),
            ));
        }
    }
    for column in &layout.window_columns {
        if !layout.columns.contains(column) {
            errors.push(ValidationError::new(
                "seats.window_columns",
                format!("'{column}' is not a layout column"),
            ));
        }
    }

    let row_lists = [
        ("seats.exit_rows", &layout.exit_rows),
        ("seats.extra_legroom_rows", &layout.extra_legroom_rows),
        ("seats.first_class_rows", &layout.first_class_rows),
    ];
    for (field, rows) in row_lists {
        for row in rows.iter().filter(|r| **r == 0 || **r > layout.total_rows) {
            errors.push(ValidationError::new(
                field,
                format!("row {row} is outside 1..={}", layout.total_rows),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(path: &str, name: &str) -> RouteConfig {
        RouteConfig {
            path: path.into(),
            name: name.into(),
            component: "View".into(),
            lazy: false,
            chunk: None,
            props: false,
            case_sensitive: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_duplicate_route_names() {
        let mut config = AppConfig::default();
        config.app.routes.push(route("/again", "FlightSearch"));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "app.routes[2].name");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.flights.occupancy_rate = 1.5;
        config.app.routes.push(route("no-slash", "broken"));
        config.seats.exit_rows.push(99);

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"listener.bind_address"));
        assert!(fields.contains(&"timeouts.request_secs"));
        assert!(fields.contains(&"flights.occupancy_rate"));
        assert!(fields.contains(&"app.routes[2].path"));
        assert!(fields.contains(&"seats.exit_rows"));
    }

    #[test]
    fn test_bad_columns() {
        let mut config = AppConfig::default();
        config.seats.columns = vec!["A".into(), "A".into(), "bb".into()];
        let errors = validate_config(&config).unwrap_err();
        // duplicate A, "bb", and window column F no longer in the layout
        assert_eq!(errors.len(), 3);
    }
}
