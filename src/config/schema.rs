//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the planner.
//! All types derive Serde traits for deserialization from config files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::routing::HistoryKind;

/// Root configuration for the flight planner.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, concurrency).
    pub listener: ListenerConfig,

    /// Single-page app hosting and its client route table.
    pub app: SpaConfig,

    /// Sample flight data.
    pub flights: FlightsConfig,

    /// Cabin layout used for seat maps.
    pub seats: SeatLayoutConfig,

    /// Booking pricing.
    pub booking: BookingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum requests handled concurrently (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Single-page app configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpaConfig {
    /// Base URL every client route is served under. `BASE_URL` overrides it.
    pub base_url: String,

    /// History mode used by the client.
    pub history: HistoryKind,

    /// Directory holding the built app (index file and chunk files).
    pub assets_dir: String,

    /// Shell document served for every resolved client route.
    pub index_file: String,

    /// Ordered client route table. First match wins.
    pub routes: Vec<RouteConfig>,
}

impl Default for SpaConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            history: HistoryKind::Web,
            assets_dir: "dist".to_string(),
            index_file: "index.html".to_string(),
            routes: default_routes(),
        }
    }
}

/// The route table the planner UI ships with.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            path: "/".to_string(),
            name: "FlightSearch".to_string(),
            component: "FlightSearchView".to_string(),
            lazy: false,
            chunk: None,
            props: false,
            case_sensitive: false,
        },
        RouteConfig {
            path: "/flights/seats/:flightId".to_string(),
            name: "FlightSeats".to_string(),
            component: "FlightSeatSelectionView".to_string(),
            lazy: true,
            chunk: Some("assets/FlightSeatSelectionView.js".to_string()),
            props: true,
            case_sensitive: false,
        },
    ]
}

/// A single client route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/flights/seats/:flightId`.
    pub path: String,

    /// Unique route name used for programmatic navigation.
    pub name: String,

    /// View component rendered for this route.
    pub component: String,

    /// Fetch the component's chunk on first navigation instead of at startup.
    #[serde(default)]
    pub lazy: bool,

    /// Chunk path relative to the assets dir (default `assets/{component}.js`).
    #[serde(default)]
    pub chunk: Option<String>,

    /// Forward path parameters to the component as props.
    #[serde(default)]
    pub props: bool,

    #[serde(default)]
    pub case_sensitive: bool,
}

/// Sample flight generation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlightsConfig {
    /// Number of generated sample flights (the fixed BT123 flight is extra).
    pub sample_count: u32,

    /// Share of seats marked occupied on each flight, 0.0 to 1.0.
    pub occupancy_rate: f64,

    /// RNG seed for occupancy; random when unset.
    pub seed: Option<u64>,
}

impl Default for FlightsConfig {
    fn default() -> Self {
        Self {
            sample_count: 20,
            occupancy_rate: 0.4,
            seed: None,
        }
    }
}

/// Cabin layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeatLayoutConfig {
    pub total_rows: u32,
    pub columns: Vec<String>,
    pub exit_rows: Vec<u32>,
    pub extra_legroom_rows: Vec<u32>,
    pub window_columns: Vec<String>,
    pub first_class_rows: Vec<u32>,
}

impl Default for SeatLayoutConfig {
    fn default() -> Self {
        Self {
            total_rows: 25,
            columns: ["A", "B", "C", "D", "E", "F"].map(String::from).to_vec(),
            exit_rows: vec![1, 12, 24],
            extra_legroom_rows: vec![10, 11, 12],
            window_columns: vec!["A".to_string(), "F".to_string()],
            first_class_rows: vec![1, 2],
        }
    }
}

/// Booking pricing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Added to the total for every first-class seat.
    pub first_class_surcharge: Decimal,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            first_class_surcharge: Decimal::from(50),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 64 * 1024, // 64KB
        }
    }
}
