//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + BASE_URL
//!     → loader.rs (parse, env overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → route table, flight store, seat layout, booking pricing
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and validates
//!     → server rebuilds the route table
//!     → atomic swap of the router snapshot
//! ```
//!
//! # Design Decisions
//! - Every section has defaults so an empty file is a valid config
//! - Only the route table is hot-reloaded; flight data lives for the process
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{default_config, load_config, ConfigError};
pub use watcher::ConfigWatcher;
pub use schema::{
    AppConfig, BookingConfig, FlightsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    RouteConfig, SeatLayoutConfig, SecurityConfig, SpaConfig, TimeoutConfig,
};
