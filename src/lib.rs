//! Flight Planner
//!
//! Flight search, seat recommendation and booking API together with the
//! client route table of the single-page app that sits in front of it.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser ──▶ http::server ──┬─▶ /api/*  handlers ──▶ flights / seats / booking
//!                                │
//!                                └─▶ fallback ──▶ routing::Router ──▶ app shell | 404
//!
//!     config (TOML + BASE_URL) ──▶ validated AppConfig ──▶ every subsystem
//!     config watcher ──▶ new routing::Router snapshot ──▶ ArcSwap
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Domain
pub mod booking;
pub mod flights;
pub mod seats;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Navigator, Router};
