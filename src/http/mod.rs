//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request id)
//!     → handlers.rs (flight, seat and booking API)
//!     → spa.rs (anything else: client route table → app shell or 404)
//!     → error.rs (typed failures → JSON error body)
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;
pub mod spa;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
pub use spa::X_ROUTE_NAME;
