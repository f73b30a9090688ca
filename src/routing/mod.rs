//! Client routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     [[app.routes]] config
//!     → pattern.rs (parse `/flights/seats/:flightId`)
//!     → component.rs (eager view, or lazy chunk + loader)
//!     → router.rs (freeze as immutable Router)
//!
//! Navigation:
//!     browser URL
//!     → history.rs (strip base, split fragment)
//!     → router.rs (first matching route, params, query)
//!     → component.rs (await lazy chunk on first visit)
//!     → navigator.rs (commit history entry)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - First match wins, in table order
//! - The router is passed around explicitly, never a global

pub mod component;
pub mod history;
pub mod navigator;
pub mod pattern;
pub mod route;
pub mod router;

pub use component::{AssetLoader, Component, LazyComponent, LoadError, View, ViewLoader};
pub use history::{History, HistoryKind, HistoryMode};
pub use navigator::Navigator;
pub use pattern::{Params, PatternError, RoutePattern};
pub use route::{Mounted, QueryPairs, Route, RouteMatch};
pub use router::{Router, RouterError};
