//! Flight schedule and search.

pub mod model;
pub mod store;

pub use model::{Flight, FlightQuery};
pub use store::{FlightError, FlightStore};
