//! Seat bookings.

pub mod service;
pub mod types;

pub use service::{BookingError, BookingService};
pub use types::{Booking, BookingRequest};
