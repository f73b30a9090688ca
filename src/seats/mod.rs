//! Seat maps and recommendations.
//!
//! # Data Flow
//! ```text
//! flight occupancy (FlightStore)
//!     → layout.rs (every seat with window/legroom/exit/first-class flags)
//!     → recommend.rs (first adjacent block matching preferences)
//!     → SeatMap response
//! ```

pub mod layout;
pub mod recommend;

use std::collections::HashSet;

use serde::Serialize;

pub use layout::{Seat, SeatLayout};
pub use recommend::{recommend, SeatPreferences};

/// Full cabin plus the recommended seats for a party.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    pub total_rows: u32,
    pub columns: Vec<String>,
    pub all_seats: Vec<Seat>,
    pub recommended_seat_nrs: Vec<String>,
}

/// Build the seat map of a flight given its occupied seats.
pub fn seat_map(
    layout: &SeatLayout,
    occupied: &HashSet<String>,
    passengers: usize,
    prefs: &SeatPreferences,
) -> SeatMap {
    let all_seats = layout.generate(occupied);
    let recommended_seat_nrs = recommend(layout, &all_seats, passengers, prefs)
        .into_iter()
        .map(|s| s.seat_nr.clone())
        .collect();

    SeatMap {
        total_rows: layout.total_rows(),
        columns: layout.columns().to_vec(),
        all_seats,
        recommended_seat_nrs,
    }
}
