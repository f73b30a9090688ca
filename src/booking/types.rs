//! Booking request and confirmation payloads.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to book seats on a flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub flight_id: u64,
    pub passengers: u32,
    #[serde(default)]
    pub selected_seats: Vec<String>,
}

/// A confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: u64,
    pub flight_id: u64,
    pub flight_number: String,
    pub passengers: u32,
    pub confirmed_seats: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub booking_time: NaiveDateTime,
}
