//! Flight records and search criteria.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A scheduled flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: u64,
    pub flight_nr: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub aircraft_type: String,
    pub duration_minutes: i64,
}

impl Flight {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        flight_nr: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
        price: Decimal,
        aircraft_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            flight_nr: flight_nr.into(),
            origin: origin.into(),
            destination: destination.into(),
            departure_time,
            arrival_time,
            price,
            aircraft_type: aircraft_type.into(),
            duration_minutes: (arrival_time - departure_time).num_minutes(),
        }
    }
}

/// Optional search filters, combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
    pub max_duration_minutes: Option<i64>,
    pub max_price: Option<Decimal>,
}

impl FlightQuery {
    pub fn matches(&self, flight: &Flight) -> bool {
        self.destination
            .as_deref()
            .map_or(true, |d| flight.destination.eq_ignore_ascii_case(d))
            && self
                .date
                .map_or(true, |date| flight.departure_time.date() == date)
            && self
                .max_duration_minutes
                .map_or(true, |max| flight.duration_minutes <= max)
            && self.max_price.map_or(true, |max| flight.price <= max)
    }
}
