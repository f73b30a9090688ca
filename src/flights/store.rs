//! In-memory flight catalogue with per-flight seat occupancy.
//!
//! # Responsibilities
//! - Generate the sample schedule at startup
//! - Search flights by destination, date, duration and price
//! - Track which seats are occupied on each flight
//!
//! # Design Decisions
//! - The schedule is immutable after seeding; only occupancy changes
//! - Occupancy lives in a DashMap so bookings on different flights don't contend

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::FlightsConfig;
use crate::flights::model::{Flight, FlightQuery};
use crate::seats::SeatLayout;

const DESTINATIONS: [&str; 5] = ["WAW", "RIX", "HEL", "ARN", "OSL"];
const ORIGINS: [&str; 2] = ["TLL", "RIX"];
const AIRCRAFT: [&str; 3] = ["Boeing 737", "Airbus A320", "ATR 72"];

/// Error raised when a flight lookup fails.
#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    #[error("Flight not found with ID: {0}")]
    NotFound(u64),
}

/// Holds the flight schedule and seat occupancy.
#[derive(Debug)]
pub struct FlightStore {
    flights: Vec<Flight>,
    occupied: DashMap<u64, HashSet<String>>,
}

impl FlightStore {
    /// Build a store from explicit flights with no occupied seats.
    pub fn new(flights: Vec<Flight>) -> Self {
        let occupied = flights.iter().map(|f| (f.id, HashSet::new())).collect();
        Self { flights, occupied }
    }

    /// Generate the sample schedule and random occupancy.
    pub fn seeded(config: &FlightsConfig, layout: &SeatLayout) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let store = Self::new(sample_flights(config.sample_count));
        for flight in &store.flights {
            let seats = random_occupancy(layout, config.occupancy_rate, &mut rng);
            store.occupied.insert(flight.id, seats);
        }

        tracing::info!(
            flights = store.flights.len(),
            occupancy_rate = config.occupancy_rate,
            "Flight schedule seeded"
        );
        store
    }

    pub fn all(&self) -> &[Flight] {
        &self.flights
    }

    /// Flights matching every filter set in `query`.
    pub fn find_flights(&self, query: &FlightQuery) -> Vec<Flight> {
        self.flights
            .iter()
            .filter(|f| query.matches(f))
            .cloned()
            .collect()
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn get(&self, id: u64) -> Result<&Flight, FlightError> {
        self.find_by_id(id).ok_or(FlightError::NotFound(id))
    }

    /// Snapshot of the occupied seat numbers on a flight.
    pub fn occupied_seats(&self, id: u64) -> HashSet<String> {
        self.occupied
            .get(&id)
            .map(|seats| seats.clone())
            .unwrap_or_default()
    }

    /// Atomically mark seats occupied.
    ///
    /// Fails with the first already-taken seat and changes nothing in that case.
    pub fn occupy(&self, id: u64, seats: &[String]) -> Result<(), String> {
        let mut occupied = self.occupied.entry(id).or_default();
        if let Some(taken) = seats.iter().find(|s| occupied.contains(*s)) {
            return Err(taken.clone());
        }
        occupied.extend(seats.iter().cloned());
        Ok(())
    }
}

fn sample_flights(count: u32) -> Vec<Flight> {
    let base = NaiveDate::from_ymd_opt(2025, 4, 1)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .unwrap_or_default();

    let mut flights: Vec<Flight> = (0..count as usize)
        .map(|i| {
            let departure = base + Duration::days((i % 5) as i64) + Duration::hours((i % 3) as i64);
            let arrival = departure + Duration::minutes(70 + (i * 3 % 55) as i64);
            let price = dec!(95.00) + Decimal::from(i as u64) * dec!(2.5);
            Flight::new(
                i as u64 + 1,
                format!("FL{}", 100 + i),
                ORIGINS[i % ORIGINS.len()],
                DESTINATIONS[i % DESTINATIONS.len()],
                departure,
                arrival,
                price,
                AIRCRAFT[i % AIRCRAFT.len()],
            )
        })
        .collect();

    flights.push(Flight::new(
        count as u64 + 1,
        "BT123",
        "TLL",
        "WAW",
        at(2025, 5, 10, 10, 0),
        at(2025, 5, 10, 11, 30),
        dec!(150.00),
        "Boeing 737",
    ));
    flights
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .unwrap_or_default()
}

fn random_occupancy(layout: &SeatLayout, rate: f64, rng: &mut StdRng) -> HashSet<String> {
    let mut all = layout.seat_numbers();
    let count = ((all.len() as f64 * rate) as usize).min(all.len());
    all.shuffle(rng);
    all.truncate(count);
    all.into_iter().collect()
}
