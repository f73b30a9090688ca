//! Booking validation, pricing and confirmation.
//!
//! # Responsibilities
//! - Validate the request against the flight and its cabin layout
//! - Price the booking (base fare per passenger plus first-class surcharge)
//! - Mark the seats occupied and record the confirmation
//!
//! # Design Decisions
//! - Booking ids come from an atomic counter starting at 1
//! - Seats are claimed in one step so two bookings can't share a seat

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::booking::types::{Booking, BookingRequest};
use crate::config::BookingConfig;
use crate::flights::{FlightError, FlightStore};
use crate::seats::SeatLayout;

/// Reasons a booking is refused.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Flight(#[from] FlightError),
    #[error("Number of passengers must be at least 1")]
    NoPassengers,
    #[error("At least one seat must be selected")]
    NoSeats,
    #[error("Selected {seats} seats for {passengers} passengers")]
    SeatCountMismatch { seats: usize, passengers: u32 },
    #[error("Seat {0} selected more than once")]
    DuplicateSeat(String),
    #[error("Invalid seat number selected: {0}")]
    InvalidSeat(String),
    #[error("Seat {0} is already occupied")]
    SeatTaken(String),
    #[error("Cannot process booking due to invalid flight price configuration.")]
    InvalidPrice { flight_id: u64 },
    #[error("Booking not found with ID: {0}")]
    NotFound(u64),
}

/// Creates and stores bookings.
#[derive(Debug)]
pub struct BookingService {
    next_id: AtomicU64,
    bookings: DashMap<u64, Booking>,
    first_class_surcharge: Decimal,
}

impl BookingService {
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            bookings: DashMap::new(),
            first_class_surcharge: config.first_class_surcharge,
        }
    }

    /// Validate, price and confirm a booking.
    pub fn book(
        &self,
        flights: &FlightStore,
        layout: &SeatLayout,
        request: &BookingRequest,
    ) -> Result<Booking, BookingError> {
        tracing::debug!(?request, "Booking request received");

        if request.passengers == 0 {
            return Err(BookingError::NoPassengers);
        }
        if request.selected_seats.is_empty() {
            return Err(BookingError::NoSeats);
        }
        if request.selected_seats.len() != request.passengers as usize {
            return Err(BookingError::SeatCountMismatch {
                seats: request.selected_seats.len(),
                passengers: request.passengers,
            });
        }

        let flight = flights.get(request.flight_id)?;
        if flight.price <= Decimal::ZERO {
            tracing::error!(
                flight_id = flight.id,
                price = %flight.price,
                "Invalid base price for flight"
            );
            return Err(BookingError::InvalidPrice { flight_id: flight.id });
        }

        let mut total = flight.price * Decimal::from(request.passengers);
        tracing::debug!(
            passengers = request.passengers,
            base_total = %total,
            "Base price calculated"
        );

        let mut seen = HashSet::new();
        for seat_nr in &request.selected_seats {
            if !seen.insert(seat_nr.as_str()) {
                return Err(BookingError::DuplicateSeat(seat_nr.clone()));
            }
            match layout.is_first_class(seat_nr) {
                None => {
                    tracing::warn!(seat = %seat_nr, flight_id = flight.id, "Invalid seat number");
                    return Err(BookingError::InvalidSeat(seat_nr.clone()));
                }
                Some(true) => total += self.first_class_surcharge,
                Some(false) => {}
            }
        }

        flights
            .occupy(flight.id, &request.selected_seats)
            .map_err(BookingError::SeatTaken)?;

        let booking = Booking {
            booking_id: self.next_id.fetch_add(1, Ordering::SeqCst),
            flight_id: flight.id,
            flight_number: flight.flight_nr.clone(),
            passengers: request.passengers,
            confirmed_seats: request.selected_seats.clone(),
            total_price: total,
            booking_time: chrono::Local::now().naive_local(),
        };
        self.bookings.insert(booking.booking_id, booking.clone());

        tracing::info!(
            booking_id = booking.booking_id,
            flight = %booking.flight_number,
            total_price = %booking.total_price,
            "Booking confirmed"
        );
        Ok(booking)
    }

    pub fn get(&self, booking_id: u64) -> Result<Booking, BookingError> {
        self.bookings
            .get(&booking_id)
            .map(|b| b.value().clone())
            .ok_or(BookingError::NotFound(booking_id))
    }

    pub fn count(&self) -> usize {
        self.bookings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeatLayoutConfig;
    use crate::flights::Flight;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn fixture(price: Decimal) -> (FlightStore, SeatLayout, BookingService) {
        let departure = NaiveDate::from_ymd_opt(2025, 5, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let flight = Flight::new(
            1,
            "BT123",
            "TLL",
            "WAW",
            departure,
            departure + chrono::Duration::minutes(90),
            price,
            "Boeing 737",
        );
        (
            FlightStore::new(vec![flight]),
            SeatLayout::from_config(&SeatLayoutConfig::default()),
            BookingService::new(&BookingConfig::default()),
        )
    }

    fn request(passengers: u32, seats: &[&str]) -> BookingRequest {
        BookingRequest {
            flight_id: 1,
            passengers,
            selected_seats: seats.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_economy_booking() {
        let (flights, layout, service) = fixture(dec!(150.00));
        let booking = service.book(&flights, &layout, &request(2, &["10A", "10B"])).unwrap();

        assert_eq!(booking.booking_id, 1);
        assert_eq!(booking.flight_number, "BT123");
        assert_eq!(booking.total_price, dec!(300.00));
        assert!(flights.occupied_seats(1).contains("10A"));
        assert_eq!(service.get(1).unwrap().confirmed_seats, vec!["10A", "10B"]);
    }

    #[test]
    fn test_first_class_surcharge() {
        let (flights, layout, service) = fixture(dec!(100));
        let booking = service.book(&flights, &layout, &request(2, &["1A", "3A"])).unwrap();
        assert_eq!(booking.total_price, dec!(250));
    }

    #[test]
    fn test_ids_increase() {
        let (flights, layout, service) = fixture(dec!(100));
        let a = service.book(&flights, &layout, &request(1, &["5A"])).unwrap();
        let b = service.book(&flights, &layout, &request(1, &["5B"])).unwrap();
        assert_eq!((a.booking_id, b.booking_id), (1, 2));
        assert_eq!(service.count(), 2);
    }

    #[test]
    fn test_rejections() {
        let (flights, layout, service) = fixture(dec!(100));

        assert!(matches!(
            service.book(&flights, &layout, &request(0, &[])),
            Err(BookingError::NoPassengers)
        ));
        assert!(matches!(
            service.book(&flights, &layout, &request(1, &[])),
            Err(BookingError::NoSeats)
        ));
        assert!(matches!(
            service.book(&flights, &layout, &request(2, &["5A"])),
            Err(BookingError::SeatCountMismatch { seats: 1, passengers: 2 })
        ));
        assert!(matches!(
            service.book(&flights, &layout, &request(2, &["5A", "5A"])),
            Err(BookingError::DuplicateSeat(_))
        ));
        assert!(matches!(
            service.book(&flights, &layout, &request(1, &["99Z"])),
            Err(BookingError::InvalidSeat(seat)) if seat == "99Z"
        ));

        let mut unknown = request(1, &["5A"]);
        unknown.flight_id = 404;
        assert!(matches!(
            service.book(&flights, &layout, &unknown),
            Err(BookingError::Flight(FlightError::NotFound(404)))
        ));

        service.book(&flights, &layout, &request(1, &["5A"])).unwrap();
        assert!(matches!(
            service.book(&flights, &layout, &request(1, &["5A"])),
            Err(BookingError::SeatTaken(seat)) if seat == "5A"
        ));
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn test_padded_seat_numbers_rejected() {
        let (flights, layout, service) = fixture(dec!(100));
        service.book(&flights, &layout, &request(1, &["12A"])).unwrap();

        assert!(matches!(
            service.book(&flights, &layout, &request(1, &["012A"])),
            Err(BookingError::InvalidSeat(seat)) if seat == "012A"
        ));
        assert!(matches!(
            service.book(&flights, &layout, &request(2, &["13A", "013A"])),
            Err(BookingError::InvalidSeat(seat)) if seat == "013A"
        ));

        let occupied = flights.occupied_seats(1);
        assert_eq!(occupied.len(), 1);
        assert!(occupied.contains("12A"));
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn test_invalid_price() {
        let (flights, layout, service) = fixture(Decimal::ZERO);
        assert!(matches!(
            service.book(&flights, &layout, &request(1, &["5A"])),
            Err(BookingError::InvalidPrice { flight_id: 1 })
        ));
    }

    #[test]
    fn test_missing_booking() {
        let (_, _, service) = fixture(dec!(1));
        assert!(matches!(service.get(7), Err(BookingError::NotFound(7))));
    }
}
