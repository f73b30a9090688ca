//! API error responses.
//!
//! Every failure leaves the server as `{"status", "error", "message"}` JSON
//! with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::booking::BookingError;
use crate::flights::FlightError;
use crate::routing::RouterError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<FlightError> for ApiError {
    fn from(err: FlightError) -> Self {
        match err {
            FlightError::NotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Flight(inner) => inner.into(),
            BookingError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BookingError::SeatTaken(_) => ApiError::Conflict(err.to_string()),
            BookingError::InvalidPrice { .. } => ApiError::Internal(err.to_string()),
            BookingError::NoPassengers
            | BookingError::NoSeats
            | BookingError::SeatCountMismatch { .. }
            | BookingError::DuplicateSeat(_)
            | BookingError::InvalidSeat(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<RouterError> for ApiError {
    fn from(err: RouterError) -> Self {
        match err {
            RouterError::NotFound { .. } | RouterError::UnknownRoute { .. } => {
                ApiError::NotFound(err.to_string())
            }
            RouterError::MissingParam { .. } => ApiError::BadRequest(err.to_string()),
            RouterError::DuplicateName(_)
            | RouterError::InvalidPattern { .. }
            | RouterError::Load(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_error_status_mapping() {
        let cases = [
            (BookingError::NoPassengers, StatusCode::BAD_REQUEST),
            (BookingError::InvalidSeat("Z9".into()), StatusCode::BAD_REQUEST),
            (BookingError::SeatTaken("1A".into()), StatusCode::CONFLICT),
            (BookingError::InvalidPrice { flight_id: 3 }, StatusCode::INTERNAL_SERVER_ERROR),
            (BookingError::NotFound(7), StatusCode::NOT_FOUND),
            (BookingError::Flight(FlightError::NotFound(99)), StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_message_is_preserved() {
        let err = ApiError::from(FlightError::NotFound(42));
        assert_eq!(err.to_string(), "Flight not found with ID: 42");
    }
}
