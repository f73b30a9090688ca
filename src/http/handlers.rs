//! Flight, seat and booking API handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::booking::{Booking, BookingRequest};
use crate::flights::{Flight, FlightQuery};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::Component;
use crate::seats::{seat_map, SeatMap, SeatPreferences};

fn bad_path(rejection: PathRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_flights(
    State(state): State<AppState>,
    query: Result<Query<FlightQuery>, QueryRejection>,
) -> Result<Json<Vec<Flight>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let flights = state.flights.find_flights(&query);
    tracing::debug!(?query, found = flights.len(), "Flight search");
    Ok(Json(flights))
}

pub async fn get_flight(
    State(state): State<AppState>,
    flight_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Flight>, ApiError> {
    let Path(flight_id) = flight_id.map_err(bad_path)?;
    Ok(Json(state.flights.get(flight_id)?.clone()))
}

/// Query string of the seat map endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatQuery {
    pub number_of_passengers: Option<i64>,
    pub prefer_window: Option<bool>,
    pub prefer_extra_legroom: Option<bool>,
    pub prefer_near_exit: Option<bool>,
}

impl SeatQuery {
    /// Party size, at least one.
    fn passengers(&self) -> usize {
        usize::try_from(self.number_of_passengers.unwrap_or(1).max(1)).unwrap_or(1)
    }

    fn preferences(&self) -> SeatPreferences {
        SeatPreferences {
            prefer_window: self.prefer_window,
            prefer_extra_legroom: self.prefer_extra_legroom,
            prefer_near_exit: self.prefer_near_exit,
        }
    }
}

pub async fn get_seat_map(
    State(state): State<AppState>,
    flight_id: Result<Path<u64>, PathRejection>,
    query: Result<Query<SeatQuery>, QueryRejection>,
) -> Result<Json<SeatMap>, ApiError> {
    let Path(flight_id) = flight_id.map_err(bad_path)?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let flight = state.flights.get(flight_id)?;
    let occupied = state.flights.occupied_seats(flight.id);

    let map = seat_map(
        &state.layout,
        &occupied,
        query.passengers(),
        &query.preferences(),
    );
    tracing::debug!(
        flight_id,
        passengers = query.passengers(),
        recommended = ?map.recommended_seat_nrs,
        "Seat map built"
    );
    Ok(Json(map))
}

pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        metrics::record_booking("rejected");
        ApiError::BadRequest(e.body_text())
    })?;

    match state.bookings.book(&state.flights, &state.layout, &request) {
        Ok(booking) => {
            metrics::record_booking("confirmed");
            Ok(Json(booking))
        }
        Err(e) => {
            metrics::record_booking("rejected");
            tracing::warn!(flight_id = request.flight_id, error = %e, "Booking refused");
            Err(e.into())
        }
    }
}

pub async fn get_booking(
    State(state): State<AppState>,
    booking_id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Booking>, ApiError> {
    let Path(booking_id) = booking_id.map_err(bad_path)?;
    Ok(Json(state.bookings.get(booking_id)?))
}

/// One entry of the published route table.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub component: String,
    pub lazy: bool,
    pub loaded: bool,
    pub props: bool,
}

/// Published client route table.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteTable {
    pub base: String,
    pub history: String,
    pub routes: Vec<RouteSummary>,
}

pub async fn list_routes(State(state): State<AppState>) -> Json<RouteTable> {
    let router = state.spa.load();
    let routes = router
        .routes()
        .iter()
        .map(|route| RouteSummary {
            name: route.name.clone(),
            path: route.path().to_string(),
            component: route.component.name().to_string(),
            lazy: route.component.is_lazy(),
            loaded: match &route.component {
                Component::Eager(_) => true,
                Component::Lazy(lazy) => lazy.is_loaded(),
            },
            props: route.props,
        })
        .collect();

    let mode = router.history_mode();
    Json(RouteTable {
        base: mode.base().to_string(),
        history: format!("{:?}", mode.kind()).to_lowercase(),
        routes,
    })
}
