//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the API handlers and the client route fallback
//! - Wire up middleware (tracing, request id, timeout, limits, security headers)
//! - Swap in a new client route table when the config file changes
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::booking::BookingService;
use crate::config::{AppConfig, SpaConfig};
use crate::flights::FlightStore;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::spa::{spa_fallback, SpaShell};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{AssetLoader, Router as SpaRouter, RouterError};
use crate::seats::SeatLayout;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Current client route table; replaced wholesale on reload.
    pub spa: Arc<ArcSwap<SpaRouter>>,
    pub flights: Arc<FlightStore>,
    pub layout: Arc<SeatLayout>,
    pub bookings: Arc<BookingService>,
    pub shell: Arc<SpaShell>,
}

/// HTTP server for the flight planner API and app.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, RouterError> {
        let spa = build_spa_router(&config.app)?;
        let layout = SeatLayout::from_config(&config.seats);
        let flights = FlightStore::seeded(&config.flights, &layout);

        tracing::info!(
            routes = spa.routes().len(),
            flights = flights.all().len(),
            base = spa.history_mode().base(),
            "Application state initialized"
        );

        let state = AppState {
            spa: Arc::new(ArcSwap::from_pointee(spa)),
            flights: Arc::new(flights),
            layout: Arc::new(layout),
            bookings: Arc::new(BookingService::new(&config.booking)),
            shell: Arc::new(SpaShell::from_config(&config.app)),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let base = state.spa.load().history_mode().base().to_string();
        let assets = ServeDir::new(std::path::Path::new(&config.app.assets_dir).join("assets"));

        let mut router = Router::new()
            .route("/health", get(handlers::health))
            .route("/api/routes", get(handlers::list_routes))
            .route("/api/flights", get(handlers::list_flights))
            .route("/api/flights/bookings", post(handlers::create_booking))
            .route("/api/flights/bookings/{booking_id}", get(handlers::get_booking))
            .route("/api/flights/{flight_id}", get(handlers::get_flight))
            .route("/api/flights/{flight_id}/seats", get(handlers::get_seat_map))
            .nest_service(&format!("{base}/assets"), assets)
            .fallback(spa_fallback)
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size));

        if config.security.enable_headers {
            router = router
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ));
        }

        router
            .layer(ConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// New configs arriving on `config_updates` replace the client route
    /// table; the rest of the state is kept.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let spa = self.state.spa.clone();
        let base_url = self.config.app.base_url.clone();
        let reload = tokio::spawn(async move {
            while let Some(mut update) = config_updates.recv().await {
                if update.app.base_url != base_url {
                    tracing::warn!(
                        current = %base_url,
                        requested = %update.app.base_url,
                        "Base URL changes need a restart; keeping the current base"
                    );
                    update.app.base_url = base_url.clone();
                }
                match build_spa_router(&update.app) {
                    Ok(router) => {
                        tracing::info!(
                            routes = router.routes().len(),
                            "Client route table reloaded"
                        );
                        spa.store(Arc::new(router));
                    }
                    Err(e) => tracing::error!(error = %e, "Rejected reloaded route table"),
                }
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        reload.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared state, e.g. for inspecting the live route table.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

fn build_spa_router(config: &SpaConfig) -> Result<SpaRouter, RouterError> {
    let loader = Arc::new(AssetLoader::new(&config.assets_dir));
    SpaRouter::from_config(config, loader)
}
