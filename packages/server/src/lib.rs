#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the crime-pulse dashboard.
//!
//! Serves filtered incident queries, heatmap and statistics aggregates,
//! time series, synthetic predictions, and thin proxies to the Mapbox
//! geocoding/directions/isochrone APIs. The synthetic incident working set
//! is generated once here at startup and owned by the shared state;
//! request handling never mutates it.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use crime_pulse_mapbox::MapboxClient;
use crime_pulse_store::{GeneratorConfig, IncidentStore};

/// Shared application state.
pub struct AppState {
    /// Immutable synthetic incident working set.
    pub store: IncidentStore,
    /// Mapbox API client for the geocoding proxy endpoints.
    pub mapbox: MapboxClient,
}

/// Starts the crime-pulse API server.
///
/// Generates the incident working set, builds the Mapbox client from the
/// `MAPBOX_TOKEN` environment variable, and binds to `BIND_ADDR`/`PORT`
/// (defaults `127.0.0.1:8000`). This is a regular async function — the
/// caller provides the runtime via `#[actix_web::main]`.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init();

    log::info!("Generating synthetic incident dataset...");
    let store = IncidentStore::generate(&GeneratorConfig::default(), &mut rand::thread_rng());
    log::info!("Generated {} incidents", store.len());

    let token = std::env::var("MAPBOX_TOKEN").unwrap_or_default();
    if token.is_empty() {
        log::warn!("MAPBOX_TOKEN is not set; geocoding proxy requests will fail upstream");
    }
    let mapbox = MapboxClient::new(token);

    let state = web::Data::new(AppState { store, mapbox });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/health", web::get().to(handlers::health))
            .service(
                web::scope("/api/crime")
                    .route("/incidents", web::get().to(handlers::incidents))
                    .route("/heatmap", web::get().to(handlers::heatmap))
                    .route("/statistics", web::get().to(handlers::statistics))
                    .route("/types", web::get().to(handlers::crime_types))
                    .route("/time-series", web::get().to(handlers::time_series))
                    .route(
                        "/high-risk-areas",
                        web::get().to(handlers::high_risk_areas),
                    ),
            )
            .service(
                web::scope("/api/predictions")
                    .route("/generate", web::post().to(handlers::generate_predictions))
                    .route("/hotspots", web::get().to(handlers::hotspots))
                    .route("/accuracy", web::get().to(handlers::accuracy))
                    .route(
                        "/risk-assessment",
                        web::get().to(handlers::risk_assessment),
                    ),
            )
            .service(
                web::scope("/api/geocoding")
                    .route("/forward", web::get().to(handlers::forward_geocode))
                    .route("/reverse", web::get().to(handlers::reverse_geocode))
                    .route("/address", web::get().to(handlers::geocode_address))
                    .route("/directions", web::get().to(handlers::directions))
                    .route("/isochrone", web::get().to(handlers::isochrone)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
