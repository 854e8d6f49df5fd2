//! HTTP handler functions for the crime-pulse API.
//!
//! Handlers validate request parameters at the boundary and hand
//! pre-validated values to the core crates. Unknown crime type names are
//! treated as a filter matching nothing (equality semantics), while
//! malformed intervals, profiles, and out-of-range limits are rejected
//! with 400 responses.

use actix_web::{HttpResponse, web};
use chrono::{Duration, Utc};
use crime_pulse_analytics::Interval;
use crime_pulse_crime_models::{CrimeType, Location};
use crime_pulse_mapbox::{MapboxError, RouteProfile};
use crime_pulse_server_models::{
    ApiHealth, DirectionsParams, ForwardGeocodeParams, GeocodeAddressParams, HeatmapParams,
    HotspotParams, IncidentQueryParams, IsochroneParams, PredictionRequest, ReverseGeocodeParams,
    RiskAssessmentParams, StatisticsParams, TimeSeriesParams, TimeSeriesResponse,
};
use crime_pulse_store::IncidentQuery;

use crate::AppState;

/// Fetch ceiling for aggregate endpoints, matching the reference API.
const AGGREGATE_FETCH_LIMIT: usize = 1000;

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: "healthy".to_string(),
    })
}

/// `GET /api/crime/incidents`
///
/// Filtered, sorted, paginated incidents.
pub async fn incidents(
    state: web::Data<AppState>,
    params: web::Query<IncidentQueryParams>,
) -> HttpResponse {
    let limit = params.limit.unwrap_or(100);
    if !(1..=1000).contains(&limit) {
        return bad_request("limit must be between 1 and 1000");
    }

    let results = match type_filter(params.crime_type.as_deref()) {
        TypeFilter::NoMatch => Vec::new(),
        TypeFilter::Filter(crime_type) => state.store.query(&IncidentQuery {
            from: params.start_date,
            to: params.end_date,
            crime_type,
            limit,
            offset: params.offset.unwrap_or(0),
        }),
    };

    HttpResponse::Ok().json(results)
}

/// `GET /api/crime/heatmap`
///
/// Weighted points for density rendering, optionally including synthetic
/// prediction hotspots.
pub async fn heatmap(state: web::Data<AppState>, params: web::Query<HeatmapParams>) -> HttpResponse {
    let incidents = match type_filter(params.crime_type.as_deref()) {
        TypeFilter::NoMatch => Vec::new(),
        TypeFilter::Filter(crime_type) => state.store.query(&IncidentQuery {
            from: params.start_date,
            to: params.end_date,
            crime_type,
            limit: AGGREGATE_FETCH_LIMIT,
            offset: 0,
        }),
    };

    let predicted = if params.include_predictions.unwrap_or(false) {
        crime_pulse_predict::hotspots(24, None, &mut rand::thread_rng())
    } else {
        Vec::new()
    };

    HttpResponse::Ok().json(crime_pulse_analytics::heatmap(&incidents, &predicted))
}

/// `GET /api/crime/statistics`
///
/// Aggregate counters plus freshly generated high-risk areas.
pub async fn statistics(
    state: web::Data<AppState>,
    params: web::Query<StatisticsParams>,
) -> HttpResponse {
    let incidents = match type_filter(params.crime_type.as_deref()) {
        TypeFilter::NoMatch => Vec::new(),
        TypeFilter::Filter(crime_type) => state.store.query(&IncidentQuery {
            from: params.start_date,
            to: params.end_date,
            crime_type,
            limit: AGGREGATE_FETCH_LIMIT,
            offset: 0,
        }),
    };

    let areas = crime_pulse_predict::high_risk_areas(&mut rand::thread_rng());
    HttpResponse::Ok().json(crime_pulse_analytics::statistics(&incidents, areas))
}

/// `GET /api/crime/types`
///
/// The fixed crime type catalog.
pub async fn crime_types() -> HttpResponse {
    let names: Vec<String> = CrimeType::all().iter().map(ToString::to_string).collect();
    HttpResponse::Ok().json(names)
}

/// `GET /api/crime/time-series`
///
/// Interval-bucketed incident counts. An unrecognized interval is a 400.
pub async fn time_series(
    state: web::Data<AppState>,
    params: web::Query<TimeSeriesParams>,
) -> HttpResponse {
    let interval: Interval = match params.interval.as_deref().unwrap_or("day").parse() {
        Ok(interval) => interval,
        Err(e) => return bad_request(&e.to_string()),
    };

    let end = params.end_date.unwrap_or_else(Utc::now);
    let start = params.start_date.unwrap_or_else(|| end - Duration::days(30));

    let incidents = match type_filter(params.crime_type.as_deref()) {
        TypeFilter::NoMatch => Vec::new(),
        TypeFilter::Filter(crime_type) => state.store.query(&IncidentQuery {
            from: params.start_date,
            to: params.end_date,
            crime_type,
            limit: AGGREGATE_FETCH_LIMIT,
            offset: 0,
        }),
    };

    let data = crime_pulse_analytics::time_series(&incidents, start, end, interval);
    HttpResponse::Ok().json(TimeSeriesResponse {
        data,
        interval: interval.to_string(),
    })
}

/// `GET /api/crime/high-risk-areas`
///
/// Freshly generated ranked area list, high tier first.
pub async fn high_risk_areas() -> HttpResponse {
    HttpResponse::Ok().json(crime_pulse_predict::high_risk_areas(
        &mut rand::thread_rng(),
    ))
}

/// `POST /api/predictions/generate`
pub async fn generate_predictions(body: web::Json<PredictionRequest>) -> HttpResponse {
    let request = body.into_inner();
    let response = crime_pulse_predict::predictions(
        request.location,
        &request.time_range,
        request.crime_types.as_deref(),
        &mut rand::thread_rng(),
    );
    HttpResponse::Ok().json(response)
}

/// `GET /api/predictions/hotspots`
pub async fn hotspots(params: web::Query<HotspotParams>) -> HttpResponse {
    let hours_ahead = params.hours_ahead.unwrap_or(24);
    if !(1..=72).contains(&hours_ahead) {
        return bad_request("hours_ahead must be between 1 and 72");
    }

    let crime_type = match params.crime_type.as_deref() {
        None => None,
        Some(name) => match name.parse::<CrimeType>() {
            Ok(t) => Some(t),
            Err(_) => return bad_request(&format!("unknown crime type {name:?}")),
        },
    };

    HttpResponse::Ok().json(crime_pulse_predict::hotspots(
        hours_ahead,
        crime_type,
        &mut rand::thread_rng(),
    ))
}

/// `GET /api/predictions/accuracy`
pub async fn accuracy() -> HttpResponse {
    HttpResponse::Ok().json(crime_pulse_predict::accuracy())
}

/// `GET /api/predictions/risk-assessment`
pub async fn risk_assessment(params: web::Query<RiskAssessmentParams>) -> HttpResponse {
    let location = Location {
        latitude: params.latitude,
        longitude: params.longitude,
    };
    HttpResponse::Ok().json(crime_pulse_predict::risk_assessment(
        location,
        params.radius.unwrap_or(1.0),
        &mut rand::thread_rng(),
    ))
}

/// `GET /api/geocoding/forward`
///
/// Raw Mapbox forward-geocoding passthrough.
pub async fn forward_geocode(
    state: web::Data<AppState>,
    params: web::Query<ForwardGeocodeParams>,
) -> HttpResponse {
    let limit = params.limit.unwrap_or(5);
    if !(1..=10).contains(&limit) {
        return bad_request("limit must be between 1 and 10");
    }

    match state
        .mapbox
        .forward_geocode(&params.query, limit, params.country.as_deref())
        .await
    {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => upstream_error("Geocoding error", &e),
    }
}

/// `GET /api/geocoding/reverse`
///
/// Raw Mapbox reverse-geocoding passthrough.
pub async fn reverse_geocode(
    state: web::Data<AppState>,
    params: web::Query<ReverseGeocodeParams>,
) -> HttpResponse {
    match state
        .mapbox
        .reverse_geocode(params.longitude, params.latitude, params.types.as_deref())
        .await
    {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => upstream_error("Reverse geocoding error", &e),
    }
}

/// `GET /api/geocoding/address`
///
/// Best-match geocoding reshaped to the local API surface. A query with no
/// matches is a 404.
pub async fn geocode_address(
    state: web::Data<AppState>,
    params: web::Query<GeocodeAddressParams>,
) -> HttpResponse {
    match state
        .mapbox
        .geocode_address(&params.query, params.country.as_deref())
        .await
    {
        Ok(place) => HttpResponse::Ok().json(place),
        Err(e) => upstream_error("Geocoding error", &e),
    }
}

/// `GET /api/geocoding/directions`
///
/// Raw Mapbox directions passthrough.
pub async fn directions(
    state: web::Data<AppState>,
    params: web::Query<DirectionsParams>,
) -> HttpResponse {
    let profile: RouteProfile = match params.profile.as_deref().unwrap_or("walking").parse() {
        Ok(profile) => profile,
        Err(e) => return bad_request(&e.to_string()),
    };

    match state
        .mapbox
        .directions(
            (params.start_longitude, params.start_latitude),
            (params.end_longitude, params.end_latitude),
            profile,
        )
        .await
    {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => upstream_error("Directions error", &e),
    }
}

/// `GET /api/geocoding/isochrone`
///
/// Raw Mapbox isochrone passthrough.
pub async fn isochrone(
    state: web::Data<AppState>,
    params: web::Query<IsochroneParams>,
) -> HttpResponse {
    let profile: RouteProfile = match params.profile.as_deref().unwrap_or("walking").parse() {
        Ok(profile) => profile,
        Err(e) => return bad_request(&e.to_string()),
    };
    let contours = match parse_contours(params.contours_minutes.as_deref()) {
        Ok(contours) => contours,
        Err(message) => return bad_request(&message),
    };

    match state
        .mapbox
        .isochrone(params.longitude, params.latitude, &contours, profile)
        .await
    {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => upstream_error("Isochrone error", &e),
    }
}

/// Outcome of resolving an optional crime type name.
enum TypeFilter {
    /// No name given, or a valid name: pass the filter to the store.
    Filter(Option<CrimeType>),
    /// A name outside the catalog: equality can match nothing.
    NoMatch,
}

fn type_filter(param: Option<&str>) -> TypeFilter {
    match param {
        None => TypeFilter::Filter(None),
        Some(name) => name
            .parse::<CrimeType>()
            .map_or(TypeFilter::NoMatch, |t| TypeFilter::Filter(Some(t))),
    }
}

/// Parses a comma-separated contour-minutes list, defaulting to `5,10,15`.
fn parse_contours(param: Option<&str>) -> Result<Vec<u32>, String> {
    let Some(raw) = param else {
        return Ok(vec![5, 10, 15]);
    };

    let contours: Vec<u32> = raw
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| format!("invalid contours_minutes {raw:?}: expected integers"))?;

    if contours.is_empty() {
        return Err("contours_minutes must not be empty".to_string());
    }
    Ok(contours)
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

/// Maps a Mapbox failure to a caller-visible error response.
///
/// Upstream failures are reported once with their cause and never retried
/// here; a zero-feature geocode is a 404 rather than a service failure.
fn upstream_error(context: &str, err: &MapboxError) -> HttpResponse {
    match err {
        MapboxError::NoResults => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "No results found" }))
        }
        _ => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": format!("{context}: {err}") }))
        }
    }
}
