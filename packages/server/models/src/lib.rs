#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! API request and response types for the crime-pulse server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the domain types to allow independent evolution of the API contract.
//! Field names are snake_case on the wire, matching the dashboard client.

use chrono::{DateTime, Utc};
use crime_pulse_crime_models::{CrimeType, Location, TimeRange, TimeSeriesBucket};
use serde::{Deserialize, Serialize};

/// Query parameters for the incidents endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentQueryParams {
    /// Keep incidents at or after this instant (ISO 8601).
    pub start_date: Option<DateTime<Utc>>,
    /// Keep incidents at or before this instant (ISO 8601).
    pub end_date: Option<DateTime<Utc>>,
    /// Keep incidents of exactly this crime type name.
    pub crime_type: Option<String>,
    /// Maximum number of results, 1-1000. Defaults to 100.
    pub limit: Option<usize>,
    /// Number of sorted results to skip. Defaults to 0.
    pub offset: Option<usize>,
}

/// Query parameters for the heatmap endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HeatmapParams {
    /// Keep incidents at or after this instant (ISO 8601).
    pub start_date: Option<DateTime<Utc>>,
    /// Keep incidents at or before this instant (ISO 8601).
    pub end_date: Option<DateTime<Utc>>,
    /// Keep incidents of exactly this crime type name.
    pub crime_type: Option<String>,
    /// Append synthetic prediction hotspots to the point set.
    pub include_predictions: Option<bool>,
}

/// Query parameters for the statistics endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsParams {
    /// Keep incidents at or after this instant (ISO 8601).
    pub start_date: Option<DateTime<Utc>>,
    /// Keep incidents at or before this instant (ISO 8601).
    pub end_date: Option<DateTime<Utc>>,
    /// Keep incidents of exactly this crime type name.
    pub crime_type: Option<String>,
}

/// Query parameters for the time-series endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesParams {
    /// Range start; defaults to 30 days before now.
    pub start_date: Option<DateTime<Utc>>,
    /// Range end; defaults to now.
    pub end_date: Option<DateTime<Utc>>,
    /// Keep incidents of exactly this crime type name.
    pub crime_type: Option<String>,
    /// Bucket granularity: `hour`, `day`, `week`, or `month`. Defaults to
    /// `day`; anything else is rejected with an invalid-argument error.
    pub interval: Option<String>,
}

/// Response envelope for the time-series endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesResponse {
    /// One bucket per interval unit.
    pub data: Vec<TimeSeriesBucket>,
    /// The granularity the buckets were computed at.
    pub interval: String,
}

/// Request body for the prediction-generation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    /// Center of the prediction area.
    pub location: Location,
    /// Window the predictions should cover.
    pub time_range: TimeRange,
    /// Restrict predicted types to this set.
    pub crime_types: Option<Vec<CrimeType>>,
}

/// Query parameters for the hotspots endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HotspotParams {
    /// Forecast horizon in hours, 1-72. Defaults to 24.
    pub hours_ahead: Option<u32>,
    /// Restrict predicted types to this crime type name.
    pub crime_type: Option<String>,
}

/// Query parameters for the risk-assessment endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskAssessmentParams {
    /// Assessment center latitude.
    pub latitude: f64,
    /// Assessment center longitude.
    pub longitude: f64,
    /// Assessment radius in kilometers. Defaults to 1.0.
    pub radius: Option<f64>,
}

/// Query parameters for the forward-geocoding proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct ForwardGeocodeParams {
    /// Address or place query string.
    pub query: String,
    /// Maximum number of features, 1-10. Defaults to 5.
    pub limit: Option<u8>,
    /// Restrict results to a country code.
    pub country: Option<String>,
}

/// Query parameters for the address-geocoding endpoint (reshaped result).
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeAddressParams {
    /// Address to resolve.
    pub query: String,
    /// Restrict results to a country code.
    pub country: Option<String>,
}

/// Query parameters for the reverse-geocoding proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeParams {
    /// Longitude to resolve.
    pub longitude: f64,
    /// Latitude to resolve.
    pub latitude: f64,
    /// Comma-separated Mapbox feature types to include.
    pub types: Option<String>,
}

/// Query parameters for the directions proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsParams {
    /// Route start longitude.
    pub start_longitude: f64,
    /// Route start latitude.
    pub start_latitude: f64,
    /// Route end longitude.
    pub end_longitude: f64,
    /// Route end latitude.
    pub end_latitude: f64,
    /// Routing profile: `driving`, `walking`, or `cycling`. Defaults to
    /// `walking`.
    pub profile: Option<String>,
}

/// Query parameters for the isochrone proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct IsochroneParams {
    /// Contour center longitude.
    pub longitude: f64,
    /// Contour center latitude.
    pub latitude: f64,
    /// Comma-separated contour durations in minutes. Defaults to `5,10,15`.
    pub contours_minutes: Option<String>,
    /// Routing profile: `driving`, `walking`, or `cycling`. Defaults to
    /// `walking`.
    pub profile: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Service status, always `"healthy"` when the process answers.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_series_response_serializes_snake_case() {
        let response = TimeSeriesResponse {
            data: vec![TimeSeriesBucket {
                time: "2026-08-25".to_string(),
                count: 3,
            }],
            interval: "day".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["interval"], "day");
        assert_eq!(json["data"][0]["time"], "2026-08-25");
        assert_eq!(json["data"][0]["count"], 3);
    }

    #[test]
    fn prediction_request_deserializes_crime_type_names() {
        let body = serde_json::json!({
            "location": { "latitude": 19.0760, "longitude": 72.8777 },
            "time_range": {
                "start_time": "2026-08-25T00:00:00Z",
                "end_time": "2026-08-26T00:00:00Z"
            },
            "crime_types": ["Theft", "Vehicle Theft"]
        });
        let request: PredictionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(
            request.crime_types,
            Some(vec![CrimeType::Theft, CrimeType::VehicleTheft])
        );
    }
}
