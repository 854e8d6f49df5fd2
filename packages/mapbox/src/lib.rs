#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Thin client for the Mapbox geocoding, directions, and isochrone APIs.
//!
//! The proxy endpoints pass Mapbox's JSON through unchanged;
//! [`MapboxClient::geocode_address`] additionally reshapes the first
//! geocoding feature into a [`GeocodedPlace`]. Failures are never swallowed:
//! a non-2xx status or network error surfaces as a [`MapboxError`] for the
//! caller to report, and no request is retried internally.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Production Mapbox API host.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Routing profile accepted by the directions and isochrone APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteProfile {
    Driving,
    Walking,
    Cycling,
}

impl RouteProfile {
    /// The profile segment used in Mapbox URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl std::str::FromStr for RouteProfile {
    type Err = UnknownProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(Self::Driving),
            "walking" => Ok(Self::Walking),
            "cycling" => Ok(Self::Cycling),
            other => Err(UnknownProfileError {
                value: other.to_string(),
            }),
        }
    }
}

/// Error returned for a profile string outside `driving|walking|cycling`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported profile {value:?}: expected driving, walking, or cycling")]
pub struct UnknownProfileError {
    /// The rejected profile string.
    pub value: String,
}

/// A geocoding feature reshaped to the local API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Longitude of the matched place.
    pub longitude: f64,
    /// Latitude of the matched place.
    pub latitude: f64,
    /// Human-readable place name.
    pub place_name: String,
    /// Mapbox feature id.
    pub id: String,
}

/// Errors from Mapbox API calls.
#[derive(Debug, Error)]
pub enum MapboxError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mapbox returned a non-2xx status.
    #[error("Mapbox returned status {code}")]
    Status {
        /// The HTTP status code.
        code: u16,
    },

    /// Response body did not have the expected shape.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// A geocode query matched no features.
    #[error("No results found")]
    NoResults,
}

/// Client for the Mapbox HTTP APIs.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl MapboxClient {
    /// Creates a client against the production Mapbox host.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom host (used by tests).
    #[must_use]
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Forward geocoding: address or place query to coordinates.
    ///
    /// Returns the raw Mapbox response for the proxy endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError`] on a network failure or non-2xx status.
    pub async fn forward_geocode(
        &self,
        query: &str,
        limit: u8,
        country: Option<&str>,
    ) -> Result<Value, MapboxError> {
        let url = format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url,
            urlencoding::encode(query)
        );
        let limit = limit.to_string();
        let mut params = vec![
            ("access_token", self.access_token.as_str()),
            ("limit", limit.as_str()),
        ];
        if let Some(country) = country {
            params.push(("country", country));
        }

        self.get_json(&url, &params).await
    }

    /// Reverse geocoding: coordinates to place features.
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError`] on a network failure or non-2xx status.
    pub async fn reverse_geocode(
        &self,
        longitude: f64,
        latitude: f64,
        types: Option<&str>,
    ) -> Result<Value, MapboxError> {
        let url = format!(
            "{}/geocoding/v5/mapbox.places/{longitude},{latitude}.json",
            self.base_url
        );
        let mut params = vec![("access_token", self.access_token.as_str())];
        if let Some(types) = types {
            params.push(("types", types));
        }

        self.get_json(&url, &params).await
    }

    /// Geocodes an address and reshapes the best match.
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError::NoResults`] if the query matched nothing, and
    /// [`MapboxError`] on a network failure, non-2xx status, or malformed
    /// response.
    pub async fn geocode_address(
        &self,
        address: &str,
        country: Option<&str>,
    ) -> Result<GeocodedPlace, MapboxError> {
        let body = self.forward_geocode(address, 1, country).await?;
        parse_first_feature(&body)
    }

    /// Directions between two `(longitude, latitude)` points.
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError`] on a network failure or non-2xx status.
    pub async fn directions(
        &self,
        start: (f64, f64),
        end: (f64, f64),
        profile: RouteProfile,
    ) -> Result<Value, MapboxError> {
        let url = format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.base_url,
            profile.as_str(),
            start.0,
            start.1,
            end.0,
            end.1
        );
        let params = [
            ("access_token", self.access_token.as_str()),
            ("geometries", "geojson"),
            ("steps", "true"),
            ("overview", "full"),
        ];

        self.get_json(&url, &params).await
    }

    /// Travel-time contour polygons around a point.
    ///
    /// # Errors
    ///
    /// Returns [`MapboxError`] on a network failure or non-2xx status.
    pub async fn isochrone(
        &self,
        longitude: f64,
        latitude: f64,
        contours_minutes: &[u32],
        profile: RouteProfile,
    ) -> Result<Value, MapboxError> {
        let url = format!(
            "{}/isochrone/v1/mapbox/{}/{longitude},{latitude}",
            self.base_url,
            profile.as_str()
        );
        let contours = contours_minutes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");
        let params = [
            ("access_token", self.access_token.as_str()),
            ("contours_minutes", contours.as_str()),
            ("polygons", "true"),
        ];

        self.get_json(&url, &params).await
    }

    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, MapboxError> {
        let resp = self.http.get(url).query(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("Mapbox request to {url} failed with status {status}");
            return Err(MapboxError::Status {
                code: status.as_u16(),
            });
        }

        Ok(resp.json().await?)
    }
}

/// Reshapes the first feature of a geocoding response.
fn parse_first_feature(body: &Value) -> Result<GeocodedPlace, MapboxError> {
    let features = body["features"].as_array().ok_or_else(|| MapboxError::Parse {
        message: "missing features array in geocoding response".to_string(),
    })?;

    let Some(first) = features.first() else {
        return Err(MapboxError::NoResults);
    };

    let coordinates =
        first["geometry"]["coordinates"]
            .as_array()
            .ok_or_else(|| MapboxError::Parse {
                message: "missing geometry.coordinates in feature".to_string(),
            })?;
    let (Some(longitude), Some(latitude)) = (
        coordinates.first().and_then(Value::as_f64),
        coordinates.get(1).and_then(Value::as_f64),
    ) else {
        return Err(MapboxError::Parse {
            message: "geometry.coordinates is not a numeric pair".to_string(),
        });
    };

    let place_name = first["place_name"]
        .as_str()
        .ok_or_else(|| MapboxError::Parse {
            message: "missing place_name in feature".to_string(),
        })?;
    let id = first["id"].as_str().unwrap_or_default();

    Ok(GeocodedPlace {
        longitude,
        latitude,
        place_name: place_name.to_string(),
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_geocoding_feature() {
        let body = serde_json::json!({
            "features": [{
                "id": "place.1234",
                "place_name": "Mumbai, Maharashtra, India",
                "geometry": { "coordinates": [72.8777, 19.0760] }
            }, {
                "id": "place.5678",
                "place_name": "Mumbai Suburban, India",
                "geometry": { "coordinates": [72.9, 19.1] }
            }]
        });

        let place = parse_first_feature(&body).unwrap();
        assert!((place.longitude - 72.8777).abs() < 1e-6);
        assert!((place.latitude - 19.0760).abs() < 1e-6);
        assert_eq!(place.place_name, "Mumbai, Maharashtra, India");
        assert_eq!(place.id, "place.1234");
    }

    #[test]
    fn empty_features_is_no_results() {
        let body = serde_json::json!({ "features": [] });
        assert!(matches!(
            parse_first_feature(&body),
            Err(MapboxError::NoResults)
        ));
    }

    #[test]
    fn malformed_response_is_parse_error() {
        let no_features = serde_json::json!({ "message": "Unauthorized" });
        assert!(matches!(
            parse_first_feature(&no_features),
            Err(MapboxError::Parse { .. })
        ));

        let bad_coords = serde_json::json!({
            "features": [{
                "id": "place.1",
                "place_name": "Somewhere",
                "geometry": { "coordinates": ["east", "north"] }
            }]
        });
        assert!(matches!(
            parse_first_feature(&bad_coords),
            Err(MapboxError::Parse { .. })
        ));
    }

    #[test]
    fn route_profile_parses_known_values() {
        assert_eq!("walking".parse::<RouteProfile>().unwrap(), RouteProfile::Walking);
        assert_eq!("driving".parse::<RouteProfile>().unwrap(), RouteProfile::Driving);
        assert!("teleport".parse::<RouteProfile>().is_err());
    }
}
