#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime incident domain types and the category taxonomy.
//!
//! This crate defines the canonical crime type set, the closed time-of-day
//! and day-of-week enumerations used for aggregation buckets, and the
//! incident / heatmap / statistics / prediction payload shapes shared by the
//! store, analytics, and prediction crates. Wire field names are snake_case
//! to match the dashboard API contract.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;
use uuid::Uuid;

/// Default map center for synthetic data generation (Mumbai).
pub const DEFAULT_CENTER: Location = Location {
    latitude: 19.0760,
    longitude: 72.8777,
};

/// Default scatter radius for synthetic data, in degrees (roughly 10 km).
pub const DEFAULT_RADIUS_DEG: f64 = 0.1;

/// The fixed set of crime types tracked by the service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "title_case")]
pub enum CrimeType {
    /// Unlawful taking of property.
    Theft,
    /// Physical attack on a person.
    Assault,
    /// Unlawful entry to commit a theft or felony.
    Burglary,
    /// Taking property by force or threat.
    Robbery,
    /// Willful destruction or damage of property.
    Vandalism,
    /// Intentional deception for financial gain.
    Fraud,
    /// Possession, sale, or manufacture of controlled substances.
    #[serde(rename = "Drug Offense")]
    DrugOffense,
    /// Theft of a motor vehicle.
    #[serde(rename = "Vehicle Theft")]
    VehicleTheft,
    /// Threatening or unwanted conduct toward a person.
    Harassment,
}

impl CrimeType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Theft,
            Self::Assault,
            Self::Burglary,
            Self::Robbery,
            Self::Vandalism,
            Self::Fraud,
            Self::DrugOffense,
            Self::VehicleTheft,
            Self::Harassment,
        ]
    }
}

/// Time-of-day aggregation bucket.
///
/// A closed enumeration so counter maps can never grow typo keys: the four
/// buckets partition the 24-hour day exactly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimeOfDay {
    /// 06:00 to 11:59.
    Morning,
    /// 12:00 to 17:59.
    Afternoon,
    /// 18:00 to 23:59.
    Evening,
    /// 00:00 to 05:59.
    Night,
}

impl TimeOfDay {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Morning, Self::Afternoon, Self::Evening, Self::Night]
    }

    /// Maps an hour of day (0-23) to its bucket.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            18..=23 => Self::Evening,
            _ => Self::Night,
        }
    }
}

/// Day-of-week aggregation bucket, serialized as the lowercase English name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Risk tier assigned to an area or assessment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees, -90 to 90.
    pub latitude: f64,
    /// Longitude in degrees, -180 to 180.
    pub longitude: f64,
}

/// An inclusive time window for queries and prediction requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Window start.
    pub start_time: DateTime<Utc>,
    /// Window end.
    pub end_time: DateTime<Utc>,
}

/// A single recorded crime incident.
///
/// Incidents are immutable after creation; the working set is generated once
/// per process lifetime by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Crime type from the fixed taxonomy.
    pub crime_type: CrimeType,
    /// Where the incident occurred.
    pub location: Location,
    /// When the incident occurred.
    pub timestamp: DateTime<Utc>,
    /// Severity, 0.0 to 5.0.
    pub severity: f64,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl Incident {
    /// Creates an incident with a fresh id, validating the severity range.
    ///
    /// # Errors
    ///
    /// Returns [`SeverityRangeError`] if `severity` is outside 0.0 to 5.0.
    pub fn new(
        crime_type: CrimeType,
        location: Location,
        timestamp: DateTime<Utc>,
        severity: f64,
        description: Option<String>,
    ) -> Result<Self, SeverityRangeError> {
        if !(0.0..=5.0).contains(&severity) {
            return Err(SeverityRangeError { value: severity });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            crime_type,
            location,
            timestamp,
            severity,
            description,
        })
    }
}

/// Error returned when constructing an [`Incident`] with an out-of-range
/// severity.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid severity value {value}: expected 0.0-5.0")]
pub struct SeverityRangeError {
    /// The invalid severity value that was provided.
    pub value: f64,
}

/// A weighted location used for heatmap density rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    /// Point location.
    pub location: Location,
    /// Render weight, 0.0 to 1.0.
    pub weight: f64,
    /// Source crime type label, or the `"Prediction"` sentinel for
    /// synthetic prediction points.
    pub crime_type: Option<String>,
}

/// Heatmap points plus the weight bounds observed in the set.
///
/// An empty point sequence carries the defined defaults `max_weight = 1.0`,
/// `min_weight = 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapData {
    /// Ordered heatmap points.
    pub points: Vec<HeatmapPoint>,
    /// Largest weight in `points`.
    pub max_weight: f64,
    /// Smallest weight in `points`.
    pub min_weight: f64,
}

/// Aggregate statistics over a filtered incident set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of incidents aggregated.
    pub total_incidents: u64,
    /// Count per crime type; only observed types appear.
    pub by_type: BTreeMap<CrimeType, u64>,
    /// Count per time-of-day bucket; all four keys always present.
    pub by_time_of_day: BTreeMap<TimeOfDay, u64>,
    /// Count per weekday; all seven keys always present.
    pub by_day_of_week: BTreeMap<DayOfWeek, u64>,
    /// Named high-risk areas, independent of the aggregated incidents.
    pub high_risk_areas: Vec<HighRiskArea>,
}

/// A named location carrying a generated risk tier.
///
/// Not derived from live incident data; regenerated on every call by the
/// prediction stub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskArea {
    /// Area name.
    pub name: String,
    /// Area latitude.
    pub latitude: f64,
    /// Area longitude.
    pub longitude: f64,
    /// Assigned risk tier.
    pub risk_level: RiskLevel,
    /// 1-3 crime types predicted for the area.
    pub predicted_crimes: Vec<CrimeType>,
    /// Synthetic recent-incident count, 5 to 30.
    pub recent_incidents: u32,
}

/// One interval bucket of a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesBucket {
    /// Bucket label, e.g. `"14:00"`, `"2026-08-25"`, `"Week 3"`, `"2026-08"`.
    pub time: String,
    /// Incidents whose timestamp falls in the bucket window.
    pub count: u64,
}

/// A single predicted incident likelihood at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted location.
    pub location: Location,
    /// Likelihood, 0.5 to 0.95.
    pub probability: f64,
    /// Predicted crime type.
    pub crime_type: Option<CrimeType>,
    /// Model confidence, 0.6 to 0.9.
    pub confidence: f64,
}

/// Envelope for a batch of predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Generated predictions.
    pub predictions: Vec<PredictionResult>,
    /// When the batch was produced.
    pub generated_at: DateTime<Utc>,
    /// Version of the producing model.
    pub model_version: String,
}

/// A predicted future incident-likely location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Hotspot latitude.
    pub latitude: f64,
    /// Hotspot longitude.
    pub longitude: f64,
    /// Likelihood, 0.5 to 0.95.
    pub probability: f64,
    /// Affected radius in kilometers, 0.2 to 1.0.
    pub radius: f64,
    /// Predicted crime type.
    pub predicted_type: CrimeType,
    /// When the incident is predicted to occur.
    pub predicted_time: DateTime<Utc>,
}

/// The area a risk assessment covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessedArea {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Assessment radius in kilometers.
    pub radius_km: f64,
}

/// Risk assessment report for an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Assessed area.
    pub location: AssessedArea,
    /// Overall risk tier.
    pub risk_level: RiskLevel,
    /// Risk score within the tier's sub-range.
    pub risk_score: f64,
    /// 2-4 crime types common to the area.
    pub common_crimes: Vec<CrimeType>,
    /// Risk multiplier per time-of-day bucket.
    pub time_risk_factors: BTreeMap<TimeOfDay, f64>,
    /// Risk multiplier per weekday.
    pub day_risk_factors: BTreeMap<DayOfWeek, f64>,
    /// Synthetic recent-incident count, 5 to 30.
    pub recent_incidents_count: u32,
    /// Synthetic predicted incidents over the next 24 hours, 1 to 10.
    pub predicted_incidents_next_24h: u32,
    /// Canned safety tips for the assigned tier.
    pub safety_tips: Vec<String>,
    /// When the assessment was produced.
    pub assessment_time: DateTime<Utc>,
}

/// Fixed-shape model accuracy metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Overall accuracy.
    pub overall_accuracy: f64,
    /// Precision.
    pub precision: f64,
    /// Recall.
    pub recall: f64,
    /// F1 score.
    pub f1_score: f64,
    /// When the metrics were computed.
    pub metrics_as_of: DateTime<Utc>,
    /// Version of the evaluated model.
    pub model_version: String,
    /// End of the training data window.
    pub training_data_end_date: DateTime<Utc>,
    /// How the metrics were produced.
    pub evaluation_method: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_partitions_all_hours() {
        let mut counts: BTreeMap<TimeOfDay, u32> = BTreeMap::new();
        for hour in 0..24 {
            *counts.entry(TimeOfDay::from_hour(hour)).or_default() += 1;
        }
        assert_eq!(counts[&TimeOfDay::Morning], 6);
        assert_eq!(counts[&TimeOfDay::Afternoon], 6);
        assert_eq!(counts[&TimeOfDay::Evening], 6);
        assert_eq!(counts[&TimeOfDay::Night], 6);
    }

    #[test]
    fn time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn crime_type_display_matches_catalog_names() {
        assert_eq!(CrimeType::Theft.to_string(), "Theft");
        assert_eq!(CrimeType::DrugOffense.to_string(), "Drug Offense");
        assert_eq!(CrimeType::VehicleTheft.to_string(), "Vehicle Theft");
        assert_eq!(
            "Drug Offense".parse::<CrimeType>().unwrap(),
            CrimeType::DrugOffense
        );
        assert!("Jaywalking".parse::<CrimeType>().is_err());
    }

    #[test]
    fn crime_type_serde_uses_display_names() {
        let json = serde_json::to_string(&CrimeType::VehicleTheft).unwrap();
        assert_eq!(json, "\"Vehicle Theft\"");
        let back: CrimeType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CrimeType::VehicleTheft);
    }

    #[test]
    fn weekday_conversion_is_lowercase_name() {
        assert_eq!(
            DayOfWeek::from(chrono::Weekday::Mon).to_string(),
            "monday"
        );
        assert_eq!(
            DayOfWeek::from(chrono::Weekday::Sun).to_string(),
            "sunday"
        );
        assert_eq!(DayOfWeek::all().len(), 7);
    }

    #[test]
    fn incident_severity_validated_on_construction() {
        let loc = DEFAULT_CENTER;
        let now = Utc::now();
        assert!(Incident::new(CrimeType::Theft, loc, now, 2.5, None).is_ok());
        assert!(Incident::new(CrimeType::Theft, loc, now, 5.1, None).is_err());
        assert!(Incident::new(CrimeType::Theft, loc, now, -0.1, None).is_err());
    }
}
