#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Aggregation engine over filtered incident sets.
//!
//! Consumes incidents already filtered by the store and produces heatmap
//! weights, per-category / time-of-day / weekday counters, and
//! interval-bucketed time series. All functions are pure: randomness
//! (high-risk areas, prediction points) is generated by the caller and
//! passed in, which keeps every aggregate deterministic and unit-testable.
//!
//! Interval strings are validated once, at the API boundary, by parsing
//! into [`Interval`]; an unknown interval is an invalid-argument error
//! everywhere rather than an empty result.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike as _, Duration, Timelike as _, Utc};
use crime_pulse_crime_models::{
    DayOfWeek, HeatmapData, HeatmapPoint, HighRiskArea, Hotspot, Incident, Location, Statistics,
    TimeOfDay, TimeSeriesBucket,
};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Heatmap point label for synthetic prediction points.
pub const PREDICTION_LABEL: &str = "Prediction";

/// Time-bucket granularity for a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Interval {
    Hour,
    Day,
    Week,
    Month,
}

impl Interval {
    /// Step width of one bucket. A month is approximated as 30 days for
    /// stepping purposes; month *bucketing* uses calendar keys instead.
    #[must_use]
    pub fn step(self) -> Duration {
        match self {
            Self::Hour => Duration::hours(1),
            Self::Day => Duration::days(1),
            Self::Week => Duration::weeks(1),
            Self::Month => Duration::days(30),
        }
    }
}

impl FromStr for Interval {
    type Err = UnknownIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(UnknownIntervalError {
                value: other.to_string(),
            }),
        }
    }
}

/// Error returned for an interval string outside `hour|day|week|month`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported interval {value:?}: expected hour, day, week, or month")]
pub struct UnknownIntervalError {
    /// The rejected interval string.
    pub value: String,
}

/// Maps incidents to heatmap points, appending any synthetic prediction
/// hotspots supplied by the caller.
///
/// Incident weight is `severity / 5.0`; prediction weight is the hotspot
/// probability, labeled with the [`PREDICTION_LABEL`] sentinel. An empty
/// point set reports the defined defaults `min_weight = 0.0`,
/// `max_weight = 1.0`.
#[must_use]
pub fn heatmap(incidents: &[Incident], predicted: &[Hotspot]) -> HeatmapData {
    let mut points: Vec<HeatmapPoint> = incidents
        .iter()
        .map(|incident| HeatmapPoint {
            location: incident.location,
            weight: incident.severity / 5.0,
            crime_type: Some(incident.crime_type.to_string()),
        })
        .collect();

    points.extend(predicted.iter().map(|hotspot| HeatmapPoint {
        location: Location {
            latitude: hotspot.latitude,
            longitude: hotspot.longitude,
        },
        weight: hotspot.probability,
        crime_type: Some(PREDICTION_LABEL.to_string()),
    }));

    let (min_weight, max_weight) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), point| (min.min(point.weight), max.max(point.weight)),
    );

    if points.is_empty() {
        HeatmapData {
            points,
            max_weight: 1.0,
            min_weight: 0.0,
        }
    } else {
        HeatmapData {
            points,
            max_weight,
            min_weight,
        }
    }
}

/// Single-pass aggregate counters over a filtered incident set.
///
/// `high_risk_areas` is generated independently of the incidents (see the
/// prediction crate) and passed through untouched.
#[must_use]
pub fn statistics(incidents: &[Incident], high_risk_areas: Vec<HighRiskArea>) -> Statistics {
    let mut by_type = BTreeMap::new();
    let mut by_time_of_day: BTreeMap<TimeOfDay, u64> =
        TimeOfDay::all().iter().map(|&t| (t, 0)).collect();
    let mut by_day_of_week: BTreeMap<DayOfWeek, u64> =
        DayOfWeek::all().iter().map(|&d| (d, 0)).collect();

    for incident in incidents {
        *by_type.entry(incident.crime_type).or_insert(0) += 1;
        *by_time_of_day
            .entry(TimeOfDay::from_hour(incident.timestamp.hour()))
            .or_insert(0) += 1;
        *by_day_of_week
            .entry(DayOfWeek::from(incident.timestamp.weekday()))
            .or_insert(0) += 1;
    }

    Statistics {
        total_incidents: incidents.len() as u64,
        by_type,
        by_time_of_day,
        by_day_of_week,
        high_risk_areas,
    }
}

/// Buckets incidents into an interval-labeled time series.
///
/// - [`Interval::Hour`]: exactly 24 buckets covering the 24 hours ending at
///   `end`, labeled `"HH:00"`.
/// - [`Interval::Day`]: one bucket per calendar day from `start` to `end`
///   inclusive, labeled `"YYYY-MM-DD"`.
/// - [`Interval::Week`]: `days/7 + 1` seven-day buckets labeled `"Week N"`.
/// - [`Interval::Month`]: buckets keyed by the calendar `"YYYY-MM"` of each
///   incident; only months with at least one incident appear, in ascending
///   key order.
///
/// Window membership is `[bucket_start, bucket_end)` throughout.
#[must_use]
pub fn time_series(
    incidents: &[Incident],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Interval,
) -> Vec<TimeSeriesBucket> {
    let count_in = |from: DateTime<Utc>, to: DateTime<Utc>| -> u64 {
        incidents
            .iter()
            .filter(|i| i.timestamp >= from && i.timestamp < to)
            .count() as u64
    };

    match interval {
        Interval::Hour => (0..24)
            .map(|hour| {
                let bucket_start = end - Duration::hours(24 - hour);
                let bucket_end = bucket_start + Duration::hours(1);
                TimeSeriesBucket {
                    time: bucket_start.format("%H:00").to_string(),
                    count: count_in(bucket_start, bucket_end),
                }
            })
            .collect(),
        Interval::Day => {
            let days = (end - start).num_days().max(0) + 1;
            (0..days)
                .map(|day| {
                    let bucket_start = start + Duration::days(day);
                    let bucket_end = bucket_start + Duration::days(1);
                    TimeSeriesBucket {
                        time: bucket_start.format("%Y-%m-%d").to_string(),
                        count: count_in(bucket_start, bucket_end),
                    }
                })
                .collect()
        }
        Interval::Week => {
            let weeks = (end - start).num_days().max(0) / 7 + 1;
            (0..weeks)
                .map(|week| {
                    let bucket_start = start + Duration::weeks(week);
                    let bucket_end = bucket_start + Duration::weeks(1);
                    TimeSeriesBucket {
                        time: format!("Week {}", week + 1),
                        count: count_in(bucket_start, bucket_end),
                    }
                })
                .collect()
        }
        Interval::Month => {
            let mut months: BTreeMap<String, u64> = BTreeMap::new();
            for incident in incidents {
                let key = incident.timestamp.format("%Y-%m").to_string();
                *months.entry(key).or_insert(0) += 1;
            }
            months
                .into_iter()
                .map(|(time, count)| TimeSeriesBucket { time, count })
                .collect()
        }
    }
}

/// Generates the sequence of bucket-start instants from `start` to `end`
/// inclusive, stepping by the interval width.
#[must_use]
pub fn date_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Interval,
) -> Vec<DateTime<Utc>> {
    let step = interval.step();
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += step;
    }
    dates
}

/// Formats an instant for chart display at the given granularity.
#[must_use]
pub fn bucket_label(dt: DateTime<Utc>, interval: Interval) -> String {
    match interval {
        Interval::Hour => dt.format("%H:00").to_string(),
        Interval::Day => dt.format("%Y-%m-%d").to_string(),
        Interval::Week => format!("Week {}", dt.iso_week().week()),
        Interval::Month => dt.format("%b %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use crime_pulse_crime_models::CrimeType;
    use uuid::Uuid;

    use super::*;

    fn incident(crime_type: CrimeType, timestamp: DateTime<Utc>, severity: f64) -> Incident {
        Incident {
            id: Uuid::new_v4(),
            crime_type,
            location: Location {
                latitude: 19.0760,
                longitude: 72.8777,
            },
            timestamp,
            severity,
            description: None,
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn heatmap_weights_are_bounded_by_min_and_max() {
        let incidents = vec![
            incident(CrimeType::Theft, at(2026, 8, 1, 10), 1.0),
            incident(CrimeType::Assault, at(2026, 8, 2, 11), 5.0),
            incident(CrimeType::Fraud, at(2026, 8, 3, 12), 2.5),
        ];
        let data = heatmap(&incidents, &[]);

        assert_eq!(data.points.len(), 3);
        assert!((data.min_weight - 0.2).abs() < 1e-9);
        assert!((data.max_weight - 1.0).abs() < 1e-9);
        for point in &data.points {
            assert!(data.min_weight <= point.weight && point.weight <= data.max_weight);
        }
    }

    #[test]
    fn heatmap_empty_input_uses_defined_defaults() {
        let data = heatmap(&[], &[]);
        assert!(data.points.is_empty());
        assert!((data.min_weight - 0.0).abs() < 1e-9);
        assert!((data.max_weight - 1.0).abs() < 1e-9);
    }

    #[test]
    fn heatmap_appends_prediction_points_with_sentinel_label() {
        let incidents = vec![incident(CrimeType::Theft, at(2026, 8, 1, 10), 2.0)];
        let hotspots = vec![Hotspot {
            latitude: 19.1,
            longitude: 72.9,
            probability: 0.9,
            radius: 0.5,
            predicted_type: CrimeType::Robbery,
            predicted_time: at(2026, 8, 2, 0),
        }];
        let data = heatmap(&incidents, &hotspots);

        assert_eq!(data.points.len(), 2);
        let prediction = &data.points[1];
        assert_eq!(prediction.crime_type.as_deref(), Some(PREDICTION_LABEL));
        assert!((prediction.weight - 0.9).abs() < 1e-9);
        assert!((data.max_weight - 0.9).abs() < 1e-9);
    }

    #[test]
    fn statistics_counters_sum_to_total() {
        let incidents = vec![
            incident(CrimeType::Theft, at(2026, 8, 3, 7), 2.0), // monday morning
            incident(CrimeType::Theft, at(2026, 8, 3, 13), 2.0), // monday afternoon
            incident(CrimeType::Assault, at(2026, 8, 8, 20), 3.0), // saturday evening
            incident(CrimeType::Fraud, at(2026, 8, 9, 2), 1.0), // sunday night
        ];
        let stats = statistics(&incidents, Vec::new());

        assert_eq!(stats.total_incidents, 4);
        assert_eq!(stats.by_type.values().sum::<u64>(), 4);
        assert_eq!(stats.by_time_of_day.values().sum::<u64>(), 4);
        assert_eq!(stats.by_day_of_week.values().sum::<u64>(), 4);

        assert_eq!(stats.by_type[&CrimeType::Theft], 2);
        assert_eq!(stats.by_time_of_day[&TimeOfDay::Morning], 1);
        assert_eq!(stats.by_day_of_week[&DayOfWeek::Monday], 2);
        // Closed-enum maps always carry every key.
        assert_eq!(stats.by_time_of_day.len(), 4);
        assert_eq!(stats.by_day_of_week.len(), 7);
        assert_eq!(stats.by_day_of_week[&DayOfWeek::Friday], 0);
    }

    #[test]
    fn day_series_emits_one_bucket_per_day() {
        let start = at(2026, 8, 1, 0);
        let end = at(2026, 8, 7, 0);
        let incidents = vec![
            incident(CrimeType::Theft, at(2026, 8, 1, 5), 2.0),
            incident(CrimeType::Theft, at(2026, 8, 3, 5), 2.0),
            incident(CrimeType::Theft, at(2026, 8, 3, 9), 2.0),
        ];

        let series = time_series(&incidents, start, end, Interval::Day);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].time, "2026-08-01");
        assert_eq!(series[0].count, 1);
        assert_eq!(series[2].count, 2);
        assert_eq!(series.iter().map(|b| b.count).sum::<u64>(), 3);
    }

    #[test]
    fn hour_series_is_exactly_24_buckets_ending_at_end() {
        let end = at(2026, 8, 10, 18);
        let incidents = vec![
            incident(CrimeType::Theft, at(2026, 8, 10, 17), 2.0),
            incident(CrimeType::Theft, at(2026, 8, 9, 17), 2.0), // outside window
        ];

        let series = time_series(&incidents, end - Duration::days(1), end, Interval::Hour);
        assert_eq!(series.len(), 24);
        assert_eq!(series[0].time, "18:00");
        assert_eq!(series[23].time, "17:00");
        assert_eq!(series.iter().map(|b| b.count).sum::<u64>(), 1);
        assert_eq!(series[23].count, 1);
    }

    #[test]
    fn week_series_bucket_count_and_labels() {
        let start = at(2026, 7, 1, 0);
        let end = at(2026, 7, 21, 0); // 20 days -> 2 full weeks + remainder
        let incidents = vec![
            incident(CrimeType::Theft, at(2026, 7, 2, 5), 2.0),
            incident(CrimeType::Theft, at(2026, 7, 10, 5), 2.0),
        ];

        let series = time_series(&incidents, start, end, Interval::Week);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].time, "Week 1");
        assert_eq!(series[0].count, 1);
        assert_eq!(series[1].count, 1);
        assert_eq!(series[2].count, 0);
    }

    #[test]
    fn month_series_skips_empty_months_and_sorts_keys() {
        let incidents = vec![
            incident(CrimeType::Theft, at(2026, 8, 1, 5), 2.0),
            incident(CrimeType::Theft, at(2026, 5, 1, 5), 2.0),
            incident(CrimeType::Theft, at(2026, 5, 20, 5), 2.0),
        ];

        let series = time_series(
            &incidents,
            at(2026, 1, 1, 0),
            at(2026, 12, 31, 0),
            Interval::Month,
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].time, "2026-05");
        assert_eq!(series[0].count, 2);
        assert_eq!(series[1].time, "2026-08");
        for pair in series.windows(2) {
            assert!(pair[0].time < pair[1].time);
            assert!(pair[0].count > 0 && pair[1].count > 0);
        }
    }

    #[test]
    fn interval_parsing_rejects_unknown_values() {
        assert_eq!("day".parse::<Interval>().unwrap(), Interval::Day);
        assert_eq!("month".parse::<Interval>().unwrap(), Interval::Month);
        let err = "fortnight".parse::<Interval>().unwrap_err();
        assert_eq!(err.value, "fortnight");
    }

    #[test]
    fn date_range_steps_inclusively() {
        let start = at(2026, 8, 1, 0);
        let dates = date_range(start, at(2026, 8, 5, 0), Interval::Day);
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], start);
        assert_eq!(dates[4], at(2026, 8, 5, 0));

        let hours = date_range(start, start + Duration::hours(3), Interval::Hour);
        assert_eq!(hours.len(), 4);
    }

    #[test]
    fn bucket_labels_per_interval() {
        let dt = at(2026, 8, 10, 14);
        assert_eq!(bucket_label(dt, Interval::Hour), "14:00");
        assert_eq!(bucket_label(dt, Interval::Day), "2026-08-10");
        assert_eq!(bucket_label(dt, Interval::Month), "Aug 2026");
        assert!(bucket_label(dt, Interval::Week).starts_with("Week "));
    }
}
