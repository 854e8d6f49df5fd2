#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Synthetic prediction and risk-assessment generators.
//!
//! Every function here produces plausible-shaped random output with no
//! learned parameters and no access to the incident store. This crate is a
//! documented stand-in for a future inference component: callers depend only
//! on the payload shapes, so a real model can replace it without touching
//! them. It must be replaced, not optimized.
//!
//! All generators take an injected [`Rng`] so tests can seed them.

use chrono::{Duration, Utc};
use crime_pulse_crime_models::{
    AccuracyReport, AssessedArea, CrimeType, DEFAULT_CENTER, DEFAULT_RADIUS_DEG, DayOfWeek,
    HighRiskArea, Hotspot, Location, PredictionResponse, PredictionResult, RiskAssessment,
    RiskLevel, TimeOfDay, TimeRange,
};
use crime_pulse_geo::scatter_offset;
use rand::Rng;
use rand::seq::SliceRandom as _;

/// Version string reported on prediction envelopes and accuracy metrics.
pub const MODEL_VERSION: &str = "0.1.0";

/// Jitter radius for per-location predictions, in degrees (roughly 2 km).
const PREDICTION_JITTER_DEG: f64 = 0.02;

/// The named areas used by the high-risk-area generator.
const NEIGHBORHOODS: &[(&str, f64, f64)] = &[
    ("Andheri East", 19.1136, 72.8697),
    ("Dadar West", 19.0178, 72.8478),
    ("Bandra Station", 19.0596, 72.8295),
    ("Kurla Market", 19.0726, 72.8845),
    ("Juhu Beach", 19.0883, 72.8262),
];

/// Risk tier draw for high-risk areas, biased toward high.
const AREA_RISK_BIAS: &[RiskLevel] = &[
    RiskLevel::High,
    RiskLevel::Medium,
    RiskLevel::High,
    RiskLevel::High,
];

/// Risk tier draw for assessments, biased toward medium.
const ASSESSMENT_RISK_BIAS: &[RiskLevel] = &[
    RiskLevel::Low,
    RiskLevel::Medium,
    RiskLevel::Medium,
    RiskLevel::High,
    RiskLevel::Medium,
];

/// Generates 5-10 prediction points jittered around a location.
///
/// The time range is part of the future-model interface; the stub shapes
/// its output without consulting it.
pub fn predictions<R: Rng + ?Sized>(
    location: Location,
    _time_range: &TimeRange,
    crime_types: Option<&[CrimeType]>,
    rng: &mut R,
) -> PredictionResponse {
    let pool = crime_types.unwrap_or(CrimeType::all());
    let count = rng.gen_range(5..=10);

    let predictions = (0..count)
        .map(|_| {
            let jittered = scatter_offset(location, PREDICTION_JITTER_DEG, rng);
            PredictionResult {
                location: jittered,
                probability: rng.gen_range(0.5..0.95),
                crime_type: pool.choose(rng).copied(),
                confidence: rng.gen_range(0.6..0.9),
            }
        })
        .collect();

    PredictionResponse {
        predictions,
        generated_at: Utc::now(),
        model_version: MODEL_VERSION.to_string(),
    }
}

/// Generates 10-20 hotspots around the default center for the next
/// `hours_ahead` hours, ranked by probability descending.
pub fn hotspots<R: Rng + ?Sized>(
    hours_ahead: u32,
    crime_type: Option<CrimeType>,
    rng: &mut R,
) -> Vec<Hotspot> {
    let now = Utc::now();
    let count = rng.gen_range(10..=20);

    let mut hotspots: Vec<Hotspot> = (0..count)
        .map(|_| {
            let location = scatter_offset(DEFAULT_CENTER, DEFAULT_RADIUS_DEG, rng);
            let predicted_type = crime_type.unwrap_or_else(|| {
                *CrimeType::all()
                    .choose(rng)
                    .expect("crime type taxonomy is non-empty")
            });
            let hours_from_now = if hours_ahead <= 1 {
                1.0
            } else {
                rng.gen_range(1.0..f64::from(hours_ahead))
            };
            #[allow(clippy::cast_possible_truncation)]
            let predicted_time = now + Duration::seconds((hours_from_now * 3600.0) as i64);

            Hotspot {
                latitude: location.latitude,
                longitude: location.longitude,
                probability: rng.gen_range(0.5..0.95),
                radius: rng.gen_range(0.2..1.0),
                predicted_type,
                predicted_time,
            }
        })
        .collect();

    hotspots.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    hotspots
}

/// Regenerates the named high-risk areas with fresh tiers and crime lists.
///
/// Independent of live incident data; sorted with high-tier areas first.
pub fn high_risk_areas<R: Rng + ?Sized>(rng: &mut R) -> Vec<HighRiskArea> {
    let mut areas: Vec<HighRiskArea> = NEIGHBORHOODS
        .iter()
        .map(|&(name, latitude, longitude)| {
            let crime_count = rng.gen_range(1..=3);
            let predicted_crimes = CrimeType::all()
                .choose_multiple(rng, crime_count)
                .copied()
                .collect();

            HighRiskArea {
                name: name.to_string(),
                latitude,
                longitude,
                risk_level: *AREA_RISK_BIAS
                    .choose(rng)
                    .expect("risk bias table is non-empty"),
                predicted_crimes,
                recent_incidents: rng.gen_range(5..=30),
            }
        })
        .collect();

    // Stable sort: high tier first, otherwise original area order.
    areas.sort_by_key(|area| u8::from(area.risk_level != RiskLevel::High));
    areas
}

/// Produces a shaped-random risk assessment for an area.
pub fn risk_assessment<R: Rng + ?Sized>(
    location: Location,
    radius_km: f64,
    rng: &mut R,
) -> RiskAssessment {
    let risk_level = *ASSESSMENT_RISK_BIAS
        .choose(rng)
        .expect("risk bias table is non-empty");
    let risk_score = match risk_level {
        RiskLevel::Low => rng.gen_range(0.1..0.3),
        RiskLevel::Medium => rng.gen_range(0.4..0.7),
        RiskLevel::High => rng.gen_range(0.7..0.9),
    };

    let crime_count = rng.gen_range(2..=4);
    let common_crimes = CrimeType::all()
        .choose_multiple(rng, crime_count)
        .copied()
        .collect();

    let time_risk_factors = TimeOfDay::all()
        .iter()
        .map(|&bucket| {
            let factor = match bucket {
                TimeOfDay::Morning => rng.gen_range(0.1..0.4),
                TimeOfDay::Afternoon => rng.gen_range(0.2..0.5),
                TimeOfDay::Evening => rng.gen_range(0.5..0.8),
                TimeOfDay::Night => rng.gen_range(0.6..0.9),
            };
            (bucket, factor)
        })
        .collect();

    let day_risk_factors = DayOfWeek::all()
        .iter()
        .map(|&day| {
            let factor = match day {
                DayOfWeek::Friday | DayOfWeek::Sunday => rng.gen_range(0.5..0.8),
                DayOfWeek::Saturday => rng.gen_range(0.6..0.9),
                _ => rng.gen_range(0.3..0.6),
            };
            (day, factor)
        })
        .collect();

    RiskAssessment {
        location: AssessedArea {
            latitude: location.latitude,
            longitude: location.longitude,
            radius_km,
        },
        risk_level,
        risk_score,
        common_crimes,
        time_risk_factors,
        day_risk_factors,
        recent_incidents_count: rng.gen_range(5..=30),
        predicted_incidents_next_24h: rng.gen_range(1..=10),
        safety_tips: safety_tips(risk_level)
            .iter()
            .map(|&tip| tip.to_string())
            .collect(),
        assessment_time: Utc::now(),
    }
}

/// Canned safety tips for a risk tier.
#[must_use]
pub const fn safety_tips(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::High => &[
            "Avoid walking alone at night in this area",
            "Keep valuables out of sight",
            "Stay in well-lit and populated areas",
            "Be aware of your surroundings at all times",
        ],
        RiskLevel::Medium => &[
            "Be cautious, especially after dark",
            "Travel in groups when possible",
            "Keep emergency contacts readily available",
        ],
        RiskLevel::Low => &[
            "Exercise normal caution",
            "Report any suspicious activity to authorities",
        ],
    }
}

/// Fixed-shape model accuracy metrics.
///
/// Values are canned until a real model exists to evaluate.
#[must_use]
pub fn accuracy() -> AccuracyReport {
    let now = Utc::now();
    AccuracyReport {
        overall_accuracy: 0.87,
        precision: 0.82,
        recall: 0.79,
        f1_score: 0.80,
        metrics_as_of: now,
        model_version: MODEL_VERSION.to_string(),
        training_data_end_date: now - Duration::days(7),
        evaluation_method: "5-fold cross-validation".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn predictions_count_and_bounds() {
        let range = TimeRange {
            start_time: Utc::now(),
            end_time: Utc::now() + Duration::hours(24),
        };
        for seed in 0..10 {
            let response = predictions(DEFAULT_CENTER, &range, None, &mut rng(seed));
            assert!((5..=10).contains(&response.predictions.len()));
            assert_eq!(response.model_version, MODEL_VERSION);
            for p in &response.predictions {
                assert!((0.5..0.95).contains(&p.probability));
                assert!((0.6..0.9).contains(&p.confidence));
                let dx = p.location.latitude - DEFAULT_CENTER.latitude;
                let dy = p.location.longitude - DEFAULT_CENTER.longitude;
                assert!(dx.hypot(dy) < PREDICTION_JITTER_DEG + 1e-9);
            }
        }
    }

    #[test]
    fn predictions_respect_requested_crime_types() {
        let range = TimeRange {
            start_time: Utc::now(),
            end_time: Utc::now() + Duration::hours(24),
        };
        let wanted = [CrimeType::Robbery, CrimeType::Assault];
        let response = predictions(DEFAULT_CENTER, &range, Some(&wanted), &mut rng(11));
        for p in &response.predictions {
            assert!(wanted.contains(&p.crime_type.unwrap()));
        }
    }

    #[test]
    fn hotspots_are_ranked_by_probability() {
        for seed in 0..10 {
            let spots = hotspots(24, None, &mut rng(seed));
            assert!((10..=20).contains(&spots.len()));
            for pair in spots.windows(2) {
                assert!(pair[0].probability >= pair[1].probability);
            }
            for spot in &spots {
                assert!((0.5..0.95).contains(&spot.probability));
                assert!((0.2..1.0).contains(&spot.radius));
                assert!(spot.predicted_time > Utc::now() - Duration::minutes(1));
            }
        }
    }

    #[test]
    fn hotspots_single_hour_ahead_does_not_panic() {
        let spots = hotspots(1, Some(CrimeType::Theft), &mut rng(5));
        for spot in &spots {
            assert_eq!(spot.predicted_type, CrimeType::Theft);
        }
    }

    #[test]
    fn high_risk_areas_cover_all_neighborhoods_high_first() {
        for seed in 0..10 {
            let areas = high_risk_areas(&mut rng(seed));
            assert_eq!(areas.len(), NEIGHBORHOODS.len());

            let first_non_high = areas
                .iter()
                .position(|a| a.risk_level != RiskLevel::High)
                .unwrap_or(areas.len());
            for area in &areas[first_non_high..] {
                assert_ne!(area.risk_level, RiskLevel::High);
            }

            for area in &areas {
                assert!((1..=3).contains(&area.predicted_crimes.len()));
                assert!((5..=30).contains(&area.recent_incidents));
                let mut unique = area.predicted_crimes.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), area.predicted_crimes.len());
            }
        }
    }

    #[test]
    fn risk_assessment_score_matches_tier() {
        for seed in 0..20 {
            let report = risk_assessment(DEFAULT_CENTER, 1.0, &mut rng(seed));
            let expected = match report.risk_level {
                RiskLevel::Low => 0.1..0.3,
                RiskLevel::Medium => 0.4..0.7,
                RiskLevel::High => 0.7..0.9,
            };
            assert!(expected.contains(&report.risk_score));
            assert!((2..=4).contains(&report.common_crimes.len()));
            assert_eq!(report.time_risk_factors.len(), 4);
            assert_eq!(report.day_risk_factors.len(), 7);
            assert!(!report.safety_tips.is_empty());
            assert!((report.location.radius_km - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn risk_assessment_is_deterministic_for_a_seed() {
        let a = risk_assessment(DEFAULT_CENTER, 2.0, &mut rng(77));
        let b = risk_assessment(DEFAULT_CENTER, 2.0, &mut rng(77));
        assert_eq!(a.risk_level, b.risk_level);
        assert!((a.risk_score - b.risk_score).abs() < 1e-12);
        assert_eq!(a.common_crimes, b.common_crimes);
    }

    #[test]
    fn accuracy_report_is_fixed_shape() {
        let report = accuracy();
        assert!((report.overall_accuracy - 0.87).abs() < 1e-9);
        assert!((report.f1_score - 0.80).abs() < 1e-9);
        assert_eq!(report.model_version, MODEL_VERSION);
        assert!(report.training_data_end_date < report.metrics_as_of);
    }
}
