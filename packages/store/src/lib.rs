#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory incident store.
//!
//! The working set is synthetic: generated once at process start from a
//! [`GeneratorConfig`] and an injected RNG, then never appended to or pruned.
//! The store is an explicitly constructed value owned by the server state
//! (no module-level singleton), so tests build fresh seeded stores for
//! isolation. Reads are pure computations over the immutable collection and
//! need no locking.

use chrono::{DateTime, Duration, Utc};
use crime_pulse_crime_models::{
    CrimeType, DEFAULT_CENTER, DEFAULT_RADIUS_DEG, Incident, Location,
};
use crime_pulse_geo::scatter_offset;
use rand::Rng;
use rand::seq::SliceRandom as _;
use uuid::Uuid;

/// Default number of incidents generated at startup.
pub const DEFAULT_INCIDENT_COUNT: usize = 500;

/// How far back generated timestamps reach, in days.
pub const DEFAULT_SPAN_DAYS: i64 = 30;

/// Configuration for the one-time dataset generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of incidents to generate.
    pub count: usize,
    /// Center of the scatter disc.
    pub center: Location,
    /// Scatter disc radius in degrees.
    pub radius_deg: f64,
    /// Timestamps are uniform over this many days before now.
    pub span_days: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_INCIDENT_COUNT,
            center: DEFAULT_CENTER,
            radius_deg: DEFAULT_RADIUS_DEG,
            span_days: DEFAULT_SPAN_DAYS,
        }
    }
}

/// Filter and pagination parameters for [`IncidentStore::query`].
///
/// Filters are conjunctive; `None` means "no constraint". Pagination is
/// applied after sorting, and an `offset` past the end of the result yields
/// an empty list rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentQuery {
    /// Keep incidents with `timestamp >= from`.
    pub from: Option<DateTime<Utc>>,
    /// Keep incidents with `timestamp <= to`.
    pub to: Option<DateTime<Utc>>,
    /// Keep incidents of exactly this type.
    pub crime_type: Option<CrimeType>,
    /// Maximum number of results.
    pub limit: usize,
    /// Number of sorted results to skip.
    pub offset: usize,
}

impl Default for IncidentQuery {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            crime_type: None,
            limit: 100,
            offset: 0,
        }
    }
}

/// Process-lifetime collection of synthetic incidents.
#[derive(Debug, Clone)]
pub struct IncidentStore {
    incidents: Vec<Incident>,
}

impl IncidentStore {
    /// Generates the working set.
    ///
    /// Locations are scattered with a uniform-distance draw (angle uniform,
    /// distance uniform in degrees — deliberately not the squared-radius
    /// sampler in `crime_pulse_geo::points_in_radius`), timestamps are
    /// uniform over the trailing `span_days`, crime types uniform over the
    /// taxonomy, and severities uniform in 1.0 to 5.0.
    pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Self {
        let now = Utc::now();
        #[allow(clippy::cast_precision_loss)]
        let span_seconds = config.span_days as f64 * 86_400.0;

        let incidents = (0..config.count)
            .map(|_| {
                let location = scatter_offset(config.center, config.radius_deg, rng);
                let seconds_ago = rng.gen_range(0.0..span_seconds);
                #[allow(clippy::cast_possible_truncation)]
                let timestamp = now - Duration::seconds(seconds_ago as i64);
                let crime_type = *CrimeType::all()
                    .choose(rng)
                    .expect("crime type taxonomy is non-empty");
                let severity = rng.gen_range(1.0..=5.0);

                Incident {
                    id: Uuid::new_v4(),
                    crime_type,
                    location,
                    timestamp,
                    severity,
                    description: Some(format!(
                        "Mock {} incident",
                        crime_type.to_string().to_lowercase()
                    )),
                }
            })
            .collect();

        Self { incidents }
    }

    /// Builds a store from pre-made incidents. Used by tests that need
    /// exact timestamps.
    #[must_use]
    pub fn from_incidents(incidents: Vec<Incident>) -> Self {
        Self { incidents }
    }

    /// Filters, sorts (timestamp descending, stable), and paginates.
    #[must_use]
    pub fn query(&self, query: &IncidentQuery) -> Vec<Incident> {
        let mut matched: Vec<&Incident> = self
            .incidents
            .iter()
            .filter(|incident| {
                query.from.is_none_or(|from| incident.timestamp >= from)
                    && query.to.is_none_or(|to| incident.timestamp <= to)
                    && query
                        .crime_type
                        .is_none_or(|t| incident.crime_type == t)
            })
            .collect();

        // Stable sort keeps insertion order for equal timestamps, making
        // repeated queries deterministic.
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        matched
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect()
    }

    /// Number of incidents in the working set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Whether the working set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// The full working set.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn seeded_store(count: usize) -> IncidentStore {
        let mut rng = StdRng::seed_from_u64(99);
        IncidentStore::generate(
            &GeneratorConfig {
                count,
                ..GeneratorConfig::default()
            },
            &mut rng,
        )
    }

    #[test]
    fn generates_requested_count_with_valid_fields() {
        let store = seeded_store(500);
        assert_eq!(store.len(), 500);

        let now = Utc::now();
        let oldest = now - Duration::days(DEFAULT_SPAN_DAYS);
        for incident in store.incidents() {
            assert!((1.0..=5.0).contains(&incident.severity));
            assert!(incident.timestamp <= now);
            assert!(incident.timestamp >= oldest - Duration::minutes(1));
            let dx = incident.location.latitude - DEFAULT_CENTER.latitude;
            let dy = incident.location.longitude - DEFAULT_CENTER.longitude;
            assert!(dx.hypot(dy) < DEFAULT_RADIUS_DEG + 1e-9);
            assert!(incident.description.is_some());
        }
    }

    #[test]
    fn query_filters_by_type_and_respects_limit() {
        let store = seeded_store(500);
        let results = store.query(&IncidentQuery {
            crime_type: Some(CrimeType::Theft),
            limit: 10,
            ..IncidentQuery::default()
        });

        assert!(results.len() <= 10);
        assert!(!results.is_empty());
        for incident in &results {
            assert_eq!(incident.crime_type, CrimeType::Theft);
        }
        for pair in results.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn query_time_range_is_conjunctive_and_inclusive() {
        let store = seeded_store(300);
        let now = Utc::now();
        let from = now - Duration::days(10);
        let to = now - Duration::days(2);

        let results = store.query(&IncidentQuery {
            from: Some(from),
            to: Some(to),
            limit: 1000,
            ..IncidentQuery::default()
        });
        for incident in &results {
            assert!(incident.timestamp >= from && incident.timestamp <= to);
        }
    }

    #[test]
    fn query_is_idempotent() {
        let store = seeded_store(200);
        let query = IncidentQuery {
            limit: 50,
            offset: 25,
            ..IncidentQuery::default()
        };
        assert_eq!(store.query(&query), store.query(&query));
    }

    #[test]
    fn offset_past_end_yields_empty() {
        let store = seeded_store(20);
        let results = store.query(&IncidentQuery {
            offset: 1000,
            ..IncidentQuery::default()
        });
        assert!(results.is_empty());
    }

    #[test]
    fn pagination_pages_do_not_overlap() {
        let store = seeded_store(100);
        let first = store.query(&IncidentQuery {
            limit: 30,
            offset: 0,
            ..IncidentQuery::default()
        });
        let second = store.query(&IncidentQuery {
            limit: 30,
            offset: 30,
            ..IncidentQuery::default()
        });
        for a in &first {
            assert!(second.iter().all(|b| b.id != a.id));
        }
    }
}
