#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Distance-ranked parking recommendations.
//!
//! Pure functions over an in-memory spot collection: no I/O, no shared
//! state. Ranking prefers a tight 1 km "comfort radius" around the user and
//! falls back to the nearest available spots, however far, whenever nothing
//! is close. Calling [`recommend`] repeatedly on the same inputs yields
//! identical results.

use where2park_spot_models::{Fee, GeoPoint, ParkingSpot, SpotStatus, SpotType};

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Preferred search distance in kilometers, inclusive. Spots at or under
/// this distance are ranked as a group before any farther spot is
/// considered.
pub const COMFORT_RADIUS_KM: f64 = 1.0;

/// Whether a distance falls inside the comfort radius. The boundary is
/// inclusive: a spot at exactly [`COMFORT_RADIUS_KM`] counts as near.
#[must_use]
pub fn within_comfort_radius(distance_km: f64) -> bool {
    distance_km <= COMFORT_RADIUS_KM
}

/// Great-circle distance between two coordinates in kilometers (haversine).
///
/// Symmetric, and zero for identical points.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Candidate restriction applied before ranking.
///
/// Empty lists mean "no restriction on that field". The default filter
/// keeps only `available` spots, which is what the booking flow wants.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotFilter {
    /// Statuses to keep. Empty keeps every status.
    pub statuses: Vec<SpotStatus>,
    /// Facility types to keep. Empty keeps every type.
    pub types: Vec<SpotType>,
    /// Fee class to keep, if any.
    pub fee: Option<Fee>,
}

impl Default for SpotFilter {
    fn default() -> Self {
        Self {
            statuses: vec![SpotStatus::Available],
            types: Vec::new(),
            fee: None,
        }
    }
}

impl SpotFilter {
    /// Returns `true` if the spot passes every active restriction.
    #[must_use]
    pub fn matches(&self, spot: &ParkingSpot) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&spot.status))
            && (self.types.is_empty() || self.types.contains(&spot.spot_type))
            && self.fee.is_none_or(|fee| fee == spot.fee)
    }
}

/// Options for [`recommend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendOptions {
    /// Maximum number of spots to return.
    pub count: usize,
    /// Candidate restriction; defaults to available spots only.
    pub filter: SpotFilter,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            count: 5,
            filter: SpotFilter::default(),
        }
    }
}

/// A recommended spot annotated with its distance from the user.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSpot {
    /// The recommended spot.
    pub spot: ParkingSpot,
    /// Great-circle distance from the user's position in kilometers.
    pub distance_km: f64,
}

impl RankedSpot {
    /// Human-readable distance, e.g. `"0.4 km away"`.
    #[must_use]
    pub fn distance_text(&self) -> String {
        format!("{:.1} km away", self.distance_km)
    }
}

/// Ranks spots near `user`, preferring the comfort radius.
///
/// Filters the collection, annotates each candidate with its haversine
/// distance, and sorts ascending. Ties keep their input order (stable
/// sort). If any candidate lies within [`COMFORT_RADIUS_KM`] (inclusive),
/// only those candidates are returned, up to `options.count`; otherwise the
/// nearest candidates are returned regardless of distance. The result is
/// empty only when no spot passes the filter at all.
#[must_use]
pub fn recommend(
    user: GeoPoint,
    spots: &[ParkingSpot],
    options: &RecommendOptions,
) -> Vec<RankedSpot> {
    let mut candidates: Vec<RankedSpot> = spots
        .iter()
        .filter(|spot| options.filter.matches(spot))
        .map(|spot| RankedSpot {
            distance_km: haversine_km(user, spot.location()),
            spot: spot.clone(),
        })
        .collect();

    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let near_count = candidates
        .iter()
        .take_while(|ranked| within_comfort_radius(ranked.distance_km))
        .count();

    if near_count > 0 {
        candidates.truncate(near_count.min(options.count));
    } else {
        if !candidates.is_empty() {
            log::debug!(
                "no spots within {COMFORT_RADIUS_KM} km, falling back to nearest of {}",
                candidates.len()
            );
        }
        candidates.truncate(options.count);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use where2park_spot_models::{SpotAccess, SpotId};

    const CITY_CENTER: GeoPoint = GeoPoint {
        lat: 12.9716,
        lng: 77.5946,
    };

    fn spot(id: &str, lat: f64, lng: f64, status: SpotStatus) -> ParkingSpot {
        ParkingSpot {
            id: SpotId::from(id),
            name: format!("Spot {id}"),
            lat,
            lng,
            spot_type: SpotType::Surface,
            fee: Fee::No,
            access: SpotAccess::Permissive,
            status,
            added_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn distance_is_symmetric_and_zero_at_identity() {
        let a = CITY_CENTER;
        let b = GeoPoint {
            lat: 13.05,
            lng: 77.55,
        };
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-12);
        assert!(haversine_km(a, a).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_matches_known_value() {
        // City center to Orion Mall is roughly 12.3 km.
        let orion = GeoPoint {
            lat: 13.0827,
            lng: 77.5877,
        };
        let d = haversine_km(CITY_CENTER, orion);
        assert!((d - 12.36).abs() < 0.1, "got {d}");
    }

    #[test]
    fn near_spot_excludes_far_spot() {
        let spots = vec![
            spot("1", 12.9716, 77.5946, SpotStatus::Available),
            spot("2", 13.05, 77.55, SpotStatus::Available),
        ];
        let result = recommend(CITY_CENTER, &spots, &RecommendOptions::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spot.id, SpotId::from("1"));
    }

    #[test]
    fn falls_back_to_nearest_when_nothing_is_near() {
        let spots = vec![spot("2", 13.05, 77.55, SpotStatus::Available)];
        let result = recommend(CITY_CENTER, &spots, &RecommendOptions::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spot.id, SpotId::from("2"));
        assert!(result[0].distance_km > COMFORT_RADIUS_KM);
    }

    #[test]
    fn only_available_spots_are_returned_by_default() {
        let spots = vec![
            spot("1", 12.9716, 77.5946, SpotStatus::Booked),
            spot("2", 12.9720, 77.5950, SpotStatus::Occupied),
            spot("3", 12.9730, 77.5960, SpotStatus::Available),
        ];
        let result = recommend(CITY_CENTER, &spots, &RecommendOptions::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spot.id, SpotId::from("3"));
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        assert!(recommend(CITY_CENTER, &[], &RecommendOptions::default()).is_empty());
    }

    #[test]
    fn count_caps_the_result() {
        let spots: Vec<ParkingSpot> = (0..10)
            .map(|i| {
                let offset = f64::from(i) * 0.0005;
                spot(
                    &i.to_string(),
                    12.9716 + offset,
                    77.5946,
                    SpotStatus::Available,
                )
            })
            .collect();
        let options = RecommendOptions {
            count: 3,
            ..RecommendOptions::default()
        };
        let result = recommend(CITY_CENTER, &spots, &options);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn count_larger_than_candidates_returns_all() {
        let spots = vec![
            spot("1", 12.9716, 77.5946, SpotStatus::Available),
            spot("2", 12.9720, 77.5950, SpotStatus::Available),
        ];
        let options = RecommendOptions {
            count: 50,
            ..RecommendOptions::default()
        };
        assert_eq!(recommend(CITY_CENTER, &spots, &options).len(), 2);
    }

    #[test]
    fn result_is_sorted_ascending_by_distance() {
        let spots = vec![
            spot("far", 13.05, 77.55, SpotStatus::Available),
            spot("farther", 13.10, 77.50, SpotStatus::Available),
            spot("farthest", 13.20, 77.45, SpotStatus::Available),
        ];
        let result = recommend(CITY_CENTER, &spots, &RecommendOptions::default());
        assert_eq!(result.len(), 3);
        assert!(result[0].distance_km <= result[1].distance_km);
        assert!(result[1].distance_km <= result[2].distance_km);
    }

    #[test]
    fn comfort_radius_boundary_is_inclusive() {
        assert!(within_comfort_radius(COMFORT_RADIUS_KM));
        assert!(within_comfort_radius(0.999));
        assert!(!within_comfort_radius(COMFORT_RADIUS_KM + 1e-9));
    }

    #[test]
    fn never_mixes_near_and_far() {
        let spots = vec![
            spot("near-1", 12.9718, 77.5948, SpotStatus::Available),
            spot("near-2", 12.9740, 77.5950, SpotStatus::Available),
            spot("far", 13.05, 77.55, SpotStatus::Available),
        ];
        let result = recommend(CITY_CENTER, &spots, &RecommendOptions::default());
        assert_eq!(result.len(), 2);
        assert!(
            result
                .iter()
                .all(|ranked| ranked.distance_km <= COMFORT_RADIUS_KM)
        );
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let spots = vec![
            spot("first", 12.9720, 77.5946, SpotStatus::Available),
            spot("second", 12.9720, 77.5946, SpotStatus::Available),
        ];
        let result = recommend(CITY_CENTER, &spots, &RecommendOptions::default());
        assert_eq!(result[0].spot.id, SpotId::from("first"));
        assert_eq!(result[1].spot.id, SpotId::from("second"));
    }

    #[test]
    fn type_and_fee_filters_restrict_candidates() {
        let mut underground = spot("u", 12.9718, 77.5948, SpotStatus::Available);
        underground.spot_type = SpotType::Underground;
        underground.fee = Fee::Yes;
        let surface = spot("s", 12.9719, 77.5949, SpotStatus::Available);

        let spots = vec![underground, surface];
        let options = RecommendOptions {
            filter: SpotFilter {
                types: vec![SpotType::Underground],
                ..SpotFilter::default()
            },
            ..RecommendOptions::default()
        };
        let result = recommend(CITY_CENTER, &spots, &options);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spot.id, SpotId::from("u"));

        let free_only = RecommendOptions {
            filter: SpotFilter {
                fee: Some(Fee::No),
                ..SpotFilter::default()
            },
            ..RecommendOptions::default()
        };
        let result = recommend(CITY_CENTER, &spots, &free_only);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spot.id, SpotId::from("s"));
    }

    #[test]
    fn distance_text_formats_one_decimal() {
        let ranked = RankedSpot {
            spot: spot("1", 12.9716, 77.5946, SpotStatus::Available),
            distance_km: 1.2345,
        };
        assert_eq!(ranked.distance_text(), "1.2 km away");
    }
}
