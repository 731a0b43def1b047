#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! User location resolution.
//!
//! Geolocation is a one-shot external collaborator that may fail; failure
//! never surfaces to callers. [`resolve_or_default`] substitutes the fixed
//! Bengaluru city-center coordinate instead, matching the behavior users
//! see when they deny the browser location prompt.

use thiserror::Error;
use where2park_spot_models::GeoPoint;

/// Fallback coordinate: Bengaluru city center.
pub const BENGALURU_CENTER: GeoPoint = GeoPoint {
    lat: 12.9716,
    lng: 77.5946,
};

/// Errors a location provider may report.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The user denied the location request.
    #[error("location permission denied")]
    PermissionDenied,

    /// The provider could not produce a position.
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// One-shot source of the user's current position.
pub trait LocationProvider {
    /// Resolves the user's current position.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError`] if no position can be produced; callers are
    /// expected to fall back via [`resolve_or_default`].
    fn current_position(&self) -> Result<GeoPoint, LocateError>;
}

/// Provider that always reports a fixed position. Used for headless
/// operation and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoPoint);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<GeoPoint, LocateError> {
        Ok(self.0)
    }
}

/// Resolves the user position, substituting [`BENGALURU_CENTER`] on any
/// failure. Never errors.
pub fn resolve_or_default(provider: &dyn LocationProvider) -> GeoPoint {
    match provider.current_position() {
        Ok(position) => position,
        Err(e) => {
            log::info!("location unavailable ({e}), using Bengaluru center");
            BENGALURU_CENTER
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl LocationProvider for Failing {
        fn current_position(&self) -> Result<GeoPoint, LocateError> {
            Err(LocateError::PermissionDenied)
        }
    }

    #[test]
    fn resolves_provider_position() {
        let provider = FixedLocation(GeoPoint {
            lat: 13.0,
            lng: 77.6,
        });
        let position = resolve_or_default(&provider);
        assert!((position.lat - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn falls_back_to_city_center_on_failure() {
        let position = resolve_or_default(&Failing);
        assert!((position.lat - BENGALURU_CENTER.lat).abs() < f64::EPSILON);
        assert!((position.lng - BENGALURU_CENTER.lng).abs() < f64::EPSILON);
    }
}
