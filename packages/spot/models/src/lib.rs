#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Parking spot entity types shared across the where2park system.
//!
//! This crate defines the canonical [`ParkingSpot`] record and its
//! categorical field types. Every other package (recommendation, store,
//! reconciliation, API) operates on these types; normalization happens once
//! at the ingestion boundary, never downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Opaque, stable identifier of a parking spot.
///
/// Unique within any single collection snapshot. Identity never changes
/// across snapshots even when every other field is replaced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(String);

impl SpotId {
    /// Creates a spot ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpotId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for SpotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Occupancy status of a parking spot.
///
/// The only field mutated in normal operation. No other value may ever be
/// written by any core operation.
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
pub enum SpotStatus {
    /// Free for anyone to take.
    Available,
    /// Physically taken by a vehicle.
    Occupied,
    /// Claimed through the app but not yet occupied.
    Booked,
}

impl SpotStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Available, Self::Occupied, Self::Booked]
    }

    /// Returns `true` for [`Self::Available`].
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Physical type of a parking facility.
///
/// An open set: the known tags get their own variants, anything else passes
/// through unchanged via [`SpotType::Other`] so community-supplied data is
/// never rejected for an unrecognized type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpotType {
    /// Ground-level open lot.
    Surface,
    /// Below-ground garage.
    Underground,
    /// Multi-level parking structure.
    MultiStorey,
    /// On-street parking.
    StreetSide,
    /// Any tag outside the known set, preserved verbatim.
    Other(String),
}

impl SpotType {
    /// Returns the canonical string tag for this type.
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Surface => "surface",
            Self::Underground => "underground",
            Self::MultiStorey => "multi-storey",
            Self::StreetSide => "street_side",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for SpotType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "surface" => Self::Surface,
            "underground" => Self::Underground,
            "multi-storey" => Self::MultiStorey,
            "street_side" => Self::StreetSide,
            _ => Self::Other(tag),
        }
    }
}

impl From<SpotType> for String {
    fn from(spot_type: SpotType) -> Self {
        spot_type.as_tag().to_owned()
    }
}

impl std::fmt::Display for SpotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Whether parking at a spot costs money. Free is the falsy value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Fee {
    /// Paid parking.
    Yes,
    /// Free parking.
    No,
}

impl Fee {
    /// Returns `true` if parking here costs money.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Who may park at a spot. Advisory only; nothing in the core enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpotAccess {
    /// Open to everyone.
    Public,
    /// Tolerated public use of private ground.
    Permissive,
    /// Customers of the adjacent business only.
    Customers,
    /// Private use only.
    Private,
    /// Any tag outside the known set, preserved verbatim.
    Other(String),
}

impl SpotAccess {
    /// Returns the canonical string tag for this access class.
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Public => "public",
            Self::Permissive => "permissive",
            Self::Customers => "customers",
            Self::Private => "private",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for SpotAccess {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "public" => Self::Public,
            "permissive" => Self::Permissive,
            "customers" => Self::Customers,
            "private" => Self::Private,
            _ => Self::Other(tag),
        }
    }
}

impl From<SpotAccess> for String {
    fn from(access: SpotAccess) -> Self {
        access.as_tag().to_owned()
    }
}

impl std::fmt::Display for SpotAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in decimal degrees, `[-180, 180]`.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a coordinate after range-checking both components.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if either component is non-finite
    /// or outside the valid degree range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinateError> {
        validate_lat_lng(lat, lng)?;
        Ok(Self { lat, lng })
    }
}

/// Validates a latitude/longitude pair.
///
/// # Errors
///
/// Returns [`InvalidCoordinateError`] if either component is non-finite,
/// `lat` is outside `[-90, 90]`, or `lng` is outside `[-180, 180]`.
pub fn validate_lat_lng(lat: f64, lng: f64) -> Result<(), InvalidCoordinateError> {
    if !lat.is_finite() || !lng.is_finite() || !(-90.0..=90.0).contains(&lat)
        || !(-180.0..=180.0).contains(&lng)
    {
        return Err(InvalidCoordinateError { lat, lng });
    }
    Ok(())
}

/// Error returned when a latitude/longitude pair is non-finite or out of
/// range. Ingestion drops such records instead of propagating this error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinateError {
    /// The offending latitude.
    pub lat: f64,
    /// The offending longitude.
    pub lng: f64,
}

impl std::fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid coordinate ({}, {}): expected finite lat in [-90, 90] and lng in [-180, 180]",
            self.lat, self.lng
        )
    }
}

impl std::error::Error for InvalidCoordinateError {}

/// A single parking location record.
///
/// The sole entity of the system. Created by seed ingestion or a user
/// "add spot" action (always `available`); mutated only through explicit
/// status transitions or by an external concurrent writer; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    /// Stable identifier, unique within a snapshot.
    pub id: SpotId,
    /// Display label, non-empty (ingestion applies a default if absent).
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Facility type.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    /// Paid or free.
    pub fee: Fee,
    /// Access class.
    pub access: SpotAccess,
    /// Occupancy status.
    pub status: SpotStatus,
    /// Who added the spot, when known.
    #[serde(rename = "addedBy", default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
    /// When the spot was created, when known.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the status was last written, when known. Provenance only; never
    /// consulted for merge decisions.
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ParkingSpot {
    /// Returns the spot's coordinate.
    #[must_use]
    pub const fn location(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// A spot as submitted by a user or seed source, before the store assigns
/// an ID. Always enters the collection as `available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSpot {
    /// Display label.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Facility type.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    /// Paid or free.
    pub fee: Fee,
    /// Access class.
    pub access: SpotAccess,
    /// Who is adding the spot, when known.
    #[serde(rename = "addedBy", default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
}

impl NewSpot {
    /// Materializes the submission into a full record under the given ID.
    #[must_use]
    pub fn into_spot(self, id: SpotId, created_at: DateTime<Utc>) -> ParkingSpot {
        ParkingSpot {
            id,
            name: self.name,
            lat: self.lat,
            lng: self.lng,
            spot_type: self.spot_type,
            fee: self.fee,
            access: self.access,
            status: SpotStatus::Available,
            added_by: self.added_by,
            created_at: Some(created_at),
            updated_at: None,
        }
    }
}

/// Per-status breakdown of a spot collection, as shown in the stats panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotStats {
    /// Total number of spots.
    pub total: usize,
    /// Spots currently `available`.
    pub available: usize,
    /// Spots currently `occupied`.
    pub occupied: usize,
    /// Spots currently `booked`.
    pub booked: usize,
}

impl SpotStats {
    /// Tallies statuses across a slice of spots.
    #[must_use]
    pub fn from_spots(spots: &[ParkingSpot]) -> Self {
        let mut stats = Self {
            total: spots.len(),
            ..Self::default()
        };
        for spot in spots {
            match spot.status {
                SpotStatus::Available => stats.available += 1,
                SpotStatus::Occupied => stats.occupied += 1,
                SpotStatus::Booked => stats.booked += 1,
            }
        }
        stats
    }
}
