#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! API request and response types for the where2park server.
//!
//! Serialized to JSON for the REST API. Kept separate from the entity
//! types so the API contract can evolve independently of the store format.

use serde::{Deserialize, Serialize};
use where2park_recommend::RankedSpot;
use where2park_spot_models::{
    Fee, GeoPoint, ParkingSpot, SpotAccess, SpotId, SpotStatus, SpotType,
};

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is up.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
    /// Spots in the current snapshot.
    pub total_spots: usize,
}

/// A parking spot as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSpot {
    /// Stable spot ID.
    pub id: SpotId,
    /// Display name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Facility type tag.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    /// Paid or free.
    pub fee: Fee,
    /// Access class tag.
    pub access: SpotAccess,
    /// Occupancy status.
    pub status: SpotStatus,
}

impl From<ParkingSpot> for ApiSpot {
    fn from(spot: ParkingSpot) -> Self {
        Self {
            id: spot.id,
            name: spot.name,
            lat: spot.lat,
            lng: spot.lng,
            spot_type: spot.spot_type,
            fee: spot.fee,
            access: spot.access,
            status: spot.status,
        }
    }
}

/// One ranked recommendation: a spot plus its distance from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRecommendation {
    /// The recommended spot.
    #[serde(flatten)]
    pub spot: ApiSpot,
    /// Distance from the user in kilometers.
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    /// Human-readable distance, e.g. `"0.4 km away"`.
    #[serde(rename = "distanceText")]
    pub distance_text: String,
}

impl From<RankedSpot> for ApiRecommendation {
    fn from(ranked: RankedSpot) -> Self {
        Self {
            distance_text: ranked.distance_text(),
            distance_km: ranked.distance_km,
            spot: ApiSpot::from(ranked.spot),
        }
    }
}

/// `GET /api/recommendations` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    /// Always `true` on a 2xx response.
    pub success: bool,
    /// The user position the ranking was computed from.
    pub user_location: GeoPoint,
    /// Ranked spots, nearest first.
    pub recommendations: Vec<ApiRecommendation>,
    /// Number of recommendations returned.
    pub count: usize,
}

/// `GET /api/spots` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotsResponse {
    /// Always `true` on a 2xx response.
    pub success: bool,
    /// The complete current collection.
    pub spots: Vec<ApiSpot>,
    /// Number of spots returned.
    pub count: usize,
}

/// Query parameters for `GET /api/recommendations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationQueryParams {
    /// User latitude; both lat and lng must be present to take effect,
    /// otherwise the Bengaluru center fallback is used.
    pub lat: Option<f64>,
    /// User longitude.
    pub lng: Option<f64>,
    /// Maximum number of results (default 5).
    pub count: Option<usize>,
    /// Restrict to one facility type tag.
    #[serde(rename = "type")]
    pub spot_type: Option<String>,
    /// Restrict to one fee class (`yes` / `no`).
    pub fee: Option<String>,
    /// Restrict to one status (default `available`).
    pub status: Option<String>,
}

/// Body of `POST /api/spots`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddSpotRequest {
    /// Display name; defaults to `"Community Added Spot"`.
    pub name: Option<String>,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Facility type tag; defaults to `surface`.
    #[serde(rename = "type")]
    pub spot_type: Option<String>,
    /// Who is adding the spot.
    #[serde(rename = "addedBy")]
    pub added_by: Option<String>,
}

/// `POST /api/spots` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSpotResponse {
    /// Always `true` on a 2xx response.
    pub success: bool,
    /// The store-assigned spot ID.
    pub id: SpotId,
}

/// Body of `PUT /api/spots/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    /// The new status to write.
    pub status: SpotStatus,
}
