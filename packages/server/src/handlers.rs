//! HTTP handler functions for the where2park API.

use actix_web::{HttpResponse, web};
use where2park_locate::BENGALURU_CENTER;
use where2park_recommend::{RecommendOptions, SpotFilter, recommend};
use where2park_server_models::{
    AddSpotRequest, AddSpotResponse, ApiHealth, ApiRecommendation, ApiSpot,
    RecommendationQueryParams, RecommendationsResponse, SpotsResponse, UpdateStatusRequest,
};
use where2park_spot_models::{
    Fee, GeoPoint, NewSpot, SpotAccess, SpotId, SpotStatus, SpotType, validate_lat_lng,
};
use where2park_store::StoreError;

use crate::AppState;

fn bad_request(message: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": message.to_string(),
    }))
}

fn store_error(e: &StoreError) -> HttpResponse {
    match e {
        StoreError::NotFound(id) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": format!("spot not found: {id}"),
        })),
        StoreError::Unavailable(_) => {
            log::error!("store unavailable: {e}");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "success": false,
                "error": "store unavailable",
            }))
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_spots: state.reconciler.stats().total,
    })
}

/// `GET /api/stats`
///
/// Status breakdown of the current snapshot, as shown in the stats panel.
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.reconciler.stats())
}

/// `GET /api/spots`
///
/// Returns the complete current collection. If the store is unreachable
/// the reconciler's last snapshot stays authoritative.
pub async fn spots(state: web::Data<AppState>) -> HttpResponse {
    let spots = match state.store.get_all().await {
        Ok(spots) => spots,
        Err(e) => {
            log::warn!("store unreachable ({e}), serving cached snapshot");
            state.reconciler.snapshot()
        }
    };

    let spots: Vec<ApiSpot> = spots.into_iter().map(ApiSpot::from).collect();
    HttpResponse::Ok().json(SpotsResponse {
        success: true,
        count: spots.len(),
        spots,
    })
}

/// `GET /api/recommendations`
///
/// Ranks available spots near the user. Missing coordinates fall back to
/// the Bengaluru city center; invalid ones are a 400.
pub async fn recommendations(
    state: web::Data<AppState>,
    params: web::Query<RecommendationQueryParams>,
) -> HttpResponse {
    let user = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => match GeoPoint::new(lat, lng) {
            Ok(point) => point,
            Err(e) => return bad_request(e),
        },
        _ => BENGALURU_CENTER,
    };

    let mut filter = SpotFilter::default();
    if let Some(tag) = &params.spot_type {
        filter.types = vec![SpotType::from(tag.clone())];
    }
    if let Some(fee) = &params.fee {
        match fee.parse::<Fee>() {
            Ok(fee) => filter.fee = Some(fee),
            Err(_) => return bad_request(format!("invalid fee filter: {fee}")),
        }
    }
    if let Some(status) = &params.status {
        match status.parse::<SpotStatus>() {
            Ok(status) => filter.statuses = vec![status],
            Err(_) => return bad_request(format!("invalid status filter: {status}")),
        }
    }

    let count = params.count.unwrap_or(5);
    if count == 0 {
        return bad_request("count must be a positive integer");
    }

    let options = RecommendOptions { count, filter };

    let snapshot = state.reconciler.snapshot();
    let recommendations: Vec<ApiRecommendation> = recommend(user, &snapshot, &options)
        .into_iter()
        .map(ApiRecommendation::from)
        .collect();

    HttpResponse::Ok().json(RecommendationsResponse {
        success: true,
        user_location: user,
        count: recommendations.len(),
        recommendations,
    })
}

/// `POST /api/spots`
///
/// Adds a community spot. Coordinates are validated here, at the ingestion
/// boundary; the spot always enters the collection as `available`.
pub async fn add_spot(
    state: web::Data<AppState>,
    body: web::Json<AddSpotRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    if let Err(e) = validate_lat_lng(body.lat, body.lng) {
        return bad_request(e);
    }

    let new_spot = NewSpot {
        name: body
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Community Added Spot".to_owned()),
        lat: body.lat,
        lng: body.lng,
        spot_type: body.spot_type.map_or(SpotType::Surface, SpotType::from),
        // Community spots are free and open, matching the add-spot form.
        fee: Fee::No,
        access: SpotAccess::Permissive,
        added_by: body.added_by,
    };

    match state.store.add(new_spot).await {
        Ok(id) => HttpResponse::Created().json(AddSpotResponse { success: true, id }),
        Err(e) => store_error(&e),
    }
}

/// `PUT /api/spots/{id}/status`
///
/// Single-field status flip: book, occupy, or free a spot. Last write
/// wins; there is no reservation window or conflict detection.
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> HttpResponse {
    let id = SpotId::new(path.into_inner());
    match state.store.update_status(&id, body.status).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => store_error(&e),
    }
}
