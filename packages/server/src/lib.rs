#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the where2park application.
//!
//! Serves the REST API the map frontend talks to: the spot collection,
//! distance-ranked recommendations, community spot submission, and status
//! updates. The store behind the API is a [`SpotStore`] trait object, so
//! the in-memory fallback and a remote document store are interchangeable.

pub mod handlers;

use std::sync::Arc;

use actix_web::web;
use where2park_reconcile::Reconciler;
use where2park_store::SpotStore;

/// Shared application state.
pub struct AppState {
    /// The spot collection store.
    pub store: Arc<dyn SpotStore>,
    /// Live local view of the collection, kept in sync by subscription.
    pub reconciler: Arc<Reconciler>,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/stats", web::get().to(handlers::stats))
            .route("/spots", web::get().to(handlers::spots))
            .route("/spots", web::post().to(handlers::add_spot))
            .route("/spots/{id}/status", web::put().to(handlers::update_status))
            .route("/recommendations", web::get().to(handlers::recommendations)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use where2park_server_models::{
        AddSpotResponse, ApiHealth, RecommendationsResponse, SpotsResponse,
    };
    use where2park_spot_models::{SpotStats, SpotStatus};
    use where2park_store::{MemoryStore, SpotStore as _};

    use super::*;

    async fn state_with_seed() -> (MemoryStore, web::Data<AppState>) {
        let store = MemoryStore::with_spots(where2park_ingest::seed::bengaluru_spots());
        let reconciler = Reconciler::start(&store, Arc::new(|_| {}))
            .await
            .expect("subscription failed");
        let state = web::Data::new(AppState {
            store: Arc::new(store.clone()),
            reconciler: Arc::new(reconciler),
        });
        (store, state)
    }

    #[actix_web::test]
    async fn health_reports_spot_count() {
        let (_store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(health.healthy);
        assert_eq!(health.total_spots, 30);
    }

    #[actix_web::test]
    async fn spots_returns_full_collection() {
        let (_store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/spots").to_request();
        let body: SpotsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.success);
        assert_eq!(body.count, 30);
    }

    #[actix_web::test]
    async fn recommendations_fall_back_to_city_center() {
        let (_store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/recommendations")
            .to_request();
        let body: RecommendationsResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.success);
        assert!((body.user_location.lat - 12.9716).abs() < f64::EPSILON);
        assert!(!body.recommendations.is_empty());
        assert!(body.recommendations.len() <= 5);
    }

    #[actix_web::test]
    async fn recommendations_reject_invalid_coordinates() {
        let (_store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/recommendations?lat=95.0&lng=77.6")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn recommendations_reject_zero_count() {
        let (_store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/recommendations?count=0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn add_spot_then_book_it() {
        let (store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/spots")
            .set_json(serde_json::json!({
                "name": "Church Street Lot",
                "lat": 12.975,
                "lng": 77.604,
                "type": "street_side"
            }))
            .to_request();
        let added: AddSpotResponse = test::call_and_read_body_json(&app, req).await;
        assert!(added.success);

        let req = test::TestRequest::put()
            .uri(&format!("/api/spots/{}/status", added.id))
            .set_json(serde_json::json!({ "status": "booked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let spots = store.get_all().await.unwrap();
        let spot = spots.iter().find(|spot| spot.id == added.id).unwrap();
        assert_eq!(spot.status, SpotStatus::Booked);
    }

    #[actix_web::test]
    async fn update_status_unknown_id_is_404() {
        let (_store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::put()
            .uri("/api/spots/ghost/status")
            .set_json(serde_json::json!({ "status": "booked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn add_spot_rejects_invalid_coordinates() {
        let (_store, state) = state_with_seed().await;
        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/spots")
            .set_json(serde_json::json!({
                "name": "Nowhere",
                "lat": 123.0,
                "lng": 77.6
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn stats_counts_statuses() {
        let (store, state) = state_with_seed().await;
        let id = store.get_all().await.unwrap()[0].id.clone();
        store
            .update_status(&id, SpotStatus::Occupied)
            .await
            .unwrap();

        let app =
            test::init_service(App::new().app_data(state).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let stats: SpotStats = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats.total, 30);
        assert_eq!(stats.occupied, 1);
        assert_eq!(stats.available, 29);
    }
}
