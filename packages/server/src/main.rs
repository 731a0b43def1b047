#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! where2park API server binary.
//!
//! Seeds an in-memory spot store (from `SEED_CSV` if set, otherwise the
//! built-in Bengaluru dataset), starts the live reconciler, and serves the
//! REST API.

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use where2park_ingest::seed;
use where2park_reconcile::Reconciler;
use where2park_server::{AppState, configure};
use where2park_store::MemoryStore;

fn load_seed() -> Vec<where2park_spot_models::ParkingSpot> {
    let mut spots = match std::env::var("SEED_CSV") {
        Ok(path) => where2park_ingest::load_seed_csv(Path::new(&path))
            .expect("Failed to load seed CSV"),
        Err(_) => seed::bengaluru_spots(),
    };

    if std::env::var("DEMO_STATUS").is_ok_and(|v| v == "1" || v == "true") {
        seed::assign_demo_statuses(&mut spots);
    }

    spots
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let spots = load_seed();
    log::info!("Seeded {} parking spots", spots.len());
    let store = MemoryStore::with_spots(spots);

    let reconciler = Reconciler::start(
        &store,
        Arc::new(|transitions| {
            for transition in transitions {
                log::info!("status change: {transition}");
            }
        }),
    )
    .await
    .expect("Failed to subscribe to spot store");

    let state = web::Data::new(AppState {
        store: Arc::new(store),
        reconciler: Arc::new(reconciler),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
