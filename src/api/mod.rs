use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::db::DbPool;

pub mod error;
pub mod handlers;
pub mod principal;
pub mod response;

pub struct AppState {
    pub pool: DbPool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/vehicles", get(handlers::list_vehicles))
        .route("/vehicles/{vehicle_id}", get(handlers::show_vehicle))
        .route("/vehicles/{vehicle_id}/locations", get(handlers::vehicle_locations))
        .route(
            "/vehicles/{vehicle_id}/travel-segments",
            get(handlers::travel_segments),
        )
        .route("/travels", get(handlers::all_travels))
        .route("/gps-locations", post(handlers::store_location))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, pool: DbPool) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState { pool }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
