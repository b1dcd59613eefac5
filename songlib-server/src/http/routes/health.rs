//! Liveness and store readiness
//!
//! `GET /health` answers 200 while the song store round-trips and 503
//! otherwise, so a load balancer can drop an instance whose database is gone.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub store: &'static str,
    pub version: &'static str,
}

async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    let (status, store, code) = match state.store.ping().await {
        Ok(()) => ("ok", "reachable", StatusCode::OK),
        Err(_) => ("degraded", "unreachable", StatusCode::SERVICE_UNAVAILABLE),
    };

    (
        code,
        Json(HealthReport {
            status,
            store,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
