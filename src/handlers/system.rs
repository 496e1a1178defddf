use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::database::ListStore;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Lists API",
        "version": version,
        "endpoints": {
            "index": "GET /lists (public)",
            "show": "GET /lists/:id (public)",
            "create": "POST /lists (bearer token)",
            "update": "PATCH /lists/:id (bearer token, owner only)",
            "destroy": "DELETE /lists/:id (bearer token, owner only)",
        }
    }))
}

/// GET /health - reports whether the list store is reachable
pub async fn health(State(store): State<Arc<dyn ListStore>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
