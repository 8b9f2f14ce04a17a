//! Liveness at `/` and Redis readiness at `/ready`

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::{Value, json};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// 200 when Redis answers PING, 503 otherwise
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut redis = state.redis.clone();

    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "redis",
        Box::pin(async move {
            database::redis::check_health(&mut redis)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    match run_health_checks(checks).await {
        Ok(ok) => ok,
        Err(err) => err,
    }
}
