//! Readiness probe surfacing the lifecycle flag.
//!
//! Returns 200 between startup completion and the start of shutdown, 503
//! otherwise, so load balancers stop routing traffic to a draining instance.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReadyStatus {
    pub status: &'static str,
}

pub async fn ready(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Result<Json<ReadyStatus>, AppError> {
    if state.readiness.is_ready() {
        Ok(Json(ReadyStatus { status: "ready" }))
    } else {
        tracing::debug!(request_id = %request_id, "Readiness probe while not ready");
        Err(AppError::NotReady)
    }
}
