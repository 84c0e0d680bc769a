use crate::openapi::HEALTH_TAG;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Basic health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Health {
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identity_provider: Option<String>,
    #[serde(skip)]
    status_code: StatusCode,
}

impl IntoResponse for Health {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Basic health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = Health)
    )
)]
pub(crate) async fn health_check() -> Health {
    Health {
        status: "ok".to_string(),
        identity_provider: None,
        status_code: StatusCode::OK,
    }
}

/// Readiness check handler, resolves the identity provider's metadata
#[utoipa::path(
    get,
    path = "/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is ready", body = Health),
        (status = 503, description = "Identity provider metadata unavailable", body = Health)
    )
)]
pub(crate) async fn ready_check(State(state): State<AppState>) -> Health {
    if state.health_check().await {
        Health {
            status: "ok".to_string(),
            identity_provider: Some("reachable".to_string()),
            status_code: StatusCode::OK,
        }
    } else {
        log::warn!("Readiness check failed: identity provider metadata unavailable");
        Health {
            status: "error".to_string(),
            identity_provider: Some("unavailable".to_string()),
            status_code: StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
}
