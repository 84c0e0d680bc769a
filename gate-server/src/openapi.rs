use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const TOKEN_TAG: &str = "Token API";
pub(crate) const ADMIN_TAG: &str = "Admin API";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health::health_check,
        crate::api::health::ready_check,
        crate::api::token::claims_handler,
        crate::api::token::admin_check_handler,
        crate::api::admin::admin_status_handler,
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = TOKEN_TAG, description = "Endpoints open to any valid bearer token"),
        (name = ADMIN_TAG, description = "Endpoints restricted to administrators"),
    ),
    info(
        title = "Entitlement Gate API",
        description = "Bearer token introspection and administrator allow-list",
        version = "1.0.0"
    )
)]
pub(crate) struct ApiDoc;

/// Creates a router serving the OpenAPI document
pub(crate) fn router(api_doc: utoipa::openapi::OpenApi) -> Router<AppState> {
    Router::new().route("/openapi.json", get(move || async move { Json(api_doc) }))
}
