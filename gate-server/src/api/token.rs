use crate::auth::gate::authentication_middleware;
use crate::openapi::TOKEN_TAG;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, State},
    middleware,
    routing::get,
    Router,
};
use oauth_introspect::ClaimSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Claims the identity provider returned for the caller's token
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub(crate) struct TokenClaims {
    claims: HashMap<String, serde_json::Value>,
}

/// Result of the administrator check for the caller
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub(crate) struct AdminCheck {
    /// Token subject, when the provider discloses it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    /// Whether the caller holds an administrator entitlement
    admin: bool,
}

#[utoipa::path(
    get,
    path = "/v1/token/claims",
    tag = TOKEN_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer access token"),
    ),
    responses(
        (status = 200, description = "Claims of a valid token", body = TokenClaims),
        (status = 401, description = "Missing, malformed or inactive token"),
        (status = 403, description = "Token lacks the entitlement claim"),
        (status = 502, description = "Identity provider unavailable")
    )
)]
pub(crate) async fn claims_handler(Extension(claims): Extension<ClaimSet>) -> Json<TokenClaims> {
    Json(TokenClaims {
        claims: claims.into_map().into_iter().collect(),
    })
}

#[utoipa::path(
    get,
    path = "/v1/token/admin",
    tag = TOKEN_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer access token"),
    ),
    responses(
        (status = 200, description = "Administrator check completed", body = AdminCheck),
        (status = 401, description = "Missing, malformed or inactive token"),
        (status = 502, description = "Identity provider unavailable")
    )
)]
pub(crate) async fn admin_check_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimSet>,
) -> Json<AdminCheck> {
    Json(AdminCheck {
        admin: state.evaluator.is_admin(&claims),
        subject: claims.subject().map(str::to_string),
    })
}

/// Routes open to any authenticated caller
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/token/claims", get(claims_handler))
        .route("/v1/token/admin", get(admin_check_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ))
}
