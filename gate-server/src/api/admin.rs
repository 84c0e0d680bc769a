use crate::auth::gate::authentication_middleware;
use crate::auth::guard::{require_admin, require_scope, ScopeGuard};
use crate::openapi::ADMIN_TAG;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json},
    middleware,
    routing::get,
    Router,
};
use oauth_introspect::ClaimSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status returned to administrators
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub(crate) struct AdminStatus {
    /// Token subject, when the provider discloses it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    admin: bool,
}

#[utoipa::path(
    get,
    path = "/v1/admin/status",
    tag = ADMIN_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer access token"),
    ),
    responses(
        (status = 200, description = "Caller is an administrator", body = AdminStatus),
        (status = 401, description = "Missing, malformed or inactive token"),
        (status = 403, description = "Caller is not an administrator or lacks the admin scope"),
        (status = 502, description = "Identity provider unavailable")
    )
)]
pub(crate) async fn admin_status_handler(Extension(claims): Extension<ClaimSet>) -> Json<AdminStatus> {
    Json(AdminStatus {
        subject: claims.subject().map(str::to_string),
        admin: true,
    })
}

/// Routes restricted to administrators.
///
/// Layers run outermost first: gate, then the optional scope guard, then the
/// admin guard.
pub(super) fn router(state: &AppState) -> Router<AppState> {
    let mut router = Router::new()
        .route("/v1/admin/status", get(admin_status_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    if let Some(scope) = &state.config.oidc.admin_scope {
        router = router.route_layer(middleware::from_fn_with_state(
            ScopeGuard::new(state.clone(), scope.clone()),
            require_scope,
        ));
    }

    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        authentication_middleware,
    ))
}
