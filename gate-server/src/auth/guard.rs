//! Route guards layered on top of the authorization gate.
//!
//! Each guard authenticates the request itself when no gate ran before it, so
//! guards can be stacked in any order and each one short-circuits on its own.

use crate::auth::gate::ensure_authenticated;
use crate::auth::AuthError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use log::warn;

/// Rejects callers that are not administrators with 403
pub(crate) async fn require_admin(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let (request, claims) = ensure_authenticated(&state, request).await?;

    if !state.evaluator.is_admin(&claims) {
        warn!(
            "Subject '{}' attempted to access an admin resource without an admin entitlement",
            claims.subject().unwrap_or("<unknown>")
        );
        return Err(AuthError::NotAdmin);
    }

    Ok(next.run(request).await)
}

/// State for [`require_scope`]: the application state plus the scope to check
#[derive(Clone)]
pub(crate) struct ScopeGuard {
    state: AppState,
    scope: String,
}

impl ScopeGuard {
    pub(crate) fn new(state: AppState, scope: impl Into<String>) -> Self {
        Self {
            state,
            scope: scope.into(),
        }
    }
}

/// Rejects tokens whose `scope` claim lacks the guard's scope with 403
pub(crate) async fn require_scope(
    State(guard): State<ScopeGuard>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let (request, claims) = ensure_authenticated(&guard.state, request).await?;

    if !claims.has_scope(&guard.scope) {
        warn!(
            "Subject '{}' lacks required scope '{}'",
            claims.subject().unwrap_or("<unknown>"),
            guard.scope
        );
        return Err(AuthError::InsufficientScope(guard.scope));
    }

    Ok(next.run(request).await)
}
