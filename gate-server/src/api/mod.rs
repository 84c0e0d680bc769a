pub(crate) mod admin;
pub(crate) mod health;
pub(crate) mod token;

use crate::state::AppState;
use axum::Router;

/// Combines all API routes into a single router
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(token::router(state))
        .merge(admin::router(state))
}
