use crate::auth::AuthError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use log::{debug, error, warn};
use oauth_introspect::ClaimSet;

/// Extracts the bearer token from the `Authorization` header.
///
/// The scheme is matched case-insensitively. The token itself is never logged.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let value = header.to_str().map_err(|e| {
        warn!("Failed to parse Authorization header to string: {}", e);
        AuthError::MalformedHeader
    })?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() || token.contains(char::is_whitespace) {
                Err(AuthError::MalformedHeader)
            } else {
                Ok(token)
            }
        }
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Validates the request's bearer token and returns its claims.
///
/// The introspector is only called once a well-formed token is present.
pub(crate) async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<ClaimSet, AuthError> {
    let token = bearer_token(headers).inspect_err(|e| {
        warn!("Rejected request to protected resource: {}", e);
    })?;

    let claims = state.introspector.introspect(token).await.map_err(|e| {
        let err = AuthError::from(e);
        match &err {
            AuthError::IntrospectionRejected { .. } => warn!("Token introspection failed: {}", err),
            _ => error!("Token introspection failed: {}", err),
        }
        err
    })?;

    if !claims.is_active() {
        warn!(
            "Provider reported inactive token for subject '{}'",
            claims.subject().unwrap_or("<unknown>")
        );
        return Err(AuthError::InactiveToken);
    }

    let required = &state.config.oidc.entitlement_claim;
    if !claims.contains(required) {
        warn!(
            "Token for subject '{}' lacks required claim '{}'",
            claims.subject().unwrap_or("<unknown>"),
            required
        );
        return Err(AuthError::MissingClaim(required.clone()));
    }

    debug!(
        "Authenticated subject '{}'",
        claims.subject().unwrap_or("<unknown>")
    );
    Ok(claims)
}

/// Returns the request's claims, authenticating it first unless a gate
/// earlier in the pipeline already did.
pub(crate) async fn ensure_authenticated(
    state: &AppState,
    mut request: Request<Body>,
) -> Result<(Request<Body>, ClaimSet), AuthError> {
    if let Some(claims) = request.extensions().get::<ClaimSet>() {
        let claims = claims.clone();
        return Ok((request, claims));
    }

    let claims = authenticate(state, request.headers()).await?;
    request.extensions_mut().insert(claims.clone());
    Ok((request, claims))
}

/// Authorization gate: rejects requests without a valid token and attaches
/// the token's claims to the request extensions.
pub(crate) async fn authentication_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let (request, _) = ensure_authenticated(&state, request).await?;
    Ok(next.run(request).await)
}
