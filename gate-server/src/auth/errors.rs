use crate::errors::ApiError;
use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use http::{HeaderValue, StatusCode};
use oauth_introspect::IntrospectionError;
use thiserror::Error;

/// Reasons a request is turned away by the gate or one of the guards
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,
    #[error("Authorization header is not a valid bearer token")]
    MalformedHeader,
    #[error("The access token is not active")]
    InactiveToken,
    /// Provider refused the token or the call; forwarded as-is
    #[error("Identity provider rejected the token with status {status}")]
    IntrospectionRejected {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },
    #[error("Identity provider metadata is unavailable: {0}")]
    MetadataUnavailable(String),
    #[error("Identity provider is unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Identity provider did not answer in time")]
    ProviderTimeout,
    #[error("The access token does not carry the '{0}' claim")]
    MissingClaim(String),
    #[error("The access token does not grant the '{0}' scope")]
    InsufficientScope(String),
    #[error("Administrator rights are required")]
    NotAdmin,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::MalformedHeader | Self::InactiveToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::IntrospectionRejected { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::MetadataUnavailable(_) | Self::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::MissingClaim(_) | Self::InsufficientScope(_) | Self::NotAdmin => {
                StatusCode::FORBIDDEN
            }
        }
    }

    /// RFC 6750 challenge for the response, if any
    fn challenge(&self) -> Option<String> {
        match self {
            Self::MissingToken => Some("Bearer".to_string()),
            Self::MalformedHeader => Some(r#"Bearer error="invalid_request""#.to_string()),
            Self::InactiveToken => Some(r#"Bearer error="invalid_token""#.to_string()),
            Self::InsufficientScope(scope) => Some(format!(
                r#"Bearer error="insufficient_scope", scope="{scope}""#
            )),
            _ => None,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let challenge = self.challenge();

        let mut response = match self {
            Self::IntrospectionRejected {
                content_type, body, ..
            } => {
                let mut response = (status_code, body).into_response();
                // Forward the provider's content type as-is, including its absence
                match content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
                    Some(value) => {
                        response.headers_mut().insert(CONTENT_TYPE, value);
                    }
                    None => {
                        response.headers_mut().remove(CONTENT_TYPE);
                    }
                }
                response
            }
            err @ (Self::MetadataUnavailable(_) | Self::ProviderUnavailable(_)) => {
                ApiError::bad_gateway(err).into_response()
            }
            err => ApiError::new(err, status_code).into_response(),
        };

        if let Some(value) = challenge.and_then(|c| HeaderValue::from_str(&c).ok()) {
            response.headers_mut().insert(WWW_AUTHENTICATE, value);
        }
        response
    }
}

impl From<IntrospectionError> for AuthError {
    fn from(err: IntrospectionError) -> Self {
        match err {
            IntrospectionError::Rejected {
                status,
                content_type,
                body,
            } => Self::IntrospectionRejected {
                status,
                content_type,
                body,
            },
            IntrospectionError::MetadataUnavailable(e) => Self::MetadataUnavailable(e.to_string()),
            IntrospectionError::Unreachable {
                timed_out: true, ..
            } => Self::ProviderTimeout,
            IntrospectionError::Unreachable { message, .. } => Self::ProviderUnavailable(message),
            IntrospectionError::InvalidResponse(message) => Self::ProviderUnavailable(message),
        }
    }
}
