//! Bearer-token authentication and entitlement guards.
//!
//! - [`gate::authentication_middleware`] validates the token with the identity
//!   provider and stores the resulting `ClaimSet` in the request extensions.
//! - [`guard::require_admin`] and [`guard::require_scope`] reject
//!   authenticated callers lacking an admin entitlement or a scope.

mod errors;
pub(crate) mod gate;
pub(crate) mod guard;

pub use errors::AuthError;
