//! # oauth-introspect
//!
//! Validation of opaque OAuth 2.0 access tokens against an identity provider.
//!
//! ## Components
//!
//! - **Metadata:** Discovers and caches the provider's metadata document.
//! - **Remote introspector:** Calls the provider's RFC 7662 introspection endpoint.
//! - **Claims:** The claim set a provider returns for a valid token.
//! - **Entitlements:** Decides administrator rights from an entitlement claim.

pub mod claims;
pub mod entitlements;
pub mod error;
pub mod metadata;
pub mod provider;
pub mod remote;

pub use crate::claims::ClaimSet;
pub use crate::entitlements::{AllowListEvaluator, DEFAULT_ENTITLEMENT_CLAIM, EntitlementEvaluator};
pub use crate::error::{IntrospectionError, MetadataError};
pub use crate::metadata::{MetadataDocument, MetadataResolver};
pub use crate::provider::ProviderConfig;
pub use crate::remote::RemoteIntrospector;

use async_trait::async_trait;

/// Validates bearer tokens with an identity provider
#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    /// Returns the provider's claims for `token`.
    ///
    /// Every call re-validates with the provider; results are never cached.
    async fn introspect(&self, token: &str) -> Result<ClaimSet, IntrospectionError>;

    /// Checks that the provider can currently be reached
    async fn health(&self) -> bool;
}
