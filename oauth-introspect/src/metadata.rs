//! Discovery and caching of provider metadata (RFC 8414 / OpenID Connect Discovery)

use crate::error::MetadataError;
use crate::provider::ProviderConfig;
use log::{debug, error, info};
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use url::Url;

/// Provider metadata document. Only the introspection endpoint is required.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataDocument {
    pub introspection_endpoint: Url,
    #[serde(default)]
    pub issuer: Option<String>,
    /// Every other published key, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resolves provider metadata once and serves it from memory afterwards.
///
/// Documents are keyed by metadata URL. Concurrent first calls for the same
/// provider share one in-flight fetch, and a failed fetch is not cached.
#[derive(Clone)]
pub struct MetadataResolver {
    client: Client,
    cache: Cache<String, Arc<MetadataDocument>>,
}

impl MetadataResolver {
    pub fn new(client: Client) -> Self {
        Self::with_cache(client, Cache::builder().max_capacity(16).build())
    }

    /// Cached documents expire after `ttl`
    pub fn with_ttl(client: Client, ttl: std::time::Duration) -> Self {
        Self::with_cache(
            client,
            Cache::builder().max_capacity(16).time_to_live(ttl).build(),
        )
    }

    fn with_cache(client: Client, cache: Cache<String, Arc<MetadataDocument>>) -> Self {
        Self { client, cache }
    }

    pub fn for_provider(client: Client, provider: &ProviderConfig) -> Self {
        match provider.metadata_ttl {
            Some(ttl) if !ttl.is_zero() => Self::with_ttl(client, ttl),
            _ => Self::new(client),
        }
    }

    /// Returns the provider's metadata document, fetching it on first use
    pub async fn resolve(
        &self,
        provider: &ProviderConfig,
    ) -> Result<Arc<MetadataDocument>, Arc<MetadataError>> {
        let key = provider.metadata_url.to_string();
        self.cache
            .try_get_with(key, self.fetch(provider))
            .await
            .inspect_err(|e| {
                error!(
                    "Failed to resolve metadata for provider '{}': {}",
                    provider.name, e
                )
            })
    }

    /// Whether a document for this provider is already cached
    pub async fn is_cached(&self, provider: &ProviderConfig) -> bool {
        self.cache
            .get(provider.metadata_url.as_str())
            .await
            .is_some()
    }

    async fn fetch(
        &self,
        provider: &ProviderConfig,
    ) -> Result<Arc<MetadataDocument>, MetadataError> {
        debug!(
            "Fetching metadata for provider '{}' from {}",
            provider.name, provider.metadata_url
        );

        let response = self
            .client
            .get(provider.metadata_url.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataError::Status(response.status().as_u16()));
        }

        let document: MetadataDocument = response
            .json()
            .await
            .map_err(|e| MetadataError::Parse(e.to_string()))?;

        info!(
            "Resolved metadata for provider '{}', introspection endpoint: {}",
            provider.name, document.introspection_endpoint
        );
        Ok(Arc::new(document))
    }
}
