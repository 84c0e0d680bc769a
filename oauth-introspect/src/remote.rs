use crate::TokenIntrospector;
use crate::claims::ClaimSet;
use crate::error::IntrospectionError;
use crate::metadata::{MetadataDocument, MetadataResolver};
use crate::provider::ProviderConfig;
use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::sync::Arc;

/// Form body of an introspection call. Holds the raw token, so no `Debug`.
#[derive(Serialize)]
struct IntrospectionRequest<'a> {
    token: &'a str,
    token_type_hint: &'static str,
}

/// RFC 7662 introspection client authenticating with HTTP Basic credentials
#[derive(Clone)]
pub struct RemoteIntrospector {
    client: Client,
    provider: Arc<ProviderConfig>,
    resolver: MetadataResolver,
}

impl std::fmt::Debug for RemoteIntrospector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteIntrospector")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl RemoteIntrospector {
    pub fn new(provider: ProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(provider.request_timeout)
            .connect_timeout(provider.connect_timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self::with_client(client, provider))
    }

    pub fn with_client(client: Client, provider: ProviderConfig) -> Self {
        let resolver = MetadataResolver::for_provider(client.clone(), &provider);
        Self {
            client,
            provider: Arc::new(provider),
            resolver,
        }
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    pub async fn metadata(&self) -> Result<Arc<MetadataDocument>, IntrospectionError> {
        Ok(self.resolver.resolve(&self.provider).await?)
    }
}

#[async_trait]
impl TokenIntrospector for RemoteIntrospector {
    async fn introspect(&self, token: &str) -> Result<ClaimSet, IntrospectionError> {
        let metadata = self.metadata().await?;
        let endpoint = &metadata.introspection_endpoint;

        let response = self
            .client
            .post(endpoint.clone())
            .basic_auth(&self.provider.client_id, Some(&self.provider.client_secret))
            .form(&IntrospectionRequest {
                token,
                token_type_hint: "access_token",
            })
            .send()
            .await
            .map_err(IntrospectionError::from_transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await.map_err(|e| {
                error!(
                    "Failed to read rejection body from provider '{}' (status {}): {}",
                    self.provider.name, status, e
                );
                IntrospectionError::from_transport(e)
            })?;
            warn!(
                "Provider '{}' rejected introspection with status {}",
                self.provider.name, status
            );
            return Err(IntrospectionError::Rejected {
                status: status.as_u16(),
                content_type,
                body: body.to_vec(),
            });
        }

        let claims: ClaimSet = response.json().await.map_err(|e| {
            if e.is_timeout() {
                IntrospectionError::from_transport(e)
            } else {
                IntrospectionError::InvalidResponse(e.to_string())
            }
        })?;

        debug!(
            "Introspected token for subject '{}' (client '{}') via provider '{}'",
            claims.subject().unwrap_or("<unknown>"),
            claims.client_id().unwrap_or("<unknown>"),
            self.provider.name
        );
        Ok(claims)
    }

    async fn health(&self) -> bool {
        self.metadata().await.is_ok()
    }
}
