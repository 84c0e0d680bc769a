//! Identity provider (OpenID Connect) configuration

use confique::Config;
use oauth_introspect::ProviderConfig;
use std::time::Duration;
use url::Url;

/// Identity provider configuration
#[derive(Debug, Config, Clone)]
pub struct OidcConfig {
    /// Provider name used in log lines (default: egi)
    #[config(env = "GATE_OIDC_PROVIDER", default = "egi")]
    pub provider: String,

    /// OAuth client identifier used to authenticate introspection calls
    #[config(env = "GATE_OIDC_CLIENT_ID")]
    pub client_id: String,

    /// OAuth client secret used to authenticate introspection calls
    #[config(env = "GATE_OIDC_CLIENT_SECRET")]
    pub client_secret: String,

    /// Discovery document URL
    /// (default: https://aai.egi.eu/auth/realms/egi/.well-known/openid-configuration)
    #[config(
        env = "GATE_OIDC_METADATA_URL",
        default = "https://aai.egi.eu/auth/realms/egi/.well-known/openid-configuration"
    )]
    pub metadata_url: String,

    /// Timeout for a single discovery or introspection call in seconds (default: 5)
    #[config(env = "GATE_OIDC_REQUEST_TIMEOUT", default = 5)]
    pub request_timeout: u64,

    /// Connect timeout in seconds (default: 2)
    #[config(env = "GATE_OIDC_CONNECT_TIMEOUT", default = 2)]
    pub connect_timeout: u64,

    /// Lifetime of the cached metadata document in seconds, 0 keeps it until
    /// restart (default: 0)
    #[config(env = "GATE_OIDC_METADATA_TTL", default = 0)]
    pub metadata_ttl: u64,

    /// Claim that every authenticated token must carry and that lists the
    /// caller's entitlements (default: eduperson_entitlement)
    #[config(env = "GATE_OIDC_ENTITLEMENT_CLAIM", default = "eduperson_entitlement")]
    pub entitlement_claim: String,

    /// Scope that admin routes additionally require, unset disables the check
    #[config(env = "GATE_OIDC_ADMIN_SCOPE")]
    pub admin_scope: Option<String>,
}

impl OidcConfig {
    /// Builds the provider settings consumed by the introspector
    pub fn provider_config(&self) -> Result<ProviderConfig, url::ParseError> {
        let metadata_url = Url::parse(&self.metadata_url)?;
        let metadata_ttl = match self.metadata_ttl {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(ProviderConfig::new(
            self.provider.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
            metadata_url,
        )
        .with_request_timeout(Duration::from_secs(self.request_timeout))
        .with_connect_timeout(Duration::from_secs(self.connect_timeout))
        .with_metadata_ttl(metadata_ttl))
    }
}
