pub(crate) use crate::config::admin::AdminConfig;
pub(crate) use crate::config::oidc::OidcConfig;
use confique::Config;

pub mod admin;
pub mod oidc;

/// Optional configuration file, read after the environment
const CONFIG_FILE: &str = "gate.toml";

/// Main configuration structure for the gate server
#[derive(Debug, Config, Clone)]
pub struct GateConfig {
    /// The port the server will listen to (default: 7766)
    #[config(env = "GATE_PORT", default = 7766)]
    pub port: u16,

    /// Identity provider configuration
    #[config(nested)]
    pub oidc: OidcConfig,

    /// Administrator allow-list
    #[config(nested)]
    pub admin: AdminConfig,
}

impl GateConfig {
    /// Loads the configuration from environment variables, falling back to
    /// `gate.toml` in the working directory
    pub fn new() -> Result<Self, String> {
        Self::builder()
            .env()
            .file(CONFIG_FILE)
            .load()
            .map_err(|e| e.to_string())
    }

    #[cfg(test)]
    pub fn for_test_with_mock(idp_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            oidc: OidcConfig {
                provider: "test-idp".to_string(),
                client_id: "gate-client".to_string(),
                client_secret: "gate-secret".to_string(),
                metadata_url: format!("{}/.well-known/openid-configuration", idp_mock.uri()),
                request_timeout: 2,
                connect_timeout: 1,
                metadata_ttl: 0,
                entitlement_claim: "eduperson_entitlement".to_string(),
                admin_scope: None,
            },
            admin: AdminConfig {
                entitlements: "admins".to_string(),
            },
        }
    }
}
