use crate::config::GateConfig;
use oauth_introspect::{
    AllowListEvaluator, EntitlementEvaluator, RemoteIntrospector, TokenIntrospector,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GateConfig>,
    pub introspector: Arc<dyn TokenIntrospector>,
    pub evaluator: Arc<dyn EntitlementEvaluator>,
}

impl AppState {
    fn create_idp_client(config: &GateConfig) -> Result<Client, reqwest::Error> {
        // Shared by discovery and introspection calls
        Client::builder()
            .timeout(Duration::from_secs(config.oidc.request_timeout))
            .connect_timeout(Duration::from_secs(config.oidc.connect_timeout))
            // Configure connection pool
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
    }

    pub fn new(config: GateConfig) -> Result<Self, std::io::Error> {
        let provider = config.oidc.provider_config().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid metadata URL: {}", e),
            )
        })?;
        let client = Self::create_idp_client(&config).map_err(|e| {
            std::io::Error::other(format!("Failed to create identity provider client: {}", e))
        })?;

        let evaluator = AllowListEvaluator::new(
            config.oidc.entitlement_claim.clone(),
            config.admin.get_entitlements(),
        );
        if evaluator.allow_list().is_empty() {
            log::warn!("Admin allow-list is empty, admin routes will reject every caller");
        }

        Ok(Self::with_strategies(
            config,
            Arc::new(RemoteIntrospector::with_client(client, provider)),
            Arc::new(evaluator),
        ))
    }

    /// Builds the state around explicit introspection and entitlement strategies
    pub fn with_strategies(
        config: GateConfig,
        introspector: Arc<dyn TokenIntrospector>,
        evaluator: Arc<dyn EntitlementEvaluator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            introspector,
            evaluator,
        }
    }

    /// Check if the identity provider can be reached
    pub async fn health_check(&self) -> bool {
        self.introspector.health().await
    }
}
