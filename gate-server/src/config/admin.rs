use confique::Config;

/// Administrator allow-list configuration
#[derive(Debug, Config, Clone, Default)]
pub struct AdminConfig {
    /// Entitlements that grant administrator rights.
    /// Comma-separated list (default: empty, nobody is an admin)
    #[config(env = "GATE_ADMIN_ENTITLEMENTS", default = "")]
    pub entitlements: String,
}

impl AdminConfig {
    /// Get the allow-list as a vector
    pub fn get_entitlements(&self) -> Vec<String> {
        self.entitlements
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
