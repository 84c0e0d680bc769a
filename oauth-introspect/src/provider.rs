use std::fmt;
use std::time::Duration;
use url::Url;

/// Connection settings for one identity provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// Short provider name used in log lines (e.g. "egi")
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    /// OAuth 2.0 / OpenID Connect discovery document URL
    pub metadata_url: Url,
    /// Upper bound for a single discovery or introspection call
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// How long a resolved metadata document stays cached, `None` = forever
    pub metadata_ttl: Option<Duration>,
}

impl ProviderConfig {
    pub fn new(
        name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        metadata_url: Url,
    ) -> Self {
        Self {
            name: name.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            metadata_url,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            metadata_ttl: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_metadata_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.metadata_ttl = ttl;
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("metadata_url", &self.metadata_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("metadata_ttl", &self.metadata_ttl)
            .finish()
    }
}
