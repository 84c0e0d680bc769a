use crate::config::GateConfig;
use crate::create_app;
use crate::state::AppState;
use axum::body::Body;
use axum::Router;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use oauth_introspect::EntitlementEvaluator;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

/// Discovery path served by the mocked identity provider
pub const METADATA_PATH: &str = "/.well-known/openid-configuration";
/// Introspection path advertised by the mocked metadata document
pub const INTROSPECTION_PATH: &str = "/oauth2/introspect";
/// Basic credentials of `gate-client:gate-secret`, as configured for tests
const TEST_BASIC_AUTH: &str = "Basic Z2F0ZS1jbGllbnQ6Z2F0ZS1zZWNyZXQ=";

/// Test fixture for setting up a complete test environment with a mocked
/// identity provider.
///
/// The fixture starts a mock server standing in for the identity provider,
/// configures the application against it and provides helpers for making
/// requests. Nothing is mounted on the mock server by default, so every test
/// states which discovery and introspection calls it expects.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///     fixture.mount_metadata(1).await;
///     fixture
///         .mount_introspection(Some("token"), 200, json!({"active": true, "eduperson_entitlement": []}), 1)
///         .await;
///
///     let response = fixture.get("/v1/token/claims", Some("token")).await;
///     response.assert_ok();
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Configuration the application was built with
    pub config: GateConfig,
    /// Mock server for the identity provider
    pub idp_mock: MockServer,
}

impl TestFixture {
    /// Creates a new test fixture with the default test configuration.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Creates a test fixture after letting `customize` adjust the test
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let fixture = TestFixture::with_config(|config| {
    ///     config.oidc.admin_scope = Some("eduperson_entitlement".to_string());
    /// })
    /// .await;
    /// ```
    pub async fn with_config(customize: impl FnOnce(&mut GateConfig)) -> Self {
        Self::build(customize, None).await
    }

    /// Creates a test fixture whose admin decisions come from `evaluator`
    /// instead of the configured allow-list.
    pub async fn with_evaluator(evaluator: Arc<dyn EntitlementEvaluator>) -> Self {
        Self::build(|_| {}, Some(evaluator)).await
    }

    async fn build(
        customize: impl FnOnce(&mut GateConfig),
        evaluator: Option<Arc<dyn EntitlementEvaluator>>,
    ) -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let idp_mock = MockServer::start().await;
        let mut config = GateConfig::for_test_with_mock(&idp_mock);
        customize(&mut config);

        let mut state = AppState::new(config.clone()).expect("Failed to create app state");
        if let Some(evaluator) = evaluator {
            state.evaluator = evaluator;
        }
        let app = create_app(state).await;

        Self {
            app,
            config,
            idp_mock,
        }
    }

    /// Initializes the test logger with the given level.
    ///
    /// Called by every constructor with `Debug`; only the first call in a
    /// test binary takes effect.
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Serves a metadata document advertising the mock's introspection
    /// endpoint, expecting exactly `expected_calls` discovery requests.
    pub async fn mount_metadata(&self, expected_calls: u64) {
        Mock::given(matchers::method("GET"))
            .and(matchers::path(METADATA_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issuer": self.idp_mock.uri(),
                "introspection_endpoint": format!("{}{}", self.idp_mock.uri(), INTROSPECTION_PATH),
            })))
            .expect(expected_calls)
            .mount(&self.idp_mock)
            .await;
    }

    /// Makes discovery fail with `status`.
    pub async fn mount_metadata_failure(&self, status: u16) {
        Mock::given(matchers::method("GET"))
            .and(matchers::path(METADATA_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.idp_mock)
            .await;
    }

    /// Answers introspection calls with `status` and the JSON `body`.
    ///
    /// The mock only matches calls made with the test client credentials and,
    /// when `token` is given, only calls introspecting that token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// // Any token is rejected by the provider, exactly once
    /// fixture
    ///     .mount_introspection(None, 401, json!({"error": "invalid_token"}), 1)
    ///     .await;
    /// ```
    pub async fn mount_introspection(
        &self,
        token: Option<&str>,
        status: u16,
        body: Value,
        expected_calls: u64,
    ) {
        let mut mock = Mock::given(matchers::method("POST"))
            .and(matchers::path(INTROSPECTION_PATH))
            .and(matchers::header("authorization", TEST_BASIC_AUTH));
        if let Some(token) = token {
            mock = mock.and(matchers::body_string_contains(format!("token={token}&")));
        }

        mock.respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(expected_calls)
            .mount(&self.idp_mock)
            .await;
    }

    /// Creates a GET request builder, with a bearer `Authorization` header
    /// when `token` is given.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let request = fixture
    ///     .request_builder("/v1/token/claims", None)
    ///     .header("Authorization", "Basic Z2F0ZTpnYXRl")
    ///     .body(Body::empty())
    ///     .expect("Failed to build request");
    ///
    /// let response = fixture.send(request).await;
    /// ```
    pub fn request_builder(&self, uri: impl AsRef<str>, token: Option<&str>) -> http::request::Builder {
        let builder = Request::builder().method(Method::GET).uri(uri.as_ref());

        match token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Sends a GET request to the specified URI.
    pub async fn get(&self, uri: impl AsRef<str>, token: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(uri, token)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse.
    ///
    /// This is the lower-level method used by `get()`. Use it when the
    /// request needs headers the builder does not add.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes()
            .to_vec();

        // Try to parse as JSON, defaulting to empty object if parsing fails or empty body
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| json!({}))
        } else {
            json!({})
        };

        TestResponse {
            status,
            headers,
            body,
            json,
        }
    }
}

/// Response from a test request that provides convenient access to status,
/// headers and body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Returns a header value, if present and valid ASCII.
    ///
    /// # Examples
    ///
    /// ```rust
    /// assert_eq!(response.header("www-authenticate"), Some("Bearer"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts that the response status is OK (200).
    ///
    /// A shorthand for `assert_status(StatusCode::OK)`.
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }
}
