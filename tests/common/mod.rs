//! Shared helpers for the wire-level tests: a mock backend plus an
//! authenticated client/services pair pointed at it.

#![allow(dead_code)]

use teamspace::app::{ApiClient, Config, Services, Session};
use teamspace::shared::config::AppConfig;
use teamspace::shared::models::UserProfile;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";

/// Client configured against the mock server, signed in as a test user.
pub fn client_for(server: &MockServer) -> ApiClient {
    let config = Config::with_builder(AppConfig::builder().server_url(server.uri()))
        .expect("mock server uri is a valid base url");
    let session = Session::authenticated(
        TEST_TOKEN.to_string(),
        UserProfile {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
        },
    );
    ApiClient::new(config, session)
}

/// Services on the current tokio runtime, for driving state handlers.
pub fn services_for(server: &MockServer) -> Services {
    let api = client_for(server);
    let config = api.config().clone();
    Services::new(api, config, tokio::runtime::Handle::current())
}

/// Anonymous client (no bearer token) for the sign-in endpoint.
pub fn anonymous_client_for(server: &MockServer) -> ApiClient {
    let config = Config::with_builder(AppConfig::builder().server_url(server.uri()))
        .expect("mock server uri is a valid base url");
    ApiClient::new(config, Session::new())
}
