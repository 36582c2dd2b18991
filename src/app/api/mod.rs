//! HTTP Client Gateway
//!
//! One configured `reqwest` client used by every feature component. It
//! attaches the bearer token from the session, joins paths onto the
//! configured base URL, and maps non-success responses into the client
//! error taxonomy. Endpoint methods live in per-feature submodules.

mod categories;
mod documents;
mod members;
mod schedules;

pub use members::{AvatarUpload, ParticipantProfileUpdate};

use crate::app::config::Config;
use crate::app::session::Session;
use crate::shared::ClientError;
use reqwest::{Client, RequestBuilder, Response};

/// API client: configured HTTP client plus base URL and session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
    session: Session,
}

impl ApiClient {
    pub fn new(config: Config, session: Session) -> Self {
        Self {
            http: Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        self.config.api_url(path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Attach the session's bearer token, failing up front when signed out.
    pub(crate) fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self
            .session
            .token()
            .ok_or_else(|| ClientError::auth(401, "not signed in"))?;
        Ok(builder.bearer_auth(token))
    }

    /// Pass successful responses through; classify everything else.
    pub(crate) async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status.as_u16(), message))
    }
}
