//! Sign-in State
//!
//! Submits credentials, then fetches the user profile with the fresh token.
//! The resulting (token, profile) pair is handed to the app, which builds
//! the session passed into every other component.

use crate::app::api::ApiClient;
use crate::app::jobs::{poll_slot, Job, Services};
use crate::app::session::Session;
use crate::shared::models::{SignInRequest, UserProfile};
use crate::shared::ClientError;

/// Sign-in form state
pub struct SignInPanel {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
    job: Option<Job<Result<(String, UserProfile), ClientError>>>,
}

impl SignInPanel {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            error: None,
            loading: false,
            job: None,
        }
    }

    pub fn submit(&mut self, services: &Services) {
        if self.email.is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required.".to_string());
            return;
        }
        self.error = None;
        self.loading = true;

        let request = SignInRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        let api = services.api.clone();
        self.job = Some(services.spawn(async move {
            let token = api.sign_in(&request).await?;
            // The profile fetch needs the token we just received.
            let authed = ApiClient::new(
                api.config().clone(),
                Session::authenticated(token.clone(), UserProfile::default()),
            );
            let user = authed.my_page().await?;
            Ok((token, user))
        }));
    }

    /// Poll the pending sign-in. Returns the credentials exactly once on
    /// success; failures become the inline form error.
    pub fn poll(&mut self) -> Option<(String, UserProfile)> {
        let result = poll_slot(&mut self.job)?;
        self.loading = false;
        match result {
            Ok(pair) => {
                self.password.clear();
                self.error = None;
                Some(pair)
            }
            Err(error) => {
                self.error = Some(match &error {
                    ClientError::Auth { .. } => "Email or password is incorrect.".to_string(),
                    ClientError::Network { .. } => "Could not reach the server.".to_string(),
                    other => other.to_string(),
                });
                None
            }
        }
    }
}

impl Default for SignInPanel {
    fn default() -> Self {
        Self::new()
    }
}
