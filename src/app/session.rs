//! Authentication Session
//!
//! The session is an explicit value constructed by the sign-in flow and
//! passed into components at composition time. Feature components read it
//! (through the API client); only the auth flow writes it.

use crate::shared::models::UserProfile;

/// Current authentication state: access token plus the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for an authenticated user
    pub fn authenticated(token: String, user: UserProfile) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    /// The bearer token, if signed in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Drop credentials (sign-out)
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_authenticated_session() {
        let user = UserProfile {
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
        };
        let session = Session::authenticated("tok-1".to_string(), user);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-1"));
        assert_eq!(session.user().unwrap().name, "Kim");
    }

    #[test]
    fn test_clear() {
        let mut session = Session::authenticated("tok-1".to_string(), UserProfile::default());
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
