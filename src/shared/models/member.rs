//! Member (User) Data Structures

use serde::{Deserialize, Serialize};

/// The authenticated user's profile from `GET /my-page`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /sign-in`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /member/password`. The backend expects lowercase
/// single-word field names here, unlike the rest of the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    #[serde(rename = "oldpassword")]
    pub old_password: String,
    #[serde(rename = "newpassword")]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_change_wire_names() {
        let request = PasswordChangeRequest {
            old_password: "hunter2".to_string(),
            new_password: "correcthorse".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"oldpassword": "hunter2", "newpassword": "correcthorse"})
        );
    }

    #[test]
    fn test_user_profile_decodes_sparse() {
        let profile: UserProfile = serde_json::from_value(json!({"name": "Kim"})).unwrap();
        assert_eq!(profile.name, "Kim");
        assert!(profile.email.is_empty());
    }
}
