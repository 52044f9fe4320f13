//! User and authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ids::UserId;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".into());
        }
        if !self.email.contains('@') {
            return Err(format!("'{}' is not a valid email address", self.email));
        }
        if self.password.chars().count() < 6 {
            return Err("Password must be at least 6 characters".into());
        }
        Ok(())
    }
}

/// Body of `PUT /users/me`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Body of `POST /auth/change-password`
#[derive(Debug, Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Tokens and profile returned by login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Reply of `POST /auth/refresh-token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_auth_response() {
        let json = r#"{
            "access_token": "a",
            "refresh_token": "r",
            "user": {"id": "u-1", "email": "ana@example.com", "name": "Ana"}
        }"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.user.to_string(), "Ana <ana@example.com>");
        assert!(auth.user.created_at.is_none());
    }

    #[test]
    fn test_register_validation() {
        let mut request = RegisterRequest {
            name: "Ana".into(),
            email: "ana.example.com".into(),
            password: "secret1".into(),
        };
        assert!(request.validate().is_err());

        request.email = "ana@example.com".into();
        assert!(request.validate().is_ok());

        request.password = "123".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_change_password_wire_shape() {
        let request = ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "new-secret".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"current_password": "old", "new_password": "new-secret"})
        );
    }
}
