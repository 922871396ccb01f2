//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Password;

/// User as seen outside the store boundary.
///
/// Has no password field; credentials only travel inside [`UserAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user together with its stored credential.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: User,
    pub password: Password,
}

impl UserAccount {
    /// Check a plain text password against the stored hash
    pub fn verify_password(&self, plain_text: &str) -> bool {
        self.password.verify(plain_text)
    }
}

/// User creation input
#[derive(Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Plain text password, hashed before it reaches the store
    pub password: String,
    pub age: Option<i32>,
    pub city: Option<String>,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("age", &self.age)
            .field("city", &self.city)
            .finish()
    }
}

/// A user ready to be persisted: password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Password,
    pub age: Option<i32>,
    pub city: Option<String>,
}

impl NewUser {
    /// Build a persistable user from creation input and its hashed password
    pub fn from_input(input: CreateUser, password: Password) -> Self {
        Self {
            name: input.name,
            email: input.email,
            password,
            age: input.age,
            city: input.city,
        }
    }
}

/// Result of a login attempt.
///
/// A failed login is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: String,
    pub user: Option<User>,
}

impl LoginOutcome {
    pub fn succeeded(user: User) -> Self {
        Self {
            success: true,
            message: crate::config::LOGIN_SUCCESS.to_string(),
            user: Some(user),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
        }
    }
}
