//! Authentication service - user registration and login.
//!
//! Passwords are hashed with the domain [`Password`] value object before they
//! reach the store; login compares against the stored credential.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{LOGIN_INVALID_PASSWORD, LOGIN_USER_NOT_FOUND};
use crate::domain::{CreateUser, LoginOutcome, NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user, rejecting an email that is already taken
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Check credentials. Unknown email and wrong password are outcomes, not errors.
    async fn login(&self, email: String, password: String) -> AppResult<LoginOutcome>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let users = self.uow.users();

        // Fast path; the unique index on email still decides concurrent inserts
        if users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password = Password::new(&input.password)?;
        let user = users.create(NewUser::from_input(input, password)).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginOutcome> {
        let Some(account) = self.uow.users().find_by_email(&email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Ok(LoginOutcome::failed(LOGIN_USER_NOT_FOUND));
        };

        if !account.verify_password(&password) {
            tracing::debug!(user_id = %account.user.id, "Login rejected: wrong password");
            return Ok(LoginOutcome::failed(LOGIN_INVALID_PASSWORD));
        }

        Ok(LoginOutcome::succeeded(account.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserAccount;
    use crate::infra::{MockUnitOfWork, MockUserRepository, UserRepository};
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user(email: &str) -> User {
        User {
            id: Uuid::now_v7(),
            name: "Bob Johnson".to_string(),
            email: email.to_string(),
            age: Some(32),
            city: Some("Chicago".to_string()),
            created_at: Utc::now(),
        }
    }

    fn input(email: &str, password: &str) -> CreateUser {
        CreateUser {
            name: "Bob Johnson".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            age: Some(32),
            city: Some("Chicago".to_string()),
        }
    }

    fn service_with(users: MockUserRepository) -> Authenticator<MockUnitOfWork> {
        let users: Arc<dyn UserRepository> = Arc::new(users);
        let mut uow = MockUnitOfWork::new();
        uow.expect_users().returning(move || users.clone());
        Authenticator::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|new_user| {
                new_user.password.as_str() != "bobsecret" && new_user.password.verify("bobsecret")
            })
            .times(1)
            .returning(|new_user| Ok(sample_user(&new_user.email)));

        let service = service_with(users);
        let user = service
            .create_user(input("bob@example.com", "bobsecret"))
            .await
            .unwrap();

        assert_eq!(user.email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_create_user_rejects_existing_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|email| {
            Ok(Some(UserAccount {
                user: sample_user(email),
                password: Password::from_hash("stored".to_string()),
            }))
        });
        users.expect_create().never();

        let service = service_with(users);
        let result = service.create_user(input("bob@example.com", "x")).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_create_user_passes_through_store_duplicate() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|_| Err(AppError::DuplicateEmail));

        let service = service_with(users);
        let result = service.create_user(input("race@example.com", "x")).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let password = Password::new("alicepass").unwrap();
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(move |email| {
            if email == "alice@example.com" {
                Ok(Some(UserAccount {
                    user: sample_user(email),
                    password: password.clone(),
                }))
            } else {
                Ok(None)
            }
        });

        let service = service_with(users);

        let ok = service
            .login("alice@example.com".to_string(), "alicepass".to_string())
            .await
            .unwrap();
        assert!(ok.success);
        assert_eq!(ok.message, "Login successful");
        assert_eq!(ok.user.unwrap().email, "alice@example.com");

        let wrong = service
            .login("alice@example.com".to_string(), "nope".to_string())
            .await
            .unwrap();
        assert!(!wrong.success);
        assert_eq!(wrong.message, "Invalid password");
        assert!(wrong.user.is_none());

        let missing = service
            .login("ghost@example.com".to_string(), "alicepass".to_string())
            .await
            .unwrap();
        assert!(!missing.success);
        assert_eq!(missing.message, "User not found");
    }

    #[tokio::test]
    async fn test_login_propagates_store_errors() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(AppError::StoreUnavailable("connection refused".to_string())));

        let service = service_with(users);
        let result = service
            .login("alice@example.com".to_string(), "alicepass".to_string())
            .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }
}
