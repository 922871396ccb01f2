//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with conversion into GraphQL errors carrying a stable `code` extension.

use async_graphql::ErrorExtensions;
use sea_orm::DbErr;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("{0} not found")]
    NotFound(&'static str),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Store errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error")]
    Database(DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),

            // Hide details for store/internal errors
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                "The data store is unavailable".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
            return AppError::StoreUnavailable(err.to_string());
        }
        AppError::Database(err)
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.user_message()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T> {
        self.ok_or(AppError::NotFound(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(AppError::DuplicateEmail.user_message(), "Email already exists");
        assert_eq!(AppError::NotFound("User").user_message(), "User not found");
        assert_eq!(
            AppError::validation("limit must not be negative").user_message(),
            "limit must not be negative"
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::internal("argon2 exploded");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_connection_errors_become_store_unavailable() {
        let err = AppError::from(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, AppError::StoreUnavailable(_)));
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
    }

    #[test]
    fn test_other_db_errors_stay_database_errors() {
        let err = AppError::from(DbErr::RecordNotInserted);
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_graphql_error_carries_code() {
        let err = AppError::NotFound("User").extend();
        assert_eq!(err.message, "User not found");
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found("Post"), Err(AppError::NotFound("Post"))));
        assert_eq!(Some(3u8).ok_or_not_found("Post").unwrap(), 3);
    }
}
