//! Service Container - Centralized service access.
//!
//! Services are shared behind `Arc`s; the container is what the GraphQL
//! schema receives as context data.

use std::sync::Arc;

use super::{AuthService, PostService, UserService};
use crate::infra::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get post service
    fn posts(&self) -> Arc<dyn PostService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    post_service: Arc<dyn PostService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        post_service: Arc<dyn PostService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            post_service,
        }
    }

    /// Wire every service onto one Unit of Work
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>) -> Self {
        use super::{Authenticator, PostManager, UserManager};

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            post_service: Arc::new(PostManager::new(uow)),
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn posts(&self) -> Arc<dyn PostService> {
        self.post_service.clone()
    }
}
