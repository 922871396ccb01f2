//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use the Unit of Work for repository access and
//! transactional operations.

mod auth_service;
pub mod container;
mod post_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use post_service::{PostManager, PostService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use post_service::MockPostService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
