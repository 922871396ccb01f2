//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Repositories over the users/posts tables
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{PostRepository, PostStore, UserRepository, UserStore};
pub use unit_of_work::{CascadeDeletion, Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockPostRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
