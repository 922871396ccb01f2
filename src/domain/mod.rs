//! Domain layer - Core business entities and logic
//!
//! Users, posts and the password value object, independent of the database
//! and of the GraphQL layer.

pub mod password;
pub mod post;
pub mod user;

pub use password::Password;
pub use post::{CreatePost, DeleteResult, Post};
pub use user::{CreateUser, LoginOutcome, NewUser, User, UserAccount};
