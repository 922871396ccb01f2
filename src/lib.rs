//! blog-graphql - users and posts behind a GraphQL API
//!
//! Password-authenticated user accounts and their posts, stored in
//! PostgreSQL through SeaORM and exposed through an async-graphql schema
//! served by Axum.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities and the password value object
//! - **services**: Application use cases
//! - **infra**: Database, migrations, repositories and Unit of Work
//! - **api**: GraphQL schema, HTTP handlers and routes
//! - **types**: Shared types (pagination)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Load the demo dataset
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{build_schema, AppSchema, AppState};
pub use config::Config;
pub use domain::{Password, Post, User};
pub use errors::{AppError, AppResult};
