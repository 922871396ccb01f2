//! API layer - HTTP transport and GraphQL schema
//!
//! This module contains all API-facing concerns:
//! - GraphQL schema, objects and scalars
//! - HTTP handlers
//! - Route definitions

pub mod handlers;
pub mod routes;
pub mod schema;
pub mod state;

pub use routes::create_router;
pub use schema::{build_schema, AppSchema};
pub use state::AppState;
