//! Application state - Dependency injection container.
//!
//! Holds the executable schema and the database handle used by health checks.

use std::sync::Arc;

use super::schema::{build_schema, AppSchema};
use crate::config::Config;
use crate::infra::Database;
use crate::services::Services;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Executable GraphQL schema (services live in its context data)
    pub schema: AppSchema,
    /// Database connection
    pub database: Arc<Database>,
    /// Whether `GET /graphql` serves GraphiQL
    pub graphiql: bool,
}

impl AppState {
    /// Create application state from the database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let services = Arc::new(Services::from_connection(database.get_connection()));
        Self {
            schema: build_schema(services),
            database,
            graphiql: config.graphiql,
        }
    }

    /// Create application state around an already built schema.
    pub fn new(schema: AppSchema, database: Arc<Database>, graphiql: bool) -> Self {
        Self {
            schema,
            database,
            graphiql,
        }
    }
}
