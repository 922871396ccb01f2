//! HTTP request handlers.

pub mod graphql_handler;

pub use graphql_handler::{graphiql, graphql};
