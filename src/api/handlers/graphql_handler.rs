//! GraphQL HTTP handlers.

use async_graphql::http::GraphiQLSource;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};

use crate::api::AppState;
use crate::config::GRAPHQL_PATH;

/// Execute a GraphQL request.
///
/// Resolver errors are reported inside the response body, so the status
/// is 200 whenever the request itself could be parsed.
pub async fn graphql(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request).await)
}

/// Serve the GraphiQL IDE when it is enabled
pub async fn graphiql(State(state): State<AppState>) -> Response {
    if !state.graphiql {
        return StatusCode::NOT_FOUND.into_response();
    }

    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response()
}
