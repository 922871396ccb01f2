//! GraphQL schema: query and mutation roots over the service container.

mod mutation;
mod objects;
mod query;
pub mod scalars;

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Schema};

use crate::services::ServiceContainer;

pub use mutation::MutationRoot;
pub use objects::{DeletePayload, LoginPayload, PostObject, UserObject};
pub use query::QueryRoot;
pub use scalars::{ObjectId, Timestamp};

/// The executable schema
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the services every resolver reaches through context data
pub fn build_schema(services: Arc<dyn ServiceContainer>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}

fn services<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<dyn ServiceContainer>> {
    ctx.data::<Arc<dyn ServiceContainer>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockServiceContainer;

    #[test]
    fn test_user_type_has_no_password_field() {
        let schema = build_schema(Arc::new(MockServiceContainer::new()));
        let sdl = schema.sdl();

        let user_type = sdl
            .split("type User {")
            .nth(1)
            .and_then(|rest| rest.split('}').next())
            .unwrap();
        assert!(user_type.contains("email: String!"));
        assert!(!user_type.to_lowercase().contains("password"));
    }

    #[test]
    fn test_schema_exposes_operations() {
        let sdl = build_schema(Arc::new(MockServiceContainer::new())).sdl();

        for field in [
            "usersByCity(city: String!): [User!]!",
            "postsByTag(tag: String!): [Post!]!",
            "postsByTitle(title: String!): [Post!]!",
            "loginUser(email: String!, password: String!): LoginPayload!",
            "deletePost(id: ObjectId!): DeletePayload!",
        ] {
            assert!(sdl.contains(field), "missing {field}");
        }
        assert!(sdl.contains("scalar ObjectId"));
        assert!(sdl.contains("scalar DateTime"));
    }
}
