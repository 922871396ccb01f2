//! GraphQL object types.
//!
//! Relation fields (`User.posts`, `Post.author`) hit the store only when
//! they are selected.

use async_graphql::{Context, ErrorExtensions, Object, Result, SimpleObject};

use super::scalars::{ObjectId, Timestamp};
use super::services;
use crate::domain::{DeleteResult, LoginOutcome, Post, User};

/// A registered user. Never carries the password hash.
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ObjectId {
        self.0.id.into()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn age(&self) -> Option<i32> {
        self.0.age
    }

    async fn city(&self) -> Option<&str> {
        self.0.city.as_deref()
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at.into()
    }

    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let posts = services(ctx)?
            .users()
            .posts_of(self.0.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostObject).collect())
    }
}

/// A post.
pub struct PostObject(pub Post);

#[Object(name = "Post")]
impl PostObject {
    async fn id(&self) -> ObjectId {
        self.0.id.into()
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author_id(&self) -> ObjectId {
        self.0.author_id.into()
    }

    async fn tags(&self) -> &Vec<String> {
        &self.0.tags
    }

    async fn created_at(&self) -> Timestamp {
        self.0.created_at.into()
    }

    /// The author, or null when the referenced user no longer exists
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let author = services(ctx)?
            .posts()
            .author_of(self.0.author_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(author.map(UserObject))
    }
}

/// Result of a delete mutation
#[derive(SimpleObject)]
pub struct DeletePayload {
    pub ok: bool,
    pub deleted_count: i32,
}

impl From<DeleteResult> for DeletePayload {
    fn from(result: DeleteResult) -> Self {
        Self {
            ok: result.ok,
            deleted_count: i32::try_from(result.deleted_count).unwrap_or(i32::MAX),
        }
    }
}

/// Result of a login attempt
#[derive(SimpleObject)]
pub struct LoginPayload {
    pub success: bool,
    pub message: String,
    pub user: Option<UserObject>,
}

impl From<LoginOutcome> for LoginPayload {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            user: outcome.user.map(UserObject),
        }
    }
}
