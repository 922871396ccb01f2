//! Mutation root.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::objects::{DeletePayload, LoginPayload, PostObject, UserObject};
use super::scalars::ObjectId;
use super::services;
use crate::domain::{CreatePost, CreateUser};

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Register a user. Fails with `DUPLICATE_EMAIL` when the email is taken.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        password: String,
        age: Option<i32>,
        city: Option<String>,
    ) -> Result<UserObject> {
        let input = CreateUser {
            name,
            email,
            password,
            age,
            city,
        };
        let user = services(ctx)?
            .auth()
            .create_user(input)
            .await
            .map_err(|e| e.extend())?;
        Ok(UserObject(user))
    }

    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
        author_id: ObjectId,
        tags: Option<Vec<String>>,
    ) -> Result<PostObject> {
        let input = CreatePost::new(title, content, author_id.into(), tags);
        let post = services(ctx)?
            .posts()
            .create_post(input)
            .await
            .map_err(|e| e.extend())?;
        Ok(PostObject(post))
    }

    /// Delete a user and all of its posts
    async fn delete_user(&self, ctx: &Context<'_>, id: ObjectId) -> Result<DeletePayload> {
        let result = services(ctx)?
            .users()
            .delete_user(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(result.into())
    }

    /// Delete a post. A missing post gives `ok: false`.
    async fn delete_post(&self, ctx: &Context<'_>, id: ObjectId) -> Result<DeletePayload> {
        let result = services(ctx)?
            .posts()
            .delete_post(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(result.into())
    }

    async fn login_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<LoginPayload> {
        let outcome = services(ctx)?
            .auth()
            .login(email, password)
            .await
            .map_err(|e| e.extend())?;
        Ok(outcome.into())
    }
}
