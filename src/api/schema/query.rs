//! Query root.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::objects::{PostObject, UserObject};
use super::scalars::ObjectId;
use super::services;
use crate::types::PageRequest;

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Look up a user by id
    async fn user(&self, ctx: &Context<'_>, id: ObjectId) -> Result<Option<UserObject>> {
        let user = services(ctx)?
            .users()
            .get_user(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(user.map(UserObject))
    }

    /// Look up a post by id
    async fn post(&self, ctx: &Context<'_>, id: ObjectId) -> Result<Option<PostObject>> {
        let post = services(ctx)?
            .posts()
            .get_post(id.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(post.map(PostObject))
    }

    /// List users. `limit: 0` returns everything after `skip`.
    async fn users(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        skip: Option<i32>,
    ) -> Result<Vec<UserObject>> {
        let page = PageRequest::from_args(limit, skip).map_err(|e| e.extend())?;
        let users = services(ctx)?
            .users()
            .list_users(page)
            .await
            .map_err(|e| e.extend())?;
        Ok(users.into_iter().map(UserObject).collect())
    }

    /// List posts. `limit: 0` returns everything after `skip`.
    async fn posts(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        skip: Option<i32>,
    ) -> Result<Vec<PostObject>> {
        let page = PageRequest::from_args(limit, skip).map_err(|e| e.extend())?;
        let posts = services(ctx)?
            .posts()
            .list_posts(page)
            .await
            .map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostObject).collect())
    }

    /// Users whose city contains the given text, ignoring case
    async fn users_by_city(&self, ctx: &Context<'_>, city: String) -> Result<Vec<UserObject>> {
        let users = services(ctx)?
            .users()
            .find_users_by_city(city)
            .await
            .map_err(|e| e.extend())?;
        Ok(users.into_iter().map(UserObject).collect())
    }

    /// Posts carrying exactly this tag
    async fn posts_by_tag(&self, ctx: &Context<'_>, tag: String) -> Result<Vec<PostObject>> {
        let posts = services(ctx)?
            .posts()
            .find_posts_by_tag(tag)
            .await
            .map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostObject).collect())
    }

    /// Posts whose title contains the given text, ignoring case
    async fn posts_by_title(&self, ctx: &Context<'_>, title: String) -> Result<Vec<PostObject>> {
        let posts = services(ctx)?
            .posts()
            .find_posts_by_title(title)
            .await
            .map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(PostObject).collect())
    }
}
