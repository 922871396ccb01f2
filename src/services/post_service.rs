//! Post service - post creation, lookups, search and delete.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreatePost, DeleteResult, Post, User};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a post. The author id is stored as given.
    async fn create_post(&self, input: CreatePost) -> AppResult<Post>;

    /// Get post by ID; absence is not an error
    async fn get_post(&self, id: Uuid) -> AppResult<Option<Post>>;

    /// List posts page by page
    async fn list_posts(&self, page: PageRequest) -> AppResult<Vec<Post>>;

    /// Posts carrying exactly this tag
    async fn find_posts_by_tag(&self, tag: String) -> AppResult<Vec<Post>>;

    /// Posts whose title contains `title`, ignoring case
    async fn find_posts_by_title(&self, title: String) -> AppResult<Vec<Post>>;

    /// Delete a post. A missing post yields `ok: false`, not an error.
    async fn delete_post(&self, id: Uuid) -> AppResult<DeleteResult>;

    /// The user a post references, if it still exists
    async fn author_of(&self, author_id: Uuid) -> AppResult<Option<User>>;
}

/// Concrete implementation of PostService using Unit of Work.
pub struct PostManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PostManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PostService for PostManager<U> {
    async fn create_post(&self, input: CreatePost) -> AppResult<Post> {
        let post = self.uow.posts().create(input).await?;
        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> AppResult<Option<Post>> {
        self.uow.posts().find_by_id(id).await
    }

    async fn list_posts(&self, page: PageRequest) -> AppResult<Vec<Post>> {
        self.uow.posts().list(page).await
    }

    async fn find_posts_by_tag(&self, tag: String) -> AppResult<Vec<Post>> {
        self.uow.posts().find_by_tag(&tag).await
    }

    async fn find_posts_by_title(&self, title: String) -> AppResult<Vec<Post>> {
        self.uow.posts().find_by_title(&title).await
    }

    async fn delete_post(&self, id: Uuid) -> AppResult<DeleteResult> {
        let deleted = self.uow.posts().delete(id).await?;
        if deleted > 0 {
            tracing::info!(post_id = %id, "Post deleted");
        }
        Ok(DeleteResult::from_count(deleted))
    }

    async fn author_of(&self, author_id: Uuid) -> AppResult<Option<User>> {
        self.uow.users().find_by_id(author_id).await
    }
}
