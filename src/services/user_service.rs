//! User service - user lookups, search and cascading delete.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ENTITY_USER;
use crate::domain::{DeleteResult, Post, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID; absence is not an error
    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List users page by page
    async fn list_users(&self, page: PageRequest) -> AppResult<Vec<User>>;

    /// Users whose city contains `city`, ignoring case
    async fn find_users_by_city(&self, city: String) -> AppResult<Vec<User>>;

    /// Delete a user and all of its posts.
    ///
    /// Fails with `NotFound` when the user does not exist.
    async fn delete_user(&self, id: Uuid) -> AppResult<DeleteResult>;

    /// Posts authored by a user
    async fn posts_of(&self, user_id: Uuid) -> AppResult<Vec<Post>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        self.uow.users().find_by_id(id).await
    }

    async fn list_users(&self, page: PageRequest) -> AppResult<Vec<User>> {
        self.uow.users().list(page).await
    }

    async fn find_users_by_city(&self, city: String) -> AppResult<Vec<User>> {
        self.uow.users().find_by_city(&city).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<DeleteResult> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found(ENTITY_USER)?;

        let deleted = self.uow.delete_user_with_posts(id).await?;
        tracing::info!(
            user_id = %id,
            posts = deleted.posts,
            "User deleted with its posts"
        );

        Ok(DeleteResult::from_count(deleted.users))
    }

    async fn posts_of(&self, user_id: Uuid) -> AppResult<Vec<Post>> {
        self.uow.posts().find_by_author(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::{
        CascadeDeletion, MockPostRepository, MockUnitOfWork, MockUserRepository, PostRepository,
        UserRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_user(id: Uuid) -> User {
        User {
            id,
            name: "Charlie Wilson".to_string(),
            email: "charlie@example.com".to_string(),
            age: Some(35),
            city: Some("San Francisco".to_string()),
            created_at: Utc::now(),
        }
    }

    fn uow_with(users: MockUserRepository, posts: MockPostRepository) -> MockUnitOfWork {
        let users: Arc<dyn UserRepository> = Arc::new(users);
        let posts: Arc<dyn PostRepository> = Arc::new(posts);
        let mut uow = MockUnitOfWork::new();
        uow.expect_users().returning(move || users.clone());
        uow.expect_posts().returning(move || posts.clone());
        uow
    }

    #[tokio::test]
    async fn test_get_missing_user_is_none() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(uow_with(users, MockPostRepository::new())));

        assert_eq!(service.get_user(Uuid::now_v7()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_users_passes_page_through() {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .with(eq(PageRequest::new(2, 1)))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = UserManager::new(Arc::new(uow_with(users, MockPostRepository::new())));

        assert!(service.list_users(PageRequest::new(2, 1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let id = Uuid::now_v7();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(sample_user(id))));

        let mut uow = uow_with(users, MockPostRepository::new());
        uow.expect_delete_user_with_posts()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(CascadeDeletion { users: 1, posts: 2 }));

        let service = UserManager::new(Arc::new(uow));
        let result = service.delete_user(id).await.unwrap();

        assert_eq!(result, DeleteResult::from_count(1));
        assert!(result.ok);
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let mut uow = uow_with(users, MockPostRepository::new());
        uow.expect_delete_user_with_posts().never();

        let service = UserManager::new(Arc::new(uow));
        let result = service.delete_user(Uuid::now_v7()).await;

        assert!(matches!(result, Err(AppError::NotFound("User"))));
    }

    #[tokio::test]
    async fn test_posts_of_queries_by_author() {
        let id = Uuid::now_v7();
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_author()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = UserManager::new(Arc::new(uow_with(MockUserRepository::new(), posts)));

        assert!(service.posts_of(id).await.unwrap().is_empty());
    }
}
