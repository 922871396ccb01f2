//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the multi-step operations that
//! must commit or roll back as a whole.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, EntityTrait, IsolationLevel,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{PostEntity, PostTagEntity, UserEntity};
use super::repositories::{
    delete_posts_by_author, delete_user_row, PostRepository, PostStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Row counts removed by a cascading user delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeDeletion {
    pub users: u64,
    pub posts: u64,
}

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories plus the atomic
/// operations that span more than one of them.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get post repository
    fn posts(&self) -> Arc<dyn PostRepository>;

    /// Delete a user and every post referencing it in one transaction.
    async fn delete_user_with_posts(&self, user_id: Uuid) -> AppResult<CascadeDeletion>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    post_repo: Arc<PostStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let post_repo = Arc::new(PostStore::new(db.clone()));
        Self {
            db,
            user_repo,
            post_repo,
        }
    }

    /// Remove every post, tag and user. Used by the seeder.
    pub async fn clear(&self) -> AppResult<()> {
        let txn = self.begin().await?;

        let result = async {
            PostTagEntity::delete_many().exec(&txn).await?;
            PostEntity::delete_many().exec(&txn).await?;
            UserEntity::delete_many().exec(&txn).await?;
            Ok::<_, sea_orm::DbErr>(())
        }
        .await;

        match result {
            Ok(()) => txn.commit().await.map_err(AppError::from),
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(AppError::from(e))
            }
        }
    }

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.post_repo.clone()
    }

    async fn delete_user_with_posts(&self, user_id: Uuid) -> AppResult<CascadeDeletion> {
        let txn = self.begin().await?;

        let result = async {
            let posts = delete_posts_by_author(&txn, user_id).await?;
            let users = delete_user_row(&txn, user_id).await?;
            Ok::<_, AppError>(CascadeDeletion { users, posts })
        }
        .await;

        match result {
            Ok(deleted) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(deleted)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
