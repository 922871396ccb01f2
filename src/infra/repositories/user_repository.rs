//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sqlx, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, DeleteMany,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, RuntimeErr, Select, Set,
};
use uuid::Uuid;

use super::contains_ignore_case;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserAccount};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Read methods return sanitized [`User`]s; only [`find_by_email`] exposes the
/// stored credential, for login.
///
/// [`find_by_email`]: UserRepository::find_by_email
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user and credential by exact (case-sensitive) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserAccount>>;

    /// Insert a new user.
    ///
    /// A unique-index violation on email is reported as `DuplicateEmail`.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// List users in store order
    async fn list(&self, page: PageRequest) -> AppResult<Vec<User>>;

    /// Find users whose city contains `city`, ignoring case
    async fn find_by_city(&self, city: &str) -> AppResult<Vec<User>>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserAccount::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password.into_string()),
            age: Set(new_user.age),
            city: Set(new_user.city),
            created_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(insert_error)?;
        Ok(User::from(model))
    }

    async fn list(&self, page: PageRequest) -> AppResult<Vec<User>> {
        let mut query = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .offset(page.offset());
        if let Some(limit) = page.limit() {
            query = query.limit(limit);
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_city(&self, city: &str) -> AppResult<Vec<User>> {
        let models = city_query(city)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}

/// Delete a user row, returning the number of rows removed.
pub(crate) async fn delete_user_row<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<u64> {
    let result = delete_user_query(id)
        .exec(conn)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected)
}

fn city_query(city: &str) -> Select<UserEntity> {
    UserEntity::find()
        .filter(contains_ignore_case(user::Column::City, city))
        .order_by_asc(user::Column::CreatedAt)
        .order_by_asc(user::Column::Id)
}

fn delete_user_query(id: Uuid) -> DeleteMany<UserEntity> {
    UserEntity::delete_by_id(id)
}

/// Map insert failures, turning the email unique-index violation into
/// `DuplicateEmail`.
fn insert_error(err: DbErr) -> AppError {
    match unique_violation(&err) {
        Some(detail) => {
            tracing::warn!("Unique constraint rejected user insert: {}", detail);
            AppError::DuplicateEmail
        }
        None => AppError::from(err),
    }
}

fn unique_violation(err: &DbErr) -> Option<&str> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
            if db.is_unique_violation() =>
        {
            Some(db.message())
        }
        _ => None,
    }
}
