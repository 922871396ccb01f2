//! Post repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DeleteMany, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use super::contains_ignore_case;
use super::entities::post::{self, Entity as PostEntity};
use super::entities::post_tag::{self, Entity as PostTagEntity};
use crate::domain::{CreatePost, Post};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>>;

    /// Insert a post and its tags
    async fn create(&self, post: CreatePost) -> AppResult<Post>;

    /// List posts in store order
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Post>>;

    /// Find posts carrying exactly this tag
    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Post>>;

    /// Find posts whose title contains `title`, ignoring case
    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Post>>;

    /// Find all posts referencing this author
    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Post>>;

    /// Delete post by ID, returning the number of posts removed
    async fn delete(&self, id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation of PostRepository
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match model {
            Some(model) => Ok(with_tags(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, input: CreatePost) -> AppResult<Post> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        match insert_post(&txn, input).await {
            Ok(post) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(post)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn list(&self, page: PageRequest) -> AppResult<Vec<Post>> {
        let mut query = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .offset(page.offset());
        if let Some(limit) = page.limit() {
            query = query.limit(limit);
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        with_tags(&self.db, models).await
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Post>> {
        let models = tag_query(tag)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        with_tags(&self.db, models).await
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Post>> {
        let models = title_query(title)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        with_tags(&self.db, models).await
    }

    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Post>> {
        let models = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        with_tags(&self.db, models).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        // post_tags rows go with the post (ON DELETE CASCADE)
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected)
    }
}

/// Delete every post referencing `author_id`, returning the count.
pub(crate) async fn delete_posts_by_author<C: ConnectionTrait>(
    conn: &C,
    author_id: Uuid,
) -> AppResult<u64> {
    let result = delete_by_author_query(author_id)
        .exec(conn)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected)
}

/// Posts whose tag list holds `tag` as a whole element.
fn tag_query(tag: &str) -> Select<PostEntity> {
    let tagged = Query::select()
        .column(post_tag::Column::PostId)
        .from(PostTagEntity)
        .and_where(post_tag::Column::Tag.eq(tag))
        .to_owned();

    PostEntity::find()
        .filter(post::Column::Id.in_subquery(tagged))
        .order_by_asc(post::Column::CreatedAt)
        .order_by_asc(post::Column::Id)
}

fn title_query(title: &str) -> Select<PostEntity> {
    PostEntity::find()
        .filter(contains_ignore_case(post::Column::Title, title))
        .order_by_asc(post::Column::CreatedAt)
        .order_by_asc(post::Column::Id)
}

fn delete_by_author_query(author_id: Uuid) -> DeleteMany<PostEntity> {
    PostEntity::delete_many().filter(post::Column::AuthorId.eq(author_id))
}

async fn insert_post<C: ConnectionTrait>(conn: &C, input: CreatePost) -> AppResult<Post> {
    let model = post::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(input.title),
        content: Set(input.content),
        author_id: Set(input.author_id),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await
    .map_err(AppError::from)?;

    if !input.tags.is_empty() {
        let rows = input
            .tags
            .iter()
            .enumerate()
            .map(|(position, tag)| post_tag::ActiveModel {
                post_id: Set(model.id),
                position: Set(position as i32),
                tag: Set(tag.clone()),
            });

        PostTagEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await
            .map_err(AppError::from)?;
    }

    Ok(model.into_post(input.tags))
}

/// Load the ordered tags of each post and assemble domain posts,
/// keeping the order of `models`.
async fn with_tags<C: ConnectionTrait>(conn: &C, models: Vec<post::Model>) -> AppResult<Vec<Post>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let rows = PostTagEntity::find()
        .filter(post_tag::Column::PostId.is_in(ids))
        .order_by_asc(post_tag::Column::PostId)
        .order_by_asc(post_tag::Column::Position)
        .all(conn)
        .await
        .map_err(AppError::from)?;

    let mut tags: HashMap<Uuid, Vec<String>> = HashMap::new();
    for row in rows {
        tags.entry(row.post_id).or_default().push(row.tag);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let post_tags = tags.remove(&model.id).unwrap_or_default();
            model.into_post(post_tags)
        })
        .collect())
}
