//! Post database entity for SeaORM.
//!
//! Tags live in `post_tags`; see [`super::post_tag`].

use sea_orm::entity::prelude::*;

use crate::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// No foreign key: posts may reference users that do not exist
    pub author_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine the row with its ordered tags into a domain post
    pub fn into_post(self, tags: Vec<String>) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            tags,
            created_at: self.created_at,
        }
    }
}
