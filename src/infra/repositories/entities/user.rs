//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Password, User, UserAccount};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub age: Option<i32>,
    pub city: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to the sanitized domain user (hash dropped)
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            age: model.age,
            city: model.city,
            created_at: model.created_at,
        }
    }
}

/// Convert database model to a user with its credential
impl From<Model> for UserAccount {
    fn from(model: Model) -> Self {
        let password = Password::from_hash(model.password_hash.clone());
        UserAccount {
            user: User::from(model),
            password,
        }
    }
}
