//! In-memory Unit of Work shared by the integration tests.
//!
//! Mirrors the store contract of the SeaORM implementation: unique emails,
//! insertion order, case-insensitive substring search, exact tag match and
//! a cascading user delete.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use blog_graphql::api::{build_schema, AppSchema};
use blog_graphql::domain::{CreatePost, NewUser, Post, User, UserAccount};
use blog_graphql::errors::{AppError, AppResult};
use blog_graphql::infra::{CascadeDeletion, PostRepository, UnitOfWork, UserRepository};
use blog_graphql::services::Services;
use blog_graphql::types::PageRequest;

#[derive(Default)]
struct Tables {
    users: Vec<UserAccount>,
    posts: Vec<Post>,
}

type Shared = Arc<Mutex<Tables>>;

fn lock(tables: &Shared) -> AppResult<MutexGuard<'_, Tables>> {
    tables
        .lock()
        .map_err(|_| AppError::internal("in-memory store poisoned"))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Unit of Work over plain vectors
#[derive(Default, Clone)]
pub struct InMemoryStore {
    tables: Shared,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }

    /// Raw stored hash for an email, to check it never equals the password
    pub fn stored_hash(&self, email: &str) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|a| a.user.email == email)
            .map(|a| a.password.as_str().to_string())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(MemoryUsers {
            tables: self.tables.clone(),
        })
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        Arc::new(MemoryPosts {
            tables: self.tables.clone(),
        })
    }

    async fn delete_user_with_posts(&self, user_id: Uuid) -> AppResult<CascadeDeletion> {
        let mut tables = lock(&self.tables)?;

        let posts_before = tables.posts.len();
        tables.posts.retain(|p| p.author_id != user_id);
        let users_before = tables.users.len();
        tables.users.retain(|a| a.user.id != user_id);

        Ok(CascadeDeletion {
            users: (users_before - tables.users.len()) as u64,
            posts: (posts_before - tables.posts.len()) as u64,
        })
    }
}

struct MemoryUsers {
    tables: Shared,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .users
            .iter()
            .find(|a| a.user.id == id)
            .map(|a| a.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        let tables = lock(&self.tables)?;
        Ok(tables.users.iter().find(|a| a.user.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut tables = lock(&self.tables)?;
        if tables.users.iter().any(|a| a.user.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::now_v7(),
            name: new_user.name,
            email: new_user.email,
            age: new_user.age,
            city: new_user.city,
            created_at: Utc::now(),
        };
        tables.users.push(UserAccount {
            user: user.clone(),
            password: new_user.password,
        });
        Ok(user)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Vec<User>> {
        let tables = lock(&self.tables)?;
        Ok(page.slice(tables.users.iter().map(|a| a.user.clone())))
    }

    async fn find_by_city(&self, city: &str) -> AppResult<Vec<User>> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .users
            .iter()
            .filter(|a| {
                a.user
                    .city
                    .as_deref()
                    .is_some_and(|c| contains_ignore_case(c, city))
            })
            .map(|a| a.user.clone())
            .collect())
    }
}

struct MemoryPosts {
    tables: Shared,
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        let tables = lock(&self.tables)?;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: CreatePost) -> AppResult<Post> {
        let post = Post {
            id: Uuid::now_v7(),
            title: input.title,
            content: input.content,
            author_id: input.author_id,
            tags: input.tags,
            created_at: Utc::now(),
        };
        lock(&self.tables)?.posts.push(post.clone());
        Ok(post)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Vec<Post>> {
        let tables = lock(&self.tables)?;
        Ok(page.slice(tables.posts.iter().cloned()))
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Post>> {
        let tables = lock(&self.tables)?;
        Ok(tables.posts.iter().filter(|p| p.has_tag(tag)).cloned().collect())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Post>> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .posts
            .iter()
            .filter(|p| contains_ignore_case(&p.title, title))
            .cloned()
            .collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<Post>> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let mut tables = lock(&self.tables)?;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        Ok((before - tables.posts.len()) as u64)
    }
}

/// Real services over a fresh in-memory store
pub fn services(store: &InMemoryStore) -> Arc<Services> {
    Arc::new(Services::from_unit_of_work(Arc::new(store.clone())))
}

/// Real schema over a fresh in-memory store
pub fn schema(store: &InMemoryStore) -> AppSchema {
    build_schema(services(store))
}
