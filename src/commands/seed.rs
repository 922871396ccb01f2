//! Seed command - Replaces the stored data with the demo dataset.

use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{CreatePost, CreateUser};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{ServiceContainer, Services};

struct DemoUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    age: i32,
    city: &'static str,
}

struct DemoPost {
    title: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "John Doe",
        email: "john@example.com",
        password: "password123",
        age: 28,
        city: "New York",
    },
    DemoUser {
        name: "Jane Smith",
        email: "jane@example.com",
        password: "mypassword",
        age: 25,
        city: "Los Angeles",
    },
    DemoUser {
        name: "Bob Johnson",
        email: "bob@example.com",
        password: "bobsecret",
        age: 32,
        city: "Chicago",
    },
    DemoUser {
        name: "Alice Brown",
        email: "alice@example.com",
        password: "alicepass",
        age: 29,
        city: "Seattle",
    },
    DemoUser {
        name: "Charlie Wilson",
        email: "charlie@example.com",
        password: "charlie456",
        age: 35,
        city: "San Francisco",
    },
];

const DEMO_POSTS: &[DemoPost] = &[
    DemoPost {
        title: "Introduction to GraphQL",
        content: "GraphQL is a powerful query language for APIs that provides a complete and understandable description of the data in your API.",
        tags: &["graphql", "api", "web development"],
    },
    DemoPost {
        title: "Getting Started with Flask",
        content: "Flask is a lightweight WSGI web application framework in Python. It's designed to make getting started quick and easy.",
        tags: &["flask", "python", "web development"],
    },
    DemoPost {
        title: "MongoDB Basics",
        content: "MongoDB is a source-available cross-platform document-oriented database program. It uses JSON-like documents with optional schemas.",
        tags: &["mongodb", "database", "nosql"],
    },
    DemoPost {
        title: "Building APIs with Python",
        content: "Python offers several frameworks for building robust APIs. Flask and FastAPI are among the most popular choices.",
        tags: &["python", "api", "backend"],
    },
    DemoPost {
        title: "Frontend Development Trends",
        content: "Modern frontend development has evolved significantly with frameworks like React, Vue, and Angular leading the way.",
        tags: &["frontend", "javascript", "react"],
    },
    DemoPost {
        title: "Database Design Principles",
        content: "Good database design is crucial for application performance and maintainability. Here are some key principles to follow.",
        tags: &["database", "design", "architecture"],
    },
];

/// Counts of seeded records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub posts: usize,
}

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Starting database seeding...");

    let db = Database::connect(&config).await?;
    let persistence = Persistence::new(db.get_connection());

    persistence.clear().await?;
    tracing::info!("Existing users and posts cleared");

    let services = Services::from_connection(db.get_connection());
    let report = seed_demo_data(&services).await?;

    tracing::info!(
        users = report.users,
        posts = report.posts,
        "Database seeding completed"
    );
    Ok(())
}

/// Insert the demo users and posts through the services.
///
/// Users go through registration so their passwords are hashed like any
/// other account; each post gets a randomly chosen demo user as author.
pub async fn seed_demo_data(services: &dyn ServiceContainer) -> AppResult<SeedReport> {
    let mut user_ids = Vec::with_capacity(DEMO_USERS.len());
    for demo in DEMO_USERS {
        let user = services
            .auth()
            .create_user(CreateUser {
                name: demo.name.to_string(),
                email: demo.email.to_string(),
                password: demo.password.to_string(),
                age: Some(demo.age),
                city: Some(demo.city.to_string()),
            })
            .await?;
        user_ids.push(user.id);
    }

    let authors = pick_authors(&user_ids, DEMO_POSTS.len())?;
    for (demo, author_id) in DEMO_POSTS.iter().zip(authors) {
        let tags = demo.tags.iter().map(|t| t.to_string()).collect();
        services
            .posts()
            .create_post(CreatePost::new(demo.title, demo.content, author_id, Some(tags)))
            .await?;
    }

    Ok(SeedReport {
        users: user_ids.len(),
        posts: DEMO_POSTS.len(),
    })
}

fn pick_authors(user_ids: &[Uuid], count: usize) -> AppResult<Vec<Uuid>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            user_ids
                .choose(&mut rng)
                .copied()
                .ok_or_else(|| AppError::internal("No users to assign as post authors"))
        })
        .collect()
}
