//! Database connection and initialization.

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

pub mod migrations;

pub use migrations::Migrator;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and apply pending migrations.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let db = Self::open(config).await?;

        if let Err(e) = Migrator::up(&db.connection, None).await {
            tracing::error!("Failed to run migrations: {}", e);
            return Err(AppError::from(e));
        }

        tracing::info!("Database connected and migrations applied");
        Ok(db)
    }

    /// Connect without touching the schema; `migrate` drives it by hand.
    pub async fn open(config: &Config) -> AppResult<Self> {
        let connection = SeaDatabase::connect(&config.database_url)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(Self { connection })
    }

    /// Wrap an already established connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection.ping().await
    }
}
