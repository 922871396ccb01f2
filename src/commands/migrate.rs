//! Migrate command - apply, roll back or inspect schema migrations.

use std::collections::HashSet;

use sea_orm::{DatabaseConnection, EntityTrait};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Migrator};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config).await?;
    let conn = db.get_connection();

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            Migrator::up(&conn, None).await?;
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            Migrator::down(&conn, Some(1)).await?;
        }
        MigrateAction::Status => {
            let applied = applied_versions(&conn).await?;
            for (name, is_applied) in migration_report(&applied) {
                println!("{}: {}", name, if is_applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration...");
            Migrator::fresh(&conn).await?;
        }
    }

    tracing::info!("Migration command finished");
    Ok(())
}

async fn applied_versions(conn: &DatabaseConnection) -> AppResult<HashSet<String>> {
    let rows = seaql_migrations::Entity::find().all(conn).await?;
    Ok(rows.into_iter().map(|m| m.version).collect())
}

/// Every defined migration in order, paired with whether it has run.
fn migration_report(applied: &HashSet<String>) -> Vec<(String, bool)> {
    Migrator::migrations()
        .iter()
        .map(|m| {
            let name = m.name().to_string();
            let is_applied = applied.contains(&name);
            (name, is_applied)
        })
        .collect()
}
