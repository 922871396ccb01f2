//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Users and posts behind a GraphQL API
#[derive(Parser, Debug)]
#[command(name = "blog-graphql")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Replace all users and posts with the demo dataset
    Seed,
}

/// Arguments for the serve command.
///
/// Unset values fall back to the loaded configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, env = "SERVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT")]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["blog-graphql", "serve", "--port", "8080", "-H", "127.0.0.1"])
            .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_migrate_and_global_verbose() {
        let cli = Cli::try_parse_from(["blog-graphql", "migrate", "status", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from(["blog-graphql", "seed"]).unwrap();
        assert!(matches!(cli.command, Commands::Seed));
    }
}
