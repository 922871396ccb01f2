//! Application settings loaded from environment variables.

use std::env;

use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Serve the GraphiQL IDE on `GET /graphql`
    pub graphiql: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("graphiql", &self.graphiql)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            graphiql: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// development defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            graphiql: env::var("GRAPHIQL")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.graphiql),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            ..Config::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let output = format!("{:?}", Config::default());
        assert!(!output.contains("postgres://"));
        assert!(output.contains("[REDACTED]"));
    }
}
