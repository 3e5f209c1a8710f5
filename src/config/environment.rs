// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses port, database URL, CORS origins, and deployment mode from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::defaults::{DEFAULT_DATABASE_URL, DEFAULT_HTTP_PORT, SERVICE_NAME};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path, without any query string
        path: PathBuf,
        /// Connection options after `?`, passed through to sqlx
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query: Option<String>,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    ///
    /// A `?query` suffix is kept apart from the path.
    ///
    /// # Errors
    ///
    /// Returns a config error for an empty value or a non-`SQLite` scheme
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }

        let location = match s.strip_prefix("sqlite:") {
            Some(rest) => rest.trim_start_matches("//"),
            None if s.contains("://") => {
                return Err(AppError::config(format!(
                    "Unsupported database URL scheme: {s}"
                )));
            }
            None => s,
        };

        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query).filter(|q| !q.is_empty())),
            None => (location, None),
        };

        if path == ":memory:" || path.is_empty() {
            return Ok(Self::Memory);
        }

        Ok(Self::SQLite {
            path: PathBuf::from(path),
            query: query.map(str::to_owned),
        })
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path, query: None } => format!("sqlite:{}", path.display()),
            Self::SQLite {
                path,
                query: Some(query),
            } => format!("sqlite:{}?{query}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Connection string that creates a missing database file
    ///
    /// Adds `mode=rwc` unless the URL already chooses a `mode`.
    #[must_use]
    pub fn to_create_connection_string(&self) -> String {
        let base = self.to_connection_string();
        match self {
            Self::Memory => base,
            Self::SQLite { query: None, .. } => format!("{base}?mode=rwc"),
            Self::SQLite {
                query: Some(query), ..
            } => {
                if query.split('&').any(|pair| pair.starts_with("mode=")) {
                    base
                } else {
                    format!("{base}&mode=rwc")
                }
            }
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL).unwrap_or(Self::Memory)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorsOrigins {
    /// Any origin
    #[default]
    Any,
    /// Explicit allow-list
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated list, `*` meaning any origin
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Allowed CORS origins
    pub cors_origins: CorsOrigins,
    /// Deployment environment
    pub environment: Environment,
    /// Server name
    pub server_name: String,
    /// Server version (from Cargo.toml)
    pub server_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            database_url: DatabaseUrl::default(),
            cors_origins: CorsOrigins::Any,
            environment: Environment::Development,
            server_name: SERVICE_NAME.to_owned(),
            server_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error when `HTTP_PORT` is not a valid port or
    /// `DATABASE_URL` cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let http_port = match env::var("HTTP_PORT") {
            Ok(value) => parse_port(&value)?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let config = Self {
            http_port,
            database_url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?,
            cors_origins: CorsOrigins::parse(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            server_name: env_var_or("SERVICE_NAME", SERVICE_NAME),
            server_version: env!("CARGO_PKG_VERSION").to_owned(),
        };

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutrifuse Server Configuration:\n\
             - Version: {}\n\
             - Environment: {}\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - CORS: {}",
            self.server_version,
            self.environment,
            self.http_port,
            if self.database_url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            match &self.cors_origins {
                CorsOrigins::Any => "any origin".to_owned(),
                CorsOrigins::List(origins) => origins.join(", "),
            }
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_port(value: &str) -> AppResult<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|e| AppError::config(format!("Invalid HTTP_PORT '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_url() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:").unwrap(), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/nutrifuse.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/nutrifuse.db"),
                query: None,
            }
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("  ").is_err());
    }

    #[test]
    fn test_database_url_query_is_kept_out_of_the_path() {
        let url = DatabaseUrl::parse_url("sqlite:./data/x.db?mode=ro").unwrap();
        assert_eq!(
            url,
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/x.db"),
                query: Some("mode=ro".to_owned()),
            }
        );
        assert_eq!(url.to_create_connection_string(), "sqlite:./data/x.db?mode=ro");

        let url = DatabaseUrl::parse_url("sqlite:./data/x.db?cache=shared").unwrap();
        assert_eq!(
            url.to_create_connection_string(),
            "sqlite:./data/x.db?cache=shared&mode=rwc"
        );

        let url = DatabaseUrl::parse_url("./data/x.db").unwrap();
        assert_eq!(url.to_create_connection_string(), "sqlite:./data/x.db?mode=rwc");

        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:?cache=shared").unwrap(),
            DatabaseUrl::Memory
        );
    }

    #[test]
    fn test_parse_cors_origins() {
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse("http://localhost:3000, https://app.example.com"),
            CorsOrigins::List(vec![
                "http://localhost:3000".to_owned(),
                "https://app.example.com".to_owned()
            ])
        );
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8081").unwrap(), 8081);
        assert!(parse_port("eighty").is_err());
        assert!(parse_port("70000").is_err());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }
}
