// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database location, pairing limits, and CORS origins from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Environment-based configuration for the HTTP service

use crate::constants::{defaults, env_config, ports};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
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
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
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

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
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
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests and demos)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` URLs
    pub fn parse_url(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            return Err(anyhow!("Only SQLite databases are supported, got '{s}'"));
        }
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        if path_str.is_empty() {
            return Err(anyhow!("Database URL has no path"));
        }
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
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
        Self::SQLite {
            path: PathBuf::from("./data/cocktails.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Load the demo catalogue when the database is empty
    pub seed_demo_data: bool,
}

/// Pairing endpoint limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Pairings returned when a request omits `topK`
    pub default_top_k: usize,
    /// Largest accepted `topK`
    pub max_top_k: usize,
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Pairing limits
    pub pairing: PairingConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::default(),
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                seed_demo_data: false,
            },
            pairing: PairingConfig {
                default_top_k: defaults::PAIRING_DEFAULT_TOP_K,
                max_top_k: defaults::PAIRING_MAX_TOP_K,
            },
            cors: CorsConfig {
                allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is unusable or the pairing limits are inconsistent
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_config::http_port(),
            host: env_config::host(),
            environment: Environment::from_str_or_default(&env_config::environment()),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_config::database_url())?,
                seed_demo_data: env_config::seed_demo_data(),
            },
            pairing: PairingConfig {
                default_top_k: env_config::pairing_default_top_k(),
                max_top_k: env_config::pairing_max_top_k(),
            },
            cors: CorsConfig {
                allowed_origins: env_config::cors_allowed_origins(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration for tests: in-memory database, testing environment
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
                seed_demo_data: false,
            },
            ..Self::default()
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when a pairing limit is zero or the default exceeds the maximum
    pub fn validate(&self) -> Result<()> {
        if self.pairing.max_top_k == 0 {
            return Err(anyhow!("PAIRING_MAX_TOP_K must be at least 1"));
        }
        if self.pairing.default_top_k == 0 || self.pairing.default_top_k > self.pairing.max_top_k {
            return Err(anyhow!(
                "PAIRING_DEFAULT_TOP_K must be between 1 and PAIRING_MAX_TOP_K ({})",
                self.pairing.max_top_k
            ));
        }
        Ok(())
    }

    /// Configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "ChooseMyCocktail Configuration:\n\
             - HTTP: {}:{}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Seed demo data: {}\n\
             - Pairings: default {} / max {}\n\
             - CORS origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.database.url,
            self.database.seed_demo_data,
            self.pairing.default_top_k,
            self.pairing.max_top_k,
            self.cors.allowed_origins,
        )
    }
}
