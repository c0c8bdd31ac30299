// ABOUTME: Service constants and environment-backed configuration accessors
// ABOUTME: Ports, database location, pairing limits, and request limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! # Constants Module
//!
//! Hardcoded defaults plus accessor functions reading the environment. Every
//! accessor falls back to its default when the variable is unset or unparsable.

use std::env;

pub use cocktail_core::constants::{pairing, service_names};

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env, ports};

    /// HTTP server port
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ports::DEFAULT_HTTP_PORT)
    }

    /// Database URL
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.into())
    }

    /// Deployment environment name
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| defaults::ENVIRONMENT.into())
    }

    /// Pairings returned when a request does not say how many
    #[must_use]
    pub fn pairing_default_top_k() -> usize {
        env::var("PAIRING_DEFAULT_TOP_K")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::PAIRING_DEFAULT_TOP_K)
    }

    /// Upper bound on requested pairings
    #[must_use]
    pub fn pairing_max_top_k() -> usize {
        env::var("PAIRING_MAX_TOP_K")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::PAIRING_MAX_TOP_K)
    }

    /// Whether to load the demo catalogue into an empty database at startup
    #[must_use]
    pub fn seed_demo_data() -> bool {
        env::var("SEED_DEMO_DATA")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }

    /// Comma-separated CORS origins, or `*`
    #[must_use]
    pub fn cors_allowed_origins() -> String {
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| defaults::CORS_ALLOWED_ORIGINS.into())
    }

    /// Host the server binds to
    #[must_use]
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| defaults::HOST.into())
    }
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
}

/// Default values used when the environment is silent
pub mod defaults {
    use super::pairing;

    /// On-disk `SQLite` catalogue
    pub const DATABASE_URL: &str = "sqlite:./data/cocktails.db";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "development";
    /// Pairings per request
    pub const PAIRING_DEFAULT_TOP_K: usize = pairing::DEFAULT_TOP_K;
    /// Maximum pairings per request
    pub const PAIRING_MAX_TOP_K: usize = 50;
    /// Allow every origin
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Bind address
    pub const HOST: &str = "0.0.0.0";
}

/// Request limits
pub mod limits {
    /// Maximum accepted JSON body size in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Maximum ingredients accepted in a pantry or pairing request
    pub const MAX_USER_INGREDIENTS: usize = 200;
    /// Maximum ingredients stored on a single recipe
    pub const MAX_RECIPE_INGREDIENTS: usize = 200;
}
