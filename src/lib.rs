// ABOUTME: Main library entry point for the ChooseMyCocktail recipe and pairing service
// ABOUTME: Wires configuration, logging, SQLite storage, and the JSON HTTP API around the intelligence crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

#![deny(unsafe_code)]

//! # ChooseMyCocktail
//!
//! A recipe service that answers two questions:
//!
//! - **What can I make with what I have?** The pantry matcher splits recipes
//!   into makeable-now and needs-shopping buckets.
//! - **What should I drink with this dish?** The pairing engine ranks
//!   beverages for a food with explainable scores.
//!
//! The algorithms live in the `cocktail-intelligence` crate; this crate adds
//! the `SQLite` catalogue, the HTTP routes, and the server bootstrap.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use choose_my_cocktail::config::ServerConfig;
//! use choose_my_cocktail::server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = server::prepare_resources(config).await?;
//!     server::run(resources).await
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Constants and environment accessors
pub mod constants;

/// `SQLite` storage for recipes, profiles, and feedback
pub mod database;

/// Error types shared with the intelligence crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// CORS and request tracing middleware
pub mod middleware;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Demo recipe catalogue
pub mod seed;

/// Server bootstrap and shutdown
pub mod server;

pub use cocktail_intelligence as intelligence;
