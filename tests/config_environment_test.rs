// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Runs serially since every case mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use choose_my_cocktail::config::{DatabaseUrl, Environment, ServerConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "HOST",
    "DATABASE_URL",
    "ENVIRONMENT",
    "SEED_DEMO_DATA",
    "PAIRING_DEFAULT_TOP_K",
    "PAIRING_MAX_TOP_K",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.database.url,
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/cocktails.db")
        }
    );
    assert!(!config.database.seed_demo_data);
    assert_eq!(config.pairing.default_top_k, 5);
    assert_eq!(config.pairing.max_top_k, 50);
    assert_eq!(config.cors.allowed_origins, "*");
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("HTTP_PORT", "9191");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("ENVIRONMENT", "prod");
    env::set_var("SEED_DEMO_DATA", "TRUE");
    env::set_var("PAIRING_DEFAULT_TOP_K", "3");
    env::set_var("PAIRING_MAX_TOP_K", "10");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:3000");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9191);
    assert!(config.database.url.is_memory());
    assert!(config.environment.is_production());
    assert!(config.database.seed_demo_data);
    assert_eq!(config.pairing.default_top_k, 3);
    assert_eq!(config.pairing.max_top_k, 10);
    assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
    assert!(config.summary().contains("default 3 / max 10"));
}

#[test]
#[serial]
fn test_unparseable_port_falls_back_to_default() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 8080);
}

#[test]
#[serial]
fn test_postgres_url_is_rejected() {
    clear_env();
    env::set_var("DATABASE_URL", "postgresql://localhost/cocktails");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_inconsistent_pairing_limits_are_rejected() {
    clear_env();
    env::set_var("PAIRING_DEFAULT_TOP_K", "20");
    env::set_var("PAIRING_MAX_TOP_K", "10");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:///var/lib/cocktails.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("/var/lib/cocktails.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("./local.db").unwrap().to_connection_string(),
        "sqlite:./local.db"
    );
    assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());
    assert!(DatabaseUrl::parse_url("sqlite:").is_err());
}

#[test]
fn test_testing_config_uses_memory_database() {
    let config = ServerConfig::for_testing();
    assert!(config.database.url.is_memory());
    assert_eq!(config.environment, Environment::Testing);
    config.validate().unwrap();

    let mut broken = ServerConfig::for_testing();
    broken.pairing.max_top_k = 0;
    assert!(broken.validate().is_err());
}
