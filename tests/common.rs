// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases, and a small fixture catalogue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines
)]
//! Shared test utilities for `choose_my_cocktail`

use anyhow::Result;
use axum::Router;
use choose_my_cocktail::{
    config::ServerConfig,
    database::{CreateRecipeRequest, Database},
    resources::ServerResources,
    server::build_router,
};
use cocktail_core::models::{ItemProfile, RecipeKind};
use cocktail_intelligence::Ingredient;
use std::env;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Ids of the fixture catalogue, in insertion order on a fresh database
pub mod ids {
    /// Food tagged salé and umami
    pub const SALADE_CESAR: i64 = 1;
    /// Food tagged sucré
    pub const TARTE_AU_CITRON: i64 = 2;
    /// Bitter herbal beverage, 24% ABV
    pub const NEGRONI: i64 = 3;
    /// Citrus herbal sparkling beverage, 10% ABV
    pub const MOJITO: i64 = 4;
    /// Alcohol-free citrus sparkling beverage
    pub const VIRGIN_MULE: i64 = 5;
    /// Unvalidated beverage
    pub const BROUILLON: i64 = 6;
}

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Build a creation payload from bare names
pub fn new_recipe(
    kind: RecipeKind,
    title: &str,
    ingredients: &[&str],
    tags: &[&str],
    validated: bool,
) -> CreateRecipeRequest {
    CreateRecipeRequest {
        kind,
        category: String::new(),
        title: title.to_owned(),
        description: String::new(),
        ingredients: ingredients.iter().map(|n| Ingredient::named(*n)).collect(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        equipment: Vec::new(),
        steps: Vec::new(),
        validated,
    }
}

/// Insert the fixture catalogue described by [`ids`]
pub async fn insert_fixture_catalogue(database: &Database) -> Result<()> {
    let entries = [
        (
            new_recipe(
                RecipeKind::Food,
                "Salade César",
                &["Laitue romaine", "Parmesan", "Croûtons"],
                &["salé", "umami"],
                true,
            ),
            None,
        ),
        (
            new_recipe(
                RecipeKind::Food,
                "Tarte au citron",
                &["Pâte sablée", "Citrons", "Sucre", "Œufs"],
                &["sucré"],
                true,
            ),
            None,
        ),
        (
            new_recipe(
                RecipeKind::Beverage,
                "Negroni",
                &["Gin", "Campari", "Vermouth rouge"],
                &["bitter", "herbal", "alcoholic", "high_abv"],
                true,
            ),
            Some(24.0),
        ),
        (
            new_recipe(
                RecipeKind::Beverage,
                "Mojito",
                &["Rhum blanc", "Jus de citron vert", "Menthe", "Sucre de canne", "Eau gazeuse"],
                &["citrusy", "herbal", "sparkling", "alcoholic"],
                true,
            ),
            Some(10.0),
        ),
        (
            new_recipe(
                RecipeKind::Beverage,
                "Virgin Mule",
                &["Ginger beer", "Jus de citron vert", "Menthe"],
                &["citrusy", "sparkling", "low_abv"],
                true,
            ),
            Some(0.0),
        ),
        (
            new_recipe(RecipeKind::Beverage, "Brouillon", &["Gin"], &["herbal"], false),
            None,
        ),
    ];

    for (request, abv) in entries {
        let recipe = database.create_recipe(&request).await?;
        if let Some(abv) = abv {
            database
                .upsert_item_profile(&ItemProfile {
                    item_id: recipe.id,
                    abv: Some(abv),
                    ..ItemProfile::default()
                })
                .await?;
        }
    }
    Ok(())
}

/// Server resources over an empty in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        ServerConfig::for_testing(),
    )))
}

/// Server resources over the fixture catalogue
pub async fn create_fixture_resources() -> Result<Arc<ServerResources>> {
    let resources = create_test_server_resources().await?;
    insert_fixture_catalogue(&resources.database).await?;
    Ok(resources)
}

/// Full application router over the fixture catalogue
pub async fn create_fixture_router() -> Result<Router> {
    Ok(build_router(create_fixture_resources().await?))
}
