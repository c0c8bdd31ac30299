// ABOUTME: Route handlers for the recipe catalogue REST API
// ABOUTME: List, fetch, create, ingredient search, and item profile endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Recipe routes

use super::parse_body;
use crate::database::CreateRecipeRequest;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use cocktail_core::models::{ItemProfile, RecipeKind};
use cocktail_intelligence::{recipes_using, Recipe, RecipeFilter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Query parameters for listing recipes
#[derive(Debug, Default, Deserialize)]
pub struct ListRecipesQuery {
    /// `food` or `beverage`
    pub kind: Option<String>,
    /// Restrict to validated (`true`) or draft (`false`) recipes
    pub validated: Option<bool>,
}

impl ListRecipesQuery {
    fn filter(&self) -> AppResult<RecipeFilter> {
        let kind = self
            .kind
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| {
                RecipeKind::parse(k).ok_or_else(|| {
                    AppError::invalid_input(format!(
                        "Unknown recipe kind '{k}', expected food or beverage"
                    ))
                })
            })
            .transpose()?;
        Ok(RecipeFilter {
            kind,
            validated: self.validated,
        })
    }
}

/// Query parameters for the ingredient search
#[derive(Debug, Deserialize)]
pub struct SearchRecipesQuery {
    /// Ingredient to look for
    pub ingredient: Option<String>,
    /// Optional kind restriction
    pub kind: Option<String>,
    /// Optional validation restriction
    pub validated: Option<bool>,
}

/// List of recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Matching recipes, ordered by id
    pub recipes: Vec<Recipe>,
    /// Number of recipes returned
    pub total: usize,
}

/// Body of a profile update; the item id comes from the path
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileBody {
    /// Alcohol by volume, in percent
    pub abv: Option<f64>,
    /// Sweetness on a 0-10 scale
    pub sweetness: Option<f64>,
    /// Bitterness on a 0-10 scale
    pub bitterness: Option<f64>,
    /// Acidity on a 0-10 scale
    pub acidity: Option<f64>,
}

impl ProfileBody {
    fn validate(&self) -> AppResult<()> {
        if let Some(abv) = self.abv {
            if !(0.0..=100.0).contains(&abv) {
                return Err(AppError::out_of_range(format!(
                    "abv must be between 0 and 100, got {abv}"
                )));
            }
        }
        for (name, value) in [
            ("sweetness", self.sweetness),
            ("bitterness", self.bitterness),
            ("acidity", self.acidity),
        ] {
            if let Some(v) = value.filter(|v| !(0.0..=10.0).contains(v)) {
                return Err(AppError::out_of_range(format!(
                    "{name} must be between 0 and 10, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/recipes/search", get(Self::handle_search))
            .route("/api/recipes/:id", get(Self::handle_get))
            .route(
                "/api/recipes/:id/profile",
                get(Self::handle_get_profile).put(Self::handle_put_profile),
            )
            .with_state(resources)
    }

    /// Handle GET /api/recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let recipes = resources.database.list_recipes(query.filter()?).await?;
        let response = ListRecipesResponse {
            total: recipes.len(),
            recipes,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<Value>,
    ) -> Result<Response, AppError> {
        let request: CreateRecipeRequest = parse_body(body, "recipe")?;
        let recipe = resources.database.create_recipe(&request).await?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle GET /api/recipes/search?ingredient=
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<SearchRecipesQuery>,
    ) -> Result<Response, AppError> {
        let ingredient = query
            .ingredient
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .ok_or_else(|| AppError::invalid_input("Query parameter 'ingredient' is required"))?
            .to_owned();

        let filter = ListRecipesQuery {
            kind: query.kind,
            validated: query.validated,
        }
        .filter()?;
        let catalogue = resources.database.list_recipes(filter).await?;
        let recipes: Vec<Recipe> = recipes_using(&ingredient, &catalogue)
            .into_iter()
            .cloned()
            .collect();

        let response = ListRecipesResponse {
            total: recipes.len(),
            recipes,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let recipe = resources
            .database
            .get_recipe(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")).with_resource_id(id.to_string()))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle GET /api/recipes/:id/profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let profile = resources.database.get_item_profile(id).await?.ok_or_else(|| {
            AppError::not_found(format!("Profile of recipe {id}")).with_resource_id(id.to_string())
        })?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PUT /api/recipes/:id/profile
    async fn handle_put_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<Value>,
    ) -> Result<Response, AppError> {
        let body: ProfileBody = parse_body(body, "profile")?;
        body.validate()?;
        let profile = ItemProfile {
            item_id: id,
            abv: body.abv,
            sweetness: body.sweetness,
            bitterness: body.bitterness,
            acidity: body.acidity,
        };
        resources.database.upsert_item_profile(&profile).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
