// ABOUTME: Route handler exposing the pantry matcher over HTTP
// ABOUTME: Loads validated recipes of the requested kind and partitions them by pantry coverage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use super::{check_ingredient_count, parse_body};
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use cocktail_core::models::RecipeKind;
use cocktail_intelligence::{match_recipes, PantrySession, RecipeFilter};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Body of a pantry match request
#[derive(Debug, Clone, Deserialize)]
pub struct PantryMatchRequest {
    /// Which side of the catalogue to match
    pub kind: RecipeKind,
    /// What the user has at home
    #[serde(default)]
    pub session: PantrySession,
}

/// Pantry routes implementation
pub struct PantryRoutes;

impl PantryRoutes {
    /// Create all pantry routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/pantry/match", post(Self::handle_match))
            .with_state(resources)
    }

    /// Handle POST /api/pantry/match
    async fn handle_match(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<Value>,
    ) -> Result<Response, AppError> {
        let request: PantryMatchRequest = parse_body(body, "pantry")?;
        check_ingredient_count(request.session.ingredients.len())?;

        let recipes = resources
            .database
            .list_recipes(RecipeFilter::validated_of_kind(request.kind))
            .await?;
        let result = match_recipes(request.kind, &request.session, &recipes);

        Ok((StatusCode::OK, Json(result)).into_response())
    }
}
