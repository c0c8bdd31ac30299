// ABOUTME: Route handlers for food to beverage pairing and pairing feedback
// ABOUTME: Validates request limits, then delegates to the pairing engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Pairing routes

use super::{check_ingredient_count, parse_body};
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cocktail_core::models::{NewPairingFeedback, PairingFeedback};
use cocktail_intelligence::{record_feedback, PairingOptions, ScoredPairing};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Body of a pairing request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingRequest {
    /// Food to pair
    pub food_id: i64,
    /// Number of pairings wanted
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Keep alcoholic beverages (default true)
    #[serde(default)]
    pub allow_alcohol: Option<bool>,
    /// Upper ABV bound
    #[serde(default)]
    pub max_abv: Option<f64>,
    /// Ingredients the user owns
    #[serde(default)]
    pub user_ingredients: Vec<String>,
}

impl PairingRequest {
    /// Engine options, with `topK` checked against the configured bounds
    ///
    /// An absent `topK` takes the configured default and a large one is
    /// clamped to the maximum; zero is rejected.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a zero `topK`, a negative `maxAbv`, or
    /// too many ingredients
    pub fn into_options(self, default_top_k: usize, max_top_k: usize) -> AppResult<PairingOptions> {
        let top_k = match self.top_k {
            Some(0) => return Err(AppError::out_of_range("topK must be at least 1")),
            Some(k) => k.min(max_top_k),
            None => default_top_k,
        };
        if let Some(max_abv) = self.max_abv.filter(|abv| *abv < 0.0) {
            return Err(AppError::out_of_range(format!(
                "maxAbv must not be negative, got {max_abv}"
            )));
        }
        check_ingredient_count(self.user_ingredients.len())?;

        Ok(PairingOptions {
            top_k,
            allow_alcohol: self.allow_alcohol.unwrap_or(true),
            max_abv: self.max_abv,
            user_ingredients: self.user_ingredients,
        })
    }
}

/// Ranked pairings for a food
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingResponse {
    /// Food the pairings were computed for
    pub food_id: i64,
    /// Best beverages first
    pub pairings: Vec<ScoredPairing>,
}

/// Identifier of a stored feedback event
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackCreatedResponse {
    /// Row id
    pub id: i64,
}

/// Feedback recorded for a food
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListResponse {
    /// Food the feedback belongs to
    pub food_id: i64,
    /// Events, oldest first
    pub feedback: Vec<PairingFeedback>,
}

/// Pairing routes implementation
pub struct PairingRoutes;

impl PairingRoutes {
    /// Create all pairing routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/pairings", post(Self::handle_recommend))
            .route("/api/pairings/feedback", post(Self::handle_feedback))
            .route("/api/pairings/:food_id/feedback", get(Self::handle_list_feedback))
            .with_state(resources)
    }

    /// Handle POST /api/pairings
    async fn handle_recommend(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<Value>,
    ) -> Result<Response, AppError> {
        let request: PairingRequest = parse_body(body, "pairing")?;
        let food_id = request.food_id;
        let limits = resources.config.pairing;
        let options = request.into_options(limits.default_top_k, limits.max_top_k)?;

        let pairings = resources
            .pairing_engine()
            .recommend(food_id, &options)
            .await?;

        let response = PairingResponse { food_id, pairings };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/pairings/feedback
    async fn handle_feedback(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<Value>,
    ) -> Result<Response, AppError> {
        let feedback: NewPairingFeedback = parse_body(body, "feedback")?;
        let id = record_feedback(&resources.database, &feedback).await?;
        Ok((StatusCode::CREATED, Json(FeedbackCreatedResponse { id })).into_response())
    }

    /// Handle GET /api/pairings/:food_id/feedback
    async fn handle_list_feedback(
        State(resources): State<Arc<ServerResources>>,
        Path(food_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let feedback = resources.database.list_feedback_for_food(food_id).await?;
        let response = FeedbackListResponse { food_id, feedback };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
