// ABOUTME: Repository traits the pairing engine reads recipes and profiles through
// ABOUTME: Includes an in-memory implementation for clients holding the whole catalogue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use crate::recipes::{Recipe, RecipeFilter};
use async_trait::async_trait;
use chrono::Utc;
use cocktail_core::errors::{AppError, AppResult};
use cocktail_core::models::{ItemProfile, NewPairingFeedback, PairingFeedback};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Read access to the recipe catalogue
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Every recipe passing the filter, ordered by id
    async fn list_recipes(&self, filter: RecipeFilter) -> AppResult<Vec<Recipe>>;

    /// One recipe, or `None` when the id is unknown
    async fn get_recipe_by_id(&self, id: i64) -> AppResult<Option<Recipe>>;

    /// Numeric profile of an item, when one was recorded
    async fn get_item_profile(&self, item_id: i64) -> AppResult<Option<ItemProfile>>;
}

/// Write-only sink for pairing feedback
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a feedback event, returning its row id
    async fn record_feedback(&self, feedback: &NewPairingFeedback) -> AppResult<i64>;
}

#[async_trait]
impl<T: RecipeRepository + ?Sized> RecipeRepository for Arc<T> {
    async fn list_recipes(&self, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        (**self).list_recipes(filter).await
    }

    async fn get_recipe_by_id(&self, id: i64) -> AppResult<Option<Recipe>> {
        (**self).get_recipe_by_id(id).await
    }

    async fn get_item_profile(&self, item_id: i64) -> AppResult<Option<ItemProfile>> {
        (**self).get_item_profile(item_id).await
    }
}

/// Catalogue held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Vec<Recipe>,
    profiles: HashMap<i64, ItemProfile>,
    feedback: Mutex<Vec<PairingFeedback>>,
}

impl InMemoryRecipeRepository {
    /// Repository over the given recipes, sorted by id
    #[must_use]
    pub fn new(mut recipes: Vec<Recipe>) -> Self {
        recipes.sort_by_key(|r| r.id);
        Self {
            recipes,
            ..Self::default()
        }
    }

    /// Attach item profiles
    #[must_use]
    pub fn with_profiles(mut self, profiles: impl IntoIterator<Item = ItemProfile>) -> Self {
        self.profiles
            .extend(profiles.into_iter().map(|p| (p.item_id, p)));
        self
    }

    /// Feedback recorded so far
    ///
    /// # Errors
    ///
    /// Returns an internal error if the feedback lock is poisoned
    pub fn recorded_feedback(&self) -> AppResult<Vec<PairingFeedback>> {
        self.feedback
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| AppError::internal(format!("feedback lock poisoned: {e}")))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list_recipes(&self, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn get_recipe_by_id(&self, id: i64) -> AppResult<Option<Recipe>> {
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn get_item_profile(&self, item_id: i64) -> AppResult<Option<ItemProfile>> {
        Ok(self.profiles.get(&item_id).cloned())
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryRecipeRepository {
    async fn record_feedback(&self, feedback: &NewPairingFeedback) -> AppResult<i64> {
        let mut rows = self
            .feedback
            .lock()
            .map_err(|e| AppError::internal(format!("feedback lock poisoned: {e}")))?;
        let id = i64::try_from(rows.len())
            .map_err(|e| AppError::internal(format!("feedback id overflow: {e}")))?
            + 1;
        rows.push(PairingFeedback {
            id,
            feedback: feedback.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }
}
