// ABOUTME: Recipe catalogue and item profile storage
// ABOUTME: Recipes are split across child tables on write and denormalized on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use super::Database;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use cocktail_core::models::{ItemProfile, RecipeKind, Step};
use cocktail_intelligence::recipes::normalize_tag;
use cocktail_intelligence::{Ingredient, Recipe, RecipeFilter, RecipeRepository};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use std::collections::HashMap;
use tracing::debug;

/// Shared scope clause: optional id, kind, and validated filters
const SCOPE: &str = "(?1 IS NULL OR r.id = ?1) AND (?2 IS NULL OR r.kind = ?2) AND (?3 IS NULL OR r.validated = ?3)";

/// Payload for creating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    /// Food or beverage
    pub kind: RecipeKind,
    /// Free-form category
    #[serde(default, alias = "type")]
    pub category: String,
    /// Display title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Ingredients in recipe order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Descriptive tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Required equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Preparation steps
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Editor approval flag
    #[serde(default)]
    pub validated: bool,
}

impl CreateRecipeRequest {
    /// Reject payloads that cannot become a usable recipe
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title, an ingredient whose name
    /// normalizes to nothing, or more than `MAX_RECIPE_INGREDIENTS` ingredients
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid_input("Recipe title must not be empty"));
        }
        if self.ingredients.len() > limits::MAX_RECIPE_INGREDIENTS {
            return Err(AppError::invalid_input(format!(
                "A recipe holds at most {} ingredients, got {}",
                limits::MAX_RECIPE_INGREDIENTS,
                self.ingredients.len()
            )));
        }
        if let Some(position) = self
            .ingredients
            .iter()
            .position(|i| i.normalized_name.is_empty())
        {
            return Err(AppError::invalid_input(format!(
                "Ingredient at position {position} has no usable name"
            )));
        }
        Ok(())
    }
}

impl From<&Recipe> for CreateRecipeRequest {
    fn from(recipe: &Recipe) -> Self {
        Self {
            kind: recipe.kind,
            category: recipe.category.clone(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone(),
            tags: recipe.tags.clone(),
            equipment: recipe.equipment.clone(),
            steps: recipe.steps.clone(),
            validated: recipe.validated,
        }
    }
}

/// Child rows of a set of recipes, keyed by recipe id
#[derive(Default)]
struct RecipeChildren {
    ingredients: HashMap<i64, Vec<Ingredient>>,
    tags: HashMap<i64, Vec<String>>,
    equipment: HashMap<i64, Vec<String>>,
    steps: HashMap<i64, Vec<Step>>,
}

impl Database {
    /// Create recipe, child, and profile tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_recipes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL CHECK (kind IN ('food', 'beverage')),
                category TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                validated BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                display_name TEXT NOT NULL,
                normalized_name TEXT NOT NULL,
                quantity REAL,
                unit TEXT,
                PRIMARY KEY (recipe_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                tag TEXT NOT NULL,
                PRIMARY KEY (recipe_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_equipment (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                PRIMARY KEY (recipe_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_steps (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (recipe_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS item_profiles (
                item_id INTEGER PRIMARY KEY REFERENCES recipes(id) ON DELETE CASCADE,
                abv REAL,
                sweetness REAL,
                bitterness REAL,
                acidity REAL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_kind_validated ON recipes(kind, validated)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipe_tags_tag ON recipe_tags(tag)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_normalized ON recipe_ingredients(normalized_name)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a recipe and its child rows in one transaction
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an invalid payload, or a database error
    pub async fn create_recipe(&self, request: &CreateRecipeRequest) -> AppResult<Recipe> {
        request.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let id: i64 = sqlx::query(
            r"
            INSERT INTO recipes (kind, category, title, description, validated, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(request.kind.as_str())
        .bind(request.category.trim())
        .bind(request.title.trim())
        .bind(request.description.trim())
        .bind(request.validated)
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?
        .get("id");

        for (position, ingredient) in request.ingredients.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO recipe_ingredients (recipe_id, position, display_name, normalized_name, quantity, unit)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(id)
            .bind(position as i64)
            .bind(&ingredient.display_name)
            .bind(&ingredient.normalized_name)
            .bind(ingredient.quantity)
            .bind(ingredient.unit.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to store ingredient: {e}")))?;
        }

        let tags: Vec<String> = request
            .tags
            .iter()
            .map(|t| normalize_tag(t))
            .filter(|t| !t.is_empty())
            .collect();
        for (position, tag) in tags.iter().enumerate() {
            sqlx::query("INSERT INTO recipe_tags (recipe_id, position, tag) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(position as i64)
                .bind(tag)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to store tag: {e}")))?;
        }

        for (position, name) in request.equipment.iter().enumerate() {
            sqlx::query("INSERT INTO recipe_equipment (recipe_id, position, name) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(position as i64)
                .bind(name.trim())
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to store equipment: {e}")))?;
        }

        for (position, step) in request.steps.iter().enumerate() {
            sqlx::query(
                "INSERT INTO recipe_steps (recipe_id, position, title, description) VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(position as i64)
            .bind(&step.title)
            .bind(&step.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to store step: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        debug!(recipe_id = id, kind = %request.kind, title = %request.title, "Recipe created");

        self.get_recipe(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Recipe {id} vanished after insert")))
    }

    /// Recipes passing the filter, ordered by id
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails
    pub async fn list_recipes(&self, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        self.fetch_recipes(None, filter).await
    }

    /// One recipe by id
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails
    pub async fn get_recipe(&self, id: i64) -> AppResult<Option<Recipe>> {
        Ok(self
            .fetch_recipes(Some(id), RecipeFilter::default())
            .await?
            .into_iter()
            .next())
    }

    /// Number of recipes passing the filter
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn count_recipes(&self, filter: RecipeFilter) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) AS total FROM recipes r WHERE {SCOPE}");
        let row = sqlx::query(&sql)
            .bind(Option::<i64>::None)
            .bind(filter.kind.map(|k| k.as_str()))
            .bind(filter.validated)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;
        Ok(row.get("total"))
    }

    /// Insert or replace the profile of an item
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the item does not exist, or a database error
    pub async fn upsert_item_profile(&self, profile: &ItemProfile) -> AppResult<()> {
        if self.count_recipe_id(profile.item_id).await? == 0 {
            return Err(AppError::not_found(format!("Recipe {}", profile.item_id))
                .with_resource_id(profile.item_id.to_string()));
        }

        sqlx::query(
            r"
            INSERT INTO item_profiles (item_id, abv, sweetness, bitterness, acidity, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT(item_id) DO UPDATE SET
                abv = excluded.abv,
                sweetness = excluded.sweetness,
                bitterness = excluded.bitterness,
                acidity = excluded.acidity,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.item_id)
        .bind(profile.abv)
        .bind(profile.sweetness)
        .bind(profile.bitterness)
        .bind(profile.acidity)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store item profile: {e}")))?;

        Ok(())
    }

    /// Profile of an item, if one was recorded
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_item_profile(&self, item_id: i64) -> AppResult<Option<ItemProfile>> {
        let row = sqlx::query(
            r"
            SELECT item_id, abv, sweetness, bitterness, acidity
            FROM item_profiles
            WHERE item_id = $1
            ",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get item profile: {e}")))?;

        Ok(row.map(|r| row_to_profile(&r)))
    }

    async fn count_recipe_id(&self, id: i64) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up recipe: {e}")))?;
        Ok(row.get("total"))
    }

    async fn fetch_recipes(&self, id: Option<i64>, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        let sql = format!(
            "SELECT r.id, r.kind, r.category, r.title, r.description, r.validated \
             FROM recipes r WHERE {SCOPE} ORDER BY r.id"
        );
        let rows = sqlx::query(&sql)
            .bind(id)
            .bind(filter.kind.map(|k| k.as_str()))
            .bind(filter.validated)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut children = self.fetch_children(id, filter).await?;
        rows.iter()
            .map(|row| {
                let mut recipe = row_to_recipe(row)?;
                recipe.ingredients = children.ingredients.remove(&recipe.id).unwrap_or_default();
                recipe.tags = children.tags.remove(&recipe.id).unwrap_or_default();
                recipe.equipment = children.equipment.remove(&recipe.id).unwrap_or_default();
                recipe.steps = children.steps.remove(&recipe.id).unwrap_or_default();
                Ok(recipe)
            })
            .collect()
    }

    async fn fetch_children(&self, id: Option<i64>, filter: RecipeFilter) -> AppResult<RecipeChildren> {
        let kind = filter.kind.map(|k| k.as_str());
        let mut children = RecipeChildren::default();

        let sql = format!(
            "SELECT c.recipe_id, c.display_name, c.quantity, c.unit \
             FROM recipe_ingredients c JOIN recipes r ON r.id = c.recipe_id \
             WHERE {SCOPE} ORDER BY c.recipe_id, c.position"
        );
        let rows = sqlx::query(&sql)
            .bind(id)
            .bind(kind)
            .bind(filter.validated)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load ingredients: {e}")))?;
        for row in &rows {
            let display_name: String = row.get("display_name");
            children
                .ingredients
                .entry(row.get("recipe_id"))
                .or_default()
                .push(Ingredient::new(display_name, row.get("quantity"), row.get("unit")));
        }

        let sql = format!(
            "SELECT c.recipe_id, c.tag FROM recipe_tags c JOIN recipes r ON r.id = c.recipe_id \
             WHERE {SCOPE} ORDER BY c.recipe_id, c.position"
        );
        let rows = sqlx::query(&sql)
            .bind(id)
            .bind(kind)
            .bind(filter.validated)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load tags: {e}")))?;
        for row in &rows {
            children
                .tags
                .entry(row.get("recipe_id"))
                .or_default()
                .push(row.get("tag"));
        }

        let sql = format!(
            "SELECT c.recipe_id, c.name FROM recipe_equipment c JOIN recipes r ON r.id = c.recipe_id \
             WHERE {SCOPE} ORDER BY c.recipe_id, c.position"
        );
        let rows = sqlx::query(&sql)
            .bind(id)
            .bind(kind)
            .bind(filter.validated)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load equipment: {e}")))?;
        for row in &rows {
            children
                .equipment
                .entry(row.get("recipe_id"))
                .or_default()
                .push(row.get("name"));
        }

        let sql = format!(
            "SELECT c.recipe_id, c.title, c.description FROM recipe_steps c JOIN recipes r ON r.id = c.recipe_id \
             WHERE {SCOPE} ORDER BY c.recipe_id, c.position"
        );
        let rows = sqlx::query(&sql)
            .bind(id)
            .bind(kind)
            .bind(filter.validated)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load steps: {e}")))?;
        for row in &rows {
            children.steps.entry(row.get("recipe_id")).or_default().push(Step {
                title: row.get("title"),
                description: row.get("description"),
            });
        }

        Ok(children)
    }
}

fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let id: i64 = row.get("id");
    let kind_str: String = row.get("kind");
    let kind = RecipeKind::parse(&kind_str)
        .ok_or_else(|| AppError::internal(format!("Recipe {id} has unknown kind '{kind_str}'")))?;
    let title: String = row.get("title");

    let mut recipe = Recipe::new(id, kind, title)
        .with_category(row.get::<String, _>("category"))
        .with_description(row.get::<String, _>("description"));
    recipe.validated = row.get("validated");
    Ok(recipe)
}

fn row_to_profile(row: &SqliteRow) -> ItemProfile {
    ItemProfile {
        item_id: row.get("item_id"),
        abv: row.get("abv"),
        sweetness: row.get("sweetness"),
        bitterness: row.get("bitterness"),
        acidity: row.get("acidity"),
    }
}

#[async_trait]
impl RecipeRepository for Database {
    async fn list_recipes(&self, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        Self::list_recipes(self, filter).await
    }

    async fn get_recipe_by_id(&self, id: i64) -> AppResult<Option<Recipe>> {
        self.get_recipe(id).await
    }

    async fn get_item_profile(&self, item_id: i64) -> AppResult<Option<ItemProfile>> {
        Self::get_item_profile(self, item_id).await
    }
}
