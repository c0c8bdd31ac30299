// ABOUTME: Recipe matching and pairing algorithms for ChooseMyCocktail
// ABOUTME: Normalizer, pantry matcher, pairing engine, and the repository seam they read through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

#![deny(unsafe_code)]

//! # Cocktail Intelligence
//!
//! Pure, rule-based algorithms behind the service. Nothing here touches the
//! network or the database directly: recipes reach the pairing engine through
//! the [`RecipeRepository`] trait and the pantry matcher works on slices.

/// Ingredient name normalization and similarity
pub mod normalizer;

/// Pantry matcher partitioning recipes by what the user owns
pub mod pantry;

/// Food to beverage pairing engine and rule table
pub mod pairing;

/// Recipe and ingredient models
pub mod recipes;

/// Repository traits and the in-memory catalogue
pub mod repository;

pub use normalizer::{base_ingredient, is_similar, normalize_ingredient};
pub use pairing::{
    calculate_score, record_feedback, PairingEngine, PairingOptions, PairingRule, PairingScore,
    ScoredPairing,
};
pub use pantry::{
    match_beverages, match_food, match_recipes, recipes_using, EnrichedRecipe, PantryMatch,
    PantrySession,
};
pub use recipes::{Ingredient, Recipe, RecipeFilter};
pub use repository::{FeedbackRepository, InMemoryRecipeRepository, RecipeRepository};
