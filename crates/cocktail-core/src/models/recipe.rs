// ABOUTME: Recipe-level value types shared across crates
// ABOUTME: Defines RecipeKind, Step, and the secondary ItemProfile attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an item is something you eat or something you drink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    /// Dishes, starters, desserts
    Food,
    /// Cocktails, mocktails, wines, softs
    Beverage,
}

impl RecipeKind {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Beverage => "beverage",
        }
    }

    /// Parse from database string representation
    ///
    /// Legacy rows used "cocktail" and "recipe" for the two kinds.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" | "recipe" | "plat" => Some(Self::Food),
            "beverage" | "cocktail" | "drink" | "boisson" => Some(Self::Beverage),
            _ => None,
        }
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One preparation step of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Step {
    /// Short step title
    #[serde(default)]
    pub title: String,
    /// Full instructions for the step
    #[serde(default)]
    pub description: String,
}

/// Secondary numeric attributes of an item
///
/// Profiles are stored apart from recipes and fetched one item at a time. Only
/// `abv` takes part in pairing today; the taste axes are kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemProfile {
    /// Item this profile belongs to
    pub item_id: i64,
    /// Alcohol by volume, in percent
    pub abv: Option<f64>,
    /// Sweetness on a 0-10 scale
    pub sweetness: Option<f64>,
    /// Bitterness on a 0-10 scale
    pub bitterness: Option<f64>,
    /// Acidity on a 0-10 scale
    pub acidity: Option<f64>,
}
