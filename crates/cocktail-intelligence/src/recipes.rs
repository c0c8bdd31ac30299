// ABOUTME: Canonical recipe and ingredient models consumed by the matcher and the pairing engine
// ABOUTME: Ingredients carry their normalized key, computed once at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Recipe models
//!
//! Catalogue payloads have historically spelled ingredient names as `nom`,
//! `name` or plain strings. All of those shapes deserialize into one
//! [`Ingredient`] value whose `normalized_name` is derived from the display
//! name, so scoring code never sees the legacy shapes.

use crate::normalizer::{normalize_equipment, normalize_ingredient};
use cocktail_core::models::{RecipeKind, Step};
use serde::{Deserialize, Deserializer, Serialize};

/// One recipe ingredient with its comparison key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawIngredient")]
pub struct Ingredient {
    /// Name as written in the catalogue
    pub display_name: String,
    /// Canonical key used for pantry comparisons
    pub normalized_name: String,
    /// Amount, when the recipe states one
    pub quantity: Option<f64>,
    /// Unit of the amount ("cl", "g", "feuilles")
    pub unit: Option<String>,
}

impl Ingredient {
    /// Build an ingredient, deriving its normalized key
    pub fn new(display_name: impl Into<String>, quantity: Option<f64>, unit: Option<String>) -> Self {
        let display_name = display_name.into().trim().to_owned();
        let normalized_name = normalize_ingredient(&display_name);
        Self {
            display_name,
            normalized_name,
            quantity,
            unit: unit.filter(|u| !u.trim().is_empty()),
        }
    }

    /// Build an ingredient from a bare name
    pub fn named(display_name: impl Into<String>) -> Self {
        Self::new(display_name, None, None)
    }
}

/// Accepted wire shapes for an ingredient
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredient {
    Name(String),
    Detailed {
        #[serde(alias = "displayName", alias = "name", alias = "nom")]
        display_name: String,
        #[serde(default, alias = "quantite", alias = "quantité")]
        quantity: Option<f64>,
        #[serde(default, alias = "unite", alias = "unité")]
        unit: Option<String>,
    },
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        match raw {
            RawIngredient::Name(name) => Self::named(name),
            RawIngredient::Detailed {
                display_name,
                quantity,
                unit,
            } => Self::new(display_name, quantity, unit),
        }
    }
}

/// Treat an explicit `null` like an absent array
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A food or beverage recipe with its ingredients, tags and equipment denormalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Catalogue identifier
    pub id: i64,
    /// Food or beverage
    pub kind: RecipeKind,
    /// Free-form category ("cocktail", "entrée", "dessert")
    #[serde(default, alias = "type")]
    pub category: String,
    /// Display title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Ingredients in recipe order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<Ingredient>,
    /// Lower-cased descriptive tags
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    /// Required equipment
    #[serde(default, deserialize_with = "null_as_empty")]
    pub equipment: Vec<String>,
    /// Preparation steps
    #[serde(default, deserialize_with = "null_as_empty")]
    pub steps: Vec<Step>,
    /// Whether an editor approved the recipe
    #[serde(default)]
    pub validated: bool,
}

impl Recipe {
    /// Start an empty recipe of the given kind
    pub fn new(id: i64, kind: RecipeKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            category: String::new(),
            title: title.into(),
            description: String::new(),
            ingredients: Vec::new(),
            tags: Vec::new(),
            equipment: Vec::new(),
            steps: Vec::new(),
            validated: false,
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the ingredient list with bare names
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = names.into_iter().map(Ingredient::named).collect();
        self
    }

    /// Replace the tag list; tags are trimmed and lower-cased
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags.into_iter().map(|t| normalize_tag(t.as_ref())).collect();
        self
    }

    /// Replace the required equipment list
    #[must_use]
    pub fn with_equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment = equipment.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the preparation steps
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    /// Mark the recipe as validated
    #[must_use]
    pub const fn validated(mut self) -> Self {
        self.validated = true;
        self
    }

    /// Whether the recipe carries the tag (case-insensitive)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        self.tags.iter().any(|t| normalize_tag(t) == wanted)
    }

    /// Whether the recipe carries at least one of the tags
    #[must_use]
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| self.has_tag(t.as_ref()))
    }

    /// Normalized equipment names, in declaration order
    pub fn required_equipment(&self) -> impl Iterator<Item = String> + '_ {
        self.equipment
            .iter()
            .map(|e| normalize_equipment(e))
            .filter(|e| !e.is_empty())
    }
}

/// Canonical tag form: trimmed and lower-cased
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Repository-side filter for bulk recipe fetches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFilter {
    /// Restrict to one kind
    pub kind: Option<RecipeKind>,
    /// Restrict to validated or unvalidated recipes
    pub validated: Option<bool>,
}

impl RecipeFilter {
    /// Every validated recipe of the kind
    #[must_use]
    pub const fn validated_of_kind(kind: RecipeKind) -> Self {
        Self {
            kind: Some(kind),
            validated: Some(true),
        }
    }

    /// Whether a recipe passes the filter
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.kind.is_none_or(|kind| recipe.kind == kind)
            && self.validated.is_none_or(|v| recipe.validated == v)
    }
}
