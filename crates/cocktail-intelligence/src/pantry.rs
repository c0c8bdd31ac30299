// ABOUTME: Pantry matcher splitting recipes into makeable-now and needs-shopping buckets
// ABOUTME: Holds the client pantry session, the staple allowlist, and match percentage math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! # Pantry Matcher
//!
//! Given what a user has at home (a [`PantrySession`]), partition the recipes of
//! one kind into:
//!
//! - **available**: every non-staple ingredient is owned
//! - **need to buy**: at least one ingredient owned, at least one non-staple missing
//!
//! Recipes where nothing is owned are left out of both buckets.
//!
//! ## Match percentage and staples
//!
//! `match_percentage` counts staples the user did not list as *not owned*, while
//! the displayed `missing_ingredients` list hides them. A mojito with sparkling
//! water therefore shows 80% even when the only missing item is the water, and
//! still lands in `available`. This mirrors how the catalogue has always
//! reported matches and is covered by tests.

use crate::normalizer::{base_ingredient, is_similar, normalize_equipment, normalize_ingredient};
use crate::recipes::{normalize_tag, Recipe};
use cocktail_core::models::RecipeKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Staples assumed to be in every kitchen, in normalized form
///
/// They never appear in a displayed missing list.
pub const COMMON_PANTRY_STAPLES: &[&str] = &[
    "sel",
    "sel fin",
    "poivre",
    "eau",
    "eau gazeuse",
    "eau pétillante",
    "sucre",
    "sucre de canne",
    "sucre en poudre",
    "glace",
    "glace pilée",
    "glaçon",
    "huile",
    "salt",
    "pepper",
    "water",
    "sparkling water",
    "soda water",
    "sugar",
    "ice",
    "ice cube",
    "crushed ice",
];

/// Whether a normalized ingredient name is a common staple
#[must_use]
pub fn is_common_staple(normalized_name: &str) -> bool {
    normalized_name.is_empty() || COMMON_PANTRY_STAPLES.contains(&normalized_name)
}

/// What the user has at home, held by the client and passed in explicitly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantrySession {
    /// Owned ingredients, as typed by the user
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Owned equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Tags a food recipe must carry
    #[serde(default)]
    pub selected_tags: Vec<String>,
}

impl PantrySession {
    /// Empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session holding the given ingredients
    pub fn with_ingredients<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut session = Self::new();
        for ingredient in ingredients {
            session.add_ingredient(ingredient);
        }
        session
    }

    /// Add an ingredient; returns false when empty or already owned
    pub fn add_ingredient(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if normalize_ingredient(&name).is_empty() || self.has_ingredient(&name) {
            return false;
        }
        self.ingredients.push(name.trim().to_owned());
        true
    }

    /// Remove every entry normalizing to the same key; returns whether one was removed
    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        let key = normalize_ingredient(name);
        let before = self.ingredients.len();
        self.ingredients
            .retain(|owned| normalize_ingredient(owned) != key);
        self.ingredients.len() != before
    }

    /// Whether an ingredient with the same normalized key is owned
    #[must_use]
    pub fn has_ingredient(&self, name: &str) -> bool {
        let key = normalize_ingredient(name);
        self.ingredients
            .iter()
            .any(|owned| normalize_ingredient(owned) == key)
    }

    /// Add a piece of equipment; returns false when empty or already owned
    pub fn add_equipment(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let key = normalize_equipment(&name);
        if key.is_empty() || self.equipment_keys().contains(&key) {
            return false;
        }
        self.equipment.push(name.trim().to_owned());
        true
    }

    /// Remove a piece of equipment; returns whether one was removed
    pub fn remove_equipment(&mut self, name: &str) -> bool {
        let key = normalize_equipment(name);
        let before = self.equipment.len();
        self.equipment.retain(|owned| normalize_equipment(owned) != key);
        self.equipment.len() != before
    }

    /// Select or unselect a tag; returns whether the tag is now selected
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let key = normalize_tag(tag);
        if key.is_empty() {
            return false;
        }
        if let Some(pos) = self.selected_tags.iter().position(|t| normalize_tag(t) == key) {
            self.selected_tags.remove(pos);
            false
        } else {
            self.selected_tags.push(key);
            true
        }
    }

    /// Whether matching against this session would short-circuit to nothing
    ///
    /// Beverages only look at ingredients; food also considers equipment and tags.
    #[must_use]
    pub fn is_empty_for(&self, kind: RecipeKind) -> bool {
        let no_ingredients = self.ingredient_keys().is_empty();
        match kind {
            RecipeKind::Beverage => no_ingredients,
            RecipeKind::Food => {
                no_ingredients && self.equipment.is_empty() && self.selected_tags.is_empty()
            }
        }
    }

    fn ingredient_keys(&self) -> HashSet<String> {
        self.ingredients
            .iter()
            .map(|i| normalize_ingredient(i))
            .filter(|k| !k.is_empty())
            .collect()
    }

    fn equipment_keys(&self) -> HashSet<String> {
        self.equipment
            .iter()
            .map(|e| normalize_equipment(e))
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// A recipe annotated with how well the pantry covers it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecipe {
    /// The matched recipe
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Normalized names still to buy, staples excluded
    pub missing_ingredients: Vec<String>,
    /// Share of ingredients owned, 0-100
    pub match_percentage: u8,
}

/// Result of a pantry match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryMatch {
    /// Recipes makeable with what is at home
    pub available: Vec<EnrichedRecipe>,
    /// Recipes needing a shopping trip
    pub need_to_buy: Vec<EnrichedRecipe>,
}

impl PantryMatch {
    /// Whether both buckets are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.need_to_buy.is_empty()
    }

    /// Find a recipe in either bucket
    #[must_use]
    pub fn find(&self, recipe_id: i64) -> Option<&EnrichedRecipe> {
        self.available
            .iter()
            .chain(&self.need_to_buy)
            .find(|e| e.recipe.id == recipe_id)
    }
}

/// Rounded share of owned ingredients
///
/// A recipe without ingredients scores 0 and is never included by the matcher.
/// Owning anything scores at least 1, so a long recipe never rounds down to 0.
#[must_use]
pub fn match_percentage(owned: usize, total: usize) -> u8 {
    if total == 0 || owned == 0 {
        return 0;
    }
    let pct = (owned.min(total) as f64 / total as f64 * 100.0).round();
    (pct as u8).max(1)
}

/// Match food recipes, honoring equipment and selected tags
#[must_use]
pub fn match_food(session: &PantrySession, recipes: &[Recipe]) -> PantryMatch {
    match_recipes(RecipeKind::Food, session, recipes)
}

/// Match beverage recipes on ingredients only
#[must_use]
pub fn match_beverages(session: &PantrySession, recipes: &[Recipe]) -> PantryMatch {
    match_recipes(RecipeKind::Beverage, session, recipes)
}

/// Partition the recipes of `kind` against the pantry
///
/// Recipes of the other kind are ignored.
#[must_use]
pub fn match_recipes(kind: RecipeKind, session: &PantrySession, recipes: &[Recipe]) -> PantryMatch {
    if session.is_empty_for(kind) {
        return PantryMatch::default();
    }

    let owned = session.ingredient_keys();
    let equipment = session.equipment_keys();
    let selected_tags: Vec<String> = session
        .selected_tags
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect();

    let mut result = PantryMatch::default();
    let mut candidates = 0_usize;

    for recipe in recipes.iter().filter(|r| r.kind == kind) {
        candidates += 1;

        if kind == RecipeKind::Food
            && (!has_required_equipment(recipe, &equipment)
                || !selected_tags.iter().all(|t| recipe.has_tag(t)))
        {
            continue;
        }

        let Some(enriched) = enrich(recipe, &owned) else {
            continue;
        };

        if enriched.missing_ingredients.is_empty() {
            result.available.push(enriched);
        } else {
            result.need_to_buy.push(enriched);
        }
    }

    result.available.sort_by(compare_enriched);
    result.need_to_buy.sort_by(compare_enriched);

    debug!(
        kind = %kind,
        candidates,
        available = result.available.len(),
        need_to_buy = result.need_to_buy.len(),
        "pantry match computed"
    );

    result
}

fn has_required_equipment(recipe: &Recipe, owned: &HashSet<String>) -> bool {
    recipe.required_equipment().all(|e| owned.contains(&e))
}

fn enrich(recipe: &Recipe, owned: &HashSet<String>) -> Option<EnrichedRecipe> {
    // Names that normalize to nothing can never be owned
    let names: Vec<&str> = recipe
        .ingredients
        .iter()
        .map(|i| i.normalized_name.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    let total = names.len();
    if total == 0 {
        return None;
    }

    let raw_missing: Vec<&str> = names
        .into_iter()
        .filter(|name| !owned.contains(*name))
        .collect();

    // Staples still count against the percentage, they are only hidden from the list
    let owned_count = total - raw_missing.len();
    if owned_count == 0 {
        return None;
    }

    let mut seen = HashSet::new();
    let missing_ingredients = raw_missing
        .into_iter()
        .filter(|name| !is_common_staple(name))
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect();

    Some(EnrichedRecipe {
        recipe: recipe.clone(),
        missing_ingredients,
        match_percentage: match_percentage(owned_count, total),
    })
}

fn compare_enriched(a: &EnrichedRecipe, b: &EnrichedRecipe) -> Ordering {
    b.match_percentage
        .cmp(&a.match_percentage)
        .then_with(|| compare_titles(&a.recipe.title, &b.recipe.title))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

/// Title ordering that ignores case and Latin accents ("Éclair" sorts with "eclair")
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Recipes using an ingredient, compared on base ingredients
///
/// "citron" finds recipes listing "Jus de citron" or "Zeste de citron".
#[must_use]
pub fn recipes_using<'a>(ingredient: &str, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let wanted = base_ingredient(ingredient);
    if wanted.is_empty() {
        return Vec::new();
    }

    recipes
        .iter()
        .filter(|recipe| {
            recipe
                .ingredients
                .iter()
                .any(|i| is_similar(&base_ingredient(&i.display_name), &wanted))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mojito() -> Recipe {
        Recipe::new(1, RecipeKind::Beverage, "Mojito").with_ingredients([
            "Rhum blanc",
            "Jus de citron vert",
            "Menthe",
            "Sucre de canne",
            "Eau gazeuse",
        ])
    }

    #[test]
    fn test_match_percentage_rounding() {
        assert_eq!(match_percentage(1, 5), 20);
        assert_eq!(match_percentage(2, 3), 67);
        assert_eq!(match_percentage(1, 3), 33);
        assert_eq!(match_percentage(3, 3), 100);
        assert_eq!(match_percentage(0, 0), 0);
        assert_eq!(match_percentage(0, 4), 0);
        assert_eq!(match_percentage(1, 200), 1);
        assert_eq!(match_percentage(1, 201), 1);
        assert_eq!(match_percentage(1, 1_000), 1);
    }

    #[test]
    fn test_long_recipe_with_one_owned_ingredient_stays_positive() {
        let mut names = vec!["Rhum blanc".to_owned()];
        names.extend((0..200).map(|n| format!("Sirop maison {n}")));
        let punch = Recipe::new(7, RecipeKind::Beverage, "Punch géant").with_ingredients(names);

        let result = match_beverages(&PantrySession::with_ingredients(["Rhum blanc"]), &[punch]);
        assert_eq!(result.need_to_buy.len(), 1);
        assert_eq!(result.need_to_buy[0].match_percentage, 1);
        assert_eq!(result.need_to_buy[0].missing_ingredients.len(), 200);
    }

    #[test]
    fn test_unnamed_ingredients_do_not_count() {
        let daiquiri = Recipe::new(8, RecipeKind::Beverage, "Daiquiri")
            .with_ingredients(["Rhum blanc", "(facultatif)"]);

        let result = match_beverages(&PantrySession::with_ingredients(["Rhum blanc"]), &[daiquiri]);
        assert_eq!(result.available.len(), 1);
        assert_eq!(result.available[0].match_percentage, 100);
        assert!(result.available[0].missing_ingredients.is_empty());
    }

    #[test]
    fn test_food_session_with_equipment_only_matches_nothing() {
        let gratin = Recipe::new(3, RecipeKind::Food, "Gratin")
            .with_ingredients(["Pommes de terre", "Crème"])
            .with_equipment(["Four"]);
        let salade = Recipe::new(4, RecipeKind::Food, "Salade").with_ingredients(["Laitue"]);

        let mut session = PantrySession::new();
        session.add_equipment("Four");
        assert!(!session.is_empty_for(RecipeKind::Food));
        assert!(match_food(&session, &[gratin, salade]).is_empty());
    }

    #[test]
    fn test_mojito_with_rum_only() {
        let session = PantrySession::with_ingredients(["Rhum blanc"]);
        let result = match_beverages(&session, &[mojito()]);

        assert!(result.available.is_empty());
        assert_eq!(result.need_to_buy.len(), 1);
        let enriched = &result.need_to_buy[0];
        assert_eq!(enriched.missing_ingredients, vec!["jus de citron vert", "menthe"]);
        assert_eq!(enriched.match_percentage, 20);
    }

    #[test]
    fn test_empty_pantry_short_circuits() {
        let result = match_beverages(&PantrySession::new(), &[mojito()]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unowned_and_ingredientless_recipes_are_excluded() {
        let empty = Recipe::new(2, RecipeKind::Beverage, "Verre d'eau");
        let session = PantrySession::with_ingredients(["Gin"]);
        assert!(match_beverages(&session, &[mojito(), empty]).is_empty());
    }

    #[test]
    fn test_food_gates_on_equipment_and_tags() {
        let gratin = Recipe::new(3, RecipeKind::Food, "Gratin")
            .with_ingredients(["Pommes de terre", "Crème"])
            .with_equipment(["Four"])
            .with_tags(["végétarien"]);
        let recipes = [gratin, mojito()];

        let mut session = PantrySession::with_ingredients(["crème"]);
        assert!(match_food(&session, &recipes).is_empty());

        session.add_equipment("four");
        let result = match_food(&session, &recipes);
        assert_eq!(result.need_to_buy.len(), 1);
        assert_eq!(result.need_to_buy[0].match_percentage, 50);

        session.toggle_tag("végétarien");
        session.toggle_tag("dessert");
        assert!(match_food(&session, &recipes).is_empty());
    }

    #[test]
    fn test_buckets_sorted_by_percentage_then_title() {
        let recipes = [
            Recipe::new(5, RecipeKind::Beverage, "Zombie").with_ingredients(["Rhum blanc", "Falernum"]),
            Recipe::new(6, RecipeKind::Beverage, "Élixir").with_ingredients(["Rhum blanc", "Miel"]),
            mojito(),
        ];
        let session = PantrySession::with_ingredients(["rhum blanc"]);
        let result = match_beverages(&session, &recipes);

        let titles: Vec<&str> = result
            .need_to_buy
            .iter()
            .map(|e| e.recipe.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Élixir", "Zombie", "Mojito"]);
        assert!(result.find(1).is_some());
    }

    #[test]
    fn test_staples_are_hidden_but_counted() {
        let session = PantrySession::with_ingredients(["rhum blanc", "jus de citron vert", "menthe"]);
        let result = match_beverages(&session, &[mojito()]);

        assert_eq!(result.available.len(), 1);
        let enriched = &result.available[0];
        assert!(enriched.missing_ingredients.is_empty());
        assert_eq!(enriched.match_percentage, 60);
    }

    #[test]
    fn test_session_dedupes_by_normalized_name() {
        let mut session = PantrySession::new();
        assert!(session.add_ingredient("Citrons"));
        assert!(!session.add_ingredient("citron."));
        assert!(!session.add_ingredient("   "));
        assert!(session.has_ingredient("CITRON"));
        assert!(session.remove_ingredient("citrons"));
        assert!(session.ingredients.is_empty());
    }

    #[test]
    fn test_session_equipment_and_tags() {
        let mut session = PantrySession::new();
        assert!(session.is_empty_for(RecipeKind::Food));
        assert!(session.add_equipment("Four"));
        assert!(!session.add_equipment(" four "));
        assert!(!session.is_empty_for(RecipeKind::Food));
        assert!(session.is_empty_for(RecipeKind::Beverage));
        assert!(session.remove_equipment("FOUR"));

        assert!(session.toggle_tag("Végétarien"));
        assert_eq!(session.selected_tags, vec!["végétarien"]);
        assert!(!session.toggle_tag("végétarien"));
        assert!(session.selected_tags.is_empty());
    }

    #[test]
    fn test_compare_titles_folds_case_and_accents() {
        assert_eq!(compare_titles("éclair", "Fraisier"), Ordering::Less);
        assert_eq!(compare_titles("Zeste", "apéritif"), Ordering::Greater);
        assert_eq!(compare_titles("Crème", "creme"), Ordering::Less);
    }

    #[test]
    fn test_recipes_using_base_ingredient() {
        let tonic = Recipe::new(2, RecipeKind::Beverage, "Gin tonic").with_ingredients(["Gin", "Tonic"]);
        let recipes = vec![mojito(), tonic];

        let found = recipes_using("citron vert", &recipes);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Mojito");
        assert!(recipes_using("", &recipes).is_empty());
    }
}
