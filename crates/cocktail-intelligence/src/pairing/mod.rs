// ABOUTME: Rule-based food to beverage pairing engine with explainable scores
// ABOUTME: Scores every validated beverage, filters on alcohol and ABV, and ranks the top K
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! # Pairing Engine
//!
//! Each candidate beverage gets a score built from additive contributions, and
//! every contribution records a reason string so clients can explain a
//! suggestion:
//!
//! - a base of 1
//! - 1.5 per tag shared by the food and the beverage (`tag:<tag>`)
//! - every matching row of the [rule table](rules::DEFAULT_RULES)
//! - up to 5 for owning the beverage's ingredients
//!
//! Scores are rounded to one decimal. Filters run after scoring, then the
//! candidates are ranked by score with the beverage id as a stable tie-break.

/// Declarative pairing rule table
pub mod rules;

pub use rules::{PairingRule, ProfileCondition, DEFAULT_RULES};

use crate::recipes::{Recipe, RecipeFilter};
use crate::repository::{FeedbackRepository, RecipeRepository};
use cocktail_core::constants::{pairing, tags};
use cocktail_core::errors::{AppError, AppResult};
use cocktail_core::models::{ItemProfile, NewPairingFeedback, RecipeKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Caller options for a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PairingOptions {
    /// Maximum number of pairings returned
    pub top_k: usize,
    /// Keep beverages tagged alcoholic or high ABV
    pub allow_alcohol: bool,
    /// Drop beverages whose known ABV exceeds this value
    pub max_abv: Option<f64>,
    /// Ingredients the user owns, compared by display name
    pub user_ingredients: Vec<String>,
}

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            top_k: pairing::DEFAULT_TOP_K,
            allow_alcohol: true,
            max_abv: None,
            user_ingredients: Vec::new(),
        }
    }
}

/// Score with the reasons that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingScore {
    /// Rounded score
    pub score: f64,
    /// Reasons in the order they were added
    pub reasons: Vec<String>,
}

/// A beverage suggested for a food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPairing {
    /// Suggested beverage
    pub beverage: Recipe,
    /// Rounded score, higher is better
    pub score: f64,
    /// Why the beverage scored what it did
    pub reasons: Vec<String>,
}

/// Owned and total ingredient counts of a beverage
///
/// Names are compared on their trimmed lower-case display form only, not on
/// the normalized key the pantry matcher uses.
#[must_use]
pub fn ingredient_availability(beverage: &Recipe, user_ingredients: &[String]) -> (usize, usize) {
    let owned: HashSet<String> = user_ingredients
        .iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();
    let have = beverage
        .ingredients
        .iter()
        .filter(|i| owned.contains(&i.display_name.trim().to_lowercase()))
        .count();
    (have, beverage.ingredients.len())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score a beverage for a food with the default rules and no profile
#[must_use]
pub fn calculate_score(food: &Recipe, beverage: &Recipe, user_ingredients: &[String]) -> PairingScore {
    score_with_rules(food, beverage, user_ingredients, None, DEFAULT_RULES)
}

/// Score a beverage for a food against an explicit rule table
#[must_use]
pub fn score_with_rules(
    food: &Recipe,
    beverage: &Recipe,
    user_ingredients: &[String],
    profile: Option<&ItemProfile>,
    rules: &[PairingRule],
) -> PairingScore {
    let mut score = pairing::BASE_SCORE;
    let mut reasons = Vec::new();

    let food_tags: BTreeSet<String> = food.tags.iter().map(|t| t.trim().to_lowercase()).collect();
    let beverage_tags: BTreeSet<String> = beverage
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .collect();
    for shared in food_tags.intersection(&beverage_tags) {
        score += pairing::SHARED_TAG_SCORE;
        reasons.push(format!("tag:{shared}"));
    }

    for rule in rules.iter().filter(|r| r.applies(food, beverage, profile)) {
        score += rule.score();
        reasons.push(rule.reason().to_owned());
    }

    if !user_ingredients.is_empty() {
        let (have, total) = ingredient_availability(beverage, user_ingredients);
        if total > 0 {
            let ratio = have as f64 / total as f64;
            score += ratio * pairing::AVAILABILITY_WEIGHT;
            if have == total {
                reasons.push(pairing::REASON_ALL_AVAILABLE.to_owned());
            } else if ratio > pairing::MOST_AVAILABLE_THRESHOLD {
                reasons.push(pairing::REASON_MOST_AVAILABLE.to_owned());
            }
        }
    }

    PairingScore {
        score: round_one_decimal(score),
        reasons,
    }
}

fn passes_filters(beverage: &Recipe, profile: Option<&ItemProfile>, options: &PairingOptions) -> bool {
    if !options.allow_alcohol && beverage.has_any_tag(&tags::ALCOHOL_TAGS) {
        return false;
    }
    match (options.max_abv, profile.and_then(|p| p.abv)) {
        (Some(max_abv), Some(abv)) => abv <= max_abv,
        _ => true,
    }
}

fn rank(a: &ScoredPairing, b: &ScoredPairing) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.beverage.id.cmp(&b.beverage.id))
}

/// Recommends beverages for a food from a recipe repository
pub struct PairingEngine<R> {
    repository: R,
    rules: &'static [PairingRule],
}

impl<R: RecipeRepository> PairingEngine<R> {
    /// Engine using the default rule table
    pub const fn new(repository: R) -> Self {
        Self {
            repository,
            rules: DEFAULT_RULES,
        }
    }

    /// Engine using a custom rule table
    pub const fn with_rules(repository: R, rules: &'static [PairingRule]) -> Self {
        Self { repository, rules }
    }

    /// Underlying repository
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Rule table in use
    #[must_use]
    pub const fn rules(&self) -> &'static [PairingRule] {
        self.rules
    }

    fn needs_profile(&self, food: &Recipe, options: &PairingOptions) -> bool {
        options.max_abv.is_some()
            || self
                .rules
                .iter()
                .any(|r| r.needs_profile() && food.has_tag(r.food_tag()))
    }

    /// Best beverages for a food, highest score first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when `food_id` is unknown or not a food, and
    /// propagates repository failures.
    pub async fn recommend(
        &self,
        food_id: i64,
        options: &PairingOptions,
    ) -> AppResult<Vec<ScoredPairing>> {
        let food = self
            .repository
            .get_recipe_by_id(food_id)
            .await?
            .filter(|r| r.kind == RecipeKind::Food)
            .ok_or_else(|| {
                AppError::not_found(format!("Food {food_id}")).with_resource_id(food_id.to_string())
            })?;

        let candidates = self
            .repository
            .list_recipes(RecipeFilter::validated_of_kind(RecipeKind::Beverage))
            .await?;
        let candidate_count = candidates.len();
        let fetch_profiles = self.needs_profile(&food, options);

        let mut pairings = Vec::with_capacity(candidate_count);
        for beverage in candidates {
            let profile = if fetch_profiles {
                self.repository.get_item_profile(beverage.id).await?
            } else {
                None
            };
            let PairingScore { score, reasons } = score_with_rules(
                &food,
                &beverage,
                &options.user_ingredients,
                profile.as_ref(),
                self.rules,
            );
            if passes_filters(&beverage, profile.as_ref(), options) {
                pairings.push(ScoredPairing {
                    beverage,
                    score,
                    reasons,
                });
            }
        }

        let kept = pairings.len();
        pairings.sort_by(rank);
        pairings.truncate(options.top_k);

        debug!(
            food_id,
            candidates = candidate_count,
            kept,
            returned = pairings.len(),
            "Ranked beverage pairings"
        );
        Ok(pairings)
    }
}

/// Validate and persist a feedback event
///
/// Feedback is telemetry only; scoring never reads it back.
///
/// # Errors
///
/// Returns `ValueOutOfRange` for a rating outside 1-5 and propagates
/// repository failures.
pub async fn record_feedback<F: FeedbackRepository + ?Sized>(
    sink: &F,
    feedback: &NewPairingFeedback,
) -> AppResult<i64> {
    feedback.validate()?;
    let id = sink.record_feedback(feedback).await?;
    info!(
        feedback_id = id,
        food_id = feedback.food_id,
        beverage_id = feedback.beverage_id,
        action = feedback.action.as_str(),
        "Recorded pairing feedback"
    );
    Ok(id)
}
