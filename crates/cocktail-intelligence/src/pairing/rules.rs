// ABOUTME: Declarative pairing rule table for food to beverage scoring
// ABOUTME: Tag rules match beverage tags, profile rules match numeric beverage attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use crate::recipes::Recipe;
use cocktail_core::models::ItemProfile;

/// Numeric condition checked against a beverage profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileCondition {
    /// ABV strictly above the threshold
    AbvAbove(f64),
    /// ABV at or below the threshold
    AbvAtMost(f64),
}

impl ProfileCondition {
    /// Whether the profile satisfies the condition; unknown ABV never does
    #[must_use]
    pub fn holds(&self, profile: &ItemProfile) -> bool {
        match (*self, profile.abv) {
            (Self::AbvAbove(threshold), Some(abv)) => abv > threshold,
            (Self::AbvAtMost(threshold), Some(abv)) => abv <= threshold,
            (_, None) => false,
        }
    }
}

/// One row of the pairing rule table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairingRule {
    /// Food tag paired with any of a set of beverage tags
    Tag {
        /// Tag the food must carry
        food_tag: &'static str,
        /// Beverage must carry at least one of these
        beverage_tags: &'static [&'static str],
        /// Score added when the rule applies, may be negative
        score: f64,
        /// Reason recorded when the rule applies
        reason: &'static str,
    },
    /// Food tag paired with a numeric beverage attribute
    Profile {
        /// Tag the food must carry
        food_tag: &'static str,
        /// Condition on the beverage profile
        condition: ProfileCondition,
        /// Score added when the rule applies, may be negative
        score: f64,
        /// Reason recorded when the rule applies
        reason: &'static str,
    },
}

impl PairingRule {
    /// Tag the food must carry for the rule to be considered
    #[must_use]
    pub const fn food_tag(&self) -> &'static str {
        match self {
            Self::Tag { food_tag, .. } | Self::Profile { food_tag, .. } => food_tag,
        }
    }

    /// Score contribution
    #[must_use]
    pub const fn score(&self) -> f64 {
        match self {
            Self::Tag { score, .. } | Self::Profile { score, .. } => *score,
        }
    }

    /// Reason string recorded on the pairing
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Tag { reason, .. } | Self::Profile { reason, .. } => reason,
        }
    }

    /// Whether the rule needs the beverage profile to be evaluated
    #[must_use]
    pub const fn needs_profile(&self) -> bool {
        matches!(self, Self::Profile { .. })
    }

    /// Whether the rule applies to this food and beverage
    #[must_use]
    pub fn applies(&self, food: &Recipe, beverage: &Recipe, profile: Option<&ItemProfile>) -> bool {
        if !food.has_tag(self.food_tag()) {
            return false;
        }
        match self {
            Self::Tag { beverage_tags, .. } => beverage.has_any_tag(beverage_tags),
            Self::Profile { condition, .. } => profile.is_some_and(|p| condition.holds(p)),
        }
    }
}

/// Rules applied by default, in evaluation order
pub const DEFAULT_RULES: &[PairingRule] = &[
    PairingRule::Tag {
        food_tag: "umami",
        beverage_tags: &["herbal", "citrusy", "bitter"],
        score: 2.0,
        reason: "rule:umami→herbal/citrus",
    },
    PairingRule::Tag {
        food_tag: "spicy",
        beverage_tags: &["sweet", "fruity", "low_abv"],
        score: 1.5,
        reason: "rule:spicy→sweet/fruity",
    },
    PairingRule::Tag {
        food_tag: "spicy",
        beverage_tags: &["high_abv"],
        score: -2.0,
        reason: "rule:spicy→avoid_high_abv",
    },
    PairingRule::Tag {
        food_tag: "fatty",
        beverage_tags: &["acidic", "citrusy", "sparkling"],
        score: 1.5,
        reason: "rule:fatty→acid/bubbles",
    },
    PairingRule::Tag {
        food_tag: "salé",
        beverage_tags: &["sparkling", "sweet"],
        score: 1.0,
        reason: "rule:salé→bubbles/sweet",
    },
    PairingRule::Tag {
        food_tag: "sucré",
        beverage_tags: &["sweet", "creamy", "fruity"],
        score: 1.0,
        reason: "rule:sucré→sweet/creamy",
    },
    PairingRule::Tag {
        food_tag: "seafood",
        beverage_tags: &["citrusy", "dry", "herbal"],
        score: 1.5,
        reason: "rule:seafood→citrus/dry",
    },
    PairingRule::Tag {
        food_tag: "smoky",
        beverage_tags: &["smoky", "bitter"],
        score: 1.0,
        reason: "rule:smoky→smoky/bitter",
    },
    PairingRule::Profile {
        food_tag: "spicy",
        condition: ProfileCondition::AbvAbove(30.0),
        score: -1.0,
        reason: "profile:spicy→strong_spirit",
    },
    PairingRule::Profile {
        food_tag: "sucré",
        condition: ProfileCondition::AbvAtMost(15.0),
        score: 0.5,
        reason: "profile:sucré→light_abv",
    },
];
