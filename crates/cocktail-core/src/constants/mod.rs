// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Well-known tags, pairing defaults, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Constants shared by the scoring code and the service shell.

/// Tags with a fixed meaning for filtering and scoring
pub mod tags {
    /// Beverage contains alcohol
    pub const ALCOHOLIC: &str = "alcoholic";
    /// Beverage is a strong drink
    pub const HIGH_ABV: &str = "high_abv";
    /// Tags that disqualify a beverage when alcohol is not allowed
    pub const ALCOHOL_TAGS: [&str; 2] = [ALCOHOLIC, HIGH_ABV];
}

/// Pairing engine defaults
pub mod pairing {
    /// Number of pairings returned when the caller does not ask for a count
    pub const DEFAULT_TOP_K: usize = 5;
    /// Score every beverage starts from
    pub const BASE_SCORE: f64 = 1.0;
    /// Score added per tag shared by the food and the beverage
    pub const SHARED_TAG_SCORE: f64 = 1.5;
    /// Weight of the ingredient availability ratio
    pub const AVAILABILITY_WEIGHT: f64 = 5.0;
    /// Availability ratio above which most ingredients count as available
    pub const MOST_AVAILABLE_THRESHOLD: f64 = 0.7;
    /// Reason emitted when every beverage ingredient is owned
    pub const REASON_ALL_AVAILABLE: &str = "all_ingredients_available";
    /// Reason emitted when most beverage ingredients are owned
    pub const REASON_MOST_AVAILABLE: &str = "most_ingredients_available";
}

/// Service names used in logs
pub mod service_names {
    /// HTTP server service name
    pub const CHOOSE_MY_COCKTAIL_SERVER: &str = "choose-my-cocktail-server";
}
