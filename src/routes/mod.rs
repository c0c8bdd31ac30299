// ABOUTME: Route module organization for the ChooseMyCocktail HTTP API
// ABOUTME: One route struct per domain, merged into a single router by the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Route module
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the database or the intelligence crate.

/// Health check and readiness routes
pub mod health;
/// Food to beverage pairing and feedback routes
pub mod pairings;
/// Pantry matcher routes
pub mod pantry;
/// Recipe catalogue routes
pub mod recipes;

pub use health::HealthRoutes;
pub use pairings::PairingRoutes;
pub use pantry::PantryRoutes;
pub use recipes::RecipeRoutes;

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a JSON body, reporting shape errors as invalid input
///
/// The axum `Json` extractor answers 422 with a plain-text body on a type
/// mismatch; decoding from a `Value` keeps the JSON error envelope and a 400.
pub(crate) fn parse_body<T: DeserializeOwned>(body: Value, what: &str) -> AppResult<T> {
    serde_json::from_value(body)
        .map_err(|e| AppError::invalid_input(format!("Invalid {what} payload: {e}")))
}

/// Reject ingredient lists above the per-request limit
pub(crate) fn check_ingredient_count(count: usize) -> AppResult<()> {
    if count > limits::MAX_USER_INGREDIENTS {
        return Err(AppError::out_of_range(format!(
            "At most {} ingredients are accepted, got {count}",
            limits::MAX_USER_INGREDIENTS
        )));
    }
    Ok(())
}
