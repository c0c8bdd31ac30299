// ABOUTME: Pairing feedback model recorded when a user views, favorites, or rejects a pairing
// ABOUTME: Stored verbatim as telemetry; never read back by the scoring code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

/// What the user did with a suggested pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackAction {
    /// Pairing was displayed and opened
    View,
    /// Pairing was saved as a favorite
    Favorite,
    /// Pairing was dismissed
    Reject,
}

impl FeedbackAction {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Favorite => "favorite",
            Self::Reject => "reject",
        }
    }

    /// Parse from database string representation
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unknown action names
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "view" => Ok(Self::View),
            "favorite" => Ok(Self::Favorite),
            "reject" => Ok(Self::Reject),
            other => Err(AppError::invalid_input(format!(
                "Unknown feedback action '{other}', expected view, favorite or reject"
            ))),
        }
    }
}

/// Feedback as submitted by a client, before persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPairingFeedback {
    /// Food the pairing was computed for
    pub food_id: i64,
    /// Suggested beverage
    pub beverage_id: i64,
    /// User action
    pub action: FeedbackAction,
    /// Optional 1-5 star rating
    #[serde(default)]
    pub rating: Option<u8>,
    /// Optional reason tag chosen by the user
    #[serde(default)]
    pub reason_tag: Option<String>,
    /// Optional anonymous client session
    #[serde(default)]
    pub session_id: Option<String>,
    /// Free-form client metadata, stored as JSON
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl NewPairingFeedback {
    /// Validate the rating range
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when the rating is outside 1..=5
    pub fn validate(&self) -> AppResult<()> {
        match self.rating {
            Some(rating) if !(MIN_RATING..=MAX_RATING).contains(&rating) => {
                Err(AppError::out_of_range(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Persisted feedback row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingFeedback {
    /// Row identifier
    pub id: i64,
    /// Submitted payload
    #[serde(flatten)]
    pub feedback: NewPairingFeedback,
    /// Insertion time
    pub created_at: DateTime<Utc>,
}
