// ABOUTME: Shared domain models for recipes, item profiles, and pairing feedback
// ABOUTME: Plain serde types consumed by the intelligence crate and the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

/// Pairing feedback events recorded by clients
pub mod feedback;
/// Recipe kind, preparation steps, and numeric item profiles
pub mod recipe;

pub use feedback::{FeedbackAction, NewPairingFeedback, PairingFeedback};
pub use recipe::{ItemProfile, RecipeKind, Step};
