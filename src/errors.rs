// ABOUTME: Error types for the HTTP service, re-exported from cocktail-core
// ABOUTME: Routes return AppResult and AppError renders itself as a JSON response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Unified error handling
//!
//! The definitions live in `cocktail_core::errors` so the intelligence crate
//! can return the same type without depending on axum.

pub use cocktail_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
