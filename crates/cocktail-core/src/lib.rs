// ABOUTME: Core types and constants for the ChooseMyCocktail recipe service
// ABOUTME: Foundation crate with error handling, shared models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

#![deny(unsafe_code)]

//! # Cocktail Core
//!
//! Foundation crate providing shared types and constants for the
//! ChooseMyCocktail service. It changes rarely so the rest of the workspace
//! benefits from incremental compilation.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Recipe kinds, item profiles, and pairing feedback
//! - **constants**: Well-known tags and pairing defaults

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models shared between the engine and the HTTP layer
pub mod models;
