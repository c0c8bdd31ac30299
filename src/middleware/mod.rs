// ABOUTME: HTTP middleware for CORS and request tracing
// ABOUTME: Layers applied to the router by the server bootstrap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

/// Cross-origin configuration
pub mod cors;
/// Request spans and response logging
pub mod tracing;

pub use cors::setup_cors;
pub use tracing::{log_response, make_request_span, REQUEST_ID_HEADER};
