// ABOUTME: Request tracing helpers plugged into tower-http's TraceLayer
// ABOUTME: One span per request keyed by matched route and request id, one log line per response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use axum::body::Body;
use axum::extract::MatchedPath;
use http::{Request, Response};
use std::time::Duration;
use tracing::{error, info, info_span, Span};

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the `http_request` span for an incoming request
#[must_use]
pub fn make_request_span(request: &Request<Body>) -> Span {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    info_span!(
        "http_request",
        method = %request.method(),
        path = %path,
        request_id = %request_id,
    )
}

/// Log the outcome of a request inside its span
pub fn log_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status().as_u16();
    if status >= 500 {
        error!(status, latency_ms = %latency.as_millis(), "request failed with server error");
    } else {
        info!(status, latency_ms = %latency.as_millis(), "request completed");
    }
}
