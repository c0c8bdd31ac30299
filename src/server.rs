// ABOUTME: HTTP server bootstrap: database setup, router assembly, and graceful shutdown
// ABOUTME: Merges every route group and applies tracing, request id, CORS, and limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! # Server
//!
//! [`prepare_resources`] turns a [`ServerConfig`] into shared state,
//! [`build_router`] assembles the API, and [`run`] serves it until Ctrl+C or
//! SIGTERM.

use crate::config::{DatabaseUrl, ServerConfig};
use crate::constants::limits;
use crate::database::Database;
use crate::errors::AppError;
use crate::middleware::{log_response, make_request_span, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, PairingRoutes, PantryRoutes, RecipeRoutes};
use crate::seed;
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::Uri;
use axum::Router;
use std::fs;
use std::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{signal as unix_signal, SignalKind};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Open the database, seed it when asked, and bundle the shared state
///
/// # Errors
///
/// Returns an error if the database directory cannot be created, the
/// connection or migrations fail, or seeding fails
pub async fn prepare_resources(config: ServerConfig) -> Result<Arc<ServerResources>> {
    ensure_database_dir(&config.database.url)?;
    let database = Database::new(&config.database.url.to_connection_string()).await?;

    if config.database.seed_demo_data {
        let inserted = seed::seed_if_empty(&database).await?;
        info!(inserted, "Demo catalogue check complete");
    }

    Ok(Arc::new(ServerResources::new(database, config)))
}

/// Create the directory holding an on-disk database file
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_database_dir(url: &DatabaseUrl) -> Result<()> {
    if let DatabaseUrl::SQLite { path } = url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Assemble the API router with its middleware stack
///
/// The last layer added sees the request first: CORS, request id, tracing,
/// then timeout and body limit.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(PairingRoutes::routes(Arc::clone(&resources)))
        .merge(PantryRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(limits::MAX_REQUEST_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(
            limits::REQUEST_TIMEOUT_SECS,
        )))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(log_response),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Serve the API until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(%address, "HTTP server listening");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to listen for Ctrl+C");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
