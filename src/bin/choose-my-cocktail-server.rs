// ABOUTME: HTTP server binary for the ChooseMyCocktail API
// ABOUTME: Loads configuration, applies CLI overrides, and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! # ChooseMyCocktail Server Binary

use anyhow::Result;
use choose_my_cocktail::{
    config::{DatabaseUrl, ServerConfig},
    logging, server,
};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "choose-my-cocktail-server")]
#[command(about = "ChooseMyCocktail - recipe pantry matching and food to drink pairing API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:./path.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,

    /// Load the demo catalogue into an empty database
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    if args.seed {
        config.database.seed_demo_data = true;
    }

    logging::init_from_env()?;

    info!("Starting ChooseMyCocktail API");
    info!("{}", config.summary());

    let resources = server::prepare_resources(config).await?;
    display_available_endpoints(&resources.config);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Log the endpoints served
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);
    info!("=== Available API Endpoints ===");
    info!("  GET  {base}/health");
    info!("  GET  {base}/ready");
    info!("  GET  {base}/api/recipes?kind=&validated=");
    info!("  POST {base}/api/recipes");
    info!("  GET  {base}/api/recipes/search?ingredient=");
    info!("  GET  {base}/api/recipes/:id");
    info!("  GET  {base}/api/recipes/:id/profile");
    info!("  PUT  {base}/api/recipes/:id/profile");
    info!("  POST {base}/api/pairings");
    info!("  POST {base}/api/pairings/feedback");
    info!("  GET  {base}/api/pairings/:food_id/feedback");
    info!("  POST {base}/api/pantry/match");
}
