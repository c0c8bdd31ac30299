// ABOUTME: Loads the demo recipe catalogue into a database
// ABOUTME: Does nothing when the catalogue already holds recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use anyhow::Result;
use choose_my_cocktail::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging, seed, server,
};
use clap::Parser;
use cocktail_intelligence::RecipeFilter;
use tracing::info;

#[derive(Parser)]
#[command(name = "seed-demo-recipes")]
#[command(about = "Load the ChooseMyCocktail demo catalogue into an empty database")]
struct Args {
    /// Database URL, defaults to `DATABASE_URL`
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let url = match args.database_url.as_deref() {
        Some(url) => DatabaseUrl::parse_url(url)?,
        None => ServerConfig::from_env()?.database.url,
    };
    server::ensure_database_dir(&url)?;

    let database = Database::new(&url.to_connection_string()).await?;
    let inserted = seed::seed_if_empty(&database).await?;
    let total = database.count_recipes(RecipeFilter::default()).await?;

    info!(inserted, total, database = %url, "Seeding finished");
    Ok(())
}
