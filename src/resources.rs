// ABOUTME: Shared server state handed to every route handler
// ABOUTME: Bundles the database with the loaded configuration behind an Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use crate::config::ServerConfig;
use crate::database::Database;
use cocktail_intelligence::PairingEngine;
use std::sync::Arc;

/// Resources shared by all requests
#[derive(Clone, Debug)]
pub struct ServerResources {
    /// Recipe catalogue storage
    pub database: Database,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle a database and configuration
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self {
            database,
            config: Arc::new(config),
        }
    }

    /// Pairing engine reading from the database
    #[must_use]
    pub fn pairing_engine(&self) -> PairingEngine<Database> {
        PairingEngine::new(self.database.clone())
    }
}
