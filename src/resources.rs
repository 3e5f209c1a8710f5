// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the database, the fusion engine, and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::database::Database;
use crate::services::fusion::NutritionFusionEngine;
use std::sync::Arc;

/// Resources shared across request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Database used for readiness checks
    pub database: Arc<Database>,
    /// Fusion engine serving the nutrition routes
    pub engine: Arc<NutritionFusionEngine>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Resources with an engine backed by `database`
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let database = Arc::new(database);
        let engine = Arc::new(NutritionFusionEngine::from_database(&database));
        Self {
            database,
            engine,
            config: Arc::new(config),
        }
    }

    /// Resources with an explicitly supplied engine
    #[must_use]
    pub fn with_engine(
        database: Arc<Database>,
        engine: NutritionFusionEngine,
        config: ServerConfig,
    ) -> Self {
        Self {
            database,
            engine: Arc::new(engine),
            config: Arc::new(config),
        }
    }
}
