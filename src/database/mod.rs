// ABOUTME: SQLite database connection, schema migrations, and per-table managers
// ABOUTME: Owns the connection pool shared by the ingredient, source, profile, and cooking stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Tables:
//! - `ingredient_records`: per-source nutrient observations (read-only to fusion)
//! - `nutrient_sources`: the source registry, seeded with default sources
//! - `fused_nutrient_profiles`: one fused profile per normalized ingredient name
//! - `cooking_method_classifications`: append-only classification log

/// Cooking method classification log
pub mod cooking_methods;
/// Ingredient record store and candidate lookup
pub mod ingredients;
/// Fused nutrient profile upserts and reads
pub mod profiles;
/// Repository traits and their `SQLite` and in-memory implementations
pub mod repositories;
/// Source registry store
pub mod sources;

pub use cooking_methods::CookingMethodManager;
pub use ingredients::IngredientManager;
pub use profiles::ProfileManager;
pub use sources::SourceManager;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

/// Pool size for file-backed databases
const FILE_POOL_SIZE: u32 = 5;

/// Default source registry rows: (id, display name, confidence factor, priority)
const DEFAULT_SOURCES: &[(&str, &str, f64, i32)] = &[
    ("usda_fdc", "USDA FoodData Central", 0.95, 1),
    ("open_food_facts", "Open Food Facts", 0.75, 2),
    ("nutritionix", "Nutritionix", 0.8, 3),
    ("user_submitted", "User submitted", 0.5, 4),
    ("llm_estimate", "LLM estimate", 0.4, 5),
];

/// Database handle wrapping the `SQLite` pool
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url` and run migrations
    ///
    /// File databases are created if missing. In-memory databases use a single
    /// connection that is never recycled, so every query sees the same schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration statement fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(database_url)?;

        let pool = match &url {
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect(&url.to_connection_string())
                    .await?
            }
            DatabaseUrl::SQLite { path, .. } => {
                ensure_parent_dir(path).await?;
                SqlitePoolOptions::new()
                    .max_connections(FILE_POOL_SIZE)
                    .connect(&url.to_create_connection_string())
                    .await?
            }
        };

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ingredient record manager
    #[must_use]
    pub fn ingredients(&self) -> IngredientManager {
        IngredientManager::new(self.pool.clone())
    }

    /// Source registry manager
    #[must_use]
    pub fn sources(&self) -> SourceManager {
        SourceManager::new(self.pool.clone())
    }

    /// Fused profile manager
    #[must_use]
    pub fn profiles(&self) -> ProfileManager {
        ProfileManager::new(self.pool.clone())
    }

    /// Cooking method log manager
    #[must_use]
    pub fn cooking_methods(&self) -> CookingMethodManager {
        CookingMethodManager::new(self.pool.clone())
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_sources().await?;
        self.migrate_ingredients().await?;
        self.migrate_profiles().await?;
        self.migrate_cooking_methods().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    async fn migrate_sources(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrient_sources (
                source_id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                confidence_factor REAL NOT NULL
                    CHECK (confidence_factor > 0 AND confidence_factor <= 1),
                priority INTEGER NOT NULL DEFAULT 100
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for (source_id, display_name, confidence_factor, priority) in DEFAULT_SOURCES {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO nutrient_sources
                    (source_id, display_name, confidence_factor, priority)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(*source_id)
            .bind(*display_name)
            .bind(*confidence_factor)
            .bind(*priority)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn migrate_ingredients(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredient_records (
                id TEXT PRIMARY KEY,
                raw_ingredient_text TEXT NOT NULL,
                normalized_name TEXT NOT NULL,
                nutrients TEXT NOT NULL DEFAULT '{}',
                source_id TEXT NOT NULL,
                confidence_score REAL NOT NULL DEFAULT 0
                    CHECK (confidence_score >= 0 AND confidence_score <= 1),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_ingredient_records_name ON ingredient_records(normalized_name)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS fused_nutrient_profiles (
                id TEXT PRIMARY KEY,
                ingredient_text TEXT NOT NULL,
                normalized_name TEXT NOT NULL UNIQUE,
                nutrients TEXT NOT NULL,
                confidence TEXT NOT NULL,
                sources TEXT NOT NULL,
                fusion_method TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_cooking_methods(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cooking_method_classifications (
                id TEXT PRIMARY KEY,
                raw_instruction_text TEXT NOT NULL,
                normalized_method TEXT NOT NULL CHECK (normalized_method IN
                    ('bake', 'boil', 'braise', 'fry', 'grill', 'roast', 'steam', 'slow cook', 'raw')),
                confidence_score REAL NOT NULL,
                classified_by TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime '{value}': {e}")))
}
