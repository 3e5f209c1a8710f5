// ABOUTME: Database operations for the nutrient source registry
// ABOUTME: Lists sources in priority order and skips rows that fail validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::SourceProfile;
use sqlx::{Row, SqlitePool};
use tracing::warn;

/// Database manager for the source registry
pub struct SourceManager {
    pool: SqlitePool,
}

impl SourceManager {
    /// Create a new source manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every valid source ordered by priority, then id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_sources(&self) -> AppResult<Vec<SourceProfile>> {
        let rows = sqlx::query(
            r"
            SELECT source_id, display_name, confidence_factor, priority
            FROM nutrient_sources
            ORDER BY priority ASC, source_id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list nutrient sources: {e}")))?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let source_id: String = row.get("source_id");
                SourceProfile::new(
                    source_id.as_str(),
                    row.get::<String, _>("display_name"),
                    row.get("confidence_factor"),
                    row.get("priority"),
                )
                .map_err(|e| warn!(source_id = %source_id, error = %e, "Skipping invalid source row"))
                .ok()
            })
            .collect())
    }

    /// Insert or replace a source
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn upsert_source(&self, source: &SourceProfile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO nutrient_sources (source_id, display_name, confidence_factor, priority)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(source_id) DO UPDATE SET
                display_name = excluded.display_name,
                confidence_factor = excluded.confidence_factor,
                priority = excluded.priority
            ",
        )
        .bind(&source.source_id)
        .bind(&source.display_name)
        .bind(source.confidence_factor)
        .bind(source.priority)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert nutrient source: {e}")))?;

        Ok(())
    }
}
