// ABOUTME: Database operations for the append-only cooking method classification log
// ABOUTME: Records each classification and lists recent entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::parse_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::{CookingMethod, CookingMethodClassification};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Database manager for cooking method classifications
pub struct CookingMethodManager {
    pool: SqlitePool,
}

impl CookingMethodManager {
    /// Create a new cooking method manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a classification to the log
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn record_classification(
        &self,
        classification: &CookingMethodClassification,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO cooking_method_classifications
                (id, raw_instruction_text, normalized_method, confidence_score,
                 classified_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(classification.id.to_string())
        .bind(&classification.raw_instruction_text)
        .bind(classification.normalized_method.as_str())
        .bind(classification.confidence_score)
        .bind(&classification.classified_by)
        .bind(classification.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to record cooking method classification: {e}"))
        })?;

        Ok(())
    }

    /// List the most recent classifications, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a stored row is corrupt
    pub async fn list_recent(&self, limit: u32) -> AppResult<Vec<CookingMethodClassification>> {
        let rows = sqlx::query(
            r"
            SELECT id, raw_instruction_text, normalized_method, confidence_score,
                   classified_by, created_at
            FROM cooking_method_classifications
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to list cooking method classifications: {e}"))
        })?;

        rows.iter().map(row_to_classification).collect()
    }
}

/// Convert a database row to a `CookingMethodClassification`
fn row_to_classification(row: &SqliteRow) -> AppResult<CookingMethodClassification> {
    let id_str: String = row.get("id");
    let method_str: String = row.get("normalized_method");
    let created_at_str: String = row.get("created_at");

    Ok(CookingMethodClassification {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid classification id: {e}")))?,
        raw_instruction_text: row.get("raw_instruction_text"),
        normalized_method: CookingMethod::from_label(&method_str)?,
        confidence_score: row.get("confidence_score"),
        classified_by: row.get("classified_by"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
