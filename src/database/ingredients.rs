// ABOUTME: Database operations for stored per-source ingredient nutrient records
// ABOUTME: Candidate lookup by bidirectional containment plus inserts for seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::parse_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::IngredientRecord;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Database manager for ingredient records
pub struct IngredientManager {
    pool: SqlitePool,
}

impl IngredientManager {
    /// Create a new ingredient manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find records whose normalized name or raw text contains, or is contained
    /// by, `query_key`, most confident first
    ///
    /// `query_key` must already be normalized. An empty key matches nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn find_candidates(
        &self,
        query_key: &str,
        limit: usize,
    ) -> AppResult<Vec<IngredientRecord>> {
        if query_key.is_empty() {
            return Ok(Vec::new());
        }

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            r"
            SELECT id, raw_ingredient_text, normalized_name, nutrients,
                   source_id, confidence_score, created_at
            FROM ingredient_records
            WHERE (normalized_name != ''
                   AND (instr(normalized_name, $1) > 0 OR instr($1, normalized_name) > 0))
               OR (trim(raw_ingredient_text) != ''
                   AND (instr(lower(raw_ingredient_text), $1) > 0
                        OR instr($1, lower(raw_ingredient_text)) > 0))
            ORDER BY confidence_score DESC, normalized_name ASC
            LIMIT $2
            ",
        )
        .bind(query_key)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find ingredient candidates: {e}")))?;

        rows.iter().map(row_to_ingredient_record).collect()
    }

    /// Insert an ingredient record
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert_record(&self, record: &IngredientRecord) -> AppResult<()> {
        let nutrients_json = serde_json::to_string(&record.nutrients)?;

        sqlx::query(
            r"
            INSERT INTO ingredient_records
                (id, raw_ingredient_text, normalized_name, nutrients,
                 source_id, confidence_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(record.id.to_string())
        .bind(&record.raw_ingredient_text)
        .bind(&record.normalized_name)
        .bind(nutrients_json)
        .bind(&record.source_id)
        .bind(record.confidence_score)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert ingredient record: {e}")))?;

        Ok(())
    }

    /// Number of stored ingredient records
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count_records(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredient_records")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count ingredient records: {e}")))?;
        Ok(count)
    }
}

/// Convert a database row to an `IngredientRecord`
fn row_to_ingredient_record(row: &SqliteRow) -> AppResult<IngredientRecord> {
    let id_str: String = row.get("id");
    let nutrients_json: String = row.get("nutrients");
    let created_at_str: String = row.get("created_at");

    let nutrients: BTreeMap<String, f64> = serde_json::from_str(&nutrients_json)?;

    Ok(IngredientRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid ingredient record id: {e}")))?,
        raw_ingredient_text: row.get("raw_ingredient_text"),
        normalized_name: row.get("normalized_name"),
        nutrients,
        source_id: row.get("source_id"),
        confidence_score: row.get("confidence_score"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
