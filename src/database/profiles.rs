// ABOUTME: Database operations for fused nutrient profiles keyed by normalized ingredient name
// ABOUTME: Single-statement upsert, delete-and-insert override, and read-back by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::parse_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::{FusedNutrientProfile, Nutrient};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;
use uuid::Uuid;

/// Database manager for fused nutrient profiles
pub struct ProfileManager {
    pool: SqlitePool,
}

impl ProfileManager {
    /// Create a new profile manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a profile under its normalized name
    ///
    /// Without `override_existing` an existing row is updated in place: maps are
    /// replaced wholesale while `id` and `created_at` are kept. With
    /// `override_existing` the old row is deleted and the profile inserted fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or database operation fails
    pub async fn upsert_profile(
        &self,
        profile: &FusedNutrientProfile,
        override_existing: bool,
    ) -> AppResult<()> {
        let columns = ProfileColumns::encode(profile)?;

        if override_existing {
            let mut tx = self.pool.begin().await.map_err(|e| {
                AppError::database(format!("Failed to begin profile transaction: {e}"))
            })?;

            sqlx::query("DELETE FROM fused_nutrient_profiles WHERE normalized_name = $1")
                .bind(&profile.normalized_name)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to replace fused profile: {e}")))?;

            columns
                .insert_query(INSERT_PROFILE, profile)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to insert fused profile: {e}")))?;

            tx.commit().await.map_err(|e| {
                AppError::database(format!("Failed to commit profile transaction: {e}"))
            })?;
        } else {
            columns
                .insert_query(UPSERT_PROFILE, profile)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to upsert fused profile: {e}")))?;
        }

        Ok(())
    }

    /// Get the profile stored for a normalized ingredient name
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or the stored row is corrupt
    pub async fn get_profile(&self, normalized_name: &str) -> AppResult<Option<FusedNutrientProfile>> {
        let row = sqlx::query(
            r"
            SELECT id, ingredient_text, normalized_name, nutrients, confidence,
                   sources, fusion_method, created_at, updated_at
            FROM fused_nutrient_profiles
            WHERE normalized_name = $1
            ",
        )
        .bind(normalized_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get fused profile: {e}")))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }
}

const INSERT_PROFILE: &str = r"
    INSERT INTO fused_nutrient_profiles
        (id, ingredient_text, normalized_name, nutrients, confidence,
         sources, fusion_method, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
";

const UPSERT_PROFILE: &str = r"
    INSERT INTO fused_nutrient_profiles
        (id, ingredient_text, normalized_name, nutrients, confidence,
         sources, fusion_method, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    ON CONFLICT(normalized_name) DO UPDATE SET
        ingredient_text = excluded.ingredient_text,
        nutrients = excluded.nutrients,
        confidence = excluded.confidence,
        sources = excluded.sources,
        fusion_method = excluded.fusion_method,
        updated_at = excluded.updated_at
";

/// JSON-encoded map columns of a profile row
struct ProfileColumns {
    nutrients: String,
    confidence: String,
    sources: String,
}

impl ProfileColumns {
    fn encode(profile: &FusedNutrientProfile) -> AppResult<Self> {
        let nutrients: BTreeMap<&str, f64> = profile
            .nutrients
            .iter()
            .map(|(nutrient, value)| (nutrient.as_str(), *value))
            .collect();
        let sources: BTreeMap<&str, &BTreeSet<String>> = profile
            .sources
            .iter()
            .map(|(nutrient, labels)| (nutrient.as_str(), labels))
            .collect();

        Ok(Self {
            nutrients: serde_json::to_string(&nutrients)?,
            confidence: serde_json::to_string(&profile.persisted_confidence())?,
            sources: serde_json::to_string(&sources)?,
        })
    }

    fn insert_query<'q>(
        &'q self,
        sql: &'q str,
        profile: &'q FusedNutrientProfile,
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        sqlx::query(sql)
            .bind(profile.id.to_string())
            .bind(&profile.ingredient_text)
            .bind(&profile.normalized_name)
            .bind(&self.nutrients)
            .bind(&self.confidence)
            .bind(&self.sources)
            .bind(&profile.fusion_method)
            .bind(profile.created_at.to_rfc3339())
            .bind(profile.updated_at.to_rfc3339())
    }
}

/// Decode a nutrient-keyed JSON object, dropping unrecognized keys
fn decode_nutrient_map<T>(json: &str, column: &str) -> AppResult<BTreeMap<Nutrient, T>>
where
    T: serde::de::DeserializeOwned,
{
    let raw: BTreeMap<String, T> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| {
            let nutrient = Nutrient::parse(&key);
            if nutrient.is_none() {
                warn!(column, key = %key, "Dropping unrecognized nutrient key from stored profile");
            }
            nutrient.map(|n| (n, value))
        })
        .collect())
}

/// Convert a database row to a `FusedNutrientProfile`
fn row_to_profile(row: &SqliteRow) -> AppResult<FusedNutrientProfile> {
    let id_str: String = row.get("id");
    let nutrients_json: String = row.get("nutrients");
    let confidence_json: String = row.get("confidence");
    let sources_json: String = row.get("sources");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let persisted_confidence: BTreeMap<String, f64> = serde_json::from_str(&confidence_json)?;
    let (confidence, overall_confidence) =
        FusedNutrientProfile::split_persisted_confidence(&persisted_confidence);

    Ok(FusedNutrientProfile {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid fused profile id: {e}")))?,
        ingredient_text: row.get("ingredient_text"),
        normalized_name: row.get("normalized_name"),
        nutrients: decode_nutrient_map(&nutrients_json, "nutrients")?,
        confidence,
        overall_confidence,
        sources: decode_nutrient_map(&sources_json, "sources")?,
        fusion_method: row.get("fusion_method"),
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}
