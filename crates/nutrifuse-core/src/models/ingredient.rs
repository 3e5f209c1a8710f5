// ABOUTME: Stored per-source ingredient nutrient observations and name normalization
// ABOUTME: IngredientRecord keeps raw nutrient names as imported; fusion resolves them later
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Normalize an ingredient description into its fusion/storage key
///
/// Lower-cases, trims, and collapses runs of inner whitespace to a single space,
/// so `"  Chicken   Breast "` and `"chicken breast"` share one key.
#[must_use]
pub fn normalize_ingredient_name(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A previously stored nutrient observation for one ingredient from one source
///
/// Records are written by the import pipeline; the fusion engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    /// Unique ID
    pub id: Uuid,
    /// Ingredient text as imported
    pub raw_ingredient_text: String,
    /// Normalized ingredient name
    pub normalized_name: String,
    /// Nutrient name to value, names exactly as the source reported them
    pub nutrients: BTreeMap<String, f64>,
    /// Source registry identifier
    pub source_id: String,
    /// Confidence of this particular record in [0, 1]
    pub confidence_score: f64,
    /// When the record was imported
    pub created_at: DateTime<Utc>,
}

impl IngredientRecord {
    /// Create a new record, normalizing the name and clamping the confidence into [0, 1]
    #[must_use]
    pub fn new(
        raw_ingredient_text: impl Into<String>,
        source_id: impl Into<String>,
        nutrients: BTreeMap<String, f64>,
        confidence_score: f64,
    ) -> Self {
        let raw_ingredient_text = raw_ingredient_text.into();
        let confidence_score = if confidence_score.is_finite() {
            confidence_score.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            id: Uuid::new_v4(),
            normalized_name: normalize_ingredient_name(&raw_ingredient_text),
            raw_ingredient_text,
            nutrients,
            source_id: source_id.into(),
            confidence_score,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_case_and_whitespace() {
        assert_eq!(
            normalize_ingredient_name("  Chicken   Breast, RAW "),
            "chicken breast, raw"
        );
    }

    #[test]
    fn test_record_confidence_is_clamped() {
        let record = IngredientRecord::new("Apple", "usda", BTreeMap::new(), 1.7);
        assert!((record.confidence_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(record.normalized_name, "apple");
    }
}
