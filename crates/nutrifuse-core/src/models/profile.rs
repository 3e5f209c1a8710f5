// ABOUTME: Persisted fused nutrient profile, one row per normalized ingredient name
// ABOUTME: Carries fused values, per-nutrient confidence, and contributing source labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Nutrient;
use crate::constants::fusion::OVERALL_CONFIDENCE_KEY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Best-estimate nutrient profile for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedNutrientProfile {
    /// Unique ID
    pub id: Uuid,
    /// Ingredient text of the request that produced this profile
    pub ingredient_text: String,
    /// Fusion and storage key
    pub normalized_name: String,
    /// Fused value per nutrient, in the nutrient's canonical unit
    pub nutrients: BTreeMap<Nutrient, f64>,
    /// Confidence per nutrient, capped at 0.95
    pub confidence: BTreeMap<Nutrient, f64>,
    /// Mean of the per-nutrient confidences (0 when nothing was fused)
    pub overall_confidence: f64,
    /// Source labels that contributed to each nutrient
    pub sources: BTreeMap<Nutrient, BTreeSet<String>>,
    /// Fusion method tag
    pub fusion_method: String,
    /// When the row was first written
    pub created_at: DateTime<Utc>,
    /// When the row was last written
    pub updated_at: DateTime<Utc>,
}

impl FusedNutrientProfile {
    /// Number of distinct source labels across all fused nutrients
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Confidence map as persisted: per-nutrient entries plus an `overall` aggregate
    #[must_use]
    pub fn persisted_confidence(&self) -> BTreeMap<String, f64> {
        let mut map: BTreeMap<String, f64> = self
            .confidence
            .iter()
            .map(|(nutrient, confidence)| (nutrient.as_str().to_owned(), *confidence))
            .collect();
        map.insert(OVERALL_CONFIDENCE_KEY.to_owned(), self.overall_confidence);
        map
    }

    /// Split a persisted confidence map back into per-nutrient entries and the aggregate
    ///
    /// Keys that are neither a known nutrient nor the aggregate are dropped.
    #[must_use]
    pub fn split_persisted_confidence(
        persisted: &BTreeMap<String, f64>,
    ) -> (BTreeMap<Nutrient, f64>, f64) {
        let overall = persisted
            .get(OVERALL_CONFIDENCE_KEY)
            .copied()
            .unwrap_or_default();
        let per_nutrient = persisted
            .iter()
            .filter_map(|(key, value)| Nutrient::parse(key).map(|n| (n, *value)))
            .collect();
        (per_nutrient, overall)
    }
}
