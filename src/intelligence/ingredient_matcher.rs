// ABOUTME: Free-text ingredient matching against stored canonical ingredient records
// ABOUTME: Bidirectional case-insensitive containment, ranked by per-record confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ingredient Matcher
//!
//! A record matches a query when its raw text or normalized name contains the
//! query, or is contained by it, ignoring case. Raw text is only ASCII
//! lowercased, matching `lower()` in the `SQLite` store, so whitespace runs and
//! non-ASCII capitals in raw text must be carried by `normalized_name` instead. `"chicken breast, raw"` therefore
//! matches a stored `"chicken breast"` and `"chicken"` matches a stored
//! `"chicken thigh"`.
//!
//! Candidates are ordered by descending `confidence_score` with the normalized
//! name as a stable tie-break, then truncated to [`MAX_MATCH_CANDIDATES`].

use nutrifuse_core::constants::matching::MAX_MATCH_CANDIDATES;
use nutrifuse_core::models::{normalize_ingredient_name, IngredientRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Best-matching stored ingredient reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalIngredient {
    /// Record ID
    pub id: Uuid,
    /// Ingredient name as stored
    pub name: String,
    /// Textual closeness of the query to the record, in (0, 1]
    pub similarity_score: f64,
}

/// Ranks stored ingredient records against a free-text description
#[derive(Debug, Clone, Copy)]
pub struct IngredientMatcher {
    max_candidates: usize,
}

impl Default for IngredientMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientMatcher {
    /// Matcher returning at most [`MAX_MATCH_CANDIDATES`] records
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_candidates: MAX_MATCH_CANDIDATES,
        }
    }

    /// Maximum candidates returned by [`Self::rank`]
    #[must_use]
    pub const fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Whether `record` matches the (already normalized) query key
    #[must_use]
    pub fn matches(query_key: &str, record: &IngredientRecord) -> bool {
        if query_key.is_empty() {
            return false;
        }

        let raw_key = raw_text_key(&record.raw_ingredient_text);
        contains_either_way(&record.normalized_name, query_key)
            || contains_either_way(&raw_key, query_key)
    }

    /// Filter and order `records` for `query`, most relevant first
    #[must_use]
    pub fn rank<I>(&self, query: &str, records: I) -> Vec<IngredientRecord>
    where
        I: IntoIterator<Item = IngredientRecord>,
    {
        let query_key = normalize_ingredient_name(query);
        let mut candidates: Vec<IngredientRecord> = records
            .into_iter()
            .filter(|record| Self::matches(&query_key, record))
            .collect();

        order_candidates(&mut candidates);
        candidates.truncate(self.max_candidates);
        candidates
    }

    /// Describe the top candidate as the canonical ingredient, if any
    #[must_use]
    pub fn canonical(query: &str, candidates: &[IngredientRecord]) -> Option<CanonicalIngredient> {
        let best = candidates.first()?;
        let query_key = normalize_ingredient_name(query);
        let raw_key = normalize_ingredient_name(&best.raw_ingredient_text);

        let similarity_score = similarity_score(&query_key, &best.normalized_name)
            .max(similarity_score(&query_key, &raw_key));

        Some(CanonicalIngredient {
            id: best.id,
            name: best.raw_ingredient_text.clone(),
            similarity_score,
        })
    }
}

/// Whether a non-blank `key` contains `query` or is contained by it
fn contains_either_way(key: &str, query: &str) -> bool {
    !key.trim_matches(' ').is_empty() && (key.contains(query) || query.contains(key))
}

/// Raw text as the `SQLite` store compares it: ASCII lowercase, whitespace kept
fn raw_text_key(raw: &str) -> String {
    raw.to_ascii_lowercase()
}

/// Sort candidates by descending confidence, then by normalized name
pub fn order_candidates(candidates: &mut [IngredientRecord]) {
    candidates.sort_by(|a, b| {
        b.confidence_score
            .partial_cmp(&a.confidence_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.normalized_name.cmp(&b.normalized_name))
    });
}

/// Containment similarity between two normalized names
///
/// Formula: `len(shorter) / len(longer)` in characters when one contains the
/// other, otherwise 0.
#[must_use]
pub fn similarity_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    if !longer.contains(shorter) {
        return 0.0;
    }

    shorter.chars().count() as f64 / longer.chars().count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(text: &str, confidence: f64) -> IngredientRecord {
        IngredientRecord::new(text, "usda", BTreeMap::new(), confidence)
    }

    #[test]
    fn test_matches_in_both_directions() {
        let stored = record("Chicken Breast", 0.9);
        assert!(IngredientMatcher::matches("chicken breast, raw", &stored));
        assert!(IngredientMatcher::matches("chicken", &stored));
        assert!(!IngredientMatcher::matches("salmon", &stored));
    }

    #[test]
    fn test_raw_text_is_not_whitespace_collapsed() {
        let mut stored = record("Chicken  Breast", 0.9);
        stored.normalized_name = "imported poultry".to_owned();
        assert!(!IngredientMatcher::matches("chicken breast", &stored));

        stored.raw_ingredient_text = "CHICKEN BREAST FILLET".to_owned();
        assert!(IngredientMatcher::matches("chicken breast", &stored));
    }

    #[test]
    fn test_rank_orders_by_confidence_and_truncates() {
        let records = (0..8).map(|i| record(&format!("apple variety {i}"), f64::from(i) / 10.0));
        let ranked = IngredientMatcher::new().rank("apple", records);

        assert_eq!(ranked.len(), MAX_MATCH_CANDIDATES);
        assert!((ranked[0].confidence_score - 0.7).abs() < 1e-9);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].confidence_score >= pair[1].confidence_score));
    }

    #[test]
    fn test_rank_without_match_is_empty() {
        let ranked = IngredientMatcher::new().rank("quinoa", vec![record("apple", 0.9)]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_similarity_score() {
        assert!((similarity_score("apple", "apple") - 1.0).abs() < f64::EPSILON);
        assert!((similarity_score("apple", "apple pie") - 5.0 / 9.0).abs() < 1e-9);
        assert!(similarity_score("apple", "pear").abs() < f64::EPSILON);
    }

    #[test]
    fn test_canonical_uses_top_candidate() {
        let candidates = vec![record("Chicken Breast", 0.9), record("chicken", 0.5)];
        let canonical = IngredientMatcher::canonical("chicken breast, raw", &candidates).unwrap();

        assert_eq!(canonical.id, candidates[0].id);
        assert_eq!(canonical.name, "Chicken Breast");
        assert!(canonical.similarity_score > 0.0 && canonical.similarity_score <= 1.0);
    }
}
