// ABOUTME: Weighted-mean nutrient fusion with corroboration-boosted, capped confidence
// ABOUTME: Reconciles conflicting per-source measurements into one estimate per nutrient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Fusion Algorithm
//!
//! Each nutrient is fused independently from its weighted observations.
//!
//! # Formulas
//!
//! - Fused value: `sum(v_i * w_i) / sum(w_i)` (precision-weighted pooling, the
//!   "Bayesian" weighting intent rather than a likelihood model)
//! - Confidence: `min(0.95, mean(W) + min(0.20, 0.05 * n))`
//! - Overall confidence: mean of the per-nutrient confidences, 0 when nothing fused
//!
//! A nutrient with no observations is absent from the outcome; it is never
//! reported as zero. Two conflicting sources pull the fused value toward the
//! higher-weight source rather than toward their midpoint.

use super::observation_collector::{NutrientObservation, ObservationSet};
use nutrifuse_core::constants::fusion::{MAX_CONFIDENCE, MAX_SOURCE_BOOST, PER_SOURCE_BOOST};
use nutrifuse_core::models::Nutrient;
use std::collections::{BTreeMap, BTreeSet};

/// Fusion result for one nutrient
#[derive(Debug, Clone, PartialEq)]
pub struct FusedNutrient {
    /// Nutrient fused
    pub nutrient: Nutrient,
    /// Weighted-mean value in the nutrient's canonical unit
    pub value: f64,
    /// Synthesized confidence, at most 0.95
    pub confidence: f64,
    /// Distinct labels of the contributing sources
    pub sources: BTreeSet<String>,
    /// Number of observations pooled
    pub observation_count: usize,
}

/// Fusion result for a whole observation set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FusionOutcome {
    /// Fused nutrients in canonical nutrient order
    pub nutrients: BTreeMap<Nutrient, FusedNutrient>,
    /// Mean per-nutrient confidence
    pub overall_confidence: f64,
}

impl FusionOutcome {
    /// Distinct source labels across all fused nutrients
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.nutrients
            .values()
            .flat_map(|fused| fused.sources.iter())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Synthesize a confidence from the observation weights
///
/// Formula: `min(0.95, mean(W) + min(0.20, 0.05 * n))`
///
/// Returns `None` for an empty weight list.
#[must_use]
pub fn synthesize_confidence(weights: &[f64]) -> Option<f64> {
    if weights.is_empty() {
        return None;
    }

    let n = weights.len() as f64;
    let mean_weight = weights.iter().sum::<f64>() / n;
    let boost = (PER_SOURCE_BOOST * n).min(MAX_SOURCE_BOOST);

    Some((mean_weight + boost).min(MAX_CONFIDENCE))
}

/// Weighted arithmetic mean of the observations
///
/// The result is clamped into `[min(V), max(V)]`, so a single observation (or
/// identical values) yields its value exactly despite floating point rounding.
#[must_use]
pub fn weighted_mean(observations: &[NutrientObservation]) -> Option<f64> {
    let total_weight: f64 = observations.iter().map(|o| o.weight).sum();
    if observations.is_empty() || total_weight <= 0.0 {
        return None;
    }

    let weighted_sum: f64 = observations.iter().map(|o| o.value * o.weight).sum();
    let (min, max) = observations
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| {
            (lo.min(o.value), hi.max(o.value))
        });

    Some((weighted_sum / total_weight).clamp(min, max))
}

/// Fuse all observations of one nutrient
#[must_use]
pub fn fuse_nutrient(
    nutrient: Nutrient,
    observations: &[NutrientObservation],
) -> Option<FusedNutrient> {
    let value = weighted_mean(observations)?;
    let weights: Vec<f64> = observations.iter().map(|o| o.weight).collect();
    let confidence = synthesize_confidence(&weights)?;

    Some(FusedNutrient {
        nutrient,
        value,
        confidence,
        sources: observations
            .iter()
            .map(|o| o.source_label.clone())
            .collect(),
        observation_count: observations.len(),
    })
}

/// Fuse every nutrient present in the observation set
#[must_use]
pub fn fuse_observations(set: &ObservationSet) -> FusionOutcome {
    let nutrients: BTreeMap<Nutrient, FusedNutrient> = set
        .iter()
        .filter_map(|(nutrient, observations)| {
            fuse_nutrient(nutrient, observations).map(|fused| (nutrient, fused))
        })
        .collect();

    let overall_confidence = if nutrients.is_empty() {
        0.0
    } else {
        nutrients.values().map(|f| f.confidence).sum::<f64>() / nutrients.len() as f64
    };

    FusionOutcome {
        nutrients,
        overall_confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(value: f64, weight: f64, label: &str) -> NutrientObservation {
        NutrientObservation::new(Nutrient::Protein, value, weight, label).unwrap()
    }

    #[test]
    fn test_two_source_protein_fusion() {
        let fused = fuse_nutrient(
            Nutrient::Protein,
            &[obs(31.0, 0.9 * 0.9, "Source A"), obs(29.0, 0.7 * 0.8, "Source B")],
        )
        .unwrap();

        let expected = 31.0f64.mul_add(0.81, 29.0 * 0.56) / (0.81 + 0.56);
        assert!((fused.value - expected).abs() < 1e-9);
        assert!((fused.value - 30.2).abs() < 0.05);
        assert!((fused.confidence - 0.785).abs() < 1e-9);
        assert_eq!(fused.sources.len(), 2);
    }

    #[test]
    fn test_single_observation_is_exact() {
        let fused = fuse_nutrient(Nutrient::Protein, &[obs(165.0, 0.6, "alt")]).unwrap();
        assert!((fused.value - 165.0).abs() < f64::EPSILON);
        assert!((fused.confidence - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_pulls_toward_heavier_source() {
        let fused = fuse_nutrient(
            Nutrient::Protein,
            &[obs(10.0, 0.9, "trusted"), obs(30.0, 0.1, "doubtful")],
        )
        .unwrap();

        // Plain averaging would give 20
        assert!((fused.value - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_cap_and_boost_cap() {
        let many: Vec<f64> = vec![0.9; 10];
        assert!((synthesize_confidence(&many).unwrap() - MAX_CONFIDENCE).abs() < f64::EPSILON);

        let low: Vec<f64> = vec![0.2; 10];
        // Boost saturates at 0.20 regardless of n
        assert!((synthesize_confidence(&low).unwrap() - 0.4).abs() < 1e-9);

        assert!(synthesize_confidence(&[]).is_none());
    }

    #[test]
    fn test_overall_confidence_is_mean_and_zero_when_empty() {
        let mut set = ObservationSet::default();
        assert!(fuse_observations(&set).overall_confidence.abs() < f64::EPSILON);

        set.push(NutrientObservation::new(Nutrient::Protein, 31.0, 0.8, "A").unwrap());
        set.push(NutrientObservation::new(Nutrient::Fat, 3.5, 0.4, "B").unwrap());
        let outcome = fuse_observations(&set);

        // (0.85 + 0.45) / 2
        assert!((outcome.overall_confidence - 0.65).abs() < 1e-9);
        assert_eq!(outcome.source_count(), 2);
    }

    #[test]
    fn test_fused_value_stays_within_observed_range() {
        let cases: [&[(f64, f64)]; 4] = [
            &[(1.0, 0.1), (100.0, 1.0)],
            &[(0.1, 0.33), (0.2, 0.33), (0.3, 0.33)],
            &[(5.5, 0.01), (5.5, 0.99)],
            &[(1e6, 0.5), (1e-6, 0.5), (42.0, 0.7)],
        ];

        for case in cases {
            let observations: Vec<_> = case.iter().map(|(v, w)| obs(*v, *w, "s")).collect();
            let value = weighted_mean(&observations).unwrap();
            let min = case.iter().map(|(v, _)| *v).fold(f64::INFINITY, f64::min);
            let max = case.iter().map(|(v, _)| *v).fold(f64::NEG_INFINITY, f64::max);
            assert!(value >= min && value <= max, "{value} outside [{min}, {max}]");
        }
    }

    #[test]
    fn test_corroborating_observation_never_lowers_confidence() {
        let mut weights = vec![0.6];
        let mut previous = synthesize_confidence(&weights).unwrap();

        for _ in 0..8 {
            let mean = weights.iter().sum::<f64>() / weights.len() as f64;
            weights.push(mean);
            let current = synthesize_confidence(&weights).unwrap();
            assert!(current >= previous);
            previous = current;
        }
    }
}
