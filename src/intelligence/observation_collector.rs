// ABOUTME: Builds weighted per-nutrient observations from matched records and caller alternatives
// ABOUTME: Resolves nutrient names and units, derives weights, and drops unusable observations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Observation Collector
//!
//! Weight rules:
//! - database record: `source.confidence_factor x record.confidence_score`
//! - caller alternative: the supplied `confidence_score`, or 0.5 when omitted
//!
//! Observations are dropped (never defaulted) when the record's source is not in
//! the registry, the weight is not positive, the nutrient name is unknown, the
//! value is negative or not finite, or the unit cannot be converted to the
//! nutrient's canonical unit.

use super::source_registry::SourceRegistry;
use nutrifuse_core::constants::fusion::DEFAULT_ALTERNATIVE_WEIGHT;
use nutrifuse_core::constants::source_labels::ALTERNATIVE_SOURCE;
use nutrifuse_core::models::{IngredientRecord, Nutrient, NutrientUnit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One weighted measurement of one nutrient
///
/// Value and weight are paired at construction, so every value has exactly one weight.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientObservation {
    /// Nutrient measured
    pub nutrient: Nutrient,
    /// Value in the nutrient's canonical unit
    pub value: f64,
    /// Weight in (0, 1]
    pub weight: f64,
    /// Label of the contributing source
    pub source_label: String,
}

impl NutrientObservation {
    /// Create an observation, or `None` when the value or weight is unusable
    ///
    /// Weights above 1 are clamped to 1; non-positive or non-finite weights and
    /// negative or non-finite values are rejected.
    #[must_use]
    pub fn new(
        nutrient: Nutrient,
        value: f64,
        weight: f64,
        source_label: impl Into<String>,
    ) -> Option<Self> {
        if !value.is_finite() || value < 0.0 || !weight.is_finite() || weight <= 0.0 {
            return None;
        }

        Some(Self {
            nutrient,
            value,
            weight: weight.min(1.0),
            source_label: source_label.into(),
        })
    }
}

/// A caller-supplied nutrient measurement from an alternate source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeObservation {
    /// Nutrient name (aliases accepted)
    pub nutrient: String,
    /// Measured value
    pub value: f64,
    /// Unit of `value`; the nutrient's canonical unit when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Caller confidence in the measurement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

/// Observations grouped by nutrient
#[derive(Debug, Clone, Default)]
pub struct ObservationSet {
    by_nutrient: BTreeMap<Nutrient, Vec<NutrientObservation>>,
    skipped: usize,
}

impl ObservationSet {
    /// Add an observation to its nutrient's list
    pub fn push(&mut self, observation: NutrientObservation) {
        self.by_nutrient
            .entry(observation.nutrient)
            .or_default()
            .push(observation);
    }

    fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Observations for one nutrient (empty when never observed)
    #[must_use]
    pub fn for_nutrient(&self, nutrient: Nutrient) -> &[NutrientObservation] {
        self.by_nutrient
            .get(&nutrient)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate nutrients that have at least one observation, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &[NutrientObservation])> + '_ {
        self.by_nutrient
            .iter()
            .map(|(nutrient, observations)| (*nutrient, observations.as_slice()))
    }

    /// Total observations collected
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_nutrient.values().map(Vec::len).sum()
    }

    /// Whether no observation was collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_nutrient.is_empty()
    }

    /// Number of inputs that were dropped during collection
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Turns matched records and alternatives into weighted observations
#[derive(Debug, Clone, Copy)]
pub struct ObservationCollector<'a> {
    registry: &'a SourceRegistry,
}

impl<'a> ObservationCollector<'a> {
    /// Create a collector resolving record sources through `registry`
    #[must_use]
    pub const fn new(registry: &'a SourceRegistry) -> Self {
        Self { registry }
    }

    /// Collect observations from database matches and caller alternatives
    #[must_use]
    pub fn collect(
        &self,
        matches: &[IngredientRecord],
        alternatives: &[AlternativeObservation],
    ) -> ObservationSet {
        let mut set = ObservationSet::default();

        for record in matches {
            self.collect_record(record, &mut set);
        }
        for alternative in alternatives {
            collect_alternative(alternative, &mut set);
        }

        set
    }

    fn collect_record(self, record: &IngredientRecord, set: &mut ObservationSet) {
        let Some(source) = self.registry.get(&record.source_id) else {
            debug!(
                record_id = %record.id,
                source_id = %record.source_id,
                "Skipping record from unregistered source"
            );
            set.skip();
            return;
        };

        let weight = source.confidence_factor * record.confidence_score;
        for (name, value) in &record.nutrients {
            let Some(nutrient) = Nutrient::parse(name) else {
                warn!(record_id = %record.id, nutrient = %name, "Ignoring unrecognized nutrient");
                set.skip();
                continue;
            };

            if let Some(observation) =
                NutrientObservation::new(nutrient, *value, weight, source.display_name.as_str())
            {
                set.push(observation);
            } else {
                debug!(
                    record_id = %record.id,
                    nutrient = %nutrient,
                    value,
                    weight,
                    "Dropping record observation with unusable value or weight"
                );
                set.skip();
            }
        }
    }
}

fn collect_alternative(alternative: &AlternativeObservation, set: &mut ObservationSet) {
    let Some(nutrient) = Nutrient::parse(&alternative.nutrient) else {
        warn!(nutrient = %alternative.nutrient, "Ignoring unrecognized alternative nutrient");
        set.skip();
        return;
    };

    let Some(value) = to_canonical_unit(nutrient, alternative.value, alternative.unit.as_deref())
    else {
        warn!(
            nutrient = %nutrient,
            unit = ?alternative.unit,
            "Ignoring alternative observation with incompatible unit"
        );
        set.skip();
        return;
    };

    let weight = alternative
        .confidence_score
        .unwrap_or(DEFAULT_ALTERNATIVE_WEIGHT);

    if let Some(observation) =
        NutrientObservation::new(nutrient, value, weight, ALTERNATIVE_SOURCE)
    {
        set.push(observation);
    } else {
        debug!(nutrient = %nutrient, value, weight, "Dropping unusable alternative observation");
        set.skip();
    }
}

/// Convert a value into the nutrient's canonical unit
fn to_canonical_unit(nutrient: Nutrient, value: f64, unit: Option<&str>) -> Option<f64> {
    let canonical = nutrient.canonical_unit();
    match unit.map(str::trim).filter(|u| !u.is_empty()) {
        None => Some(value),
        Some(symbol) => NutrientUnit::parse(symbol)?.convert(value, canonical),
    }
}
