// ABOUTME: Pure nutrition fusion algorithms with no I/O
// ABOUTME: Matching, source weighting, observation collection, fusion, and cooking classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition intelligence
//!
//! Every function in this module is a deterministic function of its inputs, so
//! the fusion pipeline can be tested without a database.

/// Free-text cooking instruction classification
pub mod cooking_method;
/// Ingredient text matching and candidate ranking
pub mod ingredient_matcher;
/// Weighted-mean fusion and confidence synthesis
pub mod nutrition_fusion;
/// Weighted observation collection
pub mod observation_collector;
/// Per-request source registry snapshot
pub mod source_registry;

pub use cooking_method::{classify_cooking_method, normalize_cooking_method, COOKING_METHOD_RULES};
pub use ingredient_matcher::{CanonicalIngredient, IngredientMatcher};
pub use nutrition_fusion::{
    fuse_nutrient, fuse_observations, synthesize_confidence, FusedNutrient, FusionOutcome,
};
pub use observation_collector::{
    AlternativeObservation, NutrientObservation, ObservationCollector, ObservationSet,
};
pub use source_registry::SourceRegistry;
