// ABOUTME: Core data models for nutrient sources, ingredient records, and fused profiles
// ABOUTME: Re-exports every model so consumers import from nutrifuse_core::models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod cooking;
mod ingredient;
mod nutrient;
mod profile;
mod source;

pub use cooking::{CookingMethod, CookingMethodClassification};
pub use ingredient::{normalize_ingredient_name, IngredientRecord};
pub use nutrient::{Nutrient, NutrientUnit};
pub use profile::FusedNutrientProfile;
pub use source::SourceProfile;
