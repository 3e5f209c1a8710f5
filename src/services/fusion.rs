// ABOUTME: Nutrition fusion domain service orchestrating one fuse request end to end
// ABOUTME: Validates input, matches, collects, fuses, persists best-effort, and shapes the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition fusion engine
//!
//! Request sequence:
//! 1. validate `ingredient_text` (no I/O before this succeeds)
//! 2. read up to five matching ingredient records
//! 3. read the source registry
//! 4. collect weighted observations and fuse them (pure)
//! 5. upsert the fused profile (failure is logged, not returned)
//! 6. classify and log the cooking method, if one was given (failure is logged, not returned)

use crate::constants::fusion::FUSION_METHOD;
use crate::database::repositories::{
    CookingMethodRepository, FusedProfileRepository, IngredientRepository, SourceRepository,
};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    classify_cooking_method, fuse_observations, AlternativeObservation, CanonicalIngredient,
    FusionOutcome, IngredientMatcher, ObservationCollector, ObservationSet, SourceRegistry,
};
use crate::models::{
    normalize_ingredient_name, FusedNutrientProfile, IngredientRecord, Nutrient, SourceProfile,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Fuse request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FusionRequest {
    /// Free-text ingredient description (required, non-blank)
    #[serde(default)]
    pub ingredient_text: Option<String>,
    /// Caller-supplied measurements from alternate sources
    #[serde(default)]
    pub alt_source_values: Option<Vec<AlternativeObservation>>,
    /// Free-text cooking instruction
    #[serde(default)]
    pub cooking_method: Option<String>,
    /// Replace the stored profile instead of updating it
    #[serde(default)]
    pub override_existing: bool,
}

impl FusionRequest {
    /// Request for `ingredient_text` with no alternatives
    #[must_use]
    pub fn for_ingredient(ingredient_text: impl Into<String>) -> Self {
        Self {
            ingredient_text: Some(ingredient_text.into()),
            ..Self::default()
        }
    }

    /// Add alternative observations
    #[must_use]
    pub fn with_alternatives(mut self, alternatives: Vec<AlternativeObservation>) -> Self {
        self.alt_source_values = Some(alternatives);
        self
    }

    /// Add a cooking instruction
    #[must_use]
    pub fn with_cooking_method(mut self, instruction: impl Into<String>) -> Self {
        self.cooking_method = Some(instruction.into());
        self
    }

    /// The ingredient text, if present and not blank
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when the text is absent or whitespace only
    pub fn validated_ingredient_text(&self) -> AppResult<&str> {
        self.ingredient_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("ingredient_text is required"))
    }
}

/// One fused nutrient in the response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedNutrientEntry {
    /// Nutrient
    pub nutrient: Nutrient,
    /// Fused value in `unit`
    #[serde(rename = "fusedValue")]
    pub fused_value: f64,
    /// Canonical unit symbol
    pub unit: String,
    /// Per-nutrient confidence
    pub confidence: f64,
    /// Contributing source labels
    pub sources: Vec<String>,
}

/// Response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionMetadata {
    /// Canonical cooking method, when an instruction was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_method: Option<String>,
    /// Number of ingredient records that matched
    pub matched_ingredients_count: usize,
}

/// Fuse response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResponse {
    /// Best-matching stored ingredient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_ingredient: Option<CanonicalIngredient>,
    /// Fused nutrients in nutrient order
    pub fused: Vec<FusedNutrientEntry>,
    /// Mean per-nutrient confidence
    pub overall_confidence: f64,
    /// Distinct contributing source labels
    pub source_count: usize,
    /// Request metadata
    pub metadata: FusionMetadata,
}

impl FusionResponse {
    /// Entry for one nutrient, if it was fused
    #[must_use]
    pub fn nutrient(&self, nutrient: Nutrient) -> Option<&FusedNutrientEntry> {
        self.fused.iter().find(|entry| entry.nutrient == nutrient)
    }
}

/// Nutrition fusion engine over injected stores
#[derive(Clone)]
pub struct NutritionFusionEngine {
    ingredients: Arc<dyn IngredientRepository>,
    sources: Arc<dyn SourceRepository>,
    profiles: Arc<dyn FusedProfileRepository>,
    cooking_methods: Arc<dyn CookingMethodRepository>,
    matcher: IngredientMatcher,
}

impl NutritionFusionEngine {
    /// Create an engine from its four stores
    #[must_use]
    pub fn new(
        ingredients: Arc<dyn IngredientRepository>,
        sources: Arc<dyn SourceRepository>,
        profiles: Arc<dyn FusedProfileRepository>,
        cooking_methods: Arc<dyn CookingMethodRepository>,
    ) -> Self {
        Self {
            ingredients,
            sources,
            profiles,
            cooking_methods,
            matcher: IngredientMatcher::new(),
        }
    }

    /// Engine backed by one `SQLite` database
    #[must_use]
    pub fn from_database(database: &Arc<Database>) -> Self {
        Self::new(
            database.clone(),
            database.clone(),
            database.clone(),
            database.clone(),
        )
    }

    /// Engine backed by any store implementing all four repositories
    #[must_use]
    pub fn from_store<S>(store: &Arc<S>) -> Self
    where
        S: IngredientRepository
            + SourceRepository
            + FusedProfileRepository
            + CookingMethodRepository
            + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    /// Fuse nutrition data for one ingredient
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a missing or blank `ingredient_text`,
    /// or a server error when the ingredient or source store cannot be read.
    /// Persistence failures are logged and do not produce an error.
    pub async fn fuse(&self, request: &FusionRequest) -> AppResult<FusionResponse> {
        let ingredient_text = request.validated_ingredient_text()?;
        let query_key = normalize_ingredient_name(ingredient_text);

        let (matches, observations) = self
            .gather_observations(ingredient_text, &query_key, request)
            .await?;
        let outcome = fuse_observations(&observations);

        info!(
            ingredient = %query_key,
            matched = matches.len(),
            observations = observations.len(),
            nutrients = outcome.nutrients.len(),
            overall_confidence = outcome.overall_confidence,
            "Fused nutrition profile"
        );

        let profile = build_profile(ingredient_text, &query_key, &outcome);
        self.persist(&profile, request.override_existing).await;
        let cooking_method = self.cooking_method_label(request).await;

        Ok(FusionResponse {
            canonical_ingredient: IngredientMatcher::canonical(ingredient_text, &matches),
            fused: response_entries(&outcome),
            overall_confidence: outcome.overall_confidence,
            source_count: outcome.source_count(),
            metadata: FusionMetadata {
                cooking_method,
                matched_ingredients_count: matches.len(),
            },
        })
    }

    /// Stored profile for an ingredient description
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when nothing is stored under the normalized name
    pub async fn get_profile(&self, ingredient_text: &str) -> AppResult<FusedNutrientProfile> {
        let key = normalize_ingredient_name(ingredient_text);
        if key.is_empty() {
            return Err(AppError::missing_field("ingredient is required"));
        }

        self.profiles
            .get_profile(&key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Fused profile for '{key}'")))
    }

    /// The source registry in priority order
    ///
    /// # Errors
    ///
    /// Returns an error if the source store cannot be read
    pub async fn list_sources(&self) -> AppResult<Vec<SourceProfile>> {
        Ok(SourceRegistry::new(self.sources.list_sources().await?)
            .profiles()
            .to_vec())
    }

    /// Read matching records and the registry, then weight every observation
    async fn gather_observations(
        &self,
        ingredient_text: &str,
        query_key: &str,
        request: &FusionRequest,
    ) -> AppResult<(Vec<IngredientRecord>, ObservationSet)> {
        let candidates = self
            .ingredients
            .find_candidates(query_key, self.matcher.max_candidates())
            .await
            .map_err(fusion_failure)?;
        let matches = self.matcher.rank(ingredient_text, candidates);

        let sources = self.sources.list_sources().await.map_err(fusion_failure)?;
        let registry = SourceRegistry::new(sources);

        let alternatives = request.alt_source_values.as_deref().unwrap_or_default();
        let observations = ObservationCollector::new(&registry).collect(&matches, alternatives);
        if observations.skipped() > 0 {
            warn!(
                ingredient = %query_key,
                skipped = observations.skipped(),
                "Some observations were dropped before fusion"
            );
        }

        Ok((matches, observations))
    }

    async fn persist(&self, profile: &FusedNutrientProfile, override_existing: bool) {
        if let Err(e) = self.profiles.upsert_profile(profile, override_existing).await {
            error!(
                ingredient = %profile.normalized_name,
                error = %e,
                "Failed to persist fused profile"
            );
        }
    }

    /// Canonical cooking method label for a non-blank instruction
    async fn cooking_method_label(&self, request: &FusionRequest) -> Option<String> {
        let instruction = request.cooking_method.as_deref().map(str::trim)?;
        if instruction.is_empty() {
            return None;
        }
        Some(self.classify(instruction).await)
    }

    async fn classify(&self, instruction: &str) -> String {
        let classification = classify_cooking_method(instruction);
        debug!(
            method = %classification.normalized_method,
            confidence = classification.confidence_score,
            "Classified cooking method"
        );

        if let Err(e) = self
            .cooking_methods
            .record_classification(&classification)
            .await
        {
            warn!(error = %e, "Failed to log cooking method classification");
        }

        classification.normalized_method.as_str().to_owned()
    }
}

/// Wrap a store failure into the generic fusion failure
fn fusion_failure(e: AppError) -> AppError {
    AppError::new(e.code, "Failed to fuse nutrition data").with_details(Value::String(e.message))
}

/// Assemble the persisted profile from a fusion outcome
fn build_profile(
    ingredient_text: &str,
    normalized_name: &str,
    outcome: &FusionOutcome,
) -> FusedNutrientProfile {
    let now = Utc::now();
    let mut nutrients = BTreeMap::new();
    let mut confidence = BTreeMap::new();
    let mut sources = BTreeMap::new();
    for (nutrient, fused) in &outcome.nutrients {
        nutrients.insert(*nutrient, fused.value);
        confidence.insert(*nutrient, fused.confidence);
        sources.insert(*nutrient, fused.sources.clone());
    }

    FusedNutrientProfile {
        id: Uuid::new_v4(),
        ingredient_text: ingredient_text.to_owned(),
        normalized_name: normalized_name.to_owned(),
        nutrients,
        confidence,
        overall_confidence: outcome.overall_confidence,
        sources,
        fusion_method: FUSION_METHOD.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

fn response_entries(outcome: &FusionOutcome) -> Vec<FusedNutrientEntry> {
    outcome
        .nutrients
        .values()
        .map(|fused| FusedNutrientEntry {
            nutrient: fused.nutrient,
            fused_value: fused.value,
            unit: fused.nutrient.canonical_unit().symbol().to_owned(),
            confidence: fused.confidence,
            sources: fused.sources.iter().cloned().collect(),
        })
        .collect()
}
