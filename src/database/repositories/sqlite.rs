// ABOUTME: SQLite repository implementations delegating to the per-table managers
// ABOUTME: Lets the fusion engine hold a Database behind the repository traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    CookingMethodRepository, FusedProfileRepository, IngredientRepository, SourceRepository,
};
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{
    CookingMethodClassification, FusedNutrientProfile, IngredientRecord, SourceProfile,
};
use async_trait::async_trait;

#[async_trait]
impl IngredientRepository for Database {
    async fn find_candidates(
        &self,
        query_key: &str,
        limit: usize,
    ) -> AppResult<Vec<IngredientRecord>> {
        self.ingredients().find_candidates(query_key, limit).await
    }
}

#[async_trait]
impl SourceRepository for Database {
    async fn list_sources(&self) -> AppResult<Vec<SourceProfile>> {
        self.sources().list_sources().await
    }
}

#[async_trait]
impl FusedProfileRepository for Database {
    async fn upsert_profile(
        &self,
        profile: &FusedNutrientProfile,
        override_existing: bool,
    ) -> AppResult<()> {
        self.profiles()
            .upsert_profile(profile, override_existing)
            .await
    }

    async fn get_profile(&self, normalized_name: &str) -> AppResult<Option<FusedNutrientProfile>> {
        self.profiles().get_profile(normalized_name).await
    }
}

#[async_trait]
impl CookingMethodRepository for Database {
    async fn record_classification(
        &self,
        classification: &CookingMethodClassification,
    ) -> AppResult<()> {
        self.cooking_methods()
            .record_classification(classification)
            .await
    }
}
