// ABOUTME: Repository traits the fusion engine depends on for reads and writes
// ABOUTME: SQLite implementations on Database plus an in-memory store for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repository seams
//!
//! The engine holds these traits as `Arc<dyn ...>` so it can run against `SQLite`
//! in production and against [`memory::InMemoryStore`] in tests.

/// In-memory store implementing every repository
pub mod memory;
/// `SQLite` implementations backed by [`crate::database::Database`]
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::{
    CookingMethodClassification, FusedNutrientProfile, IngredientRecord, SourceProfile,
};
use async_trait::async_trait;

/// Read access to stored ingredient records
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Records matching a normalized query key, most confident first, at most `limit`
    async fn find_candidates(
        &self,
        query_key: &str,
        limit: usize,
    ) -> AppResult<Vec<IngredientRecord>>;
}

/// Read access to the source registry
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// All sources ordered by priority
    async fn list_sources(&self) -> AppResult<Vec<SourceProfile>>;
}

/// Fused profile storage keyed by normalized ingredient name
#[async_trait]
pub trait FusedProfileRepository: Send + Sync {
    /// Insert or update (or, with `override_existing`, replace) a profile
    async fn upsert_profile(
        &self,
        profile: &FusedNutrientProfile,
        override_existing: bool,
    ) -> AppResult<()>;

    /// Profile stored under `normalized_name`
    async fn get_profile(&self, normalized_name: &str) -> AppResult<Option<FusedNutrientProfile>>;
}

/// Append-only cooking method classification log
#[async_trait]
pub trait CookingMethodRepository: Send + Sync {
    /// Append one classification
    async fn record_classification(
        &self,
        classification: &CookingMethodClassification,
    ) -> AppResult<()>;
}
