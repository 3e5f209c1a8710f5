// ABOUTME: In-memory implementation of every repository trait
// ABOUTME: Mirrors SQLite upsert semantics and supports injected write failures for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    CookingMethodRepository, FusedProfileRepository, IngredientRepository, SourceRepository,
};
use crate::errors::{AppError, AppResult};
use crate::intelligence::IngredientMatcher;
use crate::models::{
    CookingMethodClassification, FusedNutrientProfile, IngredientRecord, SourceProfile,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Process-local store for tests and benchmarks
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<IngredientRecord>>,
    sources: RwLock<Vec<SourceProfile>>,
    profiles: RwLock<HashMap<String, FusedNutrientProfile>>,
    classifications: RwLock<Vec<CookingMethodClassification>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    write_attempts: AtomicUsize,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with sources and ingredient records
    #[must_use]
    pub fn with_data(sources: Vec<SourceProfile>, records: Vec<IngredientRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            sources: RwLock::new(sources),
            ..Self::default()
        }
    }

    /// Add an ingredient record
    pub async fn insert_record(&self, record: IngredientRecord) {
        self.records.write().await.push(record);
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of write calls received, including failed ones
    #[must_use]
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// Number of stored profiles
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Snapshot of the classification log
    pub async fn classifications(&self) -> Vec<CookingMethodClassification> {
        self.classifications.read().await.clone()
    }

    fn check_read(&self) -> AppResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::database("In-memory store is unavailable"));
        }
        Ok(())
    }

    fn check_write(&self) -> AppResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database("In-memory store rejected the write"));
        }
        Ok(())
    }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
    async fn find_candidates(
        &self,
        query_key: &str,
        limit: usize,
    ) -> AppResult<Vec<IngredientRecord>> {
        self.check_read()?;
        let records = self.records.read().await.clone();
        let mut ranked = IngredientMatcher::new().rank(query_key, records);
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[async_trait]
impl SourceRepository for InMemoryStore {
    async fn list_sources(&self) -> AppResult<Vec<SourceProfile>> {
        self.check_read()?;
        let mut sources = self.sources.read().await.clone();
        sources.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.source_id.cmp(&b.source_id))
        });
        Ok(sources)
    }
}

#[async_trait]
impl FusedProfileRepository for InMemoryStore {
    async fn upsert_profile(
        &self,
        profile: &FusedNutrientProfile,
        override_existing: bool,
    ) -> AppResult<()> {
        self.check_write()?;
        let mut profiles = self.profiles.write().await;

        let mut stored = profile.clone();
        if !override_existing {
            if let Some(existing) = profiles.get(&profile.normalized_name) {
                stored.id = existing.id;
                stored.created_at = existing.created_at;
            }
        }
        profiles.insert(stored.normalized_name.clone(), stored);
        Ok(())
    }

    async fn get_profile(&self, normalized_name: &str) -> AppResult<Option<FusedNutrientProfile>> {
        self.check_read()?;
        Ok(self.profiles.read().await.get(normalized_name).cloned())
    }
}

#[async_trait]
impl CookingMethodRepository for InMemoryStore {
    async fn record_classification(
        &self,
        classification: &CookingMethodClassification,
    ) -> AppResult<()> {
        self.check_write()?;
        self.classifications
            .write()
            .await
            .push(classification.clone());
        Ok(())
    }
}
