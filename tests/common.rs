// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, database, source, and ingredient record helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `nutrifuse_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use nutrifuse_server::{
    database::{repositories::memory::InMemoryStore, Database},
    intelligence::AlternativeObservation,
    models::{IngredientRecord, SourceProfile},
    services::NutritionFusionEngine,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// The two sources used by the reference fusion scenario
pub fn scenario_sources() -> Vec<SourceProfile> {
    vec![
        SourceProfile::new("source_a", "Source A", 0.9, 1).unwrap(),
        SourceProfile::new("source_b", "Source B", 0.7, 2).unwrap(),
    ]
}

/// Ingredient record with the given nutrients
pub fn record(
    text: &str,
    source_id: &str,
    confidence: f64,
    nutrients: &[(&str, f64)],
) -> IngredientRecord {
    let map: BTreeMap<String, f64> = nutrients
        .iter()
        .map(|(name, value)| ((*name).to_owned(), *value))
        .collect();
    IngredientRecord::new(text, source_id, map, confidence)
}

/// The two chicken breast records of the reference fusion scenario
pub fn chicken_breast_records() -> Vec<IngredientRecord> {
    vec![
        record("chicken breast", "source_a", 0.9, &[("protein", 31.0)]),
        record("chicken breast", "source_b", 0.8, &[("protein", 29.0)]),
    ]
}

/// Caller-supplied measurement
pub fn alternative(nutrient: &str, value: f64, confidence: Option<f64>) -> AlternativeObservation {
    AlternativeObservation {
        nutrient: nutrient.to_owned(),
        value,
        unit: None,
        confidence_score: confidence,
    }
}

/// In-memory store and an engine over it
pub fn create_memory_engine(
    sources: Vec<SourceProfile>,
    records: Vec<IngredientRecord>,
) -> (Arc<InMemoryStore>, NutritionFusionEngine) {
    init_test_logging();
    let store = Arc::new(InMemoryStore::with_data(sources, records));
    let engine = NutritionFusionEngine::from_store(&store);
    (store, engine)
}
