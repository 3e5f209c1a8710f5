// ABOUTME: Integration tests for the SQLite stores behind the fusion engine
// ABOUTME: Covers candidate lookup, profile upsert and override, classification log, and file databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `SQLite` Store Tests
//!
//! Tests the database managers and the engine running against them:
//! - ingredient candidates: containment, ordering, limit
//! - fused profiles: upsert identity, override, round trip
//! - cooking method classification log

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{chicken_breast_records, create_test_database, record, scenario_sources};
use nutrifuse_server::database::repositories::memory::InMemoryStore;
use nutrifuse_server::database::repositories::IngredientRepository;
use nutrifuse_server::database::Database;
use nutrifuse_server::intelligence::classify_cooking_method;
use nutrifuse_server::models::{CookingMethod, IngredientRecord, Nutrient};
use nutrifuse_server::services::{FusionRequest, NutritionFusionEngine};
use std::sync::Arc;

async fn seeded_database() -> Arc<Database> {
    let database = create_test_database().await.unwrap();
    for source in scenario_sources() {
        database.sources().upsert_source(&source).await.unwrap();
    }
    for record in chicken_breast_records() {
        database.ingredients().insert_record(&record).await.unwrap();
    }
    database
}

// ============================================================================
// Ingredient candidates
// ============================================================================

#[tokio::test]
async fn test_candidates_match_in_both_directions() {
    let database = create_test_database().await.unwrap();
    let ingredients = database.ingredients();
    ingredients
        .insert_record(&record("Chicken Breast", "usda_fdc", 0.9, &[("protein", 31.0)]))
        .await
        .unwrap();
    ingredients
        .insert_record(&record("chicken thigh", "usda_fdc", 0.8, &[("protein", 24.0)]))
        .await
        .unwrap();
    ingredients
        .insert_record(&record("salmon", "usda_fdc", 0.9, &[("protein", 20.0)]))
        .await
        .unwrap();

    let longer_query = ingredients
        .find_candidates("chicken breast, raw", 5)
        .await
        .unwrap();
    assert_eq!(longer_query.len(), 1);
    assert_eq!(longer_query[0].raw_ingredient_text, "Chicken Breast");

    let shorter_query = ingredients.find_candidates("chicken", 5).await.unwrap();
    let names: Vec<_> = shorter_query
        .iter()
        .map(|r| r.normalized_name.as_str())
        .collect();
    assert_eq!(names, vec!["chicken breast", "chicken thigh"]);

    assert!(ingredients.find_candidates("", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_candidates_are_limited_and_ordered_by_confidence() {
    let database = create_test_database().await.unwrap();
    for i in 0..8 {
        let text = format!("apple variety {i}");
        database
            .ingredients()
            .insert_record(&record(&text, "usda_fdc", f64::from(i) / 10.0, &[("calories", 52.0)]))
            .await
            .unwrap();
    }

    let candidates = database.find_candidates("apple", 5).await.unwrap();
    assert_eq!(candidates.len(), 5);
    assert!((candidates[0].confidence_score - 0.7).abs() < 1e-9);
    assert!(candidates
        .windows(2)
        .all(|pair| pair[0].confidence_score >= pair[1].confidence_score));
    assert_eq!(database.ingredients().count_records().await.unwrap(), 8);
}

// ============================================================================
// Fused profiles
// ============================================================================

#[tokio::test]
async fn test_engine_fuses_and_persists_against_sqlite() {
    let database = seeded_database().await;
    let engine = NutritionFusionEngine::from_database(&database);

    let response = engine
        .fuse(&FusionRequest::for_ingredient("chicken breast, raw"))
        .await
        .unwrap();
    let protein = response.nutrient(Nutrient::Protein).unwrap();
    assert!((protein.fused_value - 30.2).abs() < 0.05);
    assert!((protein.confidence - 0.785).abs() < 1e-9);

    let stored = database
        .profiles()
        .get_profile("chicken breast, raw")
        .await
        .unwrap()
        .unwrap();
    assert!((stored.nutrients[&Nutrient::Protein] - protein.fused_value).abs() < 1e-9);
    assert!((stored.confidence[&Nutrient::Protein] - protein.confidence).abs() < 1e-9);
    assert!((stored.overall_confidence - response.overall_confidence).abs() < 1e-9);
    assert_eq!(stored.sources[&Nutrient::Protein].len(), 2);
    assert_eq!(stored.fusion_method, "bayesian_weighted_mean");
}

#[tokio::test]
async fn test_upsert_keeps_id_and_override_replaces_row() {
    let database = seeded_database().await;
    let engine = NutritionFusionEngine::from_database(&database);
    let profiles = database.profiles();

    engine
        .fuse(&FusionRequest::for_ingredient("chicken breast"))
        .await
        .unwrap();
    let original = profiles.get_profile("chicken breast").await.unwrap().unwrap();

    let request = FusionRequest::for_ingredient("Chicken Breast")
        .with_alternatives(vec![common::alternative("fat", 3.6, Some(0.9))]);
    engine.fuse(&request).await.unwrap();
    let updated = profiles.get_profile("chicken breast").await.unwrap().unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.ingredient_text, "Chicken Breast");
    assert!(updated.nutrients.contains_key(&Nutrient::Fat));

    let mut replace = FusionRequest::for_ingredient("chicken breast");
    replace.override_existing = true;
    engine.fuse(&replace).await.unwrap();
    let replaced = profiles.get_profile("chicken breast").await.unwrap().unwrap();
    assert_ne!(replaced.id, original.id);
    assert!(!replaced.nutrients.contains_key(&Nutrient::Fat));
}

#[tokio::test]
async fn test_missing_profile_reads_as_none() {
    let database = create_test_database().await.unwrap();
    assert!(database.profiles().get_profile("kale").await.unwrap().is_none());
}

// ============================================================================
// Cooking method log
// ============================================================================

#[tokio::test]
async fn test_classification_log_round_trip() {
    let database = create_test_database().await.unwrap();
    let log = database.cooking_methods();

    let classification = classify_cooking_method("Pan-fry until golden");
    log.record_classification(&classification).await.unwrap();

    let recent = log.list_recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, classification.id);
    assert_eq!(recent[0].normalized_method, CookingMethod::Fry);
    assert_eq!(recent[0].classified_by, classification.classified_by);
}

#[tokio::test]
async fn test_engine_logs_classification() {
    let database = seeded_database().await;
    let engine = NutritionFusionEngine::from_database(&database);

    let request = FusionRequest::for_ingredient("chicken breast")
        .with_cooking_method("Slow-Cook on low for 6 hours");
    engine.fuse(&request).await.unwrap();

    let recent = database.cooking_methods().list_recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].normalized_method, CookingMethod::SlowCook);
}

// ============================================================================
// File databases
// ============================================================================

#[tokio::test]
async fn test_file_database_creates_parent_directory_and_persists() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("nutrifuse.db");
    let url = format!("sqlite:{}", path.display());

    {
        let database = Database::new(&url).await.unwrap();
        database
            .ingredients()
            .insert_record(&record("brown rice", "usda_fdc", 0.9, &[("fiber", 1.6)]))
            .await
            .unwrap();
        database.pool().close().await;
    }

    assert!(path.exists());
    let reopened = Database::new(&url).await.unwrap();
    assert_eq!(reopened.ingredients().count_records().await.unwrap(), 1);
    assert_eq!(reopened.sources().list_sources().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_file_database_url_with_query_creates_file_at_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("nutrifuse.db");
    let url = format!("sqlite:{}?cache=private", path.display());

    let database = Database::new(&url).await.unwrap();
    database.ping().await.unwrap();
    database.pool().close().await;

    assert!(path.exists());
    assert!(!dir.path().join("nested").join("nutrifuse.db?cache=private").exists());
}

// ============================================================================
// Store agreement
// ============================================================================

#[tokio::test]
async fn test_sqlite_and_memory_stores_match_raw_text_alike() {
    let mut spaced = record("Chicken  Breast", "source_a", 0.9, &[("protein", 31.0)]);
    spaced.normalized_name = "imported poultry".to_owned();
    let mut filleted = record("CHICKEN BREAST FILLET", "source_b", 0.8, &[("protein", 29.0)]);
    filleted.normalized_name = "imported fillet".to_owned();
    let records = vec![spaced, filleted.clone()];

    let database = create_test_database().await.unwrap();
    for record in &records {
        database.ingredients().insert_record(record).await.unwrap();
    }
    let memory = InMemoryStore::with_data(scenario_sources(), records);

    let from_sqlite = database.find_candidates("chicken breast", 5).await.unwrap();
    let from_memory = memory.find_candidates("chicken breast", 5).await.unwrap();

    let ids = |found: &[IngredientRecord]| {
        found.iter().map(|r| r.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&from_sqlite), vec![filleted.id]);
    assert_eq!(ids(&from_memory), ids(&from_sqlite));
}
