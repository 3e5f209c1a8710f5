// ABOUTME: HTTP integration tests for the nutrition and health routes
// ABOUTME: Drives the full axum router with oneshot requests and checks status codes and bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use axum::http::StatusCode;
use axum::Router;
use common::{chicken_breast_records, create_test_database, scenario_sources};
use helpers::axum_test::AxumTestRequest;
use nutrifuse_server::config::ServerConfig;
use nutrifuse_server::database::repositories::memory::InMemoryStore;
use nutrifuse_server::database::Database;
use nutrifuse_server::resources::ServerResources;
use nutrifuse_server::routes::build_router;
use nutrifuse_server::services::NutritionFusionEngine;
use serde_json::{json, Value};
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

async fn setup_app() -> Router {
    let database = seeded_database().await;
    let engine = NutritionFusionEngine::from_database(&database);
    let resources = ServerResources::with_engine(database, engine, ServerConfig::default());
    build_router(&Arc::new(resources))
}

// ============================================================================
// POST /api/nutrition/fuse
// ============================================================================

#[tokio::test]
async fn test_fuse_returns_fused_profile() {
    let app = setup_app().await;

    let body: Value = AxumTestRequest::post("/api/nutrition/fuse")
        .json(&json!({
            "ingredient_text": "chicken breast, raw",
            "alt_source_values": [
                { "nutrient": "calories", "value": 165, "confidence_score": 0.6 }
            ],
            "cooking_method": "Slow-Cook on low for 6 hours"
        }))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let fused = body["fused"].as_array().unwrap();
    let protein = fused.iter().find(|e| e["nutrient"] == "protein").unwrap();
    assert!((protein["fusedValue"].as_f64().unwrap() - 30.2).abs() < 0.05);
    assert_eq!(protein["unit"], "g");
    assert_eq!(protein["sources"], json!(["Source A", "Source B"]));

    let calories = fused.iter().find(|e| e["nutrient"] == "calories").unwrap();
    assert!((calories["confidence"].as_f64().unwrap() - 0.65).abs() < 1e-9);

    assert_eq!(body["source_count"], 3);
    assert_eq!(body["metadata"]["cooking_method"], "slow cook");
    assert_eq!(body["metadata"]["matched_ingredients_count"], 2);
    assert_eq!(body["canonical_ingredient"]["name"], "chicken breast");

    let overall = body["overall_confidence"].as_f64().unwrap();
    assert!((0.0..=0.95).contains(&overall));
}

#[tokio::test]
async fn test_fuse_rejects_missing_ingredient_text() {
    let app = setup_app().await;

    for payload in [
        json!({ "ingredient_text": "" }),
        json!({ "ingredient_text": "   " }),
        json!({}),
    ] {
        let body: Value = AxumTestRequest::post("/api/nutrition/fuse")
            .json(&payload)
            .send(app.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body, json!({ "error": "ingredient_text is required" }));
    }
}

#[tokio::test]
async fn test_fuse_rejects_malformed_body() {
    let app = setup_app().await;

    for raw in ["{not json", r#"{"ingredient_text": 42}"#] {
        let body: Value = AxumTestRequest::post("/api/nutrition/fuse")
            .raw_json(raw)
            .send(app.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }
}

#[tokio::test]
async fn test_fuse_store_failure_returns_server_error_with_details() {
    let database = create_test_database().await.unwrap();
    let store = Arc::new(InMemoryStore::with_data(scenario_sources(), chicken_breast_records()));
    store.fail_reads(true);
    let engine = NutritionFusionEngine::from_store(&store);
    let resources = ServerResources::with_engine(database, engine, ServerConfig::default());
    let app = build_router(&Arc::new(resources));

    let body: Value = AxumTestRequest::post("/api/nutrition/fuse")
        .json(&json!({ "ingredient_text": "chicken breast" }))
        .send(app)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .json();

    assert_eq!(
        body,
        json!({
            "error": "Failed to fuse nutrition data",
            "details": "In-memory store is unavailable"
        })
    );
}

// ============================================================================
// GET /api/nutrition/profiles/:ingredient
// ============================================================================

#[tokio::test]
async fn test_profile_is_readable_after_fuse() {
    let app = setup_app().await;

    let missing: Value = AxumTestRequest::get("/api/nutrition/profiles/chicken%20breast")
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(
        missing,
        json!({ "error": "Fused profile for 'chicken breast' not found" })
    );

    AxumTestRequest::post("/api/nutrition/fuse")
        .json(&json!({ "ingredient_text": "Chicken Breast" }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK);

    let profile: Value = AxumTestRequest::get("/api/nutrition/profiles/chicken%20breast")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(profile["normalized_name"], "chicken breast");
    assert_eq!(profile["ingredient_text"], "Chicken Breast");
    assert!(profile["nutrients"]["protein"].as_f64().is_some());
    assert_eq!(profile["fusion_method"], "bayesian_weighted_mean");
}

// ============================================================================
// GET /api/nutrition/sources
// ============================================================================

#[tokio::test]
async fn test_sources_are_listed_in_priority_order() {
    let app = setup_app().await;

    let body: Value = AxumTestRequest::get("/api/nutrition/sources")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let sources = body["sources"].as_array().unwrap();
    assert_eq!(body["total"], sources.len());
    assert_eq!(sources.len(), 7);

    let priorities: Vec<i64> = sources
        .iter()
        .map(|s| s["priority"].as_i64().unwrap())
        .collect();
    assert!(priorities.windows(2).all(|pair| pair[0] <= pair[1]));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_readiness() {
    let app = setup_app().await;

    let health: Value = AxumTestRequest::get("/health")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "nutrifuse-server");

    let ready: Value = AxumTestRequest::get("/ready")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(ready["status"], "ready");
}
