// ABOUTME: Main library entry point for the Nutrifuse nutrition fusion service
// ABOUTME: Fuses conflicting per-source nutrient measurements into confidence-scored profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrifuse Server
//!
//! Backend nutrition data fusion engine. Given a free-text ingredient
//! description it reconciles nutrient measurements from the ingredient store
//! and caller-supplied alternatives into one best-estimate profile with a
//! confidence score, and persists the result keyed by normalized name.
//!
//! ## Architecture
//!
//! - **intelligence**: pure matching, weighting, fusion, and cooking classification
//! - **services**: the `NutritionFusionEngine` orchestrating a request
//! - **database**: `SQLite` stores behind repository traits
//! - **routes**: axum HTTP surface
//! - **config** and **logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrifuse_server::database::Database;
//! use nutrifuse_server::errors::AppResult;
//! use nutrifuse_server::services::{FusionRequest, NutritionFusionEngine};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let database = Arc::new(Database::new("sqlite::memory:").await?);
//!     let engine = NutritionFusionEngine::from_database(&database);
//!
//!     let response = engine.fuse(&FusionRequest::for_ingredient("apple")).await?;
//!     println!("overall confidence: {}", response.overall_confidence);
//!     Ok(())
//! }
//! ```

/// Unified error handling
pub mod errors;

/// Application constants
pub mod constants;

/// Core data models
pub mod models;

/// Environment-driven configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// `SQLite` persistence and repository traits
pub mod database;

/// Pure nutrition fusion algorithms
pub mod intelligence;

/// Domain services
pub mod services;

/// HTTP middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Shared server resources
pub mod resources;
