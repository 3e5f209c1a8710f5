// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Hosts the nutrition fusion engine used by the HTTP routes and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services hold the business rules so route handlers stay thin.

/// Nutrition fusion engine and its request/response types
pub mod fusion;

pub use fusion::{FusionRequest, FusionResponse, NutritionFusionEngine};
