// ABOUTME: Route module organization for the Nutrifuse HTTP API
// ABOUTME: Assembles domain routers with request tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Nutrifuse server
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Nutrition fusion routes
pub mod nutrition;

pub use health::HealthRoutes;
pub use nutrition::NutritionRoutes;

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors_origins);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(NutritionRoutes::routes(resources.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
