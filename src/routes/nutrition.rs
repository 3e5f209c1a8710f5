// ABOUTME: Nutrition fusion route handlers
// ABOUTME: Fuse an ingredient, read back a stored profile, and list the source registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::endpoints::{FUSE, SOURCES};
use crate::errors::AppError;
use crate::models::SourceProfile;
use crate::resources::ServerResources;
use crate::services::fusion::FusionRequest;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Source registry listing
#[derive(Debug, Serialize, Deserialize)]
pub struct SourcesResponse {
    /// Sources in priority order
    pub sources: Vec<SourceProfile>,
    /// Number of sources
    pub total: usize,
}

/// Nutrition routes handler
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(FUSE, post(Self::handle_fuse))
            .route("/api/nutrition/profiles/:ingredient", get(Self::handle_get_profile))
            .route(SOURCES, get(Self::handle_list_sources))
            .with_state(resources)
    }

    /// Handle POST /api/nutrition/fuse
    async fn handle_fuse(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<FusionRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {}", e.body_text())))?;

        let response = resources.engine.fuse(&request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/nutrition/profiles/:ingredient
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(ingredient): Path<String>,
    ) -> Result<Response, AppError> {
        let profile = resources.engine.get_profile(&ingredient).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle GET /api/nutrition/sources
    async fn handle_list_sources(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let sources = resources.engine.list_sources().await?;
        let response = SourcesResponse {
            total: sources.len(),
            sources,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
