// ABOUTME: Axum IntoResponse implementation for AppError
// ABOUTME: Renders errors as JSON bodies with the status code derived from ErrorCode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AppError;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// HTTP error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Additional failure details, present for server-side failures
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        let details = if error.details.is_null() && !error.code.is_client_error() {
            Value::String(error.code.description().to_owned())
        } else {
            error.details.clone()
        };

        Self {
            error: error.message.clone(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, error = %self, "request failed");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
