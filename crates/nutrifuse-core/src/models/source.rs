// ABOUTME: Nutrient data source reference model with reliability and priority
// ABOUTME: SourceProfile construction enforces the (0, 1] confidence factor range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A nutrient data source and how much its measurements are trusted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Stable identifier referenced by ingredient records
    pub source_id: String,
    /// Human-readable name, used as the observation source label
    pub display_name: String,
    /// Reliability coefficient in (0, 1]
    pub confidence_factor: f64,
    /// Ordering for display and tie-breaking (lower first)
    pub priority: i32,
}

impl SourceProfile {
    /// Create a validated source profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the identifier is blank, or `ValueOutOfRange` if
    /// the confidence factor is not a finite number in (0, 1]
    pub fn new(
        source_id: impl Into<String>,
        display_name: impl Into<String>,
        confidence_factor: f64,
        priority: i32,
    ) -> AppResult<Self> {
        let source_id = source_id.into();
        if source_id.trim().is_empty() {
            return Err(AppError::invalid_input("Source id cannot be empty"));
        }
        if !confidence_factor.is_finite() || confidence_factor <= 0.0 || confidence_factor > 1.0 {
            return Err(AppError::out_of_range(format!(
                "Confidence factor for source '{source_id}' must be in (0, 1], got {confidence_factor}"
            )));
        }

        Ok(Self {
            source_id,
            display_name: display_name.into(),
            confidence_factor,
            priority,
        })
    }
}
