// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Fusion policy, matching limits, source labels, and service defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Unit conversion and measurement constants
pub mod units;

/// Fusion policy constants
///
/// These values are behavioural contracts of the confidence model. Changing them
/// changes every persisted confidence score.
pub mod fusion {
    /// Ceiling applied to every per-nutrient confidence
    pub const MAX_CONFIDENCE: f64 = 0.95;
    /// Confidence boost contributed by each corroborating observation
    pub const PER_SOURCE_BOOST: f64 = 0.05;
    /// Upper bound of the total corroboration boost
    pub const MAX_SOURCE_BOOST: f64 = 0.20;
    /// Weight assigned to a caller-supplied observation without a confidence
    pub const DEFAULT_ALTERNATIVE_WEIGHT: f64 = 0.5;
    /// Tag persisted with every fused profile
    pub const FUSION_METHOD: &str = "bayesian_weighted_mean";
    /// Key of the aggregate entry in the persisted confidence map
    pub const OVERALL_CONFIDENCE_KEY: &str = "overall";
}

/// Ingredient matching limits
pub mod matching {
    /// Maximum number of candidate records returned by the matcher
    pub const MAX_MATCH_CANDIDATES: usize = 5;
}

/// Source labels for observations that do not come from the registry
pub mod source_labels {
    /// Label attached to caller-supplied alternative observations
    pub const ALTERNATIVE_SOURCE: &str = "alternative_source";
}

/// Cooking method classification constants
pub mod cooking {
    /// Classifier identifier recorded with every classification
    pub const CLASSIFIED_BY: &str = "keyword_rules";
    /// Confidence of a classification backed by a keyword hit
    pub const KEYWORD_MATCH_CONFIDENCE: f64 = 0.8;
    /// Confidence of the fallback classification
    pub const FALLBACK_CONFIDENCE: f64 = 0.3;
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Readiness endpoint
    pub const READY_CHECK: &str = "/ready";
    /// Fusion endpoint
    pub const FUSE: &str = "/api/nutrition/fuse";
    /// Source registry listing
    pub const SOURCES: &str = "/api/nutrition/sources";
}

/// Service defaults
pub mod defaults {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default database URL
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/nutrifuse.db";
    /// Service name used in structured logs
    pub const SERVICE_NAME: &str = "nutrifuse-server";
}
