// ABOUTME: Core types and constants for the Nutrifuse nutrition fusion service
// ABOUTME: Foundation crate with error handling, fusion policy constants, and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrifuse Core
//!
//! Foundation crate providing shared types and constants for the Nutrifuse
//! nutrition fusion service. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Fusion policy constants, source labels, and unit conventions
//! - **models**: Nutrients, sources, ingredient records, fused profiles, cooking methods

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Nutrient, `SourceProfile`, `IngredientRecord`, etc.)
pub mod models;
