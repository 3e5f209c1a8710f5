// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: AppError, ErrorCode, and AppResult with axum response rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error types live in `nutrifuse-core` so they can be shared without pulling
//! in the server. With the `http-response` feature `AppError` renders as
//! `{ "error": ..., "details": ... }` with the status mapped from its code.

pub use nutrifuse_core::errors::*;
