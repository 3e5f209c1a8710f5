// ABOUTME: HTTP middleware for the nutrition API
// ABOUTME: Currently cross-origin resource sharing configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS layer configuration
pub mod cors;

pub use cors::setup_cors;
