// ABOUTME: Core data models re-exported from the core crate
// ABOUTME: Nutrients, sources, ingredient records, fused profiles, and cooking methods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrifuse_core::models::*;
