// ABOUTME: Application constants re-exported from the core crate
// ABOUTME: Fusion policy, matching limits, cooking classification, endpoints, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrifuse_core::constants::*;
