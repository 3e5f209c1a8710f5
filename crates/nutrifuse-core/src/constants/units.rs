// ABOUTME: Unit conversion constants for nutrient mass and energy measurements
// ABOUTME: Provides named constants to eliminate magic numbers in unit normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Milligrams per gram
pub const MG_PER_G: f64 = 1000.0;

/// Micrograms per milligram
pub const MCG_PER_MG: f64 = 1000.0;

/// Kilojoules per kilocalorie (thermochemical calorie)
pub const KJ_PER_KCAL: f64 = 4.184;
