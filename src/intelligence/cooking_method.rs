// ABOUTME: Keyword-table classifier mapping free-text cooking instructions to canonical methods
// ABOUTME: Ordered rules evaluated first-hit-wins with "bake" as the documented fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cooking Method Normalizer
//!
//! Rules are evaluated in table order and the first rule with a keyword
//! contained in the instruction wins. Instructions matching no rule classify as
//! [`CookingMethod::Bake`]; this fallback is a known simplification and is
//! reported with a lower confidence.

use chrono::Utc;
use nutrifuse_core::constants::cooking::{
    CLASSIFIED_BY, FALLBACK_CONFIDENCE, KEYWORD_MATCH_CONFIDENCE,
};
use nutrifuse_core::models::{CookingMethod, CookingMethodClassification};
use uuid::Uuid;

/// Method assigned when no rule matches
pub const FALLBACK_METHOD: CookingMethod = CookingMethod::Bake;

/// Ordered `(keywords, method)` rules
pub const COOKING_METHOD_RULES: &[(&[&str], CookingMethod)] = &[
    (&["bake", "oven"], CookingMethod::Bake),
    (&["boil"], CookingMethod::Boil),
    (&["braise"], CookingMethod::Braise),
    (&["fry", "sauté", "saute"], CookingMethod::Fry),
    (&["grill"], CookingMethod::Grill),
    (&["roast"], CookingMethod::Roast),
    (&["steam"], CookingMethod::Steam),
    (&["slow cook", "crock pot", "crockpot"], CookingMethod::SlowCook),
    (&["raw", "uncooked"], CookingMethod::Raw),
];

/// Lower-case the instruction and treat `-` and `_` as spaces
fn prepare(instruction: &str) -> String {
    instruction
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the rule matching `instruction`, if any
#[must_use]
pub fn match_rule(instruction: &str) -> Option<CookingMethod> {
    let text = prepare(instruction);
    COOKING_METHOD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, method)| *method)
}

/// Map a free-text instruction onto one canonical method
#[must_use]
pub fn normalize_cooking_method(instruction: &str) -> CookingMethod {
    match_rule(instruction).unwrap_or(FALLBACK_METHOD)
}

/// Classify an instruction into a loggable classification record
#[must_use]
pub fn classify_cooking_method(instruction: &str) -> CookingMethodClassification {
    let (normalized_method, confidence_score) = match_rule(instruction).map_or(
        (FALLBACK_METHOD, FALLBACK_CONFIDENCE),
        |method| (method, KEYWORD_MATCH_CONFIDENCE),
    );

    CookingMethodClassification {
        id: Uuid::new_v4(),
        raw_instruction_text: instruction.to_owned(),
        normalized_method,
        confidence_score,
        classified_by: CLASSIFIED_BY.to_owned(),
        created_at: Utc::now(),
    }
}
