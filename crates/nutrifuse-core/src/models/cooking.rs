// ABOUTME: Canonical cooking method labels and the append-only classification record
// ABOUTME: Labels are a fixed set; free-text instructions map onto exactly one of them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Canonical cooking method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CookingMethod {
    /// Oven baking (also the classifier fallback)
    #[serde(rename = "bake")]
    Bake,
    /// Boiling
    #[serde(rename = "boil")]
    Boil,
    /// Braising
    #[serde(rename = "braise")]
    Braise,
    /// Frying and sautéing
    #[serde(rename = "fry")]
    Fry,
    /// Grilling
    #[serde(rename = "grill")]
    Grill,
    /// Roasting
    #[serde(rename = "roast")]
    Roast,
    /// Steaming
    #[serde(rename = "steam")]
    Steam,
    /// Slow cooker / crock pot
    #[serde(rename = "slow cook")]
    SlowCook,
    /// Not cooked
    #[serde(rename = "raw")]
    Raw,
}

impl CookingMethod {
    /// Every canonical label
    pub const ALL: [Self; 9] = [
        Self::Bake,
        Self::Boil,
        Self::Braise,
        Self::Fry,
        Self::Grill,
        Self::Roast,
        Self::Steam,
        Self::SlowCook,
        Self::Raw,
    ];

    /// Canonical label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bake => "bake",
            Self::Boil => "boil",
            Self::Braise => "braise",
            Self::Fry => "fry",
            Self::Grill => "grill",
            Self::Roast => "roast",
            Self::Steam => "steam",
            Self::SlowCook => "slow cook",
            Self::Raw => "raw",
        }
    }

    /// Parse a canonical label as stored in the database
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for anything other than one of the nine labels
    pub fn from_label(label: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == label)
            .ok_or_else(|| AppError::invalid_input(format!("Invalid cooking method: {label}")))
    }
}

impl Display for CookingMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification of a free-text cooking instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingMethodClassification {
    /// Unique ID
    pub id: Uuid,
    /// Instruction text as supplied by the caller
    pub raw_instruction_text: String,
    /// Canonical method
    pub normalized_method: CookingMethod,
    /// Classifier confidence
    pub confidence_score: f64,
    /// Classifier identifier
    pub classified_by: String,
    /// When the classification was made
    pub created_at: DateTime<Utc>,
}
