// ABOUTME: Closed set of fusable nutrients with their canonical measurement units
// ABOUTME: Name aliasing and unit conversion so one nutrient never mixes unit systems
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::units::{KJ_PER_KCAL, MCG_PER_MG, MG_PER_G};
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A nutrient the fusion engine knows how to reconcile
///
/// Ordering follows label convention (energy first, then macronutrients,
/// then minerals) and drives the order of fused entries in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Energy content
    Calories,
    /// Protein
    Protein,
    /// Total carbohydrates
    Carbohydrates,
    /// Total fat
    Fat,
    /// Saturated fat
    SaturatedFat,
    /// Dietary fiber
    Fiber,
    /// Total sugars
    Sugar,
    /// Sodium
    Sodium,
    /// Potassium
    Potassium,
}

impl Nutrient {
    /// Every known nutrient in canonical order
    pub const ALL: [Self; 9] = [
        Self::Calories,
        Self::Protein,
        Self::Carbohydrates,
        Self::Fat,
        Self::SaturatedFat,
        Self::Fiber,
        Self::Sugar,
        Self::Sodium,
        Self::Potassium,
    ];

    /// Canonical unit every value of this nutrient is stored in
    #[must_use]
    pub const fn canonical_unit(self) -> NutrientUnit {
        match self {
            Self::Calories => NutrientUnit::Kilocalorie,
            Self::Sodium | Self::Potassium => NutrientUnit::Milligram,
            Self::Protein
            | Self::Carbohydrates
            | Self::Fat
            | Self::SaturatedFat
            | Self::Fiber
            | Self::Sugar => NutrientUnit::Gram,
        }
    }

    /// Wire name of the nutrient
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbohydrates => "carbohydrates",
            Self::Fat => "fat",
            Self::SaturatedFat => "saturated_fat",
            Self::Fiber => "fiber",
            Self::Sugar => "sugar",
            Self::Sodium => "sodium",
            Self::Potassium => "potassium",
        }
    }

    /// Resolve a free-form nutrient name, accepting common label and database aliases
    ///
    /// Matching is case-insensitive and treats spaces and hyphens as underscores.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace([' ', '-'], "_");

        let nutrient = match key.as_str() {
            "calories" | "calorie" | "energy" | "kcal" | "energy_kcal" => Self::Calories,
            "protein" | "proteins" | "protein_g" => Self::Protein,
            "carbohydrates" | "carbohydrate" | "carbs" | "carbs_g" | "carbohydrates_g"
            | "total_carbohydrate" | "carbohydrate,_by_difference" => Self::Carbohydrates,
            "fat" | "fats" | "fat_g" | "total_fat" | "total_lipid" | "total_lipid_(fat)" => {
                Self::Fat
            }
            "saturated_fat" | "saturated_fat_g" | "sat_fat" | "saturated" => Self::SaturatedFat,
            "fiber" | "fibre" | "fiber_g" | "dietary_fiber" => Self::Fiber,
            "sugar" | "sugars" | "sugar_g" | "total_sugars" => Self::Sugar,
            "sodium" | "sodium_mg" => Self::Sodium,
            "potassium" | "potassium_mg" => Self::Potassium,
            _ => return None,
        };

        Some(nutrient)
    }
}

impl Display for Nutrient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nutrient {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::invalid_input(format!("Unknown nutrient: {s}")))
    }
}

/// Measurement unit of a nutrient value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientUnit {
    /// Kilocalories (food calories)
    #[serde(rename = "kcal")]
    Kilocalorie,
    /// Kilojoules
    #[serde(rename = "kJ")]
    Kilojoule,
    /// Grams
    #[serde(rename = "g")]
    Gram,
    /// Milligrams
    #[serde(rename = "mg")]
    Milligram,
    /// Micrograms
    #[serde(rename = "mcg")]
    Microgram,
}

impl NutrientUnit {
    /// Unit symbol as rendered in API responses
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilocalorie => "kcal",
            Self::Kilojoule => "kJ",
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Microgram => "mcg",
        }
    }

    /// Parse a unit symbol or name
    #[must_use]
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.trim().to_lowercase().as_str() {
            "kcal" | "cal" | "calorie" | "calories" | "kilocalorie" | "kilocalories" => {
                Some(Self::Kilocalorie)
            }
            "kj" | "kilojoule" | "kilojoules" => Some(Self::Kilojoule),
            "g" | "gram" | "grams" => Some(Self::Gram),
            "mg" | "milligram" | "milligrams" => Some(Self::Milligram),
            "mcg" | "µg" | "ug" | "microgram" | "micrograms" => Some(Self::Microgram),
            _ => None,
        }
    }

    /// Scale factor to the dimension's base unit (mg for mass, kcal for energy)
    const fn to_base(self) -> (UnitDimension, f64) {
        match self {
            Self::Kilocalorie => (UnitDimension::Energy, 1.0),
            Self::Kilojoule => (UnitDimension::Energy, 1.0 / KJ_PER_KCAL),
            Self::Gram => (UnitDimension::Mass, MG_PER_G),
            Self::Milligram => (UnitDimension::Mass, 1.0),
            Self::Microgram => (UnitDimension::Mass, 1.0 / MCG_PER_MG),
        }
    }

    /// Convert a value from this unit into `target`
    ///
    /// Returns `None` when the units measure different dimensions (mass vs energy).
    #[must_use]
    pub fn convert(self, value: f64, target: Self) -> Option<f64> {
        if self == target {
            return Some(value);
        }

        let (from_dim, from_scale) = self.to_base();
        let (to_dim, to_scale) = target.to_base();
        if from_dim != to_dim {
            return None;
        }

        Some(value * from_scale / to_scale)
    }
}

impl Display for NutrientUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitDimension {
    Mass,
    Energy,
}
