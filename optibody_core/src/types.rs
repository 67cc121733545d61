//! Core domain types for OptiBody.
//!
//! This module defines the fundamental types used throughout the system:
//! - Body metrics supplied by the user
//! - Energy expenditure results
//! - Nutrition goals and intake totals
//! - Workout sets

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Enumerations
// ============================================================================

/// Biological sex used by the BMR equations
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(Error::InvalidInput(format!("unknown gender: {}", other))),
        }
    }
}

/// Habitual activity level, in increasing order of energy expenditure
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    /// All levels in their natural order
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = Error;

    /// Accepts snake_case or kebab-case names
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("unknown activity level: {}", s)))
    }
}

/// Body-weight goal that shifts the calorie target away from TDEE
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Maintenance,
    MuscleGain,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::WeightLoss, Goal::Maintenance, Goal::MuscleGain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::Maintenance => "maintenance",
            Goal::MuscleGain => "muscle_gain",
        }
    }

    /// Daily calorie adjustment relative to TDEE (kcal)
    pub fn calorie_adjustment(&self) -> i32 {
        match self {
            Goal::WeightLoss => -500,
            Goal::Maintenance => 0,
            Goal::MuscleGain => 300,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Goal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("unknown goal: {}", s)))
    }
}

// ============================================================================
// Engine Input / Output
// ============================================================================

/// Body metrics for a single calculation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserMetrics {
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    /// Body fat percentage, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
}

impl UserMetrics {
    /// Check the ranges a form layer would enforce before calling the engine.
    ///
    /// The engine itself never calls this.
    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "height must be a positive number of centimeters, got {}",
                self.height
            )));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "weight must be a positive number of kilograms, got {}",
                self.weight
            )));
        }
        if self.age == 0 {
            return Err(Error::InvalidInput("age must be at least 1 year".into()));
        }
        if let Some(bf) = self.body_fat_percentage {
            if !bf.is_finite() || !(0.0..=100.0).contains(&bf) {
                return Err(Error::InvalidInput(format!(
                    "body fat percentage must be between 0 and 100, got {}",
                    bf
                )));
            }
        }
        Ok(())
    }
}

/// Result of a BMR/TDEE calculation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculationResult {
    /// Basal metabolic rate, kcal/day
    pub bmr: i32,
    /// Total daily energy expenditure, kcal/day
    pub tdee: i32,
    /// Name of the formula that produced `bmr`
    pub formula: String,
}

// ============================================================================
// Nutrition Types
// ============================================================================

/// Daily nutrition targets derived from TDEE and goal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionGoals {
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
    pub fiber: i32,
    pub sugar: i32,
    /// Sodium limit in milligrams
    pub sodium: i32,
}

/// Macronutrient gram targets
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroTargets {
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
}

/// Share of calories contributed by each macronutrient, whole percent
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroPercentages {
    pub protein_percent: i32,
    pub fat_percent: i32,
    pub carb_percent: i32,
}

/// Nutrient amounts for one serving, or summed over a day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

/// A logged food with the number of servings eaten
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub quantity: f64,
    pub food: NutrientTotals,
}

// ============================================================================
// Training Types
// ============================================================================

/// A single set of an exercise
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub reps: u32,
    /// Load in kilograms; bodyweight sets have none
    pub weight: Option<f64>,
}
