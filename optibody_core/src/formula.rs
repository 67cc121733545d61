//! BMR formula strategies.
//!
//! Each formula carries a display name, an applicability predicate and a
//! compute function. The engine walks an ordered list of formulas and uses
//! the first one that applies, so more accurate formulas go first.

use crate::body_composition::lean_body_mass;
use crate::{Error, Gender, Result, UserMetrics};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default formula priority: body-composition formulas before the fallback
pub const DEFAULT_FORMULAS: [BmrFormula; 2] = [BmrFormula::KatchMcArdle, BmrFormula::MifflinStJeor];

/// A basal metabolic rate equation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Lean-mass based; needs body fat percentage
    KatchMcArdle,
    /// Lean-mass based; needs body fat percentage
    Cunningham,
    /// Weight/height/age/sex; always applicable
    MifflinStJeor,
    /// Roza & Shizgal (1984) revision; always applicable
    HarrisBenedict,
}

impl BmrFormula {
    /// Display name reported in `CalculationResult::formula`
    pub fn name(&self) -> &'static str {
        match self {
            BmrFormula::KatchMcArdle => "Katch-McArdle Formula",
            BmrFormula::Cunningham => "Cunningham Equation",
            BmrFormula::MifflinStJeor => "Mifflin-St Jeor Equation",
            BmrFormula::HarrisBenedict => "Harris-Benedict Equation",
        }
    }

    /// Configuration key
    pub fn key(&self) -> &'static str {
        match self {
            BmrFormula::KatchMcArdle => "katch_mcardle",
            BmrFormula::Cunningham => "cunningham",
            BmrFormula::MifflinStJeor => "mifflin_st_jeor",
            BmrFormula::HarrisBenedict => "harris_benedict",
        }
    }

    pub fn is_applicable(&self, metrics: &UserMetrics) -> bool {
        match self {
            // A recorded 0% counts as present. The OptiBody web calculator
            // tested the field for truthiness, so 0 fell back to Mifflin-St Jeor there.
            BmrFormula::KatchMcArdle | BmrFormula::Cunningham => {
                metrics.body_fat_percentage.is_some()
            }
            BmrFormula::MifflinStJeor | BmrFormula::HarrisBenedict => true,
        }
    }

    /// Unrounded BMR in kcal/day
    pub fn calculate(&self, metrics: &UserMetrics) -> Result<f64> {
        let weight = metrics.weight;
        let height = metrics.height;
        let age = f64::from(metrics.age);

        let bmr = match self {
            BmrFormula::KatchMcArdle => 370.0 + 21.6 * required_lean_mass(self, metrics)?,
            BmrFormula::Cunningham => 500.0 + 22.0 * required_lean_mass(self, metrics)?,
            BmrFormula::MifflinStJeor => {
                let gender_adjustment = match metrics.gender {
                    Gender::Male => 5.0,
                    Gender::Female => -161.0,
                };
                10.0 * weight + 6.25 * height - 5.0 * age + gender_adjustment
            }
            BmrFormula::HarrisBenedict => match metrics.gender {
                Gender::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
                Gender::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
            },
        };

        Ok(bmr)
    }
}

fn required_lean_mass(formula: &BmrFormula, metrics: &UserMetrics) -> Result<f64> {
    let body_fat = metrics.body_fat_percentage.ok_or_else(|| {
        Error::InvalidInput(format!(
            "body fat percentage is required for the {}",
            formula.name()
        ))
    })?;
    Ok(lean_body_mass(metrics.weight, body_fat))
}

impl fmt::Display for BmrFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BmrFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        [
            BmrFormula::KatchMcArdle,
            BmrFormula::Cunningham,
            BmrFormula::MifflinStJeor,
            BmrFormula::HarrisBenedict,
        ]
        .into_iter()
        .find(|formula| formula.key() == normalized)
        .ok_or_else(|| Error::Config(format!("unknown BMR formula: {}", s)))
    }
}
