//! Activity multipliers and the activity-level catalog.
//!
//! TDEE is BMR scaled by a multiplier chosen from the user's activity level.
//! The standard table follows McArdle et al.; a custom table can be loaded
//! from configuration as long as it stays strictly increasing.

use crate::{ActivityLevel, Error, Result};
use serde::Serialize;

const LEVEL_COUNT: usize = ActivityLevel::ALL.len();

/// Standard multipliers, in `ActivityLevel::ALL` order
pub const STANDARD_ACTIVITY_MULTIPLIERS: ActivityMultiplierTable = ActivityMultiplierTable {
    multipliers: [Some(1.2), Some(1.375), Some(1.55), Some(1.725), Some(1.9)],
};

/// Mapping from activity level to TDEE multiplier
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityMultiplierTable {
    multipliers: [Option<f64>; LEVEL_COUNT],
}

impl ActivityMultiplierTable {
    /// Build a table from explicit entries.
    ///
    /// Levels may be omitted. Every present multiplier must be finite and
    /// positive, and multipliers must strictly increase with activity level.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ActivityLevel, f64)>,
    {
        let mut multipliers = [None; LEVEL_COUNT];

        for (level, multiplier) in entries {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(Error::Config(format!(
                    "activity multiplier for {} must be positive, got {}",
                    level, multiplier
                )));
            }
            let slot = &mut multipliers[level as usize];
            if slot.is_some() {
                return Err(Error::Config(format!(
                    "duplicate activity multiplier for {}",
                    level
                )));
            }
            *slot = Some(multiplier);
        }

        let mut previous: Option<(ActivityLevel, f64)> = None;
        for level in ActivityLevel::ALL {
            if let Some(current) = multipliers[level as usize] {
                if let Some((prev_level, prev)) = previous {
                    if current <= prev {
                        return Err(Error::Config(format!(
                            "activity multipliers must increase: {} ({}) is not above {} ({})",
                            level, current, prev_level, prev
                        )));
                    }
                }
                previous = Some((level, current));
            }
        }

        Ok(Self { multipliers })
    }

    /// Multiplier for `level`, or `UnknownActivityLevel` if the table omits it
    pub fn multiplier(&self, level: ActivityLevel) -> Result<f64> {
        self.multipliers[level as usize].ok_or(Error::UnknownActivityLevel(level))
    }

    /// Present entries in activity order
    pub fn entries(&self) -> impl Iterator<Item = (ActivityLevel, f64)> + '_ {
        ActivityLevel::ALL
            .into_iter()
            .filter_map(move |level| self.multipliers[level as usize].map(|m| (level, m)))
    }
}

impl Default for ActivityMultiplierTable {
    fn default() -> Self {
        STANDARD_ACTIVITY_MULTIPLIERS
    }
}

/// Presentation entry for an activity level
#[derive(Clone, Debug, Serialize)]
pub struct ActivityLevelOption {
    pub value: ActivityLevel,
    pub label: &'static str,
    pub description: &'static str,
    pub multiplier: f64,
}

static ACTIVITY_LEVEL_OPTIONS: [ActivityLevelOption; 5] = [
    ActivityLevelOption {
        value: ActivityLevel::Sedentary,
        label: "Sedentary",
        description: "Little or no exercise, desk job",
        multiplier: 1.2,
    },
    ActivityLevelOption {
        value: ActivityLevel::LightlyActive,
        label: "Lightly Active",
        description: "Light exercise or sports 1-3 days/week",
        multiplier: 1.375,
    },
    ActivityLevelOption {
        value: ActivityLevel::ModeratelyActive,
        label: "Moderately Active",
        description: "Moderate exercise or sports 3-5 days/week",
        multiplier: 1.55,
    },
    ActivityLevelOption {
        value: ActivityLevel::VeryActive,
        label: "Very Active",
        description: "Hard exercise or sports 6-7 days/week",
        multiplier: 1.725,
    },
    ActivityLevelOption {
        value: ActivityLevel::ExtraActive,
        label: "Extra Active",
        description: "Hard daily exercise and a physical job, or training twice a day",
        multiplier: 1.9,
    },
];

/// Descriptive catalog of the five activity levels, in natural order
pub fn get_activity_level_options() -> &'static [ActivityLevelOption] {
    &ACTIVITY_LEVEL_OPTIONS
}

impl ActivityMultiplierTable {
    /// Catalog entries carrying this table's multipliers
    ///
    /// Levels the table omits are left out.
    pub fn options(&self) -> Vec<ActivityLevelOption> {
        ACTIVITY_LEVEL_OPTIONS
            .iter()
            .filter_map(|option| {
                self.multipliers[option.value as usize].map(|multiplier| ActivityLevelOption {
                    multiplier,
                    ..option.clone()
                })
            })
            .collect()
    }
}
