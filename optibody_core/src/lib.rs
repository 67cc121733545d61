#![forbid(unsafe_code)]

//! Core health metrics and nutrition logic for OptiBody.
//!
//! This crate provides:
//! - Domain types (body metrics, results, nutrition goals)
//! - BMR formula strategies and the BMR/TDEE engine
//! - Activity multipliers and presentation catalogs
//! - Nutrition planning, body composition and training volume helpers
//! - Profile persistence, configuration and logging

pub mod types;
pub mod error;
pub mod formula;
pub mod activity;
pub mod engine;
pub mod nutrition;
pub mod body_composition;
pub mod training;
pub mod config;
pub mod logging;
pub mod profile;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use formula::{BmrFormula, DEFAULT_FORMULAS};
pub use activity::{
    get_activity_level_options, ActivityLevelOption, ActivityMultiplierTable,
    STANDARD_ACTIVITY_MULTIPLIERS,
};
pub use engine::{calculate_bmr_and_tdee, default_engine, HealthMetricsEngine};
pub use nutrition::{calculate_nutrition_goals, get_goal_options, GoalOption};
pub use body_composition::{estimate_body_fat, lean_body_mass};
pub use training::calculate_workout_volume;
pub use config::Config;
pub use profile::{ProfileLock, UserProfile};
