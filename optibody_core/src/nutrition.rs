//! Nutrition planning built on top of the TDEE estimate.
//!
//! - Goal-adjusted calorie target with a floor
//! - Protein from body weight, fat as a share of calories, carbs fill the rest
//! - Daily intake totals and progress toward targets

use crate::config::NutritionConfig;
use crate::engine::{round_to_whole, HealthMetricsEngine};
use crate::{
    FoodLogEntry, Goal, MacroPercentages, MacroTargets, NutrientTotals, NutritionGoals, Result,
    UserMetrics,
};
use serde::Serialize;

/// Energy density (kcal per gram)
pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
pub const CARB_KCAL_PER_G: f64 = 4.0;
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Fiber recommendation per 1000 kcal (grams)
const FIBER_G_PER_1000_KCAL: f64 = 14.0;
/// Upper bound on calories from added sugar
const SUGAR_CALORIE_FRACTION: f64 = 0.10;
/// Recommended sodium limit (mg/day)
const SODIUM_LIMIT_MG: i32 = 2300;

/// Presentation entry for a goal
#[derive(Clone, Debug, Serialize)]
pub struct GoalOption {
    pub value: Goal,
    pub label: &'static str,
    pub description: &'static str,
    pub calorie_adjustment: i32,
}

static GOAL_OPTIONS: [GoalOption; 3] = [
    GoalOption {
        value: Goal::WeightLoss,
        label: "Weight Loss",
        description: "Lose 0.5-1kg per week",
        calorie_adjustment: -500,
    },
    GoalOption {
        value: Goal::Maintenance,
        label: "Maintenance",
        description: "Maintain current weight",
        calorie_adjustment: 0,
    },
    GoalOption {
        value: Goal::MuscleGain,
        label: "Muscle Gain",
        description: "Gain 0.25-0.5kg per week",
        calorie_adjustment: 300,
    },
];

pub fn get_goal_options() -> &'static [GoalOption] {
    &GOAL_OPTIONS
}

/// TDEE shifted by the goal's adjustment, never below `minimum_calories`
pub fn calculate_target_calories(tdee: i32, goal: Goal, minimum_calories: i32) -> i32 {
    (tdee + goal.calorie_adjustment()).max(minimum_calories)
}

/// Split a calorie target into macronutrient grams
///
/// Protein is `protein_g_per_kg` per kilogram of body weight, fat supplies
/// `fat_fraction` of the calories, and carbohydrates cover what is left.
pub fn calculate_macro_targets(
    weight_kg: f64,
    target_calories: i32,
    protein_g_per_kg: f64,
    fat_fraction: f64,
) -> MacroTargets {
    let target = f64::from(target_calories);

    let protein = round_to_whole(weight_kg * protein_g_per_kg);

    let fat_calories = target * fat_fraction;
    let fat = round_to_whole(fat_calories / FAT_KCAL_PER_G);

    let protein_calories = f64::from(protein) * PROTEIN_KCAL_PER_G;
    let remaining_calories = target - protein_calories - fat_calories;
    let carbs = round_to_whole(remaining_calories / CARB_KCAL_PER_G);

    MacroTargets {
        protein,
        fat,
        carbs,
    }
}

/// Full set of daily targets for a user and goal
pub fn calculate_nutrition_goals(
    metrics: &UserMetrics,
    goal: Goal,
    engine: &HealthMetricsEngine,
    config: &NutritionConfig,
) -> Result<NutritionGoals> {
    let calculation = engine.calculate_bmr_and_tdee(metrics)?;
    let goals = nutrition_goals_for_tdee(calculation.tdee, metrics.weight, goal, config);

    tracing::debug!(
        "Nutrition goals for {}: {} kcal (TDEE {})",
        goal,
        goals.calories,
        calculation.tdee
    );

    Ok(goals)
}

/// Daily targets from an already computed TDEE
pub fn nutrition_goals_for_tdee(
    tdee: i32,
    weight_kg: f64,
    goal: Goal,
    config: &NutritionConfig,
) -> NutritionGoals {
    let calories = calculate_target_calories(tdee, goal, config.minimum_calories);
    let macros =
        calculate_macro_targets(weight_kg, calories, config.protein_g_per_kg, config.fat_fraction);

    let kcal = f64::from(calories);
    NutritionGoals {
        calories,
        protein: macros.protein,
        fat: macros.fat,
        carbs: macros.carbs,
        fiber: round_to_whole(kcal / 1000.0 * FIBER_G_PER_1000_KCAL),
        sugar: round_to_whole(kcal * SUGAR_CALORIE_FRACTION / CARB_KCAL_PER_G),
        sodium: SODIUM_LIMIT_MG,
    }
}

/// Share of calories from each macronutrient, whole percent
///
/// Returns zeros when the grams add up to no calories at all.
pub fn calculate_macro_percentages(protein_g: f64, fat_g: f64, carbs_g: f64) -> MacroPercentages {
    let protein_kcal = protein_g * PROTEIN_KCAL_PER_G;
    let fat_kcal = fat_g * FAT_KCAL_PER_G;
    let carb_kcal = carbs_g * CARB_KCAL_PER_G;
    let total = protein_kcal + fat_kcal + carb_kcal;

    if total <= 0.0 {
        return MacroPercentages {
            protein_percent: 0,
            fat_percent: 0,
            carb_percent: 0,
        };
    }

    MacroPercentages {
        protein_percent: round_to_whole(protein_kcal / total * 100.0),
        fat_percent: round_to_whole(fat_kcal / total * 100.0),
        carb_percent: round_to_whole(carb_kcal / total * 100.0),
    }
}

/// Sum nutrients over a day's food log, scaling each food by its quantity
pub fn calculate_daily_nutrition(entries: &[FoodLogEntry]) -> NutrientTotals {
    entries
        .iter()
        .fold(NutrientTotals::default(), |totals, entry| {
            let q = entry.quantity;
            let food = &entry.food;
            NutrientTotals {
                calories: totals.calories + food.calories * q,
                protein: totals.protein + food.protein * q,
                fat: totals.fat + food.fat * q,
                carbs: totals.carbs + food.carbs * q,
                fiber: totals.fiber + food.fiber * q,
                sugar: totals.sugar + food.sugar * q,
                sodium: totals.sodium + food.sodium * q,
            }
        })
}

/// Progress toward a target as a whole percent, capped at 100
pub fn calculate_progress(current: f64, target: f64) -> i32 {
    if target == 0.0 {
        return 0;
    }
    round_to_whole(current / target * 100.0).min(100)
}
