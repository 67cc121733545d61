//! Health metrics engine: BMR and TDEE.
//!
//! Calculation steps:
//! 1. Walk the ordered formula list and take the first applicable formula
//! 2. Compute BMR with it
//! 3. Scale the unrounded BMR by the activity multiplier to get TDEE
//! 4. Round both to whole kilocalories (half away from zero)

use crate::activity::{ActivityMultiplierTable, STANDARD_ACTIVITY_MULTIPLIERS};
use crate::formula::{BmrFormula, DEFAULT_FORMULAS};
use crate::{CalculationResult, Error, Result, UserMetrics};
use once_cell::sync::Lazy;

/// Engine built from the default formula list and standard multipliers
static DEFAULT_ENGINE: Lazy<HealthMetricsEngine> = Lazy::new(HealthMetricsEngine::default);

/// Get a reference to the shared default engine
pub fn default_engine() -> &'static HealthMetricsEngine {
    &DEFAULT_ENGINE
}

/// Calculate BMR and TDEE with the default engine
pub fn calculate_bmr_and_tdee(metrics: &UserMetrics) -> Result<CalculationResult> {
    default_engine().calculate_bmr_and_tdee(metrics)
}

/// Round to the nearest integer; ties go away from zero (1978.5 -> 1979)
pub fn round_to_whole(value: f64) -> i32 {
    value.round() as i32
}

/// Formula selection plus activity multipliers.
///
/// Immutable once built, so a single instance can be shared freely.
#[derive(Clone, Debug)]
pub struct HealthMetricsEngine {
    formulas: Vec<BmrFormula>,
    multipliers: ActivityMultiplierTable,
}

impl Default for HealthMetricsEngine {
    fn default() -> Self {
        Self {
            formulas: DEFAULT_FORMULAS.to_vec(),
            multipliers: STANDARD_ACTIVITY_MULTIPLIERS,
        }
    }
}

impl HealthMetricsEngine {
    /// Build an engine with a custom formula priority and multiplier table
    pub fn new(formulas: Vec<BmrFormula>, multipliers: ActivityMultiplierTable) -> Self {
        Self {
            formulas,
            multipliers,
        }
    }

    pub fn formulas(&self) -> &[BmrFormula] {
        &self.formulas
    }

    pub fn multipliers(&self) -> &ActivityMultiplierTable {
        &self.multipliers
    }

    /// First formula in priority order that accepts `metrics`
    pub fn select_formula(&self, metrics: &UserMetrics) -> Result<BmrFormula> {
        self.formulas
            .iter()
            .copied()
            .find(|formula| formula.is_applicable(metrics))
            .ok_or(Error::NoApplicableFormula)
    }

    /// Compute BMR and TDEE for the given metrics
    pub fn calculate_bmr_and_tdee(&self, metrics: &UserMetrics) -> Result<CalculationResult> {
        let formula = self.select_formula(metrics)?;
        tracing::debug!("Selected BMR formula: {}", formula.name());

        let bmr = formula.calculate(metrics)?;
        let tdee = bmr * self.multipliers.multiplier(metrics.activity_level)?;

        let result = CalculationResult {
            bmr: round_to_whole(bmr),
            tdee: round_to_whole(tdee),
            formula: formula.name().to_string(),
        };

        tracing::debug!(
            "BMR {} kcal, TDEE {} kcal ({})",
            result.bmr,
            result.tdee,
            metrics.activity_level
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityLevel, Gender};

    fn male_70kg() -> UserMetrics {
        UserMetrics {
            height: 175.0,
            weight: 70.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::Sedentary,
            body_fat_percentage: None,
        }
    }

    #[test]
    fn test_male_sedentary() {
        let result = calculate_bmr_and_tdee(&male_70kg()).unwrap();

        assert_eq!(result.bmr, 1649);
        assert_eq!(result.tdee, 1979);
        assert_eq!(result.formula, "Mifflin-St Jeor Equation");
    }

    #[test]
    fn test_female_lightly_active() {
        let metrics = UserMetrics {
            height: 165.0,
            weight: 60.0,
            age: 25,
            gender: Gender::Female,
            activity_level: ActivityLevel::LightlyActive,
            body_fat_percentage: None,
        };

        let result = calculate_bmr_and_tdee(&metrics).unwrap();

        assert_eq!(result.bmr, 1345);
        assert_eq!(result.tdee, 1850);
        assert_eq!(result.formula, "Mifflin-St Jeor Equation");
    }

    #[test]
    fn test_very_active_uses_unrounded_bmr() {
        let mut metrics = male_70kg();
        metrics.activity_level = ActivityLevel::VeryActive;

        let result = calculate_bmr_and_tdee(&metrics).unwrap();

        // 1648.75 * 1.725 = 2844.09; the rounded BMR would give 2845
        assert_eq!(result.tdee, 2844);
    }

    #[test]
    fn test_katch_mcardle_when_body_fat_known() {
        let mut metrics = male_70kg();
        metrics.activity_level = ActivityLevel::ModeratelyActive;
        metrics.body_fat_percentage = Some(15.0);

        let result = calculate_bmr_and_tdee(&metrics).unwrap();

        assert_eq!(result.formula, "Katch-McArdle Formula");
        assert!(result.bmr > 0);
        assert!(result.tdee > result.bmr);
        assert_eq!(result.bmr, 1655);
        assert_eq!(result.tdee, 2566);
    }

    #[test]
    fn test_zero_body_fat_still_selects_katch_mcardle() {
        let mut metrics = male_70kg();
        metrics.body_fat_percentage = Some(0.0);

        let result = calculate_bmr_and_tdee(&metrics).unwrap();

        assert_eq!(result.formula, "Katch-McArdle Formula");
        assert_eq!(result.bmr, round_to_whole(370.0 + 21.6 * 70.0));
    }

    #[test]
    fn test_tdee_matches_multiplier_for_every_level() {
        let unrounded_bmr = 1648.75;
        for level in ActivityLevel::ALL {
            let mut metrics = male_70kg();
            metrics.activity_level = level;

            let result = calculate_bmr_and_tdee(&metrics).unwrap();
            let multiplier = STANDARD_ACTIVITY_MULTIPLIERS.multiplier(level).unwrap();

            assert_eq!(result.tdee, round_to_whole(unrounded_bmr * multiplier));
        }
    }

    #[test]
    fn test_tdee_strictly_increases_with_activity() {
        let tdees: Vec<i32> = ActivityLevel::ALL
            .into_iter()
            .map(|level| {
                let mut metrics = male_70kg();
                metrics.activity_level = level;
                calculate_bmr_and_tdee(&metrics).unwrap().tdee
            })
            .collect();

        assert!(tdees.windows(2).all(|w| w[0] < w[1]), "{:?}", tdees);
    }

    #[test]
    fn test_gender_difference_is_166() {
        for (weight, height, age) in [(70.0, 175.0, 30), (55.0, 160.0, 41), (102.0, 190.0, 67)] {
            let mut male = male_70kg();
            male.weight = weight;
            male.height = height;
            male.age = age;
            let mut female = male.clone();
            female.gender = Gender::Female;

            let engine = default_engine();
            let male_bmr = BmrFormula::MifflinStJeor.calculate(&male).unwrap();
            let female_bmr = BmrFormula::MifflinStJeor.calculate(&female).unwrap();
            assert_eq!(male_bmr - female_bmr, 166.0);

            let male_result = engine.calculate_bmr_and_tdee(&male).unwrap();
            let female_result = engine.calculate_bmr_and_tdee(&female).unwrap();
            assert_eq!(male_result.bmr - female_result.bmr, 166);
        }
    }

    #[test]
    fn test_rounding_ties_go_away_from_zero() {
        // 10*70 + 6.25*170 - 5*30 + 5 = 1617.5 exactly
        let mut metrics = male_70kg();
        metrics.height = 170.0;
        let result = calculate_bmr_and_tdee(&metrics).unwrap();
        assert_eq!(result.bmr, 1618);

        assert_eq!(round_to_whole(1978.5), 1979);
        assert_eq!(round_to_whole(2.5), 3);
        assert_eq!(round_to_whole(-2.5), -3);
        assert_eq!(round_to_whole(1978.4999), 1978);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let mut metrics = male_70kg();
        metrics.body_fat_percentage = Some(18.0);

        let first = calculate_bmr_and_tdee(&metrics).unwrap();
        let second = calculate_bmr_and_tdee(&metrics).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_priority_is_respected() {
        let engine = HealthMetricsEngine::new(
            vec![BmrFormula::HarrisBenedict, BmrFormula::MifflinStJeor],
            STANDARD_ACTIVITY_MULTIPLIERS,
        );

        let result = engine.calculate_bmr_and_tdee(&male_70kg()).unwrap();
        assert_eq!(result.formula, "Harris-Benedict Equation");
        assert_eq!(result.bmr, 1696);
    }

    #[test]
    fn test_no_applicable_formula() {
        let engine =
            HealthMetricsEngine::new(vec![BmrFormula::KatchMcArdle], STANDARD_ACTIVITY_MULTIPLIERS);

        let result = engine.calculate_bmr_and_tdee(&male_70kg());
        assert!(matches!(result, Err(Error::NoApplicableFormula)));

        let empty = HealthMetricsEngine::new(vec![], STANDARD_ACTIVITY_MULTIPLIERS);
        assert!(matches!(
            empty.calculate_bmr_and_tdee(&male_70kg()),
            Err(Error::NoApplicableFormula)
        ));
    }

    #[test]
    fn test_unknown_activity_level() {
        let table = ActivityMultiplierTable::new([(ActivityLevel::Sedentary, 1.2)]).unwrap();
        let engine = HealthMetricsEngine::new(DEFAULT_FORMULAS.to_vec(), table);

        let mut metrics = male_70kg();
        metrics.activity_level = ActivityLevel::ExtraActive;

        let result = engine.calculate_bmr_and_tdee(&metrics);
        assert!(matches!(
            result,
            Err(Error::UnknownActivityLevel(ActivityLevel::ExtraActive))
        ));
    }
}
