//! Training volume calculations.

use crate::WorkoutSet;

/// Total volume load in kilograms: sum of reps x weight over all sets
///
/// Sets without a load (bodyweight work) contribute nothing.
pub fn calculate_workout_volume(sets: &[WorkoutSet]) -> f64 {
    sets.iter()
        .map(|set| f64::from(set.reps) * set.weight.unwrap_or(0.0))
        .sum()
}
