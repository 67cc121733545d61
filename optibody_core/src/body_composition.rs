//! Body composition estimates.

use crate::{Error, Gender, Result};

const CM_PER_INCH: f64 = 2.54;

/// Body-fat estimates are clamped to this range (percent)
const BODY_FAT_MIN: f64 = 0.0;
const BODY_FAT_MAX: f64 = 50.0;

/// Lean body mass in kilograms: total weight minus estimated fat mass
pub fn lean_body_mass(weight_kg: f64, body_fat_percentage: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percentage / 100.0)
}

/// Estimate body fat percentage with the U.S. Navy circumference method
///
/// All measurements are in centimeters. Women need a hip measurement.
/// The result is rounded to one decimal place and clamped to 0-50%.
pub fn estimate_body_fat(
    gender: Gender,
    height_cm: f64,
    waist_cm: f64,
    neck_cm: f64,
    hip_cm: Option<f64>,
) -> Result<f64> {
    let height = height_cm / CM_PER_INCH;
    let waist = waist_cm / CM_PER_INCH;
    let neck = neck_cm / CM_PER_INCH;

    if height <= 0.0 {
        return Err(Error::InvalidInput("height must be positive".into()));
    }

    let body_fat = match gender {
        Gender::Male => {
            let girth = waist - neck;
            if girth <= 0.0 {
                return Err(Error::InvalidInput(
                    "waist must be larger than neck for the Navy method".into(),
                ));
            }
            86.010 * girth.log10() - 70.041 * height.log10() + 36.76
        }
        Gender::Female => {
            let hip = hip_cm.ok_or_else(|| {
                Error::InvalidInput(
                    "hip measurement required for female body fat calculation".into(),
                )
            })? / CM_PER_INCH;
            let girth = waist + hip - neck;
            if girth <= 0.0 {
                return Err(Error::InvalidInput(
                    "waist plus hip must be larger than neck for the Navy method".into(),
                ));
            }
            163.205 * girth.log10() - 97.684 * height.log10() - 78.387
        }
    };

    let rounded = (body_fat * 10.0).round() / 10.0;
    Ok(rounded.clamp(BODY_FAT_MIN, BODY_FAT_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lean_body_mass() {
        assert_eq!(lean_body_mass(80.0, 25.0), 60.0);
        assert_eq!(lean_body_mass(70.0, 0.0), 70.0);
    }

    #[test]
    fn test_navy_male() {
        let bf = estimate_body_fat(Gender::Male, 180.0, 85.0, 38.0, None).unwrap();
        assert_eq!(bf, 16.2);
    }

    #[test]
    fn test_navy_female() {
        let bf = estimate_body_fat(Gender::Female, 165.0, 75.0, 33.0, Some(100.0)).unwrap();
        assert_eq!(bf, 29.7);
    }

    #[test]
    fn test_navy_female_requires_hip() {
        let result = estimate_body_fat(Gender::Female, 165.0, 75.0, 33.0, None);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_navy_rejects_neck_wider_than_waist() {
        let result = estimate_body_fat(Gender::Male, 180.0, 38.0, 40.0, None);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_navy_clamps_to_range() {
        // Very large waist pushes the raw estimate well past 50%
        let high = estimate_body_fat(Gender::Male, 150.0, 200.0, 30.0, None).unwrap();
        assert_eq!(high, 50.0);

        // Waist barely above neck gives a negative raw estimate
        let low = estimate_body_fat(Gender::Male, 200.0, 41.0, 40.0, None).unwrap();
        assert_eq!(low, 0.0);
    }
}
