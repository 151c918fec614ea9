//! Maintenance-calorie range calculation
//!
//! Combines the BMR range with a fixed activity multiplier table.
//! Activity calories take a larger contingency haircut than the BMR
//! itself, since self-reported activity overestimates far more often
//! than resting metabolism does.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::bmr::{BmrEstimator, BMR_CONTINGENCY};
use crate::models::{ActivityLevel, BiometricProfile, MaintenanceRange};
use crate::units;

/// Fraction removed from raw activity calories for the lower bound
const ACTIVITY_CONTINGENCY: Decimal = dec!(0.20);

/// Maintenance range calculation
pub struct MaintenanceCalculator;

impl MaintenanceCalculator {
    /// Fixed multiplier for each activity tier
    pub fn activity_multiplier(activity: ActivityLevel) -> Decimal {
        match activity {
            ActivityLevel::Sedentary => dec!(1.2),
            ActivityLevel::Light => dec!(1.375),
            ActivityLevel::Moderate => dec!(1.55),
            ActivityLevel::High => dec!(1.725),
            ActivityLevel::VeryHigh => dec!(1.9),
        }
    }

    /// Compute the maintenance-calorie range for a profile.
    pub fn compute(profile: &BiometricProfile) -> MaintenanceRange {
        let bmr = BmrEstimator::compute(profile);
        let multiplier = Self::activity_multiplier(profile.activity);

        let raw_activity = bmr.raw_bmr * (multiplier - Decimal::ONE);
        let reduced_activity = raw_activity * (Decimal::ONE - ACTIVITY_CONTINGENCY);

        let lower_activity = units::floor_to_multiple(reduced_activity, 10);
        let upper_activity = units::floor_to_multiple(raw_activity, 10);

        MaintenanceRange {
            lower_maintenance: bmr.lower_bmr + lower_activity,
            upper_maintenance: bmr.upper_bmr + upper_activity,
            lower_bmr: bmr.lower_bmr,
            upper_bmr: bmr.upper_bmr,
            lower_activity_calories: lower_activity,
            upper_activity_calories: upper_activity,
            activity_multiplier: multiplier,
            bmr_method: bmr.method,
            used_body_fat: bmr.used_body_fat,
            raw_lower: bmr.raw_bmr * (Decimal::ONE - BMR_CONTINGENCY) + reduced_activity,
            raw_upper: bmr.raw_bmr + raw_activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BmrMethod, Sex};

    fn reference_profile() -> BiometricProfile {
        BiometricProfile {
            sex: Sex::Female,
            age: 30,
            height_cm: 165,
            weight_kg: dec!(68),
            body_fat_percent: None,
            activity: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn test_reference_range() {
        let range = MaintenanceCalculator::compute(&reference_profile());

        assert_eq!(range.lower_bmr, 1330);
        assert_eq!(range.upper_bmr, 1400);
        assert_eq!(range.lower_activity_calories, 610);
        assert_eq!(range.upper_activity_calories, 770);
        assert_eq!(range.lower_maintenance, 1940);
        assert_eq!(range.upper_maintenance, 2170);
        assert_eq!(range.activity_multiplier, dec!(1.55));
        assert_eq!(range.bmr_method, BmrMethod::Mifflin);
        assert!(!range.used_body_fat);
    }

    #[test]
    fn test_raw_bounds() {
        let range = MaintenanceCalculator::compute(&reference_profile());
        // raw BMR 1400.25; activity 770.1375; haircuts 0.95 / 0.80
        assert_eq!(range.raw_lower, dec!(1946.34750));
        assert_eq!(range.raw_upper, dec!(2170.3875));
        assert_eq!(range.midpoint(), dec!(2055));
    }

    #[test]
    fn test_multiplier_table() {
        assert_eq!(
            MaintenanceCalculator::activity_multiplier(ActivityLevel::Sedentary),
            dec!(1.2)
        );
        assert_eq!(
            MaintenanceCalculator::activity_multiplier(ActivityLevel::Light),
            dec!(1.375)
        );
        assert_eq!(
            MaintenanceCalculator::activity_multiplier(ActivityLevel::Moderate),
            dec!(1.55)
        );
        assert_eq!(
            MaintenanceCalculator::activity_multiplier(ActivityLevel::High),
            dec!(1.725)
        );
        assert_eq!(
            MaintenanceCalculator::activity_multiplier(ActivityLevel::VeryHigh),
            dec!(1.9)
        );
    }

    #[test]
    fn test_bounds_ordered_across_tiers() {
        let mut profile = reference_profile();
        for activity in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::High,
            ActivityLevel::VeryHigh,
        ] {
            profile.activity = activity;
            let range = MaintenanceCalculator::compute(&profile);
            assert!(range.lower_maintenance <= range.upper_maintenance);
            assert!(range.raw_lower <= range.raw_upper);
        }
    }

    #[test]
    fn test_breakdown_sums() {
        let range = MaintenanceCalculator::compute(&reference_profile());
        assert_eq!(
            range.lower_maintenance,
            range.lower_bmr + range.lower_activity_calories
        );
        assert_eq!(
            range.upper_maintenance,
            range.upper_bmr + range.upper_activity_calories
        );
    }
}
