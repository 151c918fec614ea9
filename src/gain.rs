//! Weight-gain plan generation
//!
//! Pace-first: three fixed weekly-gain rates convert into calorie
//! targets off the maintenance midpoint. Values round up to the next
//! 25 calories so a gain target never under-shoots. Gain has no hard
//! floor; warnings are advisory only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{MaintenanceRange, Plan, PlanKey};
use crate::pace::PaceCalculator;
use crate::safety::SafetyClassifier;
use crate::units;

/// Calories per pound of body weight
const CALORIES_PER_LB: Decimal = dec!(3600);

/// Weekly-gain presets in pounds per week
const PRESETS: [(PlanKey, &str, &str, Decimal); 3] = [
    (
        PlanKey::GainLean,
        "Lean gain",
        "Slow surplus, minimal fat",
        dec!(0.4),
    ),
    (
        PlanKey::GainModerate,
        "Moderate gain",
        "Balanced surplus",
        dec!(0.6),
    ),
    (
        PlanKey::GainFast,
        "Fast gain",
        "Large surplus, fastest scale movement",
        dec!(1.3),
    ),
];

/// Weight-gain plan generation
pub struct GainPlanner;

impl GainPlanner {
    /// Build the three pace-first gain plans.
    ///
    /// The lean preset is always the recommended one. ETA fields are
    /// filled from the preset pace when both weights are supplied.
    pub fn plans(
        maintenance: &MaintenanceRange,
        current_weight_kg: Option<Decimal>,
        target_weight_kg: Option<Decimal>,
        today: NaiveDate,
    ) -> Vec<Plan> {
        let mid = maintenance.midpoint();

        PRESETS
            .iter()
            .map(|(key, title, subtitle, pace)| {
                let surplus = *pace * CALORIES_PER_LB / dec!(7);
                let calories = units::ceil_to_multiple(mid + surplus, 25);
                let verdict = SafetyClassifier::classify_gain(calories, maintenance);

                let projection = match (current_weight_kg, target_weight_kg) {
                    (Some(current), Some(target)) if target > current => {
                        PaceCalculator::eta_from_pace(
                            *pace,
                            units::lb_from_kg(target - current),
                            today,
                        )
                    }
                    _ => None,
                };

                Plan {
                    key: *key,
                    title: title.to_string(),
                    subtitle: Some(subtitle.to_string()),
                    calories_per_day: calories,
                    is_visible: true,
                    is_selectable: verdict.selectable,
                    warning_level: verdict.warning_level,
                    warning_text: verdict.warning_text,
                    is_recommended: *key == PlanKey::GainLean,
                    pace_lbs_per_week: Some(*pace),
                    eta_weeks: projection.as_ref().map(|p| p.eta_weeks),
                    eta_date: projection.as_ref().map(|p| p.eta_date),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BmrMethod, WarningLevel};

    fn maintenance(lower: i32, upper: i32) -> MaintenanceRange {
        MaintenanceRange {
            lower_maintenance: lower,
            upper_maintenance: upper,
            lower_bmr: 0,
            upper_bmr: 0,
            lower_activity_calories: 0,
            upper_activity_calories: 0,
            activity_multiplier: dec!(1.55),
            bmr_method: BmrMethod::Mifflin,
            used_body_fat: false,
            raw_lower: Decimal::from(lower),
            raw_upper: Decimal::from(upper),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_reference_calories_round_up() {
        // Mid 2055: surpluses 205.71 / 308.57 / 668.57, ceil to 25
        let plans = GainPlanner::plans(&maintenance(1940, 2170), None, None, today());

        let calories: Vec<i32> = plans.iter().map(|p| p.calories_per_day).collect();
        assert_eq!(calories, vec![2275, 2375, 2725]);

        let keys: Vec<PlanKey> = plans.iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![PlanKey::GainLean, PlanKey::GainModerate, PlanKey::GainFast]
        );
    }

    #[test]
    fn test_lean_always_recommended() {
        let plans = GainPlanner::plans(&maintenance(1940, 2170), None, None, today());
        let recommended: Vec<PlanKey> = plans
            .iter()
            .filter(|p| p.is_recommended)
            .map(|p| p.key)
            .collect();
        assert_eq!(recommended, vec![PlanKey::GainLean]);
    }

    #[test]
    fn test_presets_inside_band_are_clear() {
        let plans = GainPlanner::plans(&maintenance(1940, 2170), None, None, today());
        for p in &plans {
            assert!(p.is_selectable);
            assert_eq!(p.warning_level, WarningLevel::None);
        }
    }

    #[test]
    fn test_pace_first_fields() {
        let plans = GainPlanner::plans(
            &maintenance(1940, 2170),
            Some(dec!(68)),
            Some(dec!(72)),
            today(),
        );

        let lean = &plans[0];
        assert_eq!(lean.pace_lbs_per_week, Some(dec!(0.4)));
        // 4 kg = 8.81848 lb at 0.4 lb/week -> 22.04 weeks -> 23
        assert_eq!(lean.eta_weeks, Some(23));
        assert_eq!(
            lean.eta_date,
            Some(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
    }

    #[test]
    fn test_no_eta_without_gain_target() {
        // Target below current weight is not a gain; no ETA
        let plans = GainPlanner::plans(
            &maintenance(1940, 2170),
            Some(dec!(68)),
            Some(dec!(60)),
            today(),
        );
        assert!(plans.iter().all(|p| p.eta_weeks.is_none()));
        // Pace stays: it is the preset, not a projection
        assert!(plans.iter().all(|p| p.pace_lbs_per_week.is_some()));
    }

    #[test]
    fn test_idempotent() {
        let range = maintenance(1940, 2170);
        assert_eq!(
            GainPlanner::plans(&range, Some(dec!(68)), Some(dec!(72)), today()),
            GainPlanner::plans(&range, Some(dec!(68)), Some(dec!(72)), today())
        );
    }
}
