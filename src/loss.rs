//! Weight-loss calorie plan generation
//!
//! Produces four-to-five named plans from fixed deficits off the
//! maintenance midpoint, each gated by the safety classifier. When the
//! maintenance lower bound leaves no safe deficit at all, the whole
//! preset list is withheld and only custom entry is offered.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CustomBounds, MaintenanceRange, Plan, PlanKey, PlanStatus, Sex};
use crate::pace::PaceCalculator;
use crate::safety::{self, SafetyClassifier, HARD_FLOOR, HARD_HARD_STOP};
use crate::units;

/// Daily deficit for the aggressive plan
const AGGRESSIVE_DEFICIT: i32 = 750;

/// Daily deficit for the standard plan
const STANDARD_DEFICIT: i32 = 500;

/// Daily deficit for the more-sustainable plan
const SUSTAINABLE_DEFICIT: i32 = 300;

/// Lower edge of the band in which the cautious-minimum plan shows
const CAUTIOUS_BAND_LOW: i32 = 1300;

/// Width above the sex soft floor closing the cautious-minimum band
const CAUTIOUS_BAND_ABOVE_SOFT_FLOOR: i32 = 75;

/// Maintenance lower bound required before the escape hatch applies
const ESCAPE_HATCH_MIN_MAINTENANCE: i32 = 1400;

/// Margin added to the maintenance upper bound for custom entry
const CUSTOM_UPPER_MARGIN: i32 = 300;

/// Margin added to the maintenance lower bound for custom entry in
/// the extreme edge case
const EXTREME_CUSTOM_UPPER_MARGIN: i32 = 200;

/// A generated set of weight-loss plans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeficitPlanSet {
    /// Normal or extreme-edge-case outcome
    pub status: PlanStatus,

    /// Named plans, in display order
    pub plans: Vec<Plan>,

    /// Key the caller should preselect
    pub default_plan: PlanKey,

    /// Slider range for manual calorie entry
    pub custom: CustomBounds,
}

/// Weight-loss plan generation
pub struct WeightLossPlanner;

impl WeightLossPlanner {
    /// Generate the baseline deficit plans for a maintenance range.
    ///
    /// Pace and ETA fields are filled per plan when both the current
    /// and target weight are supplied.
    pub fn baseline_deficit_plans(
        maintenance: &MaintenanceRange,
        sex: Sex,
        current_weight_kg: Option<Decimal>,
        target_weight_kg: Option<Decimal>,
        today: NaiveDate,
    ) -> DeficitPlanSet {
        let low = maintenance.lower_maintenance;

        if low < safety::EXTREME_EDGE_CASE_THRESHOLD {
            return Self::extreme_edge_case(maintenance);
        }

        let mid = maintenance.midpoint();
        let soft_floor = safety::soft_floor(sex);

        let mut plans = vec![
            Self::deficit_plan(
                PlanKey::Aggressive,
                "Aggressive",
                Some("Fastest pace, hardest to sustain"),
                mid,
                AGGRESSIVE_DEFICIT,
                soft_floor,
            ),
            Self::deficit_plan(
                PlanKey::Standard,
                "Standard",
                Some("Steady, proven pace"),
                mid,
                STANDARD_DEFICIT,
                soft_floor,
            ),
            Self::deficit_plan(
                PlanKey::MoreSustainable,
                "More sustainable",
                Some("Smaller deficit, easier to keep"),
                mid,
                SUSTAINABLE_DEFICIT,
                soft_floor,
            ),
        ];

        // Flat-floor plan for profiles whose maintenance sits just
        // above the guidance floor.
        let cautious_band_high = soft_floor + CAUTIOUS_BAND_ABOVE_SOFT_FLOOR;
        if (CAUTIOUS_BAND_LOW..cautious_band_high).contains(&low) {
            plans.push(Self::fixed_plan(
                PlanKey::CautiousMinimum,
                "Cautious minimum",
                Some("Fixed floor for small deficits"),
                HARD_FLOOR,
            ));
        }

        // Escape hatch: keep a sustainable-labeled option available
        // when the real one fell below its visibility floor.
        let sustainable_unavailable = plans
            .iter()
            .find(|p| p.key == PlanKey::MoreSustainable)
            .map(|p| !p.is_visible || !p.is_selectable)
            .unwrap_or(true);
        if sustainable_unavailable && low >= ESCAPE_HATCH_MIN_MAINTENANCE {
            plans.push(Self::fixed_plan(
                PlanKey::SustainableFloor1200,
                "More sustainable",
                Some("Held at the minimum recommended intake"),
                HARD_FLOOR,
            ));
        }

        Self::mark_recommended(&mut plans);

        if let (Some(current), Some(target)) = (current_weight_kg, target_weight_kg) {
            for plan in plans.iter_mut().filter(|p| p.is_visible) {
                if let Some(projection) =
                    PaceCalculator::project(mid, plan.calories_per_day, current, target, today)
                {
                    plan.pace_lbs_per_week = Some(projection.pace_lbs_per_week);
                    plan.eta_weeks = Some(projection.eta_weeks);
                    plan.eta_date = Some(projection.eta_date);
                }
            }
        }

        let default_plan = Self::default_plan_key(&plans);

        DeficitPlanSet {
            status: PlanStatus::Ok,
            plans,
            default_plan,
            custom: CustomBounds {
                min: HARD_HARD_STOP,
                max: maintenance.upper_maintenance + CUSTOM_UPPER_MARGIN,
            },
        }
    }

    /// Circuit breaker: the biology leaves no safe preset, so every
    /// named plan is withheld and only custom entry remains.
    fn extreme_edge_case(maintenance: &MaintenanceRange) -> DeficitPlanSet {
        let mid = maintenance.midpoint();
        let keys = [
            (PlanKey::Aggressive, "Aggressive", AGGRESSIVE_DEFICIT),
            (PlanKey::Standard, "Standard", STANDARD_DEFICIT),
            (PlanKey::MoreSustainable, "More sustainable", SUSTAINABLE_DEFICIT),
        ];

        let mut plans: Vec<Plan> = keys
            .iter()
            .map(|(key, title, deficit)| {
                let calories = units::floor_to_multiple(mid - Decimal::from(*deficit), 25);
                Self::hidden_plan(*key, title, calories)
            })
            .collect();
        plans.push(Self::hidden_plan(
            PlanKey::CautiousMinimum,
            "Cautious minimum",
            HARD_FLOOR,
        ));

        DeficitPlanSet {
            status: PlanStatus::ExtremeEdgeCase,
            plans,
            default_plan: PlanKey::Custom,
            custom: CustomBounds {
                min: HARD_HARD_STOP,
                max: (maintenance.lower_maintenance + EXTREME_CUSTOM_UPPER_MARGIN)
                    .max(HARD_HARD_STOP),
            },
        }
    }

    /// Build one fixed-deficit plan, floored to the 25-calorie grid
    /// and gated by the classifier. The more-sustainable plan is also
    /// hidden below the sex soft floor.
    fn deficit_plan(
        key: PlanKey,
        title: &str,
        subtitle: Option<&str>,
        maintenance_mid: Decimal,
        deficit: i32,
        soft_floor: i32,
    ) -> Plan {
        let calories =
            units::floor_to_multiple(maintenance_mid - Decimal::from(deficit), 25);
        let verdict = SafetyClassifier::classify(calories);

        let mut visible = calories >= HARD_HARD_STOP;
        if key == PlanKey::MoreSustainable && calories < soft_floor {
            visible = false;
        }

        Plan {
            key,
            title: title.to_string(),
            subtitle: subtitle.map(str::to_string),
            calories_per_day: calories,
            is_visible: visible,
            is_selectable: verdict.selectable,
            warning_level: verdict.warning_level,
            warning_text: verdict.warning_text,
            is_recommended: false,
            pace_lbs_per_week: None,
            eta_weeks: None,
            eta_date: None,
        }
    }

    /// Build a visible plan pinned at a fixed calorie value
    fn fixed_plan(key: PlanKey, title: &str, subtitle: Option<&str>, calories: i32) -> Plan {
        let verdict = SafetyClassifier::classify(calories);
        Plan {
            key,
            title: title.to_string(),
            subtitle: subtitle.map(str::to_string),
            calories_per_day: calories,
            is_visible: true,
            is_selectable: verdict.selectable,
            warning_level: verdict.warning_level,
            warning_text: verdict.warning_text,
            is_recommended: false,
            pace_lbs_per_week: None,
            eta_weeks: None,
            eta_date: None,
        }
    }

    /// Build a withheld plan for the extreme edge case
    fn hidden_plan(key: PlanKey, title: &str, calories: i32) -> Plan {
        let verdict = SafetyClassifier::classify(calories);
        Plan {
            key,
            title: title.to_string(),
            subtitle: None,
            calories_per_day: calories,
            is_visible: false,
            is_selectable: false,
            warning_level: verdict.warning_level,
            warning_text: verdict.warning_text,
            is_recommended: false,
            pace_lbs_per_week: None,
            eta_weeks: None,
            eta_date: None,
        }
    }

    /// Mark at most one plan recommended. Priority: standard, then
    /// more-sustainable (or its escape hatch), then aggressive; a plan
    /// carrying any warning is never recommended.
    fn mark_recommended(plans: &mut [Plan]) {
        let priority = [
            PlanKey::Standard,
            PlanKey::MoreSustainable,
            PlanKey::SustainableFloor1200,
            PlanKey::Aggressive,
        ];

        for key in priority {
            if let Some(plan) = plans.iter_mut().find(|p| {
                p.key == key && p.is_visible && p.is_selectable && p.warning_level.is_none()
            }) {
                plan.is_recommended = true;
                return;
            }
        }
    }

    /// Default-selection priority: standard unwarned, cautious
    /// minimum, more-sustainable, escape hatch, standard even warned,
    /// aggressive, then custom entry.
    fn default_plan_key(plans: &[Plan]) -> PlanKey {
        let usable = |key: PlanKey, warned_ok: bool| {
            plans.iter().find(|p| {
                p.key == key
                    && p.is_visible
                    && p.is_selectable
                    && (warned_ok || p.warning_level.is_none())
            })
        };

        if usable(PlanKey::Standard, false).is_some() {
            return PlanKey::Standard;
        }
        if usable(PlanKey::CautiousMinimum, true).is_some() {
            return PlanKey::CautiousMinimum;
        }
        if usable(PlanKey::MoreSustainable, true).is_some() {
            return PlanKey::MoreSustainable;
        }
        if usable(PlanKey::SustainableFloor1200, true).is_some() {
            return PlanKey::SustainableFloor1200;
        }
        if usable(PlanKey::Standard, true).is_some() {
            return PlanKey::Standard;
        }
        if usable(PlanKey::Aggressive, true).is_some() {
            return PlanKey::Aggressive;
        }
        PlanKey::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BmrMethod, WarningLevel};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

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

    fn plan(set: &DeficitPlanSet, key: PlanKey) -> &Plan {
        set.plans.iter().find(|p| p.key == key).unwrap()
    }

    #[test]
    fn test_reference_plan_calories() {
        // Midpoint 2055: deficits 750/500/300, floored to 25
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1940, 2170),
            Sex::Female,
            None,
            None,
            today(),
        );

        assert_eq!(set.status, PlanStatus::Ok);
        assert_eq!(plan(&set, PlanKey::Aggressive).calories_per_day, 1300);
        assert_eq!(plan(&set, PlanKey::Standard).calories_per_day, 1550);
        assert_eq!(plan(&set, PlanKey::MoreSustainable).calories_per_day, 1750);
        assert!(set.plans.iter().all(|p| p.key != PlanKey::CautiousMinimum));

        assert!(plan(&set, PlanKey::Standard).is_recommended);
        assert_eq!(set.default_plan, PlanKey::Standard);
        assert_eq!(set.custom, CustomBounds { min: 700, max: 2470 });
    }

    #[test]
    fn test_extreme_edge_case() {
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1050, 1250),
            Sex::Female,
            None,
            None,
            today(),
        );

        assert_eq!(set.status, PlanStatus::ExtremeEdgeCase);
        assert_eq!(set.plans.len(), 4);
        assert!(set.plans.iter().all(|p| !p.is_visible && !p.is_selectable));
        assert!(set.plans.iter().all(|p| !p.is_recommended));
        assert_eq!(set.default_plan, PlanKey::Custom);
        assert_eq!(set.custom, CustomBounds { min: 700, max: 1250 });
    }

    #[test]
    fn test_extreme_edge_custom_floor() {
        // Custom upper bound never drops below the hard stop
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(400, 520),
            Sex::Female,
            None,
            None,
            today(),
        );
        assert_eq!(set.custom.min, 700);
        assert_eq!(set.custom.max, 700);
    }

    #[test]
    fn test_cautious_minimum_band() {
        // Female soft floor 1300: band [1300, 1375)
        let inside = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1350, 1580),
            Sex::Female,
            None,
            None,
            today(),
        );
        assert_eq!(plan(&inside, PlanKey::CautiousMinimum).calories_per_day, 1200);

        let below = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1299, 1530),
            Sex::Female,
            None,
            None,
            today(),
        );
        assert!(below.plans.iter().all(|p| p.key != PlanKey::CautiousMinimum));

        let above = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1375, 1610),
            Sex::Female,
            None,
            None,
            today(),
        );
        assert!(above.plans.iter().all(|p| p.key != PlanKey::CautiousMinimum));

        // Male band runs to 1475
        let male = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1450, 1680),
            Sex::Male,
            None,
            None,
            today(),
        );
        assert!(male.plans.iter().any(|p| p.key == PlanKey::CautiousMinimum));
    }

    #[test]
    fn test_sustainable_hidden_below_soft_floor() {
        // Mid 1505: sustainable 1205 < 1300, hidden for a female
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1450, 1560),
            Sex::Female,
            None,
            None,
            today(),
        );

        let sustainable = plan(&set, PlanKey::MoreSustainable);
        assert_eq!(sustainable.calories_per_day, 1200);
        assert!(!sustainable.is_visible);
        assert!(!sustainable.is_recommended);
    }

    #[test]
    fn test_escape_hatch() {
        // Sustainable hidden and maintenance low >= 1400: pinned plan
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1450, 1560),
            Sex::Female,
            None,
            None,
            today(),
        );

        let escape = plan(&set, PlanKey::SustainableFloor1200);
        assert_eq!(escape.calories_per_day, 1200);
        assert_eq!(escape.title, "More sustainable");
        assert!(escape.is_visible);
        assert!(escape.is_selectable);
        assert_eq!(escape.warning_level, WarningLevel::None);

        // Standard (1000) is warned, so the escape hatch takes the
        // recommendation and the default falls to it after the chain.
        assert!(escape.is_recommended);
        assert!(!plan(&set, PlanKey::Standard).is_recommended);
        assert_eq!(set.default_plan, PlanKey::SustainableFloor1200);
    }

    #[test]
    fn test_no_escape_hatch_below_1400() {
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1390, 1500),
            Sex::Female,
            None,
            None,
            today(),
        );
        assert!(set
            .plans
            .iter()
            .all(|p| p.key != PlanKey::SustainableFloor1200));
    }

    #[test]
    fn test_at_most_one_recommendation() {
        for (low, high, sex) in [
            (1940, 2170, Sex::Female),
            (1450, 1560, Sex::Female),
            (1350, 1580, Sex::Female),
            (1200, 1400, Sex::Male),
            (2600, 2900, Sex::Male),
        ] {
            let set = WeightLossPlanner::baseline_deficit_plans(
                &maintenance(low, high),
                sex,
                None,
                None,
                today(),
            );
            let recommended: Vec<_> = set.plans.iter().filter(|p| p.is_recommended).collect();
            assert!(recommended.len() <= 1);
            for p in recommended {
                assert_eq!(p.warning_level, WarningLevel::None);
                assert!(p.is_visible && p.is_selectable);
            }
        }
    }

    #[test]
    fn test_warned_standard_not_recommended() {
        // Mid 1330: standard 825 is red-warned, sustainable hidden,
        // low < 1400 so no escape hatch, aggressive unsafe
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1220, 1440),
            Sex::Female,
            None,
            None,
            today(),
        );

        assert!(set.plans.iter().all(|p| !p.is_recommended));
        // Default falls through to the warned standard plan
        assert_eq!(set.default_plan, PlanKey::Standard);
    }

    #[test]
    fn test_unsafe_plan_hidden_and_unselectable() {
        // Mid 1330: aggressive 575 < 700
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1220, 1440),
            Sex::Female,
            None,
            None,
            today(),
        );

        let aggressive = plan(&set, PlanKey::Aggressive);
        assert_eq!(aggressive.calories_per_day, 575);
        assert!(!aggressive.is_selectable);
        assert!(!aggressive.is_visible);
        assert_eq!(aggressive.warning_level, WarningLevel::Unsafe);
    }

    #[test]
    fn test_pace_fields_filled() {
        let set = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1940, 2170),
            Sex::Female,
            Some(dec!(68)),
            Some(dec!(60)),
            today(),
        );

        let standard = plan(&set, PlanKey::Standard);
        assert_eq!(standard.pace_lbs_per_week, Some(dec!(0.98)));
        assert_eq!(standard.eta_weeks, Some(18));
        assert!(standard.eta_date.is_some());

        // Without a target, pace fields stay empty
        let bare = WeightLossPlanner::baseline_deficit_plans(
            &maintenance(1940, 2170),
            Sex::Female,
            Some(dec!(68)),
            None,
            today(),
        );
        assert!(plan(&bare, PlanKey::Standard).pace_lbs_per_week.is_none());
    }

    #[test]
    fn test_idempotent() {
        let args = (maintenance(1940, 2170), Sex::Female, Some(dec!(68)), Some(dec!(60)));
        let first = WeightLossPlanner::baseline_deficit_plans(
            &args.0, args.1, args.2, args.3, today(),
        );
        let second = WeightLossPlanner::baseline_deficit_plans(
            &args.0, args.1, args.2, args.3, today(),
        );
        assert_eq!(first, second);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_plan_set_invariants(low in 800i32..3000, spread in 0i32..500) {
            let set = WeightLossPlanner::baseline_deficit_plans(
                &maintenance(low, low + spread),
                Sex::Female,
                None,
                None,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            );

            // At most one recommendation, and only on clear plans
            prop_assert!(set.plans.iter().filter(|p| p.is_recommended).count() <= 1);
            for p in &set.plans {
                if p.is_recommended {
                    prop_assert!(p.warning_level.is_none());
                }
                if p.calories_per_day < HARD_HARD_STOP {
                    prop_assert!(!p.is_selectable);
                }
                // Plan values land on the 25-calorie grid
                prop_assert_eq!(p.calories_per_day.rem_euclid(25), 0);
            }

            prop_assert!(set.custom.min >= HARD_HARD_STOP);
            prop_assert!(set.custom.max >= set.custom.min);

            if low < 1100 {
                prop_assert_eq!(set.status, PlanStatus::ExtremeEdgeCase);
                prop_assert!(set.plans.iter().all(|p| !p.is_visible));
            } else {
                prop_assert_eq!(set.status, PlanStatus::Ok);
            }
        }
    }
}
