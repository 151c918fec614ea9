//! Goal-type dispatch for calorie plan suggestion
//!
//! The single entry point a caller needs: computes the maintenance
//! range, selects the generator for the goal, and attaches the custom
//! entry bounds and the default plan key.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::gain::GainPlanner;
use crate::loss::WeightLossPlanner;
use crate::maintain::MaintainPlanner;
use crate::maintenance::MaintenanceCalculator;
use crate::models::{
    BiometricProfile, CustomBounds, GoalType, MaintenanceRange, Plan, PlanKey, PlanStatus,
};
use crate::safety::HARD_HARD_STOP;

/// Margin added to the maintenance upper bound for custom entry on
/// the maintain and recomp goals
const MAINTAIN_CUSTOM_UPPER_MARGIN: i32 = 300;

/// Margin added to the maintenance upper bound for custom entry on
/// the gain goal; wide enough to admit the fast preset's surplus
const GAIN_CUSTOM_UPPER_MARGIN: i32 = 1000;

/// A complete plan suggestion for one profile and goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSuggestion {
    /// Maintenance range the plans were derived from
    pub maintenance: MaintenanceRange,

    /// Normal or extreme-edge-case outcome
    pub status: PlanStatus,

    /// Generated plans, in display order
    pub plans: Vec<Plan>,

    /// Slider range for manual calorie entry
    pub custom: CustomBounds,

    /// Key the caller should preselect
    pub default_plan: PlanKey,
}

/// Goal-driven plan suggestion
pub struct PlanSuggester;

impl PlanSuggester {
    /// Suggest calorie plans for a profile and goal.
    ///
    /// The profile's own weight serves as the current weight for pace
    /// projections; `target_weight_kg` applies to the lose and gain
    /// goals only.
    pub fn suggest(
        profile: &BiometricProfile,
        goal: GoalType,
        target_weight_kg: Option<Decimal>,
        today: NaiveDate,
    ) -> PlanSuggestion {
        let maintenance = MaintenanceCalculator::compute(profile);

        match goal {
            GoalType::Lose => {
                let set = WeightLossPlanner::baseline_deficit_plans(
                    &maintenance,
                    profile.sex,
                    Some(profile.weight_kg),
                    target_weight_kg,
                    today,
                );
                PlanSuggestion {
                    maintenance,
                    status: set.status,
                    plans: set.plans,
                    custom: set.custom,
                    default_plan: set.default_plan,
                }
            }
            GoalType::Maintain | GoalType::Recomp => {
                let plans = MaintainPlanner::presets(&maintenance, goal);
                let default_plan = if goal == GoalType::Recomp {
                    PlanKey::RecompStandard
                } else {
                    PlanKey::Maintain
                };
                let custom = CustomBounds {
                    min: HARD_HARD_STOP,
                    max: maintenance.upper_maintenance + MAINTAIN_CUSTOM_UPPER_MARGIN,
                };
                PlanSuggestion {
                    maintenance,
                    status: PlanStatus::Ok,
                    plans,
                    custom,
                    default_plan,
                }
            }
            GoalType::Gain => {
                let plans = GainPlanner::plans(
                    &maintenance,
                    Some(profile.weight_kg),
                    target_weight_kg,
                    today,
                );
                let custom = CustomBounds {
                    min: HARD_HARD_STOP,
                    max: maintenance.upper_maintenance + GAIN_CUSTOM_UPPER_MARGIN,
                };
                PlanSuggestion {
                    maintenance,
                    status: PlanStatus::Ok,
                    plans,
                    custom,
                    default_plan: PlanKey::GainLean,
                }
            }
        }
    }
}
