//! Maintenance and recomposition presets
//!
//! Three presets spanning the raw maintenance bounds: a leaner side,
//! the standard midpoint, and a flexible upper end. Narrow ranges
//! collapse into fewer presets. Warnings are left to presentation
//! time via the safety classifier rather than baked into the plans.

use rust_decimal::Decimal;

use crate::models::{GoalType, MaintenanceRange, Plan, PlanKey, WarningLevel};
use crate::units;

/// Maintain/recomp preset generation
pub struct MaintainPlanner;

impl MaintainPlanner {
    /// Build the presets for the maintain or recomp goal.
    ///
    /// Operates on the raw (unrounded) maintenance bounds: the lean
    /// and flexible ends round up to 25, the midpoint rounds to the
    /// nearest 25 and is clamped between them.
    pub fn presets(maintenance: &MaintenanceRange, goal: GoalType) -> Vec<Plan> {
        let lean = units::ceil_to_multiple(maintenance.raw_lower, 25);
        let mut flex = units::ceil_to_multiple(maintenance.raw_upper, 25);
        if flex < lean {
            flex = lean;
        }

        let raw_mid = (maintenance.raw_lower + maintenance.raw_upper) / Decimal::from(2);
        let mid = units::nearest_multiple(raw_mid, 25).clamp(lean, flex);

        let recomp = goal == GoalType::Recomp;
        let (lean_key, mid_key, flex_key) = if recomp {
            (
                PlanKey::RecompLeanerSide,
                PlanKey::RecompStandard,
                PlanKey::RecompFlexible,
            )
        } else {
            (PlanKey::LeanerSide, PlanKey::Maintain, PlanKey::Flexible)
        };

        let standard_title = if recomp { "Recomp" } else { "Maintain" };
        let standard = Self::preset(mid_key, standard_title, mid, true);

        // Collapse duplicates when the range is narrow
        if lean == mid && mid == flex {
            return vec![standard];
        }

        let mut plans = Vec::with_capacity(3);
        if lean != mid {
            let title = if recomp { "Leaner recomp" } else { "Leaner side" };
            plans.push(Self::preset(lean_key, title, lean, false));
        }
        plans.push(standard);
        if flex != mid {
            let title = if recomp { "Flexible recomp" } else { "Flexible" };
            plans.push(Self::preset(flex_key, title, flex, false));
        }
        plans
    }

    fn preset(key: PlanKey, title: &str, calories: i32, recommended: bool) -> Plan {
        Plan {
            key,
            title: title.to_string(),
            subtitle: None,
            calories_per_day: calories,
            is_visible: true,
            is_selectable: true,
            warning_level: WarningLevel::None,
            warning_text: None,
            is_recommended: recommended,
            pace_lbs_per_week: None,
            eta_weeks: None,
            eta_date: None,
        }
    }
}
