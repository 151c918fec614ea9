//! Daily nutrient target suggestions
//!
//! Independent of whichever calorie plan was chosen: each target is a
//! function of goal, weight, sex, and activity, with its own clamp
//! range and rounding step. Values are step-rounded, then clamped;
//! every record carries its slider bounds for rendering.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{ActivityLevel, BiometricProfile, GoalType, Sex};
use crate::units;

/// Protein grams per pound for the lower three activity tiers
const PROTEIN_PER_LB_BASE: Decimal = dec!(0.7);

/// Protein grams per pound for high-output tiers
const PROTEIN_PER_LB_HIGH: Decimal = dec!(0.85);

/// Weight above which the fiber target gets a bump, in pounds
const FIBER_WEIGHT_BUMP_LB: Decimal = dec!(190);

/// Water milliliters per kilogram of body weight
const WATER_ML_PER_KG: Decimal = dec!(35);

/// A single nutrient target with its slider bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientTarget {
    /// Suggested value, step-rounded and clamped
    pub value: i32,

    /// Slider lower bound
    pub min: i32,

    /// Slider upper bound
    pub max: i32,

    /// Slider step
    pub step: i32,
}

/// The full set of suggested daily targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientTargets {
    /// Minimum protein in grams
    pub protein_g_min: NutrientTarget,

    /// Minimum fiber in grams
    pub fiber_g_min: NutrientTarget,

    /// Maximum carbohydrate in grams
    pub carbs_g_max: NutrientTarget,

    /// Maximum added sugar in grams
    pub sugar_g_max: NutrientTarget,

    /// Maximum sodium in milligrams
    pub sodium_mg_max: NutrientTarget,

    /// Minimum water in milliliters
    pub water_ml_min: NutrientTarget,
}

/// Nutrient target derivation
pub struct NutrientAdvisor;

impl NutrientAdvisor {
    /// Suggest daily targets for a profile and goal.
    pub fn suggest(profile: &BiometricProfile, goal: GoalType) -> NutrientTargets {
        NutrientTargets {
            protein_g_min: Self::protein(profile),
            fiber_g_min: Self::fiber(profile),
            carbs_g_max: Self::carbs(profile, goal),
            sugar_g_max: Self::sugar(),
            sodium_mg_max: Self::sodium(profile),
            water_ml_min: Self::water(profile),
        }
    }

    fn protein(profile: &BiometricProfile) -> NutrientTarget {
        let per_lb = if profile.activity.is_high_output() {
            PROTEIN_PER_LB_HIGH
        } else {
            PROTEIN_PER_LB_BASE
        };
        Self::target(profile.weight_lb() * per_lb, 80, 250, 5)
    }

    fn fiber(profile: &BiometricProfile) -> NutrientTarget {
        let mut grams = match profile.sex {
            Sex::Female => 25,
            Sex::Male => 30,
            Sex::Unknown => 28,
        };
        if profile.weight_lb() > FIBER_WEIGHT_BUMP_LB {
            grams += 5;
        }
        if profile.activity.is_high_output() {
            grams += 3;
        }
        Self::target(Decimal::from(grams), 22, 45, 1)
    }

    fn carbs(profile: &BiometricProfile, goal: GoalType) -> NutrientTarget {
        let grams = match (goal, profile.activity) {
            (GoalType::Lose, ActivityLevel::Sedentary | ActivityLevel::Light) => 130,
            (GoalType::Lose, ActivityLevel::Moderate) => 170,
            (GoalType::Lose, _) => 220,
            (_, ActivityLevel::Sedentary | ActivityLevel::Light) => 220,
            (_, ActivityLevel::Moderate) => 260,
            (_, _) => 320,
        };
        Self::target(Decimal::from(grams), 100, 400, 10)
    }

    fn sugar() -> NutrientTarget {
        Self::target(dec!(40), 25, 70, 5)
    }

    fn sodium(profile: &BiometricProfile) -> NutrientTarget {
        let mg = if profile.activity.is_high_output() {
            2600
        } else {
            2300
        };
        Self::target(Decimal::from(mg), 1500, 3500, 100)
    }

    fn water(profile: &BiometricProfile) -> NutrientTarget {
        Self::target(profile.weight_kg * WATER_ML_PER_KG, 1500, 4000, 100)
    }

    fn target(raw: Decimal, min: i32, max: i32, step: u32) -> NutrientTarget {
        NutrientTarget {
            value: units::step_then_clamp(raw, min, max, step),
            min,
            max,
            step: step as i32,
        }
    }
}
