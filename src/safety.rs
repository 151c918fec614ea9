//! Calorie safety thresholds and warning classification
//!
//! The four-tier table below is the single source of truth for
//! weight-loss-style warnings; the maintain and recomp presets defer
//! to it at presentation time. Gain plans use a separate symmetric
//! advisory rule that never blocks selection.

use serde::{Deserialize, Serialize};

use crate::models::{MaintenanceRange, Sex, WarningLevel};

/// Absolute minimum: below this no plan is ever selectable
pub const HARD_HARD_STOP: i32 = 700;

/// Floor below which any plan carries at least a caution
pub const HARD_FLOOR: i32 = 1200;

/// Guidance floor for males
pub const SOFT_FLOOR_MALE: i32 = 1400;

/// Guidance floor for females
pub const SOFT_FLOOR_FEMALE: i32 = 1300;

/// Maintenance lower bound under which no safe deficit preset exists
pub const EXTREME_EDGE_CASE_THRESHOLD: i32 = 1100;

/// Surplus above the maintenance upper bound that triggers the gain
/// advisory
pub const GAIN_SURPLUS_WARNING_BAND: i32 = 700;

/// Guidance floor for a sex, 1350 for unknown (midpoint of the sex
/// floors)
pub fn soft_floor(sex: Sex) -> i32 {
    match sex {
        Sex::Male => SOFT_FLOOR_MALE,
        Sex::Female => SOFT_FLOOR_FEMALE,
        Sex::Unknown => (SOFT_FLOOR_MALE + SOFT_FLOOR_FEMALE) / 2,
    }
}

/// Selectability and warning tier for a candidate calorie value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    /// Whether the value may be selected at all
    pub selectable: bool,

    /// Warning tier
    pub warning_level: WarningLevel,

    /// Human-readable warning, when any
    pub warning_text: Option<String>,
}

impl SafetyVerdict {
    fn clear() -> Self {
        Self {
            selectable: true,
            warning_level: WarningLevel::None,
            warning_text: None,
        }
    }
}

/// Fixed-threshold calorie classification
pub struct SafetyClassifier;

impl SafetyClassifier {
    /// Classify a daily calorie value against the deficit thresholds.
    ///
    /// Tiers: below 700 unsafe and unselectable; 700-1000 red;
    /// 1001-1199 neutral caution; 1200 and above clear.
    pub fn classify(calories: i32) -> SafetyVerdict {
        if calories < HARD_HARD_STOP {
            SafetyVerdict {
                selectable: false,
                warning_level: WarningLevel::Unsafe,
                warning_text: Some(
                    "This intake is below the absolute safety minimum and cannot be selected."
                        .to_string(),
                ),
            }
        } else if calories <= 1000 {
            SafetyVerdict {
                selectable: true,
                warning_level: WarningLevel::Hard,
                warning_text: Some(
                    "Very low intake. Not advisable without medical supervision.".to_string(),
                ),
            }
        } else if calories < HARD_FLOOR {
            SafetyVerdict {
                selectable: true,
                warning_level: WarningLevel::Soft,
                warning_text: Some(
                    "Below the commonly recommended minimum for most adults.".to_string(),
                ),
            }
        } else {
            SafetyVerdict::clear()
        }
    }

    /// Advisory classification for gain targets: outside the band
    /// `[lower_maintenance, upper_maintenance + 700]` an orange
    /// advisory is attached, but selection is never blocked.
    pub fn classify_gain(calories: i32, maintenance: &MaintenanceRange) -> SafetyVerdict {
        if calories < maintenance.lower_maintenance {
            SafetyVerdict {
                selectable: true,
                warning_level: WarningLevel::Soft,
                warning_text: Some(
                    "Below your maintenance range; weight gain is unlikely at this intake."
                        .to_string(),
                ),
            }
        } else if calories > maintenance.upper_maintenance + GAIN_SURPLUS_WARNING_BAND {
            SafetyVerdict {
                selectable: true,
                warning_level: WarningLevel::Soft,
                warning_text: Some(
                    "Well above your maintenance range; expect a faster share of fat gain."
                        .to_string(),
                ),
            }
        } else {
            SafetyVerdict::clear()
        }
    }
}
