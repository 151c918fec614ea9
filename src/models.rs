use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::units;

/// Errors raised when parsing user-supplied strings into model enums
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown sex: {0} (expected male, female, or unknown)")]
    UnknownSex(String),
    #[error("Unknown activity level: {0} (expected sedentary, light, moderate, high, or very_high)")]
    UnknownActivity(String),
    #[error("Unknown goal type: {0} (expected lose, maintain, recomp, or gain)")]
    UnknownGoal(String),
}

/// Sex at birth, as used by the metabolic equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    pub fn from_str(s: &str) -> Result<Self, ParseError> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "unknown" | "other" | "unspecified" => Ok(Self::Unknown),
            _ => Err(ParseError::UnknownSex(s.to_string())),
        }
    }

    /// Lenient variant used at the config boundary: unrecognized
    /// strings degrade to `Unknown` instead of failing the load.
    pub fn from_str_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|_| {
            tracing::warn!(value = %s, "Unrecognized sex string, treating as unknown");
            Self::Unknown
        })
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Ordinal activity tiers used by the maintenance multiplier table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    High,
    VeryHigh,
}

impl ActivityLevel {
    pub fn from_str(s: &str) -> Result<Self, ParseError> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" | "lightly_active" => Ok(Self::Light),
            "moderate" | "moderately_active" => Ok(Self::Moderate),
            "high" | "very_active" => Ok(Self::High),
            "very_high" | "extra_active" => Ok(Self::VeryHigh),
            _ => Err(ParseError::UnknownActivity(s.to_string())),
        }
    }

    /// Lenient variant used at the config boundary: unrecognized
    /// strings fall back to the sedentary multiplier.
    pub fn from_str_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|_| {
            tracing::warn!(value = %s, "Unrecognized activity string, treating as sedentary");
            Self::Sedentary
        })
    }

    /// True for the two tiers treated as high-output in the nutrient
    /// and maintenance rules.
    pub fn is_high_output(self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        };
        write!(f, "{}", s)
    }
}

/// Planning goal, dispatched exhaustively by the plan suggester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Lose,
    Maintain,
    Recomp,
    Gain,
}

impl GoalType {
    pub fn from_str(s: &str) -> Result<Self, ParseError> {
        match s.to_lowercase().as_str() {
            "lose" | "loss" | "cut" => Ok(Self::Lose),
            "maintain" | "maintenance" => Ok(Self::Maintain),
            "recomp" | "recomposition" => Ok(Self::Recomp),
            "gain" | "bulk" => Ok(Self::Gain),
            _ => Err(ParseError::UnknownGoal(s.to_string())),
        }
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Recomp => "recomp",
            Self::Gain => "gain",
        };
        write!(f, "{}", s)
    }
}

/// Immutable biometric input, supplied fresh per calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    /// Sex at birth
    pub sex: Sex,

    /// Age in whole years
    pub age: u16,

    /// Height in centimeters
    pub height_cm: u16,

    /// Weight in kilograms
    pub weight_kg: Decimal,

    /// Body-fat percentage; values outside 5-60 are ignored
    pub body_fat_percent: Option<Decimal>,

    /// Self-reported activity tier
    pub activity: ActivityLevel,
}

impl BiometricProfile {
    /// Weight converted to pounds
    pub fn weight_lb(&self) -> Decimal {
        units::lb_from_kg(self.weight_kg)
    }
}

/// Method that produced a BMR estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmrMethod {
    /// Mifflin-St Jeor only
    Mifflin,
    /// Katch-McArdle only
    Katch,
    /// 70/30 Mifflin/Katch weighted blend
    Blend,
}

/// Basal metabolic rate estimate as a range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrRange {
    /// Unrounded estimate straight from the equations
    pub raw_bmr: Decimal,

    /// Contingency-reduced lower bound, floored to a multiple of 10
    pub lower_bmr: i32,

    /// Unreduced estimate floored to a multiple of 10
    pub upper_bmr: i32,

    /// Equation(s) used
    pub method: BmrMethod,

    /// Whether a valid body-fat percentage contributed
    pub used_body_fat: bool,
}

/// Maintenance-calorie range with its activity breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRange {
    /// Lower maintenance bound (lower BMR + lower activity calories)
    pub lower_maintenance: i32,

    /// Upper maintenance bound (upper BMR + upper activity calories)
    pub upper_maintenance: i32,

    /// Lower BMR bound
    pub lower_bmr: i32,

    /// Upper BMR bound
    pub upper_bmr: i32,

    /// Contingency-reduced activity calories, floored to 10
    pub lower_activity_calories: i32,

    /// Unreduced activity calories, floored to 10
    pub upper_activity_calories: i32,

    /// Multiplier applied for the activity tier
    pub activity_multiplier: Decimal,

    /// BMR estimation method
    pub bmr_method: BmrMethod,

    /// Whether body fat contributed to the BMR estimate
    pub used_body_fat: bool,

    /// Unrounded lower bound, kept for the maintain/recomp presets
    pub raw_lower: Decimal,

    /// Unrounded upper bound, kept for the maintain/recomp presets
    pub raw_upper: Decimal,
}

impl MaintenanceRange {
    /// Arithmetic midpoint of the rounded bounds
    pub fn midpoint(&self) -> Decimal {
        Decimal::from(self.lower_maintenance + self.upper_maintenance) / Decimal::from(2)
    }
}

/// Warning severity attached to a calorie value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    /// No warning
    None,
    /// Neutral caution (orange advisory for gain)
    Soft,
    /// Strong warning (red)
    Hard,
    /// Below the absolute minimum; never selectable
    Unsafe,
}

impl WarningLevel {
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Stable identifier for a generated plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKey {
    Aggressive,
    Standard,
    MoreSustainable,
    CautiousMinimum,
    #[serde(rename = "sustainable_floor_1200")]
    SustainableFloor1200,
    LeanerSide,
    Maintain,
    Flexible,
    RecompLeanerSide,
    RecompStandard,
    RecompFlexible,
    GainLean,
    GainModerate,
    GainFast,
    Custom,
}

impl PlanKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Standard => "standard",
            Self::MoreSustainable => "more_sustainable",
            Self::CautiousMinimum => "cautious_minimum",
            Self::SustainableFloor1200 => "sustainable_floor_1200",
            Self::LeanerSide => "leaner_side",
            Self::Maintain => "maintain",
            Self::Flexible => "flexible",
            Self::RecompLeanerSide => "recomp_leaner_side",
            Self::RecompStandard => "recomp_standard",
            Self::RecompFlexible => "recomp_flexible",
            Self::GainLean => "gain_lean",
            Self::GainModerate => "gain_moderate",
            Self::GainFast => "gain_fast",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for PlanKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome flag for a generated plan set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    /// Normal plan set
    Ok,
    /// No safe preset exists; only custom entry is offered
    ExtremeEdgeCase,
}

/// A named daily calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Stable key for selection and lookups
    pub key: PlanKey,

    /// Display title
    pub title: String,

    /// Optional display subtitle
    pub subtitle: Option<String>,

    /// Daily calorie target
    pub calories_per_day: i32,

    /// Whether the plan should be offered at all
    pub is_visible: bool,

    /// Whether the plan may be selected
    pub is_selectable: bool,

    /// Warning tier for this calorie value
    pub warning_level: WarningLevel,

    /// Human-readable warning, when any
    pub warning_text: Option<String>,

    /// At most one plan per set carries this flag
    pub is_recommended: bool,

    /// Projected pace toward the goal, positive when moving toward it
    pub pace_lbs_per_week: Option<Decimal>,

    /// Whole weeks to reach the target weight
    pub eta_weeks: Option<i64>,

    /// Projected arrival date
    pub eta_date: Option<NaiveDate>,
}

/// Inclusive slider range for a manually chosen calorie target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBounds {
    /// Lower bound, never below the hard stop
    pub min: i32,

    /// Upper bound
    pub max: i32,
}

impl CustomBounds {
    /// Clamp a manual calorie value into the bounds, then floor it to
    /// the 25-calorie step grid.
    pub fn clamp(&self, value: i32) -> i32 {
        units::clamp_to_step(value, self.min, self.max, 25)
    }
}
