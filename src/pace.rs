//! Pace and ETA projection
//!
//! Converts a daily calorie delta against the maintenance midpoint
//! into a weekly pace in pounds and a whole-week arrival date.
//! Degenerate cases (no delta toward the goal, no weight to move)
//! return `None` rather than NaN or infinity.

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::units;

/// Calories per pound of body weight
const CALORIES_PER_LB: Decimal = dec!(3600);

/// Days per week
const DAYS_PER_WEEK: Decimal = dec!(7);

/// Weekly pace and arrival projection toward a target weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceProjection {
    /// Pace toward the goal in pounds per week, always positive,
    /// rounded to two decimals
    pub pace_lbs_per_week: Decimal,

    /// Whole weeks needed, always rounded up
    pub eta_weeks: i64,

    /// Projected arrival date (`today + eta_weeks * 7` days)
    pub eta_date: NaiveDate,
}

/// Pace and ETA calculation
pub struct PaceCalculator;

impl PaceCalculator {
    /// Project pace and arrival for a chosen calorie value.
    ///
    /// The daily delta is `calories - maintenance_mid`. A deficit
    /// moving toward a lower target weight, or a surplus moving toward
    /// a higher one, yields a positive pace; anything else yields
    /// `None`.
    pub fn project(
        maintenance_mid: Decimal,
        calories_per_day: i32,
        current_weight_kg: Decimal,
        target_weight_kg: Decimal,
        today: NaiveDate,
    ) -> Option<PaceProjection> {
        let daily_delta = Decimal::from(calories_per_day) - maintenance_mid;

        // Orient both the calorie delta and the weight delta toward
        // the goal so a positive pace always means progress.
        let (pace_delta, weight_delta_kg) = if target_weight_kg < current_weight_kg {
            (-daily_delta, current_weight_kg - target_weight_kg)
        } else if target_weight_kg > current_weight_kg {
            (daily_delta, target_weight_kg - current_weight_kg)
        } else {
            return None;
        };

        let pace = pace_delta * DAYS_PER_WEEK / CALORIES_PER_LB;
        if pace <= Decimal::ZERO {
            return None;
        }

        Self::eta_from_pace(pace, units::lb_from_kg(weight_delta_kg), today)
    }

    /// Arrival projection for an already-known pace toward the goal.
    ///
    /// `eta_weeks = ceil(weight_delta_lb / pace)`, i.e. days-needed
    /// rounded up to a whole week; the date never under-promises.
    pub fn eta_from_pace(
        pace_lbs_per_week: Decimal,
        weight_delta_lb: Decimal,
        today: NaiveDate,
    ) -> Option<PaceProjection> {
        if pace_lbs_per_week <= Decimal::ZERO || weight_delta_lb <= Decimal::ZERO {
            return None;
        }

        let eta_weeks = (weight_delta_lb / pace_lbs_per_week).ceil().to_i64()?;
        let eta_date = today + Duration::days(eta_weeks * 7);

        Some(PaceProjection {
            pace_lbs_per_week: pace_lbs_per_week.round_dp(2),
            eta_weeks,
            eta_date,
        })
    }
}
