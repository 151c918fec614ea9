//! Rounding, clamping, and unit-conversion helpers
//!
//! All calorie rounding in the planning engine goes through these
//! functions so the step grids (10 for ranges, 25 for plans) stay in
//! one place.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Pounds per kilogram
const LB_PER_KG: Decimal = dec!(2.20462);

/// Convert kilograms to pounds
pub fn lb_from_kg(kg: Decimal) -> Decimal {
    kg * LB_PER_KG
}

/// Floor a value to the nearest lower multiple of `step`
pub fn floor_to_multiple(value: Decimal, step: u32) -> i32 {
    let step = Decimal::from(step);
    ((value / step).floor() * step).to_i32().unwrap_or(0)
}

/// Round a value up to the nearest higher multiple of `step`
pub fn ceil_to_multiple(value: Decimal, step: u32) -> i32 {
    let step = Decimal::from(step);
    ((value / step).ceil() * step).to_i32().unwrap_or(0)
}

/// Round a value to the nearest multiple of `step`, midpoints away
/// from zero
pub fn nearest_multiple(value: Decimal, step: u32) -> i32 {
    let step = Decimal::from(step);
    ((value / step).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * step)
        .to_i32()
        .unwrap_or(0)
}

/// Clamp an integer value into `[min, max]`, then floor it onto the
/// `step` grid. Bounds are expected to be multiples of `step` already
/// except possibly `max`, which floors down inside the range.
pub fn clamp_to_step(value: i32, min: i32, max: i32, step: u32) -> i32 {
    let clamped = value.clamp(min, max);
    floor_to_multiple(Decimal::from(clamped), step).max(min)
}

/// Round an integer value onto the `step` grid (nearest), then clamp
/// into `[min, max]`
pub fn step_then_clamp(value: Decimal, min: i32, max: i32, step: u32) -> i32 {
    nearest_multiple(value, step).clamp(min, max)
}

/// Whole days from `from` to `to`; negative when `to` precedes `from`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
