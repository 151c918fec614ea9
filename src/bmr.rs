//! Basal metabolic rate estimation
//!
//! Always computes the Mifflin-St Jeor estimate; when a usable
//! body-fat percentage is available, blends in Katch-McArdle for a
//! lean-mass-aware figure. The published bounds are a range rather
//! than a point estimate: the lower bound takes a contingency haircut
//! so downstream deficits never assume a best-case metabolism.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BiometricProfile, BmrMethod, BmrRange, Sex};
use crate::units;

/// Fraction removed from the raw estimate to form the lower bound
pub const BMR_CONTINGENCY: Decimal = dec!(0.05);

/// Body-fat percentages outside this range are ignored
const BODY_FAT_MIN: Decimal = dec!(5);
const BODY_FAT_MAX: Decimal = dec!(60);

/// Mifflin weight in the blended estimate
const BLEND_MIFFLIN_WEIGHT: Decimal = dec!(0.7);

/// Katch weight in the blended estimate
const BLEND_KATCH_WEIGHT: Decimal = dec!(0.3);

/// BMR estimation algorithms
pub struct BmrEstimator;

impl BmrEstimator {
    /// Estimate the basal metabolic rate range for a profile.
    ///
    /// Degenerate inputs (zero weight, extreme ages) propagate as
    /// extreme but well-defined numbers; validation is the caller's
    /// responsibility.
    pub fn compute(profile: &BiometricProfile) -> BmrRange {
        let mifflin = Self::mifflin_st_jeor(profile);

        let katch = profile
            .body_fat_percent
            .filter(|bf| *bf >= BODY_FAT_MIN && *bf <= BODY_FAT_MAX)
            .map(|bf| Self::katch_mcardle(profile.weight_kg, bf));

        let (raw_bmr, method, used_body_fat) = match katch {
            Some(katch) => (
                BLEND_MIFFLIN_WEIGHT * mifflin + BLEND_KATCH_WEIGHT * katch,
                BmrMethod::Blend,
                true,
            ),
            None => (mifflin, BmrMethod::Mifflin, false),
        };

        let lower_bmr = units::floor_to_multiple(raw_bmr * (Decimal::ONE - BMR_CONTINGENCY), 10);
        let upper_bmr = units::floor_to_multiple(raw_bmr, 10);

        BmrRange {
            raw_bmr,
            lower_bmr,
            upper_bmr,
            method,
            used_body_fat,
        }
    }

    /// Mifflin-St Jeor: `10*kg + 6.25*cm - 5*age` plus a sex offset of
    /// +5 (male), -161 (female), or -78 (unknown, the midpoint of the
    /// sex offsets).
    fn mifflin_st_jeor(profile: &BiometricProfile) -> Decimal {
        let offset = match profile.sex {
            Sex::Male => dec!(5),
            Sex::Female => dec!(-161),
            Sex::Unknown => dec!(-78),
        };

        dec!(10) * profile.weight_kg
            + dec!(6.25) * Decimal::from(profile.height_cm)
            - dec!(5) * Decimal::from(profile.age)
            + offset
    }

    /// Katch-McArdle: `370 + 21.6 * lean_mass_kg`
    fn katch_mcardle(weight_kg: Decimal, body_fat_percent: Decimal) -> Decimal {
        let lean_mass = weight_kg * (Decimal::ONE - body_fat_percent / dec!(100));
        dec!(370) + dec!(21.6) * lean_mass
    }
}
