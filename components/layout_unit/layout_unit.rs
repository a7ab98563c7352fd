/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use euclid::num::Zero;
use serde::{Deserialize, Serialize};

/// The number of fractional bits in a [`LayoutUnit`].
pub const LAYOUT_UNIT_FRACTIONAL_BITS: u32 = 6;

/// The number of layout units in a pixel.
pub const FIXED_POINT_DENOMINATOR: i32 = 1 << LAYOUT_UNIT_FRACTIONAL_BITS;

/// The largest integer that can be represented as a whole number of pixels.
pub const INT_MAX_FOR_LAYOUT_UNIT: i32 = i32::MAX / FIXED_POINT_DENOMINATOR;

/// The smallest integer that can be represented as a whole number of pixels.
pub const INT_MIN_FOR_LAYOUT_UNIT: i32 = i32::MIN / FIXED_POINT_DENOMINATOR;

#[inline]
fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// A signed fixed-point number with 1/64 pixel resolution.
///
/// Construction from integers or floats that fall outside of the representable
/// range clamps to the closest bound, and so does every arithmetic operator.
#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct LayoutUnit(i32);

impl Zero for LayoutUnit {
    #[inline]
    fn zero() -> LayoutUnit {
        LayoutUnit(0)
    }
}

impl fmt::Debug for LayoutUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}px", self.to_f64())
    }
}

impl fmt::Display for LayoutUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl LayoutUnit {
    #[inline]
    pub const fn zero() -> LayoutUnit {
        LayoutUnit(0)
    }

    #[inline]
    pub const fn from_raw_value(raw: i32) -> LayoutUnit {
        LayoutUnit(raw)
    }

    #[inline]
    pub const fn raw_value(self) -> i32 {
        self.0
    }

    /// Creates a layout unit from a whole number of pixels, saturating when the
    /// value does not fit in 26 integral bits.
    #[inline]
    pub const fn from_int(value: i32) -> LayoutUnit {
        if value > INT_MAX_FOR_LAYOUT_UNIT {
            LayoutUnit(i32::MAX)
        } else if value < INT_MIN_FOR_LAYOUT_UNIT {
            LayoutUnit(i32::MIN)
        } else {
            LayoutUnit(value * FIXED_POINT_DENOMINATOR)
        }
    }

    #[inline]
    pub const fn from_unsigned(value: u32) -> LayoutUnit {
        if value > INT_MAX_FOR_LAYOUT_UNIT as u32 {
            LayoutUnit(i32::MAX)
        } else {
            LayoutUnit(value as i32 * FIXED_POINT_DENOMINATOR)
        }
    }

    /// Creates a layout unit from a float, truncating towards zero to the
    /// nearest 1/64. NaN maps to zero.
    #[inline]
    pub fn from_f32(value: f32) -> LayoutUnit {
        LayoutUnit::from_f64(value as f64)
    }

    #[inline]
    pub fn from_f64(value: f64) -> LayoutUnit {
        // Float to int casts saturate.
        LayoutUnit((value * FIXED_POINT_DENOMINATOR as f64) as i32)
    }

    #[inline]
    pub fn from_float_ceil(value: f32) -> LayoutUnit {
        LayoutUnit(((value as f64) * FIXED_POINT_DENOMINATOR as f64).ceil() as i32)
    }

    #[inline]
    pub fn from_float_floor(value: f32) -> LayoutUnit {
        LayoutUnit(((value as f64) * FIXED_POINT_DENOMINATOR as f64).floor() as i32)
    }

    /// Creates a layout unit from a float, rounding half away from zero to the
    /// nearest 1/64.
    #[inline]
    pub fn from_float_round(value: f32) -> LayoutUnit {
        let half_epsilon = 0.5 / FIXED_POINT_DENOMINATOR as f64;
        let value = value as f64;
        if value >= 0.0 {
            LayoutUnit::from_f64(value + half_epsilon)
        } else {
            LayoutUnit::from_f64(value - half_epsilon)
        }
    }

    /// The smallest positive representable value.
    #[inline]
    pub const fn epsilon() -> LayoutUnit {
        LayoutUnit(1)
    }

    #[inline]
    pub const fn max() -> LayoutUnit {
        LayoutUnit(i32::MAX)
    }

    #[inline]
    pub const fn min() -> LayoutUnit {
        LayoutUnit(i32::MIN)
    }

    /// A value close to the maximum that still leaves room for rounding up to
    /// a whole pixel without saturating.
    #[inline]
    pub const fn nearly_max() -> LayoutUnit {
        LayoutUnit(i32::MAX - FIXED_POINT_DENOMINATOR / 2)
    }

    #[inline]
    pub const fn nearly_min() -> LayoutUnit {
        LayoutUnit(i32::MIN + FIXED_POINT_DENOMINATOR / 2)
    }

    /// Rounds towards zero.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 / FIXED_POINT_DENOMINATOR
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / FIXED_POINT_DENOMINATOR as f32
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_POINT_DENOMINATOR as f64
    }

    #[inline]
    pub fn ceil_to_f32(self) -> f32 {
        let ceiled = (self.0 as f32 / FIXED_POINT_DENOMINATOR as f32).ceil();
        ceiled.min(INT_MAX_FOR_LAYOUT_UNIT as f32)
    }

    #[inline]
    pub const fn is_int(self) -> bool {
        self.0 % FIXED_POINT_DENOMINATOR == 0
    }

    /// Rounds to the nearest whole pixel, with ties going away from zero.
    #[inline]
    pub const fn round(self) -> i32 {
        let half = FIXED_POINT_DENOMINATOR / 2;
        if self.0 >= 0 {
            self.0.saturating_add(half) / FIXED_POINT_DENOMINATOR
        } else {
            self.0.saturating_sub(half) / FIXED_POINT_DENOMINATOR
        }
    }

    #[inline]
    pub const fn ceil(self) -> i32 {
        if self.0 >= i32::MAX - FIXED_POINT_DENOMINATOR + 1 {
            return INT_MAX_FOR_LAYOUT_UNIT;
        }
        if self.0 >= 0 {
            (self.0 + FIXED_POINT_DENOMINATOR - 1) / FIXED_POINT_DENOMINATOR
        } else {
            self.to_int()
        }
    }

    #[inline]
    pub const fn floor(self) -> i32 {
        if self.0 <= i32::MIN + FIXED_POINT_DENOMINATOR - 1 {
            return INT_MIN_FOR_LAYOUT_UNIT;
        }
        self.0 >> LAYOUT_UNIT_FRACTIONAL_BITS
    }

    /// The sub-pixel part of this value. Carries the sign of `self`.
    #[inline]
    pub const fn fraction(self) -> LayoutUnit {
        LayoutUnit(self.0 % FIXED_POINT_DENOMINATOR)
    }

    #[inline]
    pub const fn abs(self) -> LayoutUnit {
        LayoutUnit(self.0.saturating_abs())
    }

    #[inline]
    pub fn clamp_negative_to_zero(self) -> LayoutUnit {
        if self.0 < 0 { LayoutUnit(0) } else { self }
    }

    #[inline]
    pub fn clamp_positive_to_zero(self) -> LayoutUnit {
        if self.0 > 0 { LayoutUnit(0) } else { self }
    }

    /// Whether this value sits on one of the saturation bounds, which usually
    /// means that some earlier computation overflowed.
    #[inline]
    pub const fn might_be_saturated(self) -> bool {
        self.0 == i32::MAX || self.0 == i32::MIN
    }

    #[inline]
    pub fn scale_by(self, factor: f32) -> LayoutUnit {
        LayoutUnit::from_f64(self.to_f64() * factor as f64)
    }
}

/// Snaps `size` to whole pixels so that the result does not depend on the
/// sub-pixel part of `location`.
#[inline]
pub fn snap_size_to_pixel(size: LayoutUnit, location: LayoutUnit) -> i32 {
    let fraction = location.fraction();
    (fraction + size).round() - fraction.round()
}

impl LayoutUnit {
    #[inline]
    pub fn snap_size_to_pixel(self, location: LayoutUnit) -> i32 {
        snap_size_to_pixel(self, location)
    }
}

impl From<i32> for LayoutUnit {
    #[inline]
    fn from(value: i32) -> LayoutUnit {
        LayoutUnit::from_int(value)
    }
}

impl From<u32> for LayoutUnit {
    #[inline]
    fn from(value: u32) -> LayoutUnit {
        LayoutUnit::from_unsigned(value)
    }
}

impl From<f32> for LayoutUnit {
    #[inline]
    fn from(value: f32) -> LayoutUnit {
        LayoutUnit::from_f32(value)
    }
}

impl From<f64> for LayoutUnit {
    #[inline]
    fn from(value: f64) -> LayoutUnit {
        LayoutUnit::from_f64(value)
    }
}

impl Add for LayoutUnit {
    type Output = LayoutUnit;

    #[inline]
    fn add(self, other: LayoutUnit) -> LayoutUnit {
        LayoutUnit(self.0.saturating_add(other.0))
    }
}

impl Sub for LayoutUnit {
    type Output = LayoutUnit;

    #[inline]
    fn sub(self, other: LayoutUnit) -> LayoutUnit {
        LayoutUnit(self.0.saturating_sub(other.0))
    }
}

impl Neg for LayoutUnit {
    type Output = LayoutUnit;

    #[inline]
    fn neg(self) -> LayoutUnit {
        LayoutUnit(self.0.saturating_neg())
    }
}

impl Mul for LayoutUnit {
    type Output = LayoutUnit;

    #[inline]
    fn mul(self, other: LayoutUnit) -> LayoutUnit {
        let product = (self.0 as i64 * other.0 as i64) >> LAYOUT_UNIT_FRACTIONAL_BITS;
        LayoutUnit(clamp_to_i32(product))
    }
}

impl Mul<i32> for LayoutUnit {
    type Output = LayoutUnit;

    #[inline]
    fn mul(self, other: i32) -> LayoutUnit {
        LayoutUnit(clamp_to_i32(self.0 as i64 * other as i64))
    }
}

impl Mul<f32> for LayoutUnit {
    type Output = f32;

    #[inline]
    fn mul(self, other: f32) -> f32 {
        self.to_f32() * other
    }
}

impl Mul<f64> for LayoutUnit {
    type Output = f64;

    #[inline]
    fn mul(self, other: f64) -> f64 {
        self.to_f64() * other
    }
}

impl Div for LayoutUnit {
    type Output = LayoutUnit;

    /// Division by zero saturates towards the sign of the dividend.
    #[inline]
    fn div(self, other: LayoutUnit) -> LayoutUnit {
        if other.0 == 0 {
            return saturate_by_sign(self.0);
        }
        let quotient = ((self.0 as i64) << LAYOUT_UNIT_FRACTIONAL_BITS) / other.0 as i64;
        LayoutUnit(clamp_to_i32(quotient))
    }
}

impl Div<i32> for LayoutUnit {
    type Output = LayoutUnit;

    #[inline]
    fn div(self, other: i32) -> LayoutUnit {
        if other == 0 {
            return saturate_by_sign(self.0);
        }
        LayoutUnit(clamp_to_i32(self.0 as i64 / other as i64))
    }
}

impl Div<f32> for LayoutUnit {
    type Output = f32;

    #[inline]
    fn div(self, other: f32) -> f32 {
        self.to_f32() / other
    }
}

#[inline]
fn saturate_by_sign(raw: i32) -> LayoutUnit {
    match raw.signum() {
        1 => LayoutUnit::max(),
        -1 => LayoutUnit::min(),
        _ => LayoutUnit::zero(),
    }
}

impl AddAssign for LayoutUnit {
    #[inline]
    fn add_assign(&mut self, other: LayoutUnit) {
        *self = *self + other;
    }
}

impl SubAssign for LayoutUnit {
    #[inline]
    fn sub_assign(&mut self, other: LayoutUnit) {
        *self = *self - other;
    }
}

impl MulAssign<i32> for LayoutUnit {
    #[inline]
    fn mul_assign(&mut self, other: i32) {
        *self = *self * other;
    }
}

impl DivAssign<i32> for LayoutUnit {
    #[inline]
    fn div_assign(&mut self, other: i32) {
        *self = *self / other;
    }
}

impl std::iter::Sum for LayoutUnit {
    fn sum<I: Iterator<Item = LayoutUnit>>(iter: I) -> LayoutUnit {
        iter.fold(LayoutUnit::zero(), Add::add)
    }
}
