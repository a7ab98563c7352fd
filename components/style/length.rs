/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed lengths.
//!
//! A computed [`Length`] is either a resolved pixel value, a percentage of
//! some reference size not known until layout, a mix of both, or one of the
//! sizing keywords that layout resolves by itself.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::LayoutUnit;
use crate::values::animated::lerp_f32;

/// Whether an interpolated or calculated length may go negative.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ValueRange {
    #[default]
    All,
    NonNegative,
}

/// The discriminant of a [`Length`], used where only the kind matters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LengthType {
    Auto,
    Percent,
    Fixed,
    Intrinsic,
    MinIntrinsic,
    MinContent,
    MaxContent,
    FillAvailable,
    FitContent,
    Calculated,
    ExtendToZoom,
    DeviceWidth,
    DeviceHeight,
    MaxSizeNone,
}

/// `pixels + percent%`, the only shape of `calc()` that survives computation.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CalculationValue {
    pub pixels: f32,
    pub percent: f32,
    pub range: ValueRange,
}

impl CalculationValue {
    pub fn evaluate(&self, maximum: f32) -> f32 {
        let value = self.pixels + maximum * self.percent / 100.;
        match self.range {
            ValueRange::All => value,
            ValueRange::NonNegative => value.max(0.),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum Length {
    #[default]
    Auto,
    Percent(f32),
    Fixed(f32),
    Intrinsic,
    MinIntrinsic,
    MinContent,
    MaxContent,
    FillAvailable,
    FitContent,
    Calculated(CalculationValue),
    ExtendToZoom,
    DeviceWidth,
    DeviceHeight,
    MaxSizeNone,
}

impl Length {
    #[inline]
    pub const fn zero() -> Length {
        Length::Fixed(0.)
    }

    pub fn length_type(&self) -> LengthType {
        match *self {
            Length::Auto => LengthType::Auto,
            Length::Percent(_) => LengthType::Percent,
            Length::Fixed(_) => LengthType::Fixed,
            Length::Intrinsic => LengthType::Intrinsic,
            Length::MinIntrinsic => LengthType::MinIntrinsic,
            Length::MinContent => LengthType::MinContent,
            Length::MaxContent => LengthType::MaxContent,
            Length::FillAvailable => LengthType::FillAvailable,
            Length::FitContent => LengthType::FitContent,
            Length::Calculated(_) => LengthType::Calculated,
            Length::ExtendToZoom => LengthType::ExtendToZoom,
            Length::DeviceWidth => LengthType::DeviceWidth,
            Length::DeviceHeight => LengthType::DeviceHeight,
            Length::MaxSizeNone => LengthType::MaxSizeNone,
        }
    }

    /// The raw number of a fixed or percentage length, zero otherwise.
    #[inline]
    pub fn value(&self) -> f32 {
        match *self {
            Length::Fixed(value) | Length::Percent(value) => value,
            _ => 0.,
        }
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Length::Fixed(_))
    }

    #[inline]
    pub fn is_percent(&self) -> bool {
        matches!(self, Length::Percent(_))
    }

    #[inline]
    pub fn is_calculated(&self) -> bool {
        matches!(self, Length::Calculated(_))
    }

    #[inline]
    pub fn is_max_size_none(&self) -> bool {
        matches!(self, Length::MaxSizeNone)
    }

    /// Whether the value depends on a reference size.
    #[inline]
    pub fn is_percent_or_calculated(&self) -> bool {
        matches!(self, Length::Percent(_) | Length::Calculated(_))
    }

    /// Fixed, percentage or calculated: the kinds that can be interpolated.
    #[inline]
    pub fn is_specified(&self) -> bool {
        matches!(
            self,
            Length::Fixed(_) | Length::Percent(_) | Length::Calculated(_)
        )
    }

    #[inline]
    pub fn is_legacy_intrinsic(&self) -> bool {
        matches!(self, Length::Intrinsic | Length::MinIntrinsic)
    }

    #[inline]
    pub fn is_intrinsic(&self) -> bool {
        matches!(
            self,
            Length::MinContent | Length::MaxContent | Length::FillAvailable | Length::FitContent
        )
    }

    #[inline]
    pub fn is_intrinsic_or_auto(&self) -> bool {
        self.is_auto() || self.is_legacy_intrinsic() || self.is_intrinsic()
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Length::Fixed(value) | Length::Percent(value) => value == 0.,
            Length::Calculated(calc) => calc.pixels == 0. && calc.percent == 0.,
            _ => false,
        }
    }

    pub fn is_positive(&self) -> bool {
        match *self {
            Length::Fixed(value) | Length::Percent(value) => value > 0.,
            Length::Calculated(calc) => calc.pixels > 0. || calc.percent > 0.,
            _ => false,
        }
    }

    fn as_calculation(&self) -> (f32, f32) {
        match *self {
            Length::Fixed(value) => (value, 0.),
            Length::Percent(value) => (0., value),
            Length::Calculated(calc) => (calc.pixels, calc.percent),
            _ => (0., 0.),
        }
    }

    /// `calc(100% - self)`, used to express offsets from the far edge.
    pub fn subtract_from_one_hundred_percent(&self) -> Length {
        match *self {
            Length::Percent(value) => Length::Percent(100. - value),
            _ => {
                let (pixels, percent) = self.as_calculation();
                Length::Calculated(CalculationValue {
                    pixels: -pixels,
                    percent: 100. - percent,
                    range: ValueRange::All,
                })
            },
        }
    }

    /// Interpolates between two lengths.
    ///
    /// Only fixed, percentage and calculated lengths can be interpolated;
    /// keyword lengths snap to `to`. Mixing kinds yields a calculated length.
    pub fn blend(from: &Length, to: &Length, progress: f64, range: ValueRange) -> Length {
        if !from.is_specified() || !to.is_specified() {
            warn!("Blending non-interpolable lengths {from:?} and {to:?}");
            return *to;
        }

        if from.is_calculated() || to.is_calculated() {
            return Length::blend_mixed_types(from, to, progress, range);
        }

        if !from.is_zero() && !to.is_zero() && from.length_type() != to.length_type() {
            return Length::blend_mixed_types(from, to, progress, range);
        }

        if from.is_zero() && to.is_zero() {
            return *to;
        }

        let mut value = lerp_f32(from.value(), to.value(), progress);
        if range == ValueRange::NonNegative {
            value = value.max(0.);
        }
        // A zero endpoint takes the kind of the other endpoint.
        if to.is_zero() {
            Length::with_type_of(from, value)
        } else {
            Length::with_type_of(to, value)
        }
    }

    fn with_type_of(template: &Length, value: f32) -> Length {
        match template {
            Length::Percent(_) => Length::Percent(value),
            _ => Length::Fixed(value),
        }
    }

    fn blend_mixed_types(from: &Length, to: &Length, progress: f64, range: ValueRange) -> Length {
        let (from_pixels, from_percent) = from.as_calculation();
        let (to_pixels, to_percent) = to.as_calculation();
        Length::Calculated(CalculationValue {
            pixels: lerp_f32(from_pixels, to_pixels, progress),
            percent: lerp_f32(from_percent, to_percent, progress),
            range,
        })
    }
}

impl From<LayoutUnit> for Length {
    fn from(value: LayoutUnit) -> Length {
        Length::Fixed(value.to_f32())
    }
}

/// Resolves a length against `maximum` for use as a used size.
///
/// `auto` and `fill-available` take the whole of `maximum`.
pub fn value_for_length(length: &Length, maximum: LayoutUnit) -> LayoutUnit {
    match *length {
        Length::Fixed(_) | Length::Percent(_) | Length::Calculated(_) => {
            minimum_value_for_length(length, maximum)
        },
        Length::FillAvailable | Length::Auto => maximum,
        Length::MaxSizeNone => LayoutUnit::max(),
        Length::Intrinsic |
        Length::MinIntrinsic |
        Length::MinContent |
        Length::MaxContent |
        Length::FitContent => LayoutUnit::zero(),
        Length::ExtendToZoom | Length::DeviceWidth | Length::DeviceHeight => {
            debug_assert!(false, "{length:?} cannot be resolved to a value");
            LayoutUnit::zero()
        },
    }
}

/// Like [`value_for_length`], but keywords resolve to zero.
pub fn minimum_value_for_length(length: &Length, maximum: LayoutUnit) -> LayoutUnit {
    match *length {
        Length::Fixed(value) => LayoutUnit::from_f32(value),
        Length::Percent(percent) => LayoutUnit::from_f32(maximum.to_f32() * percent / 100.),
        Length::Calculated(calc) => LayoutUnit::from_f32(calc.evaluate(maximum.to_f32())),
        _ => LayoutUnit::zero(),
    }
}

/// Resolves a length against a floating point reference size.
pub fn float_value_for_length(length: &Length, maximum: f32) -> f32 {
    match *length {
        Length::Fixed(value) => value,
        Length::Percent(percent) => maximum * percent / 100.,
        Length::Calculated(calc) => calc.evaluate(maximum),
        Length::FillAvailable | Length::Auto => maximum,
        Length::MaxSizeNone => f32::MAX,
        _ => 0.,
    }
}

/// Lengths for the four sides of a box.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct LengthBox {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl LengthBox {
    #[inline]
    pub const fn new(top: Length, right: Length, bottom: Length, left: Length) -> Self {
        LengthBox {
            top,
            right,
            bottom,
            left,
        }
    }

    #[inline]
    pub const fn uniform(length: Length) -> Self {
        LengthBox::new(length, length, length, length)
    }

    #[inline]
    pub const fn zero() -> Self {
        LengthBox::uniform(Length::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.top.is_zero() && self.right.is_zero() && self.bottom.is_zero() && self.left.is_zero()
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct LengthSize {
    pub width: Length,
    pub height: Length,
}

impl LengthSize {
    #[inline]
    pub const fn new(width: Length, height: Length) -> Self {
        LengthSize { width, height }
    }

    #[inline]
    pub const fn zero() -> Self {
        LengthSize::new(Length::zero(), Length::zero())
    }

    pub fn blend(from: &LengthSize, to: &LengthSize, progress: f64, range: ValueRange) -> Self {
        LengthSize {
            width: Length::blend(&from.width, &to.width, progress, range),
            height: Length::blend(&from.height, &to.height, progress, range),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct LengthPoint {
    pub x: Length,
    pub y: Length,
}

impl LengthPoint {
    #[inline]
    pub const fn new(x: Length, y: Length) -> Self {
        LengthPoint { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_same_type() {
        let blended = Length::blend(&Length::Fixed(10.), &Length::Fixed(20.), 0.25, ValueRange::All);
        assert_eq!(blended, Length::Fixed(12.5));
    }

    #[test]
    fn blend_from_zero_keeps_other_type() {
        let blended = Length::blend(&Length::Fixed(0.), &Length::Percent(50.), 0.5, ValueRange::All);
        assert_eq!(blended, Length::Percent(25.));
    }

    #[test]
    fn blend_mixed_types_yields_calc() {
        let blended =
            Length::blend(&Length::Fixed(10.), &Length::Percent(50.), 0.5, ValueRange::All);
        match blended {
            Length::Calculated(calc) => {
                assert_eq!(calc.pixels, 5.);
                assert_eq!(calc.percent, 25.);
            },
            other => panic!("expected calc, got {other:?}"),
        }
        assert_eq!(
            value_for_length(&blended, LayoutUnit::from_int(100)),
            LayoutUnit::from_int(30)
        );
    }

    #[test]
    fn blend_clamps_non_negative() {
        let blended =
            Length::blend(&Length::Fixed(10.), &Length::Fixed(20.), -2., ValueRange::NonNegative);
        assert_eq!(blended, Length::Fixed(0.));
    }

    #[test]
    fn blend_keywords_snap() {
        let blended = Length::blend(&Length::Auto, &Length::Fixed(20.), 0.1, ValueRange::All);
        assert_eq!(blended, Length::Fixed(20.));
    }

    #[test]
    fn value_resolution() {
        let max = LayoutUnit::from_int(200);
        assert_eq!(value_for_length(&Length::Percent(25.), max), LayoutUnit::from_int(50));
        assert_eq!(value_for_length(&Length::Auto, max), max);
        assert_eq!(minimum_value_for_length(&Length::Auto, max), LayoutUnit::zero());
        assert_eq!(value_for_length(&Length::MaxSizeNone, max), LayoutUnit::max());
        assert_eq!(float_value_for_length(&Length::Fixed(3.5), 10.), 3.5);
    }

    #[test]
    fn far_edge_offsets() {
        assert_eq!(
            Length::Percent(30.).subtract_from_one_hundred_percent(),
            Length::Percent(70.)
        );
        let from_right = Length::Fixed(10.).subtract_from_one_hundred_percent();
        assert_eq!(float_value_for_length(&from_right, 100.), 90.);
    }

    #[test]
    fn intrinsic_or_auto() {
        assert!(Length::Auto.is_intrinsic_or_auto());
        assert!(Length::MinIntrinsic.is_intrinsic_or_auto());
        assert!(Length::FitContent.is_intrinsic_or_auto());
        assert!(!Length::Fixed(0.).is_intrinsic_or_auto());
        assert!(!Length::Percent(0.).is_intrinsic_or_auto());
    }
}
