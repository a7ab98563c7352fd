/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use style::values::animated::{Animate, lerp_f64};
use style::values::filter::FilterOperations;
use style::values::transform::TransformOperations;

/// A resolved keyframe value.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimatableValue {
    Double(f64),
    Transform(TransformOperations),
    Filter(FilterOperations),
    /// A value that only animates discretely, kept as its serialization.
    Unknown(String),
}

impl AnimatableValue {
    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match *self {
            AnimatableValue::Double(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_transform(&self) -> Option<&TransformOperations> {
        match self {
            AnimatableValue::Transform(operations) => Some(operations),
            _ => None,
        }
    }

    #[inline]
    pub fn as_filter(&self) -> Option<&FilterOperations> {
        match self {
            AnimatableValue::Filter(operations) => Some(operations),
            _ => None,
        }
    }

    /// Interpolates between two values, swapping discretely at the halfway
    /// point when they cannot be blended.
    pub fn interpolate(from: &AnimatableValue, to: &AnimatableValue, fraction: f64) -> Self {
        from.animate(to, fraction)
            .unwrap_or_else(|()| if fraction < 0.5 { from.clone() } else { to.clone() })
    }
}

impl Animate for AnimatableValue {
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()> {
        match (self, other) {
            (AnimatableValue::Double(from), AnimatableValue::Double(to)) => {
                Ok(AnimatableValue::Double(lerp_f64(*from, *to, progress)))
            },
            (AnimatableValue::Transform(from), AnimatableValue::Transform(to)) => Ok(
                AnimatableValue::Transform(TransformOperations::blend(from, to, progress)),
            ),
            (AnimatableValue::Filter(from), AnimatableValue::Filter(to)) => Ok(
                AnimatableValue::Filter(FilterOperations::blend(from, to, progress)),
            ),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use style::values::transform::TransformOperation;

    use super::*;

    #[test]
    fn doubles_interpolate_linearly() {
        let from = AnimatableValue::Double(1.);
        let to = AnimatableValue::Double(0.);
        assert_eq!(
            AnimatableValue::interpolate(&from, &to, 0.25),
            AnimatableValue::Double(0.75)
        );
    }

    #[test]
    fn mismatched_kinds_swap_at_half() {
        let from = AnimatableValue::Double(1.);
        let to = AnimatableValue::Unknown("auto".to_owned());
        assert_eq!(AnimatableValue::interpolate(&from, &to, 0.49), from);
        assert_eq!(AnimatableValue::interpolate(&from, &to, 0.5), to);
    }

    #[test]
    fn transforms_blend() {
        let from = AnimatableValue::Transform(TransformOperations::new([
            TransformOperation::rotate_z(0.),
        ]));
        let to = AnimatableValue::Transform(TransformOperations::new([
            TransformOperation::rotate_z(90.),
        ]));
        let expected = TransformOperations::new([TransformOperation::rotate_z(45.)]);
        assert_eq!(
            AnimatableValue::interpolate(&from, &to, 0.5).as_transform(),
            Some(&expected)
        );
    }
}
