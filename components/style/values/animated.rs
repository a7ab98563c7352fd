/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Interpolation of computed values.

use crate::LayoutUnit;

/// A value that can be interpolated towards another value of the same type.
///
/// `progress` is usually in `[0, 1]` but timing functions with overshoot can
/// push it outside of that range. Returns `Err(())` when the two values cannot
/// be interpolated, in which case callers fall back to a discrete swap.
pub trait Animate: Sized {
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()>;
}

/// The neutral value used to pad lists of different lengths before
/// interpolating them.
pub trait ToAnimatedZero: Sized {
    fn to_animated_zero(&self) -> Result<Self, ()>;
}

#[inline]
pub fn lerp_f64(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

#[inline]
pub fn lerp_f32(from: f32, to: f32, progress: f64) -> f32 {
    lerp_f64(from as f64, to as f64, progress) as f32
}

#[inline]
pub fn lerp_i32(from: i32, to: i32, progress: f64) -> i32 {
    lerp_f64(from as f64, to as f64, progress).round() as i32
}

impl Animate for f64 {
    #[inline]
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()> {
        Ok(lerp_f64(*self, *other, progress))
    }
}

impl Animate for f32 {
    #[inline]
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()> {
        Ok(lerp_f32(*self, *other, progress))
    }
}

impl Animate for LayoutUnit {
    #[inline]
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()> {
        Ok(LayoutUnit::from_f64(lerp_f64(
            self.to_f64(),
            other.to_f64(),
            progress,
        )))
    }
}

impl ToAnimatedZero for f64 {
    #[inline]
    fn to_animated_zero(&self) -> Result<Self, ()> {
        Ok(0.)
    }
}

impl ToAnimatedZero for f32 {
    #[inline]
    fn to_animated_zero(&self) -> Result<Self, ()> {
        Ok(0.)
    }
}
