/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `box-shadow` and `text-shadow` values.

use euclid::default::SideOffsets2D;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::values::animated::{Animate, ToAnimatedZero, lerp_f32};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ShadowStyle {
    #[default]
    Normal,
    Inset,
}

/// A single shadow.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ShadowData {
    pub x: f32,
    pub y: f32,
    pub blur: f32,
    pub spread: f32,
    pub style: ShadowStyle,
    pub color: Color,
}

impl ShadowData {
    pub fn new(x: f32, y: f32, blur: f32, spread: f32, style: ShadowStyle, color: Color) -> Self {
        ShadowData {
            x,
            y,
            blur,
            spread,
            style,
            color,
        }
    }

    /// A shadow of `style` that paints nothing; lists of different lengths
    /// are padded with these before interpolating.
    pub fn neutral_value(style: ShadowStyle) -> Self {
        ShadowData::new(0., 0., 0., 0., style, Color::TRANSPARENT)
    }

    /// Interpolates towards `to`. Shadows of different styles do not
    /// interpolate; the result is `to`.
    pub fn blend(from: &ShadowData, to: &ShadowData, progress: f64) -> ShadowData {
        if from.style != to.style {
            return *to;
        }

        ShadowData {
            x: lerp_f32(from.x, to.x, progress),
            y: lerp_f32(from.y, to.y, progress),
            blur: lerp_f32(from.blur, to.blur, progress).max(0.),
            spread: lerp_f32(from.spread, to.spread, progress),
            style: to.style,
            color: Color::blend(from.color, to.color, progress),
        }
    }

    /// How far the painted shadow reaches past the border box.
    #[inline]
    pub fn extent(&self) -> f32 {
        self.blur + self.spread
    }
}

impl Animate for ShadowData {
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()> {
        if self.style != other.style {
            return Err(());
        }
        Ok(ShadowData::blend(self, other, progress))
    }
}

impl ToAnimatedZero for ShadowData {
    fn to_animated_zero(&self) -> Result<Self, ()> {
        Ok(ShadowData::neutral_value(self.style))
    }
}

/// Shadows in declaration order. The first shadow is painted on top, so
/// painting walks the list backwards.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ShadowList(pub Vec<ShadowData>);

impl ShadowList {
    pub fn new(shadows: Vec<ShadowData>) -> Self {
        ShadowList(shadows)
    }

    #[inline]
    pub fn shadows(&self) -> &[ShadowData] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shadows in the order they are painted, bottom-most first.
    pub fn paint_order(&self) -> impl Iterator<Item = &ShadowData> {
        self.0.iter().rev()
    }

    pub fn has_inset(&self) -> bool {
        self.0.iter().any(|shadow| shadow.style == ShadowStyle::Inset)
    }

    /// Interpolates two lists. The shorter list is padded with neutral
    /// shadows matching the style of the other list's entries.
    pub fn blend(from: Option<&ShadowList>, to: Option<&ShadowList>, progress: f64) -> ShadowList {
        let empty: [ShadowData; 0] = [];
        let from = from.map_or(&empty[..], |list| list.shadows());
        let to = to.map_or(&empty[..], |list| list.shadows());
        let length = from.len().max(to.len());
        let shadows = (0..length)
            .filter_map(|index| match (from.get(index), to.get(index)) {
                (Some(from), Some(to)) => Some(ShadowData::blend(from, to, progress)),
                (Some(from), None) => Some(ShadowData::blend(
                    from,
                    &ShadowData::neutral_value(from.style),
                    progress,
                )),
                (None, Some(to)) => Some(ShadowData::blend(
                    &ShadowData::neutral_value(to.style),
                    to,
                    progress,
                )),
                (None, None) => None,
            })
            .collect();
        ShadowList(shadows)
    }

    /// The distance outer shadows extend past each edge of the box. Each
    /// component is non-negative.
    pub fn rect_outsets(&self) -> SideOffsets2D<f32> {
        let mut top = 0f32;
        let mut right = 0f32;
        let mut bottom = 0f32;
        let mut left = 0f32;
        for shadow in self
            .0
            .iter()
            .filter(|shadow| shadow.style == ShadowStyle::Normal)
        {
            let extent = shadow.extent();
            top = top.min(shadow.y - extent);
            right = right.max(shadow.x + extent);
            bottom = bottom.max(shadow.y + extent);
            left = left.min(shadow.x - extent);
        }
        SideOffsets2D::new(-top, right, bottom, -left)
    }
}
