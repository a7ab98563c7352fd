/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed colors.

use serde::{Deserialize, Serialize};

use crate::values::animated::{Animate, ToAnimatedZero};

/// An 8-bit sRGB color with straight (non premultiplied) alpha.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color::rgba(red, green, blue, 255)
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.alpha < 255
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha == 0
    }

    /// Interpolates in premultiplied space so that fading to transparent does
    /// not drift towards black.
    pub fn blend(from: Color, to: Color, progress: f64) -> Color {
        if progress <= 0. {
            return from;
        }
        if progress >= 1. {
            return to;
        }

        let lerp = |a: f64, b: f64| a + (b - a) * progress;
        let from_alpha = from.alpha as f64 / 255.;
        let to_alpha = to.alpha as f64 / 255.;
        let alpha = lerp(from_alpha, to_alpha);
        if alpha <= 0. {
            return Color::TRANSPARENT;
        }

        let channel = |a: u8, b: u8| {
            let premultiplied = lerp(a as f64 * from_alpha, b as f64 * to_alpha);
            (premultiplied / alpha).round().clamp(0., 255.) as u8
        };
        Color::rgba(
            channel(from.red, to.red),
            channel(from.green, to.green),
            channel(from.blue, to.blue),
            (alpha * 255.).round().clamp(0., 255.) as u8,
        )
    }
}

impl Animate for Color {
    #[inline]
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()> {
        Ok(Color::blend(*self, *other, progress))
    }
}

impl ToAnimatedZero for Color {
    #[inline]
    fn to_animated_zero(&self) -> Result<Self, ()> {
        Ok(Color::TRANSPARENT)
    }
}

/// A color as specified, which may defer to the element's `color`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum StyleColor {
    #[default]
    CurrentColor,
    Color(Color),
}

impl StyleColor {
    #[inline]
    pub fn is_current_color(&self) -> bool {
        matches!(self, StyleColor::CurrentColor)
    }

    #[inline]
    pub fn resolve(&self, current_color: Color) -> Color {
        match *self {
            StyleColor::CurrentColor => current_color,
            StyleColor::Color(color) => color,
        }
    }
}

impl From<Color> for StyleColor {
    #[inline]
    fn from(color: Color) -> Self {
        StyleColor::Color(color)
    }
}
