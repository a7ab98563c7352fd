/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Borders and outlines.

use serde::{Deserialize, Serialize};

use crate::color::StyleColor;
use crate::length::LengthSize;
use crate::values::nine_piece_image::NinePieceImage;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum BorderStyle {
    #[default]
    None,
    Hidden,
    Inset,
    Groove,
    Outset,
    Ridge,
    Dotted,
    Dashed,
    Solid,
    Double,
}

impl BorderStyle {
    /// Whether a border with this style takes up space.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, BorderStyle::None | BorderStyle::Hidden)
    }
}

/// One side of a border.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BorderValue {
    pub color: StyleColor,
    pub width: f32,
    pub style: BorderStyle,
    /// Set for `outline-style: auto`.
    pub is_auto: bool,
}

impl Default for BorderValue {
    fn default() -> Self {
        BorderValue {
            color: StyleColor::CurrentColor,
            width: 3.,
            style: BorderStyle::None,
            is_auto: false,
        }
    }
}

impl BorderValue {
    pub fn non_zero(&self, check_style: bool) -> bool {
        self.width != 0. && (!check_style || self.style != BorderStyle::None)
    }

    pub fn is_transparent(&self) -> bool {
        match self.color {
            StyleColor::Color(color) => color.is_transparent(),
            StyleColor::CurrentColor => false,
        }
    }

    pub fn is_visible(&self, check_style: bool) -> bool {
        self.non_zero(check_style) &&
            !self.is_transparent() &&
            (!check_style || self.style != BorderStyle::Hidden)
    }

    /// Equality that treats all invisible `none` borders (and all `hidden`
    /// ones) as the same, whatever their width or color.
    pub fn visually_equal(&self, other: &BorderValue) -> bool {
        if self.style == BorderStyle::None && other.style == BorderStyle::None {
            return true;
        }
        if self.style == BorderStyle::Hidden && other.style == BorderStyle::Hidden {
            return true;
        }
        self == other
    }
}

/// A computed outline: a border value plus an offset.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct OutlineValue {
    pub border: BorderValue,
    pub offset: i32,
}

impl OutlineValue {
    /// All `none` outlines are equivalent; otherwise every field matters.
    pub fn visually_equal(&self, other: &OutlineValue) -> bool {
        if self.border.style == BorderStyle::None && other.border.style == BorderStyle::None {
            return true;
        }
        self == other
    }

    #[inline]
    pub fn style(&self) -> BorderStyle {
        self.border.style
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.border.is_visible(true)
    }
}

/// All four sides of a border plus its image and corner radii.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderData {
    pub left: BorderValue,
    pub right: BorderValue,
    pub top: BorderValue,
    pub bottom: BorderValue,
    pub image: NinePieceImage,
    pub top_left: LengthSize,
    pub top_right: LengthSize,
    pub bottom_left: LengthSize,
    pub bottom_right: LengthSize,
}

impl Default for BorderData {
    fn default() -> Self {
        BorderData {
            left: BorderValue::default(),
            right: BorderValue::default(),
            top: BorderValue::default(),
            bottom: BorderValue::default(),
            image: NinePieceImage::default(),
            top_left: LengthSize::zero(),
            top_right: LengthSize::zero(),
            bottom_left: LengthSize::zero(),
            bottom_right: LengthSize::zero(),
        }
    }
}

macro_rules! border_width {
    ($name:ident, $side:ident) => {
        /// The width of this side. `none` and `hidden` borders have no width
        /// unless a border image paints over them.
        pub fn $name(&self) -> f32 {
            if !self.image.has_image() && !self.$side.style.is_visible() {
                return 0.;
            }
            self.$side.width
        }
    };
}

impl BorderData {
    border_width!(border_left_width, left);
    border_width!(border_right_width, right);
    border_width!(border_top_width, top);
    border_width!(border_bottom_width, bottom);

    pub fn has_border(&self) -> bool {
        let check_style = !self.image.has_image();
        self.left.non_zero(check_style) ||
            self.right.non_zero(check_style) ||
            self.top.non_zero(check_style) ||
            self.bottom.non_zero(check_style)
    }

    pub fn has_border_radius(&self) -> bool {
        [
            &self.top_left,
            &self.top_right,
            &self.bottom_left,
            &self.bottom_right,
        ]
        .into_iter()
        .any(|radius| !radius.width.is_zero())
    }

    /// Whether the used widths of all four sides match.
    pub fn size_equals(&self, other: &BorderData) -> bool {
        self.border_left_width() == other.border_left_width() &&
            self.border_top_width() == other.border_top_width() &&
            self.border_right_width() == other.border_right_width() &&
            self.border_bottom_width() == other.border_bottom_width()
    }

    /// Equality in which invisible sides compare equal.
    pub fn visually_equal(&self, other: &BorderData) -> bool {
        self.left.visually_equal(&other.left) &&
            self.right.visually_equal(&other.right) &&
            self.top.visually_equal(&other.top) &&
            self.bottom.visually_equal(&other.bottom) &&
            self.image == other.image &&
            self.top_left == other.top_left &&
            self.top_right == other.top_right &&
            self.bottom_left == other.bottom_left &&
            self.bottom_right == other.bottom_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn side(width: f32, style: BorderStyle) -> BorderValue {
        BorderValue {
            width,
            style,
            ..Default::default()
        }
    }

    #[test]
    fn none_borders_are_visually_equal() {
        let a = side(1., BorderStyle::None);
        let b = BorderValue {
            color: Color::WHITE.into(),
            ..side(5., BorderStyle::None)
        };
        assert_ne!(a, b);
        assert!(a.visually_equal(&b));
        assert!(!a.visually_equal(&side(1., BorderStyle::Solid)));
    }

    #[test]
    fn invisible_styles_have_no_width() {
        let mut border = BorderData::default();
        border.left = side(4., BorderStyle::Hidden);
        border.right = side(4., BorderStyle::Solid);
        assert_eq!(border.border_left_width(), 0.);
        assert_eq!(border.border_right_width(), 4.);
        assert!(border.has_border());
    }

    #[test]
    fn size_equality_ignores_color() {
        let mut a = BorderData::default();
        a.top = side(2., BorderStyle::Solid);
        let mut b = a.clone();
        b.top.color = Color::WHITE.into();
        assert!(a.size_equals(&b));
        assert!(!a.visually_equal(&b));
    }
}
