/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::color::Color;
use crate::font::Font;
use crate::length::Length;

/// Commonly used inherited properties.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleInheritedData {
    pub horizontal_border_spacing: i16,
    pub vertical_border_spacing: i16,
    /// `line-height`; a negative percentage stands for `normal`.
    pub line_height: Length,
    pub font: Font,
    pub color: Color,
}

impl Default for StyleInheritedData {
    fn default() -> Self {
        StyleInheritedData {
            horizontal_border_spacing: 0,
            vertical_border_spacing: 0,
            line_height: Length::Percent(-100.),
            font: Font::default(),
            color: Color::BLACK,
        }
    }
}
