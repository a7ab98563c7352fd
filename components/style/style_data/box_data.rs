/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::length::Length;
use crate::render_style::constants::BoxSizing;

/// Box sizes and stacking.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleBoxData {
    pub width: Length,
    pub height: Length,
    pub min_width: Length,
    pub max_width: Length,
    pub min_height: Length,
    pub max_height: Length,
    /// The offset of `vertical-align: <length>`.
    pub vertical_align: Length,
    pub z_index: i32,
    pub has_auto_z_index: bool,
    pub box_sizing: BoxSizing,
}

impl Default for StyleBoxData {
    fn default() -> Self {
        StyleBoxData {
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::zero(),
            max_width: Length::MaxSizeNone,
            min_height: Length::zero(),
            max_height: Length::MaxSizeNone,
            vertical_align: Length::zero(),
            z_index: 0,
            has_auto_z_index: true,
            box_sizing: BoxSizing::ContentBox,
        }
    }
}
