/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::length::LengthBox;
use crate::values::border::BorderData;

/// Offsets, margins, padding and borders.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSurroundData {
    pub offset: LengthBox,
    pub margin: LengthBox,
    pub padding: LengthBox,
    pub border: BorderData,
}

impl Default for StyleSurroundData {
    fn default() -> Self {
        StyleSurroundData {
            offset: LengthBox::default(),
            margin: LengthBox::zero(),
            padding: LengthBox::zero(),
            border: BorderData::default(),
        }
    }
}
