/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::length::LengthBox;
use crate::values::text_decoration::TextDecoration;

#[derive(Clone, Debug, PartialEq)]
pub struct StyleVisualData {
    pub clip: LengthBox,
    pub has_auto_clip: bool,
    /// The decorations declared on this element, not the inherited ones.
    pub text_decoration: TextDecoration,
    pub zoom: f32,
}

impl Default for StyleVisualData {
    fn default() -> Self {
        StyleVisualData {
            clip: LengthBox::default(),
            has_auto_clip: true,
            text_decoration: TextDecoration::empty(),
            zoom: 1.,
        }
    }
}
