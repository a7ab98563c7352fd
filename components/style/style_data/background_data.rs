/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::color::{Color, StyleColor};
use crate::values::border::OutlineValue;
use crate::values::fill_layer::{FillLayerType, FillLayers};

#[derive(Clone, Debug, PartialEq)]
pub struct StyleBackgroundData {
    pub background: FillLayers,
    pub color: StyleColor,
    pub outline: OutlineValue,
}

impl Default for StyleBackgroundData {
    fn default() -> Self {
        StyleBackgroundData {
            background: FillLayers::new(FillLayerType::Background),
            color: StyleColor::Color(Color::TRANSPARENT),
            outline: OutlineValue::default(),
        }
    }
}

impl StyleBackgroundData {
    /// Equality as far as painting is concerned. Outlines that are not drawn
    /// compare equal whatever their other values.
    pub fn visually_equal(&self, other: &StyleBackgroundData) -> bool {
        self.background == other.background &&
            self.color == other.color &&
            self.outline.visually_equal(&other.outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::border::BorderStyle;

    #[test]
    fn hidden_outline_changes_are_not_visual() {
        let a = StyleBackgroundData::default();
        let mut b = a.clone();
        b.outline.border.width = 10.;
        assert_ne!(a, b);
        assert!(a.visually_equal(&b));

        b.outline.border.style = BorderStyle::Solid;
        assert!(!a.visually_equal(&b));
    }
}
