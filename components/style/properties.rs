/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Identifiers for the CSS properties that animations refer to.

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
pub enum CssPropertyId {
    BackgroundColor,
    BorderBottomWidth,
    BorderLeftWidth,
    BorderRightWidth,
    BorderTopWidth,
    Bottom,
    BoxShadow,
    ClipPath,
    Color,
    FontSize,
    Height,
    Left,
    LineHeight,
    MarginBottom,
    MarginLeft,
    MarginRight,
    MarginTop,
    Opacity,
    OutlineColor,
    Right,
    TextShadow,
    Top,
    Transform,
    #[strum(serialize = "-webkit-filter")]
    WebkitFilter,
    Width,
    ZIndex,
}

impl CssPropertyId {
    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether a compositor can animate this property without involving the
    /// main thread.
    #[inline]
    pub fn is_compositable(self) -> bool {
        matches!(
            self,
            CssPropertyId::Opacity | CssPropertyId::Transform | CssPropertyId::WebkitFilter
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn names_round_trip() {
        assert_eq!(CssPropertyId::BackgroundColor.name(), "background-color");
        assert_eq!(CssPropertyId::WebkitFilter.name(), "-webkit-filter");
        assert_eq!(CssPropertyId::from_str("z-index"), Ok(CssPropertyId::ZIndex));
        assert!(CssPropertyId::from_str("float").is_err());
    }
}
