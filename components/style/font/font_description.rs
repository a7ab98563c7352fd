/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A `font-weight` between 100 and 900 in steps of 100.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct FontWeight(u16);

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    /// Rounds `value` to the nearest valid weight.
    pub fn from_value(value: u16) -> Self {
        let clamped = value.clamp(100, 900);
        FontWeight((clamped + 50) / 100 * 100)
    }

    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn is_bold(self) -> bool {
        self.0 >= 600
    }

    /// <https://drafts.csswg.org/css-fonts/#relative-weights>
    pub fn bolder(self) -> Self {
        FontWeight(match self.0 {
            0..=300 => 400,
            301..=500 => 700,
            _ => 900,
        })
    }

    pub fn lighter(self) -> Self {
        FontWeight(match self.0 {
            0..=500 => 100,
            501..=700 => 400,
            _ => 700,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FontVariant {
    #[default]
    Normal,
    SmallCaps,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum FontStretch {
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    #[default]
    Normal,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GenericFamily {
    #[default]
    None,
    Standard,
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
}

impl GenericFamily {
    /// The family name a generic keyword maps to.
    pub fn family_name(self) -> Option<&'static str> {
        Some(match self {
            GenericFamily::None => return None,
            GenericFamily::Standard => "-webkit-standard",
            GenericFamily::Serif => "serif",
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Monospace => "monospace",
            GenericFamily::Cursive => "cursive",
            GenericFamily::Fantasy => "fantasy",
        })
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "-webkit-standard" => GenericFamily::Standard,
            "serif" => GenericFamily::Serif,
            "sans-serif" => GenericFamily::SansSerif,
            "monospace" => GenericFamily::Monospace,
            "cursive" => GenericFamily::Cursive,
            "fantasy" => GenericFamily::Fantasy,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TextRendering {
    #[default]
    Auto,
    OptimizeSpeed,
    OptimizeLegibility,
    GeometricPrecision,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FontSmoothingMode {
    #[default]
    Auto,
    None,
    Antialiased,
    SubpixelAntialiased,
}

/// The `font-family` list, in order of preference.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FontFamilyList(pub SmallVec<[String; 1]>);

impl FontFamilyList {
    pub fn single(family: &str) -> Self {
        FontFamilyList(SmallVec::from_elem(family.to_owned(), 1))
    }

    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Everything about a font that style resolution decides.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FontDescription {
    pub family: FontFamilyList,
    pub generic_family: GenericFamily,
    /// The size before zoom and minimum size rules.
    pub specified_size: f32,
    /// The size used to build the font.
    pub computed_size: f32,
    /// The `xx-small` through `-webkit-xxx-large` keyword the size came from,
    /// numbered 1 to 8, or 0 when the size was not a keyword.
    pub keyword_size: u8,
    /// Whether the size came from an explicit length, which opts out of the
    /// smart minimum size.
    pub is_absolute_size: bool,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub variant: FontVariant,
    pub stretch: FontStretch,
    pub text_rendering: TextRendering,
    pub font_smoothing: FontSmoothingMode,
    pub locale: String,
}

impl FontDescription {
    /// Whether keyword sizes resolve against the fixed-pitch default size.
    pub fn use_fixed_default_size(&self) -> bool {
        self.generic_family == GenericFamily::Monospace &&
            self.family.0.len() == 1 &&
            self.family.first() == GenericFamily::Monospace.family_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_weights() {
        assert_eq!(FontWeight::from_value(300).bolder(), FontWeight::NORMAL);
        assert_eq!(FontWeight::NORMAL.bolder(), FontWeight::BOLD);
        assert_eq!(FontWeight::from_value(800).bolder().value(), 900);
        assert_eq!(FontWeight::from_value(500).lighter().value(), 100);
        assert_eq!(FontWeight::BOLD.lighter(), FontWeight::NORMAL);
        assert_eq!(FontWeight::from_value(900).lighter(), FontWeight::BOLD);
    }

    #[test]
    fn fixed_default_size_needs_bare_monospace() {
        let mut description = FontDescription {
            generic_family: GenericFamily::Monospace,
            family: FontFamilyList::single("monospace"),
            ..Default::default()
        };
        assert!(description.use_fixed_default_size());
        description.family.0.push("Courier".to_owned());
        assert!(!description.use_fixed_default_size());
    }
}
