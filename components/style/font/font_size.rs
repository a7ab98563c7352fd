/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Font size keywords and the minimum font size rules.

use style_config::FontSettings;

/// Larger sizes are clamped to keep font backends from failing.
pub const MAXIMUM_ALLOWED_FONT_SIZE: f32 = 1_000_000.;

/// The keyword index of `medium`.
pub const MEDIUM_KEYWORD_SIZE: u8 = 4;

const FONT_SIZE_TABLE_MIN: i32 = 9;
const FONT_SIZE_TABLE_MAX: i32 = 16;

// Keyword sizes for each default font size from 9 to 16 pixels. Columns run
// from xx-small to -webkit-xxx-large.
const STRICT_FONT_SIZE_TABLE: [[u8; 8]; 8] = [
    [9, 9, 9, 9, 11, 14, 18, 27],
    [9, 9, 9, 10, 12, 15, 20, 30],
    [9, 9, 10, 11, 13, 17, 22, 33],
    [9, 9, 10, 12, 14, 18, 24, 36],
    [9, 10, 12, 13, 14, 18, 24, 39],
    [9, 10, 12, 14, 17, 20, 26, 42],
    [9, 10, 13, 15, 18, 23, 30, 45],
    [9, 10, 13, 16, 18, 24, 32, 48],
];

const QUIRKS_FONT_SIZE_TABLE: [[u8; 8]; 8] = [
    [9, 9, 9, 9, 11, 14, 18, 28],
    [9, 9, 9, 10, 12, 15, 20, 31],
    [9, 9, 9, 11, 13, 17, 22, 34],
    [9, 9, 10, 12, 14, 18, 24, 37],
    [9, 9, 10, 13, 16, 20, 26, 40],
    [9, 9, 11, 14, 17, 21, 28, 42],
    [9, 10, 12, 15, 17, 23, 30, 45],
    [9, 10, 13, 16, 18, 24, 32, 48],
];

// Scale factors for default sizes outside of the tables.
const FONT_SIZE_FACTORS: [f32; 8] = [0.60, 0.75, 0.89, 1.0, 1.2, 1.5, 2.0, 3.0];

/// Resolves a size keyword, numbered 1 (`xx-small`) to 8
/// (`-webkit-xxx-large`), against the configured default size.
pub fn font_size_for_keyword(
    settings: &FontSettings,
    keyword: u8,
    use_fixed_default_size: bool,
) -> f32 {
    debug_assert!((1..=8).contains(&keyword), "invalid keyword size {keyword}");
    let column = usize::from(keyword.clamp(1, 8) - 1);
    let medium_size = if use_fixed_default_size {
        settings.default_fixed_font_size
    } else {
        settings.default_font_size
    };

    if (FONT_SIZE_TABLE_MIN..=FONT_SIZE_TABLE_MAX).contains(&medium_size) {
        let row = (medium_size - FONT_SIZE_TABLE_MIN) as usize;
        let table = if settings.quirks_mode {
            &QUIRKS_FONT_SIZE_TABLE
        } else {
            &STRICT_FONT_SIZE_TABLE
        };
        return table[row][column] as f32;
    }

    let minimum_logical_size = settings.minimum_logical_font_size.max(1) as f32;
    (FONT_SIZE_FACTORS[column] * medium_size as f32).max(minimum_logical_size)
}

/// `font-size: larger`.
#[inline]
pub fn larger_font_size(size: f32) -> f32 {
    size * 1.2
}

/// `font-size: smaller`.
#[inline]
pub fn smaller_font_size(size: f32) -> f32 {
    size / 1.2
}

/// Applies zoom and the minimum font size settings to a specified size.
///
/// The hard minimum applies to every font. The smart minimum applies only
/// when the page could not know the size it would get (keywords and
/// percentages), or when the requested size was already above it.
pub fn computed_size_from_specified_size(
    settings: &FontSettings,
    zoom_factor: f32,
    is_absolute_size: bool,
    specified_size: f32,
    use_smart_minimum: bool,
) -> f32 {
    // Zero sized text is invisible and exempt from minimums.
    if specified_size.abs() < f32::EPSILON {
        return 0.;
    }

    let minimum_size = settings.minimum_font_size as f32;
    let minimum_logical_size = settings.minimum_logical_font_size as f32;
    let mut zoomed_size = specified_size * zoom_factor;

    if zoomed_size < minimum_size {
        zoomed_size = minimum_size;
    }

    if use_smart_minimum &&
        zoomed_size < minimum_logical_size &&
        (specified_size >= minimum_logical_size || !is_absolute_size)
    {
        zoomed_size = minimum_logical_size;
    }

    zoomed_size.min(MAXIMUM_ALLOWED_FONT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_matches_the_default_size() {
        let settings = FontSettings::default();
        assert_eq!(font_size_for_keyword(&settings, MEDIUM_KEYWORD_SIZE, false), 16.);
        assert_eq!(font_size_for_keyword(&settings, MEDIUM_KEYWORD_SIZE, true), 13.);
        assert_eq!(font_size_for_keyword(&settings, 1, false), 9.);
        assert_eq!(font_size_for_keyword(&settings, 8, false), 48.);
    }

    #[test]
    fn quirks_table_differs() {
        let settings = FontSettings {
            quirks_mode: true,
            default_font_size: 12,
            ..Default::default()
        };
        assert_eq!(font_size_for_keyword(&settings, 8, false), 37.);
    }

    #[test]
    fn sizes_outside_the_table_scale() {
        let settings = FontSettings {
            default_font_size: 20,
            ..Default::default()
        };
        assert_eq!(font_size_for_keyword(&settings, 8, false), 60.);
        assert_eq!(font_size_for_keyword(&settings, 1, false), 12.);
    }

    #[test]
    fn minimum_size_rules() {
        let settings = FontSettings {
            minimum_font_size: 4,
            minimum_logical_font_size: 6,
            ..Default::default()
        };
        assert_eq!(computed_size_from_specified_size(&settings, 1., true, 0., true), 0.);
        assert_eq!(computed_size_from_specified_size(&settings, 1., true, 2., true), 4.);
        // Explicit small pixel sizes are respected by the smart minimum.
        assert_eq!(computed_size_from_specified_size(&settings, 1., true, 5., true), 5.);
        assert_eq!(computed_size_from_specified_size(&settings, 1., false, 5., true), 6.);
        assert_eq!(computed_size_from_specified_size(&settings, 2., true, 10., true), 20.);
        assert_eq!(
            computed_size_from_specified_size(&settings, 1., true, 2e7, true),
            MAXIMUM_ALLOWED_FONT_SIZE
        );
    }
}
