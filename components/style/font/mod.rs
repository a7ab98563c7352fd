/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Font descriptions and the builder that resolves them during style
//! resolution.

mod font_builder;
mod font_description;
mod font_fallback;
mod font_size;

pub use self::font_builder::{FontBuilder, FontDescriptionChangeScope, FontSizeValue};
pub use self::font_description::{
    FontDescription, FontFamilyList, FontSmoothingMode, FontStretch, FontStyle, FontVariant,
    FontWeight, GenericFamily, TextRendering,
};
pub use self::font_fallback::{Font, FontFallbackList, FontSelector};
pub use self::font_size::{
    MAXIMUM_ALLOWED_FONT_SIZE, MEDIUM_KEYWORD_SIZE, computed_size_from_specified_size,
    font_size_for_keyword, larger_font_size, smaller_font_size,
};
