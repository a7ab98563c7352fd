/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use servo_arc::Arc;

use crate::color::StyleColor;
use crate::data_ref::data_equivalent;
use crate::length::Length;
use crate::render_style::constants::{
    Hyphens, ImageRendering, LineBreak, OverflowWrap, TextAlignLast, TextJustify,
    TextOrientation, TextSecurity, UserModify, UserSelect, WordBreak,
};
use crate::values::quotes::QuotesData;
use crate::values::shadow::ShadowList;
use crate::values::text_decoration::AppliedTextDecoration;

/// Inherited properties that most elements leave at their initial values.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRareInheritedData {
    pub text_stroke_color: StyleColor,
    pub text_stroke_width: f32,
    pub text_fill_color: StyleColor,
    pub text_emphasis_color: StyleColor,

    pub text_shadow: Option<Arc<ShadowList>>,
    pub quotes: Option<Arc<QuotesData>>,

    pub text_indent: Length,
    pub text_align_last: TextAlignLast,
    pub text_justify: TextJustify,
    pub text_orientation: TextOrientation,
    pub tab_size: u32,
    pub word_break: WordBreak,
    pub overflow_wrap: OverflowWrap,
    pub line_break: LineBreak,

    pub hyphens: Hyphens,
    /// `-1` means auto.
    pub hyphenation_limit_before: i16,
    pub hyphenation_limit_after: i16,
    pub hyphenation_limit_lines: i16,
    pub hyphenation_string: String,
    pub locale: String,

    /// `-webkit-line-box-contain` flags.
    pub line_box_contain: u8,
    pub effective_zoom: f32,

    /// Decorations accumulated from ancestors. `None` together with the
    /// simple underline flag on the style stands for a lone underline.
    pub applied_text_decorations: Option<Arc<Vec<AppliedTextDecoration>>>,

    pub user_modify: UserModify,
    pub user_select: UserSelect,
    pub image_rendering: ImageRendering,
    pub text_security: TextSecurity,
}

impl Default for StyleRareInheritedData {
    fn default() -> Self {
        StyleRareInheritedData {
            text_stroke_color: StyleColor::CurrentColor,
            text_stroke_width: 0.,
            text_fill_color: StyleColor::CurrentColor,
            text_emphasis_color: StyleColor::CurrentColor,
            text_shadow: None,
            quotes: None,
            text_indent: Length::zero(),
            text_align_last: TextAlignLast::Auto,
            text_justify: TextJustify::Auto,
            text_orientation: TextOrientation::VerticalRight,
            tab_size: 8,
            word_break: WordBreak::Normal,
            overflow_wrap: OverflowWrap::Normal,
            line_break: LineBreak::Auto,
            hyphens: Hyphens::Manual,
            hyphenation_limit_before: -1,
            hyphenation_limit_after: -1,
            hyphenation_limit_lines: -1,
            hyphenation_string: String::new(),
            locale: String::new(),
            line_box_contain: 0b0001_1110,
            effective_zoom: 1.,
            applied_text_decorations: None,
            user_modify: UserModify::ReadOnly,
            user_select: UserSelect::Text,
            image_rendering: ImageRendering::Auto,
            text_security: TextSecurity::None,
        }
    }
}

impl StyleRareInheritedData {
    pub fn shadow_data_equivalent(&self, other: &StyleRareInheritedData) -> bool {
        data_equivalent(self.text_shadow.as_ref(), other.text_shadow.as_ref())
    }

    pub fn quotes_data_equivalent(&self, other: &StyleRareInheritedData) -> bool {
        data_equivalent(self.quotes.as_ref(), other.quotes.as_ref())
    }
}
