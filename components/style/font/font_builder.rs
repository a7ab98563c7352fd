/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Incremental construction of a style's font during style resolution.

use std::ops::{Deref, DerefMut};

use log::debug;
use style_config::FontSettings;

use super::font_description::{FontDescription, FontFamilyList, GenericFamily};
use super::font_fallback::FontSelector;
use super::font_size::{
    MAXIMUM_ALLOWED_FONT_SIZE, MEDIUM_KEYWORD_SIZE, computed_size_from_specified_size,
    font_size_for_keyword, larger_font_size, smaller_font_size,
};
use super::{FontSmoothingMode, FontStretch, FontStyle, FontVariant, FontWeight, TextRendering};
use crate::render_style::RenderStyle;

/// A resolved `font-size` declaration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FontSizeValue {
    /// `xx-small` (1) through `-webkit-xxx-large` (8).
    Keyword(u8),
    Larger,
    Smaller,
    /// An absolute length in pixels.
    Px(f32),
    /// A multiple of the parent's size.
    Em(f32),
    Percentage(f32),
}

/// Builds the font of one style, deferring the font object itself until
/// [`FontBuilder::create_font`].
///
/// Each setter changes the style's font description immediately, and records
/// whether anything actually changed so that an untouched font is never
/// rebuilt.
pub struct FontBuilder<'a> {
    style: &'a mut RenderStyle,
    settings: FontSettings,
    font_dirty: bool,
}

/// Edits the font description of the builder's style. The edited copy is
/// written back when the scope is dropped, marking the builder dirty if the
/// description changed.
pub struct FontDescriptionChangeScope<'b, 'a> {
    builder: &'b mut FontBuilder<'a>,
    description: FontDescription,
}

impl<'b, 'a> FontDescriptionChangeScope<'b, 'a> {
    fn new(builder: &'b mut FontBuilder<'a>) -> Self {
        let description = builder.style.font_description().clone();
        FontDescriptionChangeScope {
            builder,
            description,
        }
    }

    /// Starts over from an empty description.
    pub fn reset(&mut self) {
        self.description = FontDescription::default();
    }

    #[inline]
    pub fn settings(&self) -> &FontSettings {
        &self.builder.settings
    }
}

impl Deref for FontDescriptionChangeScope<'_, '_> {
    type Target = FontDescription;

    fn deref(&self) -> &FontDescription {
        &self.description
    }
}

impl DerefMut for FontDescriptionChangeScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut FontDescription {
        &mut self.description
    }
}

impl Drop for FontDescriptionChangeScope<'_, '_> {
    fn drop(&mut self) {
        let description = std::mem::take(&mut self.description);
        let changed = self.builder.style.set_font_description(description);
        self.builder.font_dirty |= changed;
    }
}

impl<'a> FontBuilder<'a> {
    pub fn new(style: &'a mut RenderStyle, settings: FontSettings) -> Self {
        FontBuilder {
            style,
            settings,
            font_dirty: false,
        }
    }

    #[inline]
    pub fn font_dirty(&self) -> bool {
        self.font_dirty
    }

    #[inline]
    pub fn style(&self) -> &RenderStyle {
        &*self.style
    }

    pub fn change_scope<'b>(&'b mut self) -> FontDescriptionChangeScope<'b, 'a> {
        FontDescriptionChangeScope::new(self)
    }

    /// Marks the font dirty after a zoom change, which affects the computed
    /// size without touching the description.
    pub fn did_change_effective_zoom(&mut self, changed: bool) {
        self.font_dirty |= changed;
    }

    /// Resets the description to the document defaults.
    pub fn set_initial(&mut self) {
        self.change_scope().reset();
        self.set_font_family_initial();
        self.set_font_size_initial();
    }

    pub fn inherit_from(&mut self, parent: &FontDescription) {
        let mut scope = self.change_scope();
        *scope = parent.clone();
    }

    pub fn set_font_family_initial(&mut self) {
        let mut scope = self.change_scope();
        let standard = scope.settings().standard_font_family.clone();
        scope.family = FontFamilyList::single(&standard);
        scope.generic_family = GenericFamily::Standard;
    }

    pub fn set_font_family_inherit(&mut self, parent: &FontDescription) {
        let mut scope = self.change_scope();
        scope.family = parent.family.clone();
        scope.generic_family = parent.generic_family;
    }

    /// Applies a `font-family` list. Generic keywords keep their keyword
    /// as the family name and set the generic family; the last one wins.
    ///
    /// When the size came from a keyword and the list switches between the
    /// fixed and the proportional default size, the size is recomputed
    /// against the new default.
    pub fn set_font_family_value(&mut self, families: &[&str]) {
        if families.is_empty() {
            return;
        }
        let mut scope = self.change_scope();
        let old_used_fixed_default_size = scope.use_fixed_default_size();

        let mut generic_family = GenericFamily::None;
        let mut list = FontFamilyList::default();
        for family in families {
            if let Some(generic) = GenericFamily::from_keyword(family) {
                generic_family = generic;
                let name = match generic {
                    GenericFamily::Standard => scope.settings().standard_font_family.clone(),
                    _ => (*family).to_owned(),
                };
                list.0.push(name);
            } else {
                list.0.push((*family).to_owned());
            }
        }
        scope.family = list;
        scope.generic_family = generic_family;

        let keyword = scope.keyword_size;
        if keyword != 0 && scope.use_fixed_default_size() != old_used_fixed_default_size {
            let size = font_size_for_keyword(scope.settings(), keyword, !old_used_fixed_default_size);
            scope.specified_size = size;
        }
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.change_scope().weight = weight;
    }

    pub fn set_weight_bolder(&mut self) {
        let mut scope = self.change_scope();
        scope.weight = scope.weight.bolder();
    }

    pub fn set_weight_lighter(&mut self) {
        let mut scope = self.change_scope();
        scope.weight = scope.weight.lighter();
    }

    pub fn set_style(&mut self, style: FontStyle) {
        self.change_scope().style = style;
    }

    pub fn set_variant(&mut self, variant: FontVariant) {
        self.change_scope().variant = variant;
    }

    pub fn set_stretch(&mut self, stretch: FontStretch) {
        self.change_scope().stretch = stretch;
    }

    pub fn set_text_rendering(&mut self, text_rendering: TextRendering) {
        self.change_scope().text_rendering = text_rendering;
    }

    pub fn set_font_smoothing(&mut self, font_smoothing: FontSmoothingMode) {
        self.change_scope().font_smoothing = font_smoothing;
    }

    pub fn set_locale(&mut self, locale: &str) {
        let mut scope = self.change_scope();
        if scope.locale != locale {
            scope.locale = locale.to_owned();
        }
    }

    pub fn set_font_size_initial(&mut self) {
        let mut scope = self.change_scope();
        let size = font_size_for_keyword(
            scope.settings(),
            MEDIUM_KEYWORD_SIZE,
            scope.use_fixed_default_size(),
        );
        scope.keyword_size = MEDIUM_KEYWORD_SIZE;
        scope.specified_size = size;
        scope.is_absolute_size = false;
    }

    pub fn set_font_size_inherit(&mut self, parent: &FontDescription) {
        if parent.specified_size < 0. {
            return;
        }
        let mut scope = self.change_scope();
        scope.keyword_size = parent.keyword_size;
        scope.specified_size = parent.specified_size;
        scope.is_absolute_size = parent.is_absolute_size;
    }

    /// Applies a `font-size` declaration relative to the parent's font.
    ///
    /// A size stays absolute, and exempt from the smart minimum, when it is
    /// an explicit length or is derived from a parent that was absolute.
    /// Negative sizes are ignored.
    pub fn set_font_size_value(&mut self, value: FontSizeValue, parent: &FontDescription) {
        let mut scope = self.change_scope();
        let parent_is_absolute_size = parent.is_absolute_size;

        let size = match value {
            FontSizeValue::Keyword(keyword) => {
                let keyword = keyword.clamp(1, 8);
                scope.keyword_size = keyword;
                scope.is_absolute_size = false;
                font_size_for_keyword(scope.settings(), keyword, scope.use_fixed_default_size())
            },
            FontSizeValue::Larger | FontSizeValue::Smaller => {
                scope.keyword_size = 0;
                scope.is_absolute_size = parent_is_absolute_size;
                if value == FontSizeValue::Larger {
                    larger_font_size(parent.computed_size)
                } else {
                    smaller_font_size(parent.computed_size)
                }
            },
            FontSizeValue::Px(px) => {
                scope.keyword_size = 0;
                scope.is_absolute_size = true;
                px
            },
            FontSizeValue::Em(em) => {
                scope.keyword_size = 0;
                scope.is_absolute_size = parent_is_absolute_size;
                em * parent.specified_size
            },
            FontSizeValue::Percentage(percentage) => {
                scope.keyword_size = 0;
                scope.is_absolute_size = parent_is_absolute_size;
                percentage * parent.computed_size / 100.
            },
        };

        if size < 0. {
            debug!("Ignoring negative font size {size}");
            // The scope still writes back the keyword and absolute-size
            // flags, so restore the original description.
            let original = scope.builder.style.font_description().clone();
            *scope = original;
            return;
        }
        scope.specified_size = size.min(MAXIMUM_ALLOWED_FONT_SIZE);
    }

    /// Rescales a non-absolute size when the family switched between
    /// monospace and proportional relative to the parent.
    pub fn check_for_generic_family_change(
        &self,
        parent: &FontDescription,
        description: &mut FontDescription,
    ) {
        if description.is_absolute_size {
            return;
        }
        if description.use_fixed_default_size() == parent.use_fixed_default_size() {
            return;
        }

        let size = if description.keyword_size != 0 {
            font_size_for_keyword(
                &self.settings,
                description.keyword_size,
                description.use_fixed_default_size(),
            )
        } else {
            let fixed = self.settings.default_fixed_font_size as f32;
            let variable = self.settings.default_font_size as f32;
            let fixed_scale_factor = if fixed > 0. && variable > 0. {
                fixed / variable
            } else {
                1.
            };
            if parent.use_fixed_default_size() {
                description.specified_size / fixed_scale_factor
            } else {
                description.specified_size * fixed_scale_factor
            }
        };
        description.specified_size = size;
    }

    /// Recomputes the used size from the specified size and zoom.
    pub fn update_computed_size(&self, description: &mut FontDescription) {
        let zoom_factor = self.style.effective_zoom() * self.settings.text_zoom_factor;
        description.computed_size = computed_size_from_specified_size(
            &self.settings,
            zoom_factor,
            description.is_absolute_size,
            description.specified_size,
            true,
        );
    }

    /// Builds the font if anything changed since the last build.
    pub fn create_font(&mut self, selector: Option<&dyn FontSelector>, parent: &FontDescription) {
        if !self.font_dirty {
            return;
        }

        let mut description = self.style.font_description().clone();
        self.check_for_generic_family_change(parent, &mut description);
        self.update_computed_size(&mut description);
        self.style.set_font_description(description);
        self.style.update_font(selector);
        self.font_dirty = false;
    }

    /// Builds the font of the document's root style from the defaults.
    pub fn create_font_for_document(&mut self, selector: Option<&dyn FontSelector>) {
        let mut description = FontDescription {
            family: FontFamilyList::single(&self.settings.standard_font_family),
            generic_family: GenericFamily::Standard,
            keyword_size: MEDIUM_KEYWORD_SIZE,
            locale: self.style.font_description().locale.clone(),
            ..Default::default()
        };
        description.specified_size = font_size_for_keyword(
            &self.settings,
            MEDIUM_KEYWORD_SIZE,
            description.use_fixed_default_size(),
        );
        self.update_computed_size(&mut description);
        self.style.set_font_description(description);
        self.style.update_font(selector);
        self.font_dirty = false;
    }
}
