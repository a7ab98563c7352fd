/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Classification of style changes into the work they require.

use std::fmt;

use bitflags::bitflags;
use log::trace;
use style_config::StyleSettings;

use super::RenderStyle;
use super::constants::{BorderCollapse, Display, Position, PseudoId, Visibility};
use crate::length::{Length, LengthBox};
use crate::values::border::BorderStyle;

bitflags! {
    /// The layout, paint and compositing work a style change requires.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct StyleDifference: u16 {
        const NEEDS_FULL_LAYOUT = 1 << 0;
        /// A positioned box moved without changing size.
        const NEEDS_POSITIONED_MOVEMENT_LAYOUT = 1 << 1;
        const NEEDS_PAINT_INVALIDATION_OBJECT = 1 << 2;
        /// The box and everything painted into its layer.
        const NEEDS_PAINT_INVALIDATION_LAYER = 1 << 3;
        const Z_INDEX_CHANGED = 1 << 4;
        const OPACITY_CHANGED = 1 << 5;
        const TRANSFORM_CHANGED = 1 << 6;
        const FILTER_CHANGED = 1 << 7;
        /// Only text or a color changed, and no other paint invalidation
        /// was needed.
        const TEXT_OR_COLOR_CHANGED = 1 << 8;
    }
}

impl StyleDifference {
    #[inline]
    pub fn needs_full_layout(self) -> bool {
        self.contains(StyleDifference::NEEDS_FULL_LAYOUT)
    }

    #[inline]
    pub fn needs_positioned_movement_layout(self) -> bool {
        self.contains(StyleDifference::NEEDS_POSITIONED_MOVEMENT_LAYOUT)
    }

    #[inline]
    pub fn needs_layout(self) -> bool {
        self.intersects(
            StyleDifference::NEEDS_FULL_LAYOUT | StyleDifference::NEEDS_POSITIONED_MOVEMENT_LAYOUT,
        )
    }

    #[inline]
    pub fn needs_paint_invalidation(self) -> bool {
        self.intersects(
            StyleDifference::NEEDS_PAINT_INVALIDATION_OBJECT |
                StyleDifference::NEEDS_PAINT_INVALIDATION_LAYER,
        )
    }

    #[inline]
    pub fn has_difference(self) -> bool {
        !self.is_empty()
    }
}

impl fmt::Display for StyleDifference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        for (index, (name, _)) in self.iter_names().enumerate() {
            if index != 0 {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// How far a change to an element's style reaches down the tree.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StyleRecalcChange {
    NoChange,
    /// Only the element itself changed.
    NoInherit,
    /// Descendants must inherit again.
    Inherit,
    /// The element's boxes must be rebuilt.
    Reattach,
}

impl RenderStyle {
    /// A coarse comparison of an element's old and new style that decides
    /// whether its descendants need restyling or its boxes rebuilding.
    pub fn style_propagation_diff(
        old_style: Option<&RenderStyle>,
        new_style: Option<&RenderStyle>,
    ) -> StyleRecalcChange {
        let (old_style, new_style) = match (old_style, new_style) {
            (None, None) => return StyleRecalcChange::NoChange,
            (Some(old_style), Some(new_style)) => (old_style, new_style),
            _ => return StyleRecalcChange::Reattach,
        };

        if old_style.display() != new_style.display() ||
            old_style.has_pseudo_style(PseudoId::FirstLetter) !=
                new_style.has_pseudo_style(PseudoId::FirstLetter) ||
            !old_style
                .rare_non_inherited
                .content_data_equivalent(&new_style.rare_non_inherited) ||
            old_style.justify_items() != new_style.justify_items() ||
            old_style.align_items() != new_style.align_items()
        {
            return StyleRecalcChange::Reattach;
        }

        if old_style == new_style {
            return diff_pseudo_styles(old_style, new_style);
        }

        if old_style.inherited_not_equal(new_style) ||
            old_style.has_explicitly_inherited_properties() ||
            new_style.has_explicitly_inherited_properties()
        {
            return StyleRecalcChange::Inherit;
        }

        StyleRecalcChange::NoInherit
    }

    /// Classifies the change from `self` to `other` into the layout, paint
    /// and compositing work it requires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "RenderStyle::visual_invalidation_diff",
            skip_all,
            fields(servo_profiling = true),
            level = "trace",
        )
    )]
    pub fn visual_invalidation_diff(
        &self,
        other: &RenderStyle,
        settings: &StyleSettings,
    ) -> StyleDifference {
        let mut diff = StyleDifference::empty();

        if self.diff_needs_full_layout(other) {
            diff.insert(StyleDifference::NEEDS_FULL_LAYOUT);
        } else if self.position() != Position::Static &&
            self.surround.offset != other.surround.offset
        {
            // A positioned box that moves without resizing only needs to be
            // placed again.
            if positioned_object_moved_only(
                &self.surround.offset,
                &other.surround.offset,
                &self.box_data.width,
            ) {
                diff.insert(StyleDifference::NEEDS_POSITIONED_MOVEMENT_LAYOUT);
            } else {
                diff.insert(StyleDifference::NEEDS_FULL_LAYOUT);
            }
        }

        if self.diff_needs_paint_invalidation_layer(other, settings) {
            diff.insert(StyleDifference::NEEDS_PAINT_INVALIDATION_LAYER);
        } else if self.diff_needs_paint_invalidation_object(other) {
            diff.insert(StyleDifference::NEEDS_PAINT_INVALIDATION_OBJECT);
        }

        self.update_property_specific_differences(other, &mut diff);

        trace!("Style difference: {diff}");
        diff
    }

    fn diff_needs_full_layout(&self, other: &RenderStyle) -> bool {
        if !self.box_data.ptr_eq(&other.box_data) {
            let (a, b) = (&*self.box_data, &*other.box_data);
            if a.width != b.width ||
                a.min_width != b.min_width ||
                a.max_width != b.max_width ||
                a.height != b.height ||
                a.min_height != b.min_height ||
                a.max_height != b.max_height ||
                a.vertical_align != b.vertical_align ||
                a.box_sizing != b.box_sizing
            {
                return true;
            }
        }

        if !self.surround.ptr_eq(&other.surround) {
            let (a, b) = (&*self.surround, &*other.surround);
            // Only border widths affect layout. Color and style changes are
            // paint only.
            if a.margin != b.margin || a.padding != b.padding || !a.border.size_equals(&b.border) {
                return true;
            }
        }

        if !self.rare_non_inherited.ptr_eq(&other.rare_non_inherited) {
            let (a, b) = (&*self.rare_non_inherited, &*other.rare_non_inherited);
            if a.appearance != b.appearance ||
                a.margin_before_collapse != b.margin_before_collapse ||
                a.margin_after_collapse != b.margin_after_collapse ||
                a.line_clamp != b.line_clamp ||
                a.text_overflow != b.text_overflow ||
                a.wrap_flow != b.wrap_flow ||
                a.wrap_through != b.wrap_through ||
                a.shape_margin != b.shape_margin ||
                a.order != b.order ||
                a.align_content != b.align_content ||
                a.align_items != b.align_items ||
                a.align_self != b.align_self ||
                a.justify_content != b.justify_content ||
                a.justify_items != b.justify_items ||
                a.justify_self != b.justify_self
            {
                return true;
            }

            if a.flexible_box != b.flexible_box {
                return true;
            }

            // Shadows only change overflow, but there is no cheaper layout
            // that recomputes it.
            if !a.shadow_data_equivalent(b) {
                return true;
            }

            // Counter values are computed during layout.
            if !a.counter_data_equivalent(b) {
                return true;
            }

            // Gaining or losing opacity matters only when it also changes
            // whether the box is a stacking context.
            if self.has_auto_z_index() != other.has_auto_z_index() &&
                a.has_opacity() != b.has_opacity()
            {
                return true;
            }

            if a.has_filters() != b.has_filters() {
                return true;
            }
        }

        if !self.rare_inherited.ptr_eq(&other.rare_inherited) {
            let (a, b) = (&*self.rare_inherited, &*other.rare_inherited);
            if a.text_indent != b.text_indent ||
                a.text_align_last != b.text_align_last ||
                a.text_justify != b.text_justify ||
                a.text_orientation != b.text_orientation ||
                a.tab_size != b.tab_size ||
                a.word_break != b.word_break ||
                a.overflow_wrap != b.overflow_wrap ||
                a.line_break != b.line_break ||
                a.text_security != b.text_security ||
                a.hyphens != b.hyphens ||
                a.hyphenation_limit_before != b.hyphenation_limit_before ||
                a.hyphenation_limit_after != b.hyphenation_limit_after ||
                a.hyphenation_limit_lines != b.hyphenation_limit_lines ||
                a.hyphenation_string != b.hyphenation_string ||
                a.locale != b.locale ||
                a.line_box_contain != b.line_box_contain ||
                a.text_stroke_width != b.text_stroke_width ||
                a.effective_zoom != b.effective_zoom
            {
                return true;
            }

            if !a.shadow_data_equivalent(b) || !a.quotes_data_equivalent(b) {
                return true;
            }
        }

        if !self.inherited.ptr_eq(&other.inherited) {
            let (a, b) = (&*self.inherited, &*other.inherited);
            if a.line_height != b.line_height ||
                a.font != b.font ||
                a.horizontal_border_spacing != b.horizontal_border_spacing ||
                a.vertical_border_spacing != b.vertical_border_spacing
            {
                return true;
            }
        }

        let (a, b) = (&self.inherited_flags, &other.inherited_flags);
        if a.box_direction != b.box_direction ||
            a.rtl_ordering != b.rtl_ordering ||
            a.text_align != b.text_align ||
            a.text_transform != b.text_transform ||
            a.direction != b.direction ||
            a.white_space != b.white_space
        {
            return true;
        }

        let (a, b) = (&self.non_inherited_flags, &other.non_inherited_flags);
        if a.overflow_x != b.overflow_x ||
            a.overflow_y != b.overflow_y ||
            a.clear != b.clear ||
            a.unicode_bidi != b.unicode_bidi ||
            a.position != b.position ||
            a.floating != b.floating ||
            a.original_display != b.original_display ||
            a.vertical_align != b.vertical_align
        {
            return true;
        }

        if self.display().is_table() || is_table_part(self.display()) {
            let (a, b) = (&self.inherited_flags, &other.inherited_flags);
            if a.border_collapse != b.border_collapse ||
                a.empty_cells != b.empty_cells ||
                a.caption_side != b.caption_side ||
                self.table_layout() != other.table_layout()
            {
                return true;
            }

            // With collapsed borders a `hidden` side suppresses its
            // neighbours while `none` does not, which changes used widths.
            if self.border_collapse() == BorderCollapse::Collapse &&
                hidden_none_swap(self, other)
            {
                return true;
            }
        }

        if self.display() == Display::ListItem &&
            (self.list_style_type() != other.list_style_type() ||
                self.list_style_position() != other.list_style_position())
        {
            return true;
        }

        if (self.visibility() == Visibility::Collapse) !=
            (other.visibility() == Visibility::Collapse)
        {
            return true;
        }

        // Outlines only affect overflow, which has no cheaper layout.
        if !self
            .background
            .outline
            .visually_equal(&other.background.outline)
        {
            return true;
        }

        false
    }

    fn diff_needs_paint_invalidation_layer(
        &self,
        other: &RenderStyle,
        settings: &StyleSettings,
    ) -> bool {
        if self.position() != Position::Static &&
            (self.visual.clip != other.visual.clip ||
                self.visual.has_auto_clip != other.visual.has_auto_clip)
        {
            return true;
        }

        if !self.rare_non_inherited.ptr_eq(&other.rare_non_inherited) {
            let (a, b) = (&*self.rare_non_inherited, &*other.rare_non_inherited);
            if settings.css_compositing_enabled &&
                (a.effective_blend_mode != b.effective_blend_mode || a.isolation != b.isolation)
            {
                return true;
            }

            if a.mask != b.mask || a.mask_box_image != b.mask_box_image {
                return true;
            }
        }

        false
    }

    fn diff_needs_paint_invalidation_object(&self, other: &RenderStyle) -> bool {
        let (a, b) = (&self.inherited_flags, &other.inherited_flags);
        if a.visibility != b.visibility ||
            a.print_color_adjust != b.print_color_adjust ||
            a.inside_link != b.inside_link ||
            !self.surround.border.visually_equal(&other.surround.border) ||
            !self.background.visually_equal(&other.background)
        {
            return true;
        }

        if !self.rare_inherited.ptr_eq(&other.rare_inherited) {
            let (a, b) = (&*self.rare_inherited, &*other.rare_inherited);
            if a.user_modify != b.user_modify ||
                a.user_select != b.user_select ||
                a.image_rendering != b.image_rendering
            {
                return true;
            }
        }

        if !self.rare_non_inherited.ptr_eq(&other.rare_non_inherited) {
            let (a, b) = (&*self.rare_non_inherited, &*other.rare_non_inherited);
            if a.user_drag != b.user_drag ||
                a.object_fit != b.object_fit ||
                a.object_position != b.object_position
            {
                return true;
            }

            if !a.shape_outside_equivalent(b) || !a.clip_path_equivalent(b) {
                return true;
            }
        }

        false
    }

    fn update_property_specific_differences(&self, other: &RenderStyle, diff: &mut StyleDifference) {
        if self.box_data.z_index != other.box_data.z_index ||
            self.box_data.has_auto_z_index != other.box_data.has_auto_z_index
        {
            diff.insert(StyleDifference::Z_INDEX_CHANGED);
        }

        if !self.rare_non_inherited.ptr_eq(&other.rare_non_inherited) {
            let (a, b) = (&*self.rare_non_inherited, &*other.rare_non_inherited);
            if a.transform != b.transform {
                diff.insert(StyleDifference::TRANSFORM_CHANGED);
            }
            if a.opacity != b.opacity {
                diff.insert(StyleDifference::OPACITY_CHANGED);
            }
            if a.filter != b.filter {
                diff.insert(StyleDifference::FILTER_CHANGED);
            }
        }

        if diff.needs_paint_invalidation() {
            return;
        }

        if self.inherited.color != other.inherited.color ||
            self.inherited_flags.has_simple_underline != other.inherited_flags.has_simple_underline ||
            self.visual.text_decoration != other.visual.text_decoration
        {
            diff.insert(StyleDifference::TEXT_OR_COLOR_CHANGED);
        }

        if !self.rare_non_inherited.ptr_eq(&other.rare_non_inherited) &&
            (self.rare_non_inherited.text_decoration_style !=
                other.rare_non_inherited.text_decoration_style ||
                self.rare_non_inherited.text_decoration_color !=
                    other.rare_non_inherited.text_decoration_color)
        {
            diff.insert(StyleDifference::TEXT_OR_COLOR_CHANGED);
        }

        if !self.rare_inherited.ptr_eq(&other.rare_inherited) {
            let (a, b) = (&*self.rare_inherited, &*other.rare_inherited);
            if a.text_fill_color != b.text_fill_color ||
                a.text_stroke_color != b.text_stroke_color ||
                a.text_emphasis_color != b.text_emphasis_color
            {
                diff.insert(StyleDifference::TEXT_OR_COLOR_CHANGED);
            }
        }
    }
}

/// Pseudo-element styles that changed while the element's own style did
/// not still require the element to be restyled.
fn diff_pseudo_styles(old_style: &RenderStyle, new_style: &RenderStyle) -> StyleRecalcChange {
    if !old_style.has_any_public_pseudo_styles() {
        return StyleRecalcChange::NoChange;
    }

    for pseudo in PseudoId::PUBLIC {
        if !old_style.has_pseudo_style(pseudo) {
            continue;
        }
        let Some(new_pseudo_style) = new_style.get_cached_pseudo_style(pseudo) else {
            return StyleRecalcChange::NoInherit;
        };
        if old_style
            .get_cached_pseudo_style(pseudo)
            .is_some_and(|old_pseudo_style| old_pseudo_style != new_pseudo_style)
        {
            return StyleRecalcChange::NoInherit;
        }
    }

    StyleRecalcChange::NoChange
}

/// Whether changing the offsets from `a` to `b` only moves the box.
///
/// That holds when every offset keeps its type, at most one offset per axis
/// is specified, and, for a box sized by its container, the specified
/// horizontal offset did not change.
fn positioned_object_moved_only(a: &LengthBox, b: &LengthBox, width: &Length) -> bool {
    if a.left.length_type() != b.left.length_type() ||
        a.right.length_type() != b.right.length_type() ||
        a.top.length_type() != b.top.length_type() ||
        a.bottom.length_type() != b.bottom.length_type()
    {
        return false;
    }

    // Two specified offsets on one axis size the box.
    if !a.left.is_intrinsic_or_auto() && !a.right.is_intrinsic_or_auto() {
        return false;
    }
    if !a.top.is_intrinsic_or_auto() && !a.bottom.is_intrinsic_or_auto() {
        return false;
    }

    // An auto width shrinks to fit the space left by the horizontal offset.
    if width.is_intrinsic_or_auto() &&
        ((!a.left.is_intrinsic_or_auto() && a.left != b.left) ||
            (!a.right.is_intrinsic_or_auto() && a.right != b.right))
    {
        return false;
    }

    true
}

fn is_table_part(display: Display) -> bool {
    matches!(
        display,
        Display::TableRowGroup |
            Display::TableHeaderGroup |
            Display::TableFooterGroup |
            Display::TableRow |
            Display::TableColumnGroup |
            Display::TableColumn |
            Display::TableCell |
            Display::TableCaption
    )
}

fn hidden_none_swap(a: &RenderStyle, b: &RenderStyle) -> bool {
    let (a, b) = (a.border(), b.border());
    let swapped = |x: BorderStyle, y: BorderStyle| {
        (x == BorderStyle::Hidden && y == BorderStyle::None) ||
            (x == BorderStyle::None && y == BorderStyle::Hidden)
    };
    swapped(a.top.style, b.top.style) ||
        swapped(a.bottom.style, b.bottom.style) ||
        swapped(a.left.style, b.left.style) ||
        swapped(a.right.style, b.right.style)
}
