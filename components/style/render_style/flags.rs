/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Small keyword properties stored inline in the style rather than in a
//! shared record.

use bitflags::bitflags;

use super::constants::{
    BorderCollapse, BoxDirection, CaptionSide, Clear, Display, EmptyCell, Float, InsideLink,
    ListStylePosition, ListStyleType, Order, Overflow, PageBreak, PointerEvents, Position,
    PrintColorAdjust, PseudoId, TableLayout, TextAlign, TextDirection, TextTransform,
    UnicodeBidi, VerticalAlign, Visibility, WhiteSpace,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct InheritedFlags {
    pub empty_cells: EmptyCell,
    pub caption_side: CaptionSide,
    pub list_style_type: ListStyleType,
    pub list_style_position: ListStylePosition,
    pub visibility: Visibility,
    pub text_align: TextAlign,
    pub text_transform: TextTransform,
    pub white_space: WhiteSpace,
    pub border_collapse: BorderCollapse,
    pub box_direction: BoxDirection,
    pub rtl_ordering: Order,
    pub print_color_adjust: PrintColorAdjust,
    pub pointer_events: PointerEvents,
    pub inside_link: InsideLink,
    pub direction: TextDirection,
    /// Set instead of allocating a decoration list when the only applied
    /// decoration is a simple underline.
    pub has_simple_underline: bool,
}

bitflags! {
    /// Which pseudo-elements have a style.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct PseudoBits: u8 {
        const FIRST_LINE = 1 << 0;
        const FIRST_LETTER = 1 << 1;
        const BEFORE = 1 << 2;
        const AFTER = 1 << 3;
        const SELECTION = 1 << 4;
        const BACKDROP = 1 << 5;
    }
}

impl PseudoBits {
    pub fn from_pseudo_id(pseudo: PseudoId) -> Self {
        match pseudo {
            PseudoId::None => PseudoBits::empty(),
            PseudoId::FirstLine => PseudoBits::FIRST_LINE,
            PseudoId::FirstLetter => PseudoBits::FIRST_LETTER,
            PseudoId::Before => PseudoBits::BEFORE,
            PseudoId::After => PseudoBits::AFTER,
            PseudoId::Selection => PseudoBits::SELECTION,
            PseudoId::Backdrop => PseudoBits::BACKDROP,
        }
    }
}

bitflags! {
    /// Facts about how a style was produced and where its element sits in
    /// the tree. They do not describe property values, so they take no part
    /// in style equality.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct StructuralState: u8 {
        /// The `inherit` keyword was used for a non-inherited property.
        const EXPLICIT_INHERITANCE = 1 << 0;
        /// The style depends on its element and can not be shared.
        const UNIQUE = 1 << 1;
        const EMPTY_STATE = 1 << 2;
        const FIRST_CHILD_STATE = 1 << 3;
        const LAST_CHILD_STATE = 1 << 4;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NonInheritedFlags {
    pub effective_display: Display,
    pub original_display: Display,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub vertical_align: VerticalAlign,
    pub clear: Clear,
    pub position: Position,
    pub floating: Float,
    pub table_layout: TableLayout,
    pub page_break_before: PageBreak,
    pub page_break_after: PageBreak,
    pub page_break_inside: PageBreak,
    pub unicode_bidi: UnicodeBidi,
    pub style_type: PseudoId,
    pub pseudo_bits: PseudoBits,
    pub is_link: bool,
    pub has_viewport_units: bool,
    pub state: StructuralState,
}

impl PartialEq for NonInheritedFlags {
    fn eq(&self, other: &Self) -> bool {
        self.effective_display == other.effective_display &&
            self.original_display == other.original_display &&
            self.overflow_x == other.overflow_x &&
            self.overflow_y == other.overflow_y &&
            self.vertical_align == other.vertical_align &&
            self.clear == other.clear &&
            self.position == other.position &&
            self.floating == other.floating &&
            self.table_layout == other.table_layout &&
            self.page_break_before == other.page_break_before &&
            self.page_break_after == other.page_break_after &&
            self.page_break_inside == other.page_break_inside &&
            self.unicode_bidi == other.unicode_bidi &&
            self.style_type == other.style_type &&
            self.pseudo_bits == other.pseudo_bits &&
            self.is_link == other.is_link &&
            self.has_viewport_units == other.has_viewport_units
    }
}

impl NonInheritedFlags {
    /// Copies the property values of `other`, leaving pseudo-element and
    /// tree state alone.
    pub fn copy_non_inherited_from(&mut self, other: &NonInheritedFlags) {
        self.effective_display = other.effective_display;
        self.original_display = other.original_display;
        self.overflow_x = other.overflow_x;
        self.overflow_y = other.overflow_y;
        self.vertical_align = other.vertical_align;
        self.clear = other.clear;
        self.position = other.position;
        self.floating = other.floating;
        self.table_layout = other.table_layout;
        self.page_break_before = other.page_break_before;
        self.page_break_after = other.page_break_after;
        self.page_break_inside = other.page_break_inside;
        self.unicode_bidi = other.unicode_bidi;
        self.has_viewport_units = other.has_viewport_units;
        self.state.set(
            StructuralState::EXPLICIT_INHERITANCE,
            other.state.contains(StructuralState::EXPLICIT_INHERITANCE),
        );
    }
}
