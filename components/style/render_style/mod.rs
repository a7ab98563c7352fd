/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The computed style of a single box.

pub mod constants;
mod difference;
mod flags;

use std::sync::LazyLock;

use servo_arc::Arc;

pub use self::difference::{StyleDifference, StyleRecalcChange};
use self::constants::*;
pub use self::flags::{PseudoBits, StructuralState};
use self::flags::{InheritedFlags, NonInheritedFlags};
use crate::color::{Color, StyleColor};
use crate::data_ref::DataRef;
use crate::font::{Font, FontDescription, FontSelector};
use crate::length::{Length, LengthBox, LengthPoint};
use crate::style_data::{
    StyleBackgroundData, StyleBoxData, StyleInheritedData, StyleRareInheritedData,
    StyleRareNonInheritedData, StyleSurroundData, StyleVisualData,
};
use crate::values::border::{BorderData, BorderStyle, OutlineValue};
use crate::values::clip_path::ClipPathOperation;
use crate::values::content::ContentData;
use crate::values::counter::CounterDirectiveMap;
use crate::values::fill_layer::{BlendMode, FillLayers};
use crate::values::filter::FilterOperations;
use crate::values::nine_piece_image::NinePieceImage;
use crate::values::quotes::QuotesData;
use crate::values::shadow::ShadowList;
use crate::values::shape_value::ShapeValue;
use crate::values::text_decoration::{
    AppliedTextDecoration, TextDecoration, TextDecorationStyle,
};
use crate::values::transform::TransformOperations;

/// Whether a child is the first element inside a shadow tree. Shadow trees
/// act as a single editing unit, so `-webkit-user-modify` does not cross the
/// boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IsAtShadowBoundary {
    AtShadowBoundary,
    NotAtShadowBoundary,
}

static DEFAULT_STYLE: LazyLock<RenderStyle> = LazyLock::new(RenderStyle::create_default_style);

static SIMPLE_UNDERLINE: [AppliedTextDecoration; 1] = [AppliedTextDecoration::simple_underline()];

/// The style every other style starts from. Built on first use and never
/// modified.
pub fn default_style() -> &'static RenderStyle {
    &DEFAULT_STYLE
}

/// The computed values of every property for one box.
///
/// Rarely changed properties live in shared records that are copied on
/// write, so building a style from its parent or from the default style
/// only bumps reference counts.
#[derive(Debug)]
pub struct RenderStyle {
    box_data: DataRef<StyleBoxData>,
    visual: DataRef<StyleVisualData>,
    background: DataRef<StyleBackgroundData>,
    surround: DataRef<StyleSurroundData>,
    rare_non_inherited: DataRef<StyleRareNonInheritedData>,

    rare_inherited: DataRef<StyleRareInheritedData>,
    inherited: DataRef<StyleInheritedData>,

    inherited_flags: InheritedFlags,
    non_inherited_flags: NonInheritedFlags,

    /// Styles of this element's pseudo-elements, kept for reuse.
    cached_pseudo_styles: Vec<Arc<RenderStyle>>,
}

impl Clone for RenderStyle {
    /// Shares every record with `self`. Cached pseudo-element styles belong
    /// to the original and are not carried over.
    fn clone(&self) -> Self {
        RenderStyle {
            box_data: self.box_data.clone(),
            visual: self.visual.clone(),
            background: self.background.clone(),
            surround: self.surround.clone(),
            rare_non_inherited: self.rare_non_inherited.clone(),
            rare_inherited: self.rare_inherited.clone(),
            inherited: self.inherited.clone(),
            inherited_flags: self.inherited_flags,
            non_inherited_flags: self.non_inherited_flags,
            cached_pseudo_styles: Vec::new(),
        }
    }
}

impl PartialEq for RenderStyle {
    fn eq(&self, other: &Self) -> bool {
        self.inherited_flags == other.inherited_flags &&
            self.non_inherited_flags == other.non_inherited_flags &&
            self.box_data == other.box_data &&
            self.visual == other.visual &&
            self.background == other.background &&
            self.surround == other.surround &&
            self.rare_non_inherited == other.rare_non_inherited &&
            self.rare_inherited == other.rare_inherited &&
            self.inherited == other.inherited
    }
}

macro_rules! group_property {
    ($group:ident . $field:ident, $getter:ident, $setter:ident, $ty:ty) => {
        #[inline]
        pub fn $getter(&self) -> $ty {
            self.$group.$field
        }

        #[inline]
        pub fn $setter(&mut self, value: $ty) {
            if self.$group.$field != value {
                self.$group.access().$field = value;
            }
        }
    };
}

macro_rules! group_property_ref {
    ($group:ident . $field:ident, $getter:ident, $setter:ident, $ty:ty) => {
        #[inline]
        pub fn $getter(&self) -> &$ty {
            &self.$group.$field
        }

        #[inline]
        pub fn $setter(&mut self, value: $ty) {
            if self.$group.$field != value {
                self.$group.access().$field = value;
            }
        }
    };
}

macro_rules! shared_property {
    ($group:ident . $field:ident, $getter:ident, $setter:ident, $ty:ty) => {
        #[inline]
        pub fn $getter(&self) -> Option<&$ty> {
            self.$group.$field.as_deref()
        }

        pub fn $setter(&mut self, value: Option<$ty>) {
            if self.$getter() != value.as_ref() {
                self.$group.access().$field = value.map(Arc::new);
            }
        }
    };
}

macro_rules! flag_property {
    ($flags:ident . $field:ident, $getter:ident, $setter:ident, $ty:ty) => {
        #[inline]
        pub fn $getter(&self) -> $ty {
            self.$flags.$field
        }

        #[inline]
        pub fn $setter(&mut self, value: $ty) {
            self.$flags.$field = value;
        }
    };
}

impl RenderStyle {
    /// A new style holding the initial values, sharing its records with the
    /// default style.
    pub fn create() -> RenderStyle {
        default_style().clone()
    }

    /// Builds the initial values from scratch.
    pub fn create_default_style() -> RenderStyle {
        RenderStyle {
            box_data: DataRef::default(),
            visual: DataRef::default(),
            background: DataRef::default(),
            surround: DataRef::default(),
            rare_non_inherited: DataRef::default(),
            rare_inherited: DataRef::default(),
            inherited: DataRef::default(),
            inherited_flags: InheritedFlags::default(),
            non_inherited_flags: NonInheritedFlags::default(),
            cached_pseudo_styles: Vec::new(),
        }
    }

    /// The style of an anonymous box generated inside `parent`.
    pub fn create_anonymous_style_with_display(parent: &RenderStyle, display: Display) -> RenderStyle {
        let mut style = RenderStyle::create();
        style.inherit_from(parent, IsAtShadowBoundary::NotAtShadowBoundary);
        style.inherit_unicode_bidi_from(parent);
        style.set_display(display);
        style
    }

    /// Takes over all inherited properties of `parent`, sharing its records.
    pub fn inherit_from(&mut self, parent: &RenderStyle, is_at_shadow_boundary: IsAtShadowBoundary) {
        if is_at_shadow_boundary == IsAtShadowBoundary::AtShadowBoundary {
            let user_modify = self.user_modify();
            self.rare_inherited = parent.rare_inherited.clone();
            self.set_user_modify(user_modify);
        } else {
            self.rare_inherited = parent.rare_inherited.clone();
        }
        self.inherited = parent.inherited.clone();
        self.inherited_flags = parent.inherited_flags;
    }

    /// Takes over all non-inherited properties of `other`, sharing its
    /// records. Pseudo-element and tree state stay as they are.
    pub fn copy_non_inherited_from(&mut self, other: &RenderStyle) {
        self.box_data = other.box_data.clone();
        self.visual = other.visual.clone();
        self.background = other.background.clone();
        self.surround = other.surround.clone();
        self.rare_non_inherited = other.rare_non_inherited.clone();
        self.non_inherited_flags
            .copy_non_inherited_from(&other.non_inherited_flags);
    }

    #[inline]
    pub fn inherit_unicode_bidi_from(&mut self, parent: &RenderStyle) {
        self.non_inherited_flags.unicode_bidi = parent.non_inherited_flags.unicode_bidi;
    }

    /// Whether any inherited property differs from `other`.
    pub fn inherited_not_equal(&self, other: &RenderStyle) -> bool {
        self.inherited_flags != other.inherited_flags ||
            self.inherited != other.inherited ||
            self.rare_inherited != other.rare_inherited
    }

    /// Whether both styles share the very same inherited records.
    pub fn inherited_data_shared(&self, other: &RenderStyle) -> bool {
        self.inherited_flags == other.inherited_flags &&
            self.inherited.ptr_eq(&other.inherited) &&
            self.rare_inherited.ptr_eq(&other.rare_inherited)
    }

    // Structural state.

    #[inline]
    pub fn structural_state(&self) -> StructuralState {
        self.non_inherited_flags.state
    }

    #[inline]
    pub fn has_explicitly_inherited_properties(&self) -> bool {
        self.non_inherited_flags
            .state
            .contains(StructuralState::EXPLICIT_INHERITANCE)
    }

    #[inline]
    pub fn set_has_explicitly_inherited_properties(&mut self) {
        self.non_inherited_flags
            .state
            .insert(StructuralState::EXPLICIT_INHERITANCE);
    }

    #[inline]
    pub fn unique(&self) -> bool {
        self.non_inherited_flags.state.contains(StructuralState::UNIQUE)
    }

    #[inline]
    pub fn set_unique(&mut self) {
        self.non_inherited_flags.state.insert(StructuralState::UNIQUE);
    }

    pub fn set_structural_state(&mut self, state: StructuralState, value: bool) {
        self.non_inherited_flags.state.set(state, value);
    }

    // Pseudo-elements.

    flag_property!(non_inherited_flags.style_type, style_type, set_style_type, PseudoId);
    flag_property!(non_inherited_flags.is_link, is_link, set_is_link, bool);
    flag_property!(
        non_inherited_flags.has_viewport_units,
        has_viewport_units,
        set_has_viewport_units,
        bool
    );

    #[inline]
    pub fn has_pseudo_style(&self, pseudo: PseudoId) -> bool {
        !PseudoBits::from_pseudo_id(pseudo).is_empty() &&
            self.non_inherited_flags
                .pseudo_bits
                .contains(PseudoBits::from_pseudo_id(pseudo))
    }

    #[inline]
    pub fn set_has_pseudo_style(&mut self, pseudo: PseudoId) {
        self.non_inherited_flags
            .pseudo_bits
            .insert(PseudoBits::from_pseudo_id(pseudo));
    }

    #[inline]
    pub fn has_any_public_pseudo_styles(&self) -> bool {
        !self.non_inherited_flags.pseudo_bits.is_empty()
    }

    /// The cached style of `pseudo`. Styles of pseudo-elements do not
    /// cache styles of their own.
    pub fn get_cached_pseudo_style(&self, pseudo: PseudoId) -> Option<&RenderStyle> {
        if self.style_type() != PseudoId::None {
            return None;
        }
        self.cached_pseudo_styles
            .iter()
            .find(|style| style.style_type() == pseudo)
            .map(|style| &**style)
    }

    pub fn add_cached_pseudo_style(&mut self, style: Arc<RenderStyle>) {
        self.cached_pseudo_styles.push(style);
    }

    pub fn remove_cached_pseudo_style(&mut self, pseudo: PseudoId) {
        self.cached_pseudo_styles
            .retain(|style| style.style_type() != pseudo);
    }

    #[inline]
    pub fn cached_pseudo_styles(&self) -> &[Arc<RenderStyle>] {
        &self.cached_pseudo_styles
    }

    // Non-inherited keyword properties.

    /// The display used for layout, after adjustments.
    #[inline]
    pub fn display(&self) -> Display {
        self.non_inherited_flags.effective_display
    }

    #[inline]
    pub fn set_display(&mut self, display: Display) {
        self.non_inherited_flags.effective_display = display;
    }

    flag_property!(
        non_inherited_flags.original_display,
        original_display,
        set_original_display,
        Display
    );
    flag_property!(non_inherited_flags.position, position, set_position, Position);
    flag_property!(non_inherited_flags.floating, floating, set_floating, Float);
    flag_property!(non_inherited_flags.overflow_x, overflow_x, set_overflow_x, Overflow);
    flag_property!(non_inherited_flags.overflow_y, overflow_y, set_overflow_y, Overflow);
    flag_property!(non_inherited_flags.clear, clear, set_clear, Clear);
    flag_property!(
        non_inherited_flags.vertical_align,
        vertical_align,
        set_vertical_align,
        VerticalAlign
    );
    flag_property!(
        non_inherited_flags.table_layout,
        table_layout,
        set_table_layout,
        TableLayout
    );
    flag_property!(
        non_inherited_flags.unicode_bidi,
        unicode_bidi,
        set_unicode_bidi,
        UnicodeBidi
    );
    flag_property!(
        non_inherited_flags.page_break_before,
        page_break_before,
        set_page_break_before,
        PageBreak
    );
    flag_property!(
        non_inherited_flags.page_break_after,
        page_break_after,
        set_page_break_after,
        PageBreak
    );
    flag_property!(
        non_inherited_flags.page_break_inside,
        page_break_inside,
        set_page_break_inside,
        PageBreak
    );

    #[inline]
    pub fn is_floating(&self) -> bool {
        self.floating() != Float::None
    }

    #[inline]
    pub fn has_out_of_flow_position(&self) -> bool {
        matches!(self.position(), Position::Absolute | Position::Fixed)
    }

    #[inline]
    pub fn is_positioned(&self) -> bool {
        self.position() != Position::Static
    }

    // Inherited keyword properties.

    flag_property!(inherited_flags.visibility, visibility, set_visibility, Visibility);
    flag_property!(inherited_flags.text_align, text_align, set_text_align, TextAlign);
    flag_property!(
        inherited_flags.text_transform,
        text_transform,
        set_text_transform,
        TextTransform
    );
    flag_property!(inherited_flags.white_space, white_space, set_white_space, WhiteSpace);
    flag_property!(inherited_flags.direction, direction, set_direction, TextDirection);
    flag_property!(
        inherited_flags.border_collapse,
        border_collapse,
        set_border_collapse,
        BorderCollapse
    );
    flag_property!(inherited_flags.empty_cells, empty_cells, set_empty_cells, EmptyCell);
    flag_property!(inherited_flags.caption_side, caption_side, set_caption_side, CaptionSide);
    flag_property!(
        inherited_flags.list_style_type,
        list_style_type,
        set_list_style_type,
        ListStyleType
    );
    flag_property!(
        inherited_flags.list_style_position,
        list_style_position,
        set_list_style_position,
        ListStylePosition
    );
    flag_property!(
        inherited_flags.box_direction,
        box_direction,
        set_box_direction,
        BoxDirection
    );
    flag_property!(inherited_flags.rtl_ordering, rtl_ordering, set_rtl_ordering, Order);
    flag_property!(
        inherited_flags.print_color_adjust,
        print_color_adjust,
        set_print_color_adjust,
        PrintColorAdjust
    );
    flag_property!(
        inherited_flags.pointer_events,
        pointer_events,
        set_pointer_events,
        PointerEvents
    );
    flag_property!(inherited_flags.inside_link, inside_link, set_inside_link, InsideLink);

    #[inline]
    pub fn is_left_to_right_direction(&self) -> bool {
        self.direction() == TextDirection::Ltr
    }

    // Box.

    group_property!(box_data.width, width, set_width, Length);
    group_property!(box_data.height, height, set_height, Length);
    group_property!(box_data.min_width, min_width, set_min_width, Length);
    group_property!(box_data.max_width, max_width, set_max_width, Length);
    group_property!(box_data.min_height, min_height, set_min_height, Length);
    group_property!(box_data.max_height, max_height, set_max_height, Length);
    group_property!(
        box_data.vertical_align,
        vertical_align_length,
        set_vertical_align_length,
        Length
    );
    group_property!(box_data.box_sizing, box_sizing, set_box_sizing, BoxSizing);

    #[inline]
    pub fn z_index(&self) -> i32 {
        self.box_data.z_index
    }

    #[inline]
    pub fn has_auto_z_index(&self) -> bool {
        self.box_data.has_auto_z_index
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        if self.has_auto_z_index() || self.z_index() != z_index {
            let data = self.box_data.access();
            data.has_auto_z_index = false;
            data.z_index = z_index;
        }
    }

    pub fn set_has_auto_z_index(&mut self) {
        if !self.has_auto_z_index() || self.z_index() != 0 {
            let data = self.box_data.access();
            data.has_auto_z_index = true;
            data.z_index = 0;
        }
    }

    // Visual.

    #[inline]
    pub fn clip(&self) -> &LengthBox {
        &self.visual.clip
    }

    pub fn set_clip(&mut self, clip: LengthBox) {
        if self.has_auto_clip() || self.visual.clip != clip {
            let data = self.visual.access();
            data.has_auto_clip = false;
            data.clip = clip;
        }
    }

    group_property!(visual.has_auto_clip, has_auto_clip, set_has_auto_clip, bool);
    group_property!(visual.text_decoration, text_decoration, set_text_decoration, TextDecoration);
    group_property!(visual.zoom, zoom, set_zoom, f32);

    // Background and outline.

    #[inline]
    pub fn background_layers(&self) -> &FillLayers {
        &self.background.background
    }

    #[inline]
    pub fn access_background_layers(&mut self) -> &mut FillLayers {
        &mut self.background.access().background
    }

    group_property!(background.color, background_color, set_background_color, StyleColor);

    #[inline]
    pub fn outline(&self) -> &OutlineValue {
        &self.background.outline
    }

    pub fn set_outline(&mut self, outline: OutlineValue) {
        if self.background.outline != outline {
            self.background.access().outline = outline;
        }
    }

    #[inline]
    pub fn outline_style(&self) -> BorderStyle {
        self.background.outline.style()
    }

    /// The width of the outline, zero when it is not drawn.
    pub fn outline_width(&self) -> f32 {
        match self.outline_style() {
            BorderStyle::None => 0.,
            _ => self.background.outline.border.width,
        }
    }

    // Offsets, margins, padding and borders.

    group_property!(surround.offset, offset, set_offset, LengthBox);
    group_property!(surround.margin, margin, set_margin, LengthBox);
    group_property!(surround.padding, padding, set_padding, LengthBox);

    #[inline]
    pub fn top(&self) -> Length {
        self.surround.offset.top
    }

    #[inline]
    pub fn right(&self) -> Length {
        self.surround.offset.right
    }

    #[inline]
    pub fn bottom(&self) -> Length {
        self.surround.offset.bottom
    }

    #[inline]
    pub fn left(&self) -> Length {
        self.surround.offset.left
    }

    pub fn set_top(&mut self, top: Length) {
        if self.top() != top {
            self.surround.access().offset.top = top;
        }
    }

    pub fn set_right(&mut self, right: Length) {
        if self.right() != right {
            self.surround.access().offset.right = right;
        }
    }

    pub fn set_bottom(&mut self, bottom: Length) {
        if self.bottom() != bottom {
            self.surround.access().offset.bottom = bottom;
        }
    }

    pub fn set_left(&mut self, left: Length) {
        if self.left() != left {
            self.surround.access().offset.left = left;
        }
    }

    #[inline]
    pub fn border(&self) -> &BorderData {
        &self.surround.border
    }

    /// Mutable access to the border, unsharing the record first.
    #[inline]
    pub fn access_border(&mut self) -> &mut BorderData {
        &mut self.surround.access().border
    }

    #[inline]
    pub fn border_left_width(&self) -> f32 {
        self.surround.border.border_left_width()
    }

    #[inline]
    pub fn border_right_width(&self) -> f32 {
        self.surround.border.border_right_width()
    }

    #[inline]
    pub fn border_top_width(&self) -> f32 {
        self.surround.border.border_top_width()
    }

    #[inline]
    pub fn border_bottom_width(&self) -> f32 {
        self.surround.border.border_bottom_width()
    }

    // Inherited.

    group_property!(inherited.line_height, line_height, set_line_height, Length);
    group_property!(
        inherited.horizontal_border_spacing,
        horizontal_border_spacing,
        set_horizontal_border_spacing,
        i16
    );
    group_property!(
        inherited.vertical_border_spacing,
        vertical_border_spacing,
        set_vertical_border_spacing,
        i16
    );
    group_property!(inherited.color, color, set_color, Color);

    #[inline]
    pub fn font(&self) -> &Font {
        &self.inherited.font
    }

    #[inline]
    pub fn font_description(&self) -> &FontDescription {
        self.inherited.font.description()
    }

    /// Replaces the font when `description` differs from the current one.
    /// Returns whether it did.
    pub fn set_font_description(&mut self, description: FontDescription) -> bool {
        if *self.font_description() == description {
            return false;
        }
        self.inherited.access().font = Font::new(description);
        true
    }

    /// Resolves the font's fallback list against `selector`.
    pub fn update_font(&mut self, selector: Option<&dyn FontSelector>) {
        self.inherited.access().font.update(selector);
    }

    /// The computed font size in pixels.
    #[inline]
    pub fn font_size(&self) -> f32 {
        self.font_description().computed_size
    }

    // Rare non-inherited.

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.rare_non_inherited.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0., 1.);
        if self.rare_non_inherited.opacity != opacity {
            self.rare_non_inherited.access().opacity = opacity;
        }
    }

    #[inline]
    pub fn has_opacity(&self) -> bool {
        self.rare_non_inherited.has_opacity()
    }

    group_property!(rare_non_inherited.line_clamp, line_clamp, set_line_clamp, i32);
    group_property!(rare_non_inherited.order, order, set_order, i32);
    group_property!(rare_non_inherited.object_fit, object_fit, set_object_fit, ObjectFit);
    group_property!(
        rare_non_inherited.object_position,
        object_position,
        set_object_position,
        LengthPoint
    );
    group_property!(
        rare_non_inherited.align_content,
        align_content,
        set_align_content,
        StyleContentAlignmentData
    );
    group_property!(
        rare_non_inherited.align_items,
        align_items,
        set_align_items,
        StyleSelfAlignmentData
    );
    group_property!(
        rare_non_inherited.align_self,
        align_self,
        set_align_self,
        StyleSelfAlignmentData
    );
    group_property!(
        rare_non_inherited.justify_content,
        justify_content,
        set_justify_content,
        StyleContentAlignmentData
    );
    group_property!(
        rare_non_inherited.justify_items,
        justify_items,
        set_justify_items,
        StyleSelfAlignmentData
    );
    group_property!(
        rare_non_inherited.justify_self,
        justify_self,
        set_justify_self,
        StyleSelfAlignmentData
    );
    group_property!(
        rare_non_inherited.text_overflow,
        text_overflow,
        set_text_overflow,
        TextOverflow
    );
    group_property!(rare_non_inherited.wrap_flow, wrap_flow, set_wrap_flow, WrapFlow);
    group_property!(
        rare_non_inherited.wrap_through,
        wrap_through,
        set_wrap_through,
        WrapThrough
    );
    group_property!(rare_non_inherited.appearance, appearance, set_appearance, ControlPart);
    group_property!(
        rare_non_inherited.margin_before_collapse,
        margin_before_collapse,
        set_margin_before_collapse,
        MarginCollapse
    );
    group_property!(
        rare_non_inherited.margin_after_collapse,
        margin_after_collapse,
        set_margin_after_collapse,
        MarginCollapse
    );
    group_property!(
        rare_non_inherited.effective_blend_mode,
        blend_mode,
        set_blend_mode,
        BlendMode
    );
    group_property!(rare_non_inherited.isolation, isolation, set_isolation, Isolation);
    group_property!(rare_non_inherited.user_drag, user_drag, set_user_drag, UserDrag);
    group_property!(
        rare_non_inherited.text_decoration_style,
        text_decoration_style,
        set_text_decoration_style,
        TextDecorationStyle
    );
    group_property!(
        rare_non_inherited.text_decoration_color,
        text_decoration_color,
        set_text_decoration_color,
        StyleColor
    );
    group_property!(rare_non_inherited.shape_margin, shape_margin, set_shape_margin, Length);
    group_property!(
        rare_non_inherited.shape_image_threshold,
        shape_image_threshold,
        set_shape_image_threshold,
        f32
    );

    #[inline]
    pub fn flex_grow(&self) -> f32 {
        self.rare_non_inherited.flexible_box.flex_grow
    }

    pub fn set_flex_grow(&mut self, flex_grow: f32) {
        if self.flex_grow() != flex_grow {
            self.rare_non_inherited
                .access()
                .flexible_box
                .access()
                .flex_grow = flex_grow;
        }
    }

    #[inline]
    pub fn flex_shrink(&self) -> f32 {
        self.rare_non_inherited.flexible_box.flex_shrink
    }

    pub fn set_flex_shrink(&mut self, flex_shrink: f32) {
        if self.flex_shrink() != flex_shrink {
            self.rare_non_inherited
                .access()
                .flexible_box
                .access()
                .flex_shrink = flex_shrink;
        }
    }

    #[inline]
    pub fn flex_basis(&self) -> Length {
        self.rare_non_inherited.flexible_box.flex_basis
    }

    pub fn set_flex_basis(&mut self, flex_basis: Length) {
        if self.flex_basis() != flex_basis {
            self.rare_non_inherited
                .access()
                .flexible_box
                .access()
                .flex_basis = flex_basis;
        }
    }

    #[inline]
    pub fn flex_direction(&self) -> FlexDirection {
        self.rare_non_inherited.flexible_box.flex_direction
    }

    pub fn set_flex_direction(&mut self, flex_direction: FlexDirection) {
        if self.flex_direction() != flex_direction {
            self.rare_non_inherited
                .access()
                .flexible_box
                .access()
                .flex_direction = flex_direction;
        }
    }

    #[inline]
    pub fn flex_wrap(&self) -> FlexWrap {
        self.rare_non_inherited.flexible_box.flex_wrap
    }

    pub fn set_flex_wrap(&mut self, flex_wrap: FlexWrap) {
        if self.flex_wrap() != flex_wrap {
            self.rare_non_inherited
                .access()
                .flexible_box
                .access()
                .flex_wrap = flex_wrap;
        }
    }

    #[inline]
    pub fn transform(&self) -> &TransformOperations {
        &self.rare_non_inherited.transform.operations
    }

    pub fn set_transform(&mut self, operations: TransformOperations) {
        if *self.transform() != operations {
            self.rare_non_inherited
                .access()
                .transform
                .access()
                .operations = operations;
        }
    }

    #[inline]
    pub fn has_transform(&self) -> bool {
        !self.transform().is_empty()
    }

    #[inline]
    pub fn transform_origin(&self) -> LengthPoint {
        self.rare_non_inherited.transform.origin
    }

    pub fn set_transform_origin(&mut self, origin: LengthPoint) {
        if self.transform_origin() != origin {
            self.rare_non_inherited.access().transform.access().origin = origin;
        }
    }

    #[inline]
    pub fn filter(&self) -> &FilterOperations {
        &self.rare_non_inherited.filter.operations
    }

    pub fn set_filter(&mut self, operations: FilterOperations) {
        if *self.filter() != operations {
            self.rare_non_inherited.access().filter.access().operations = operations;
        }
    }

    #[inline]
    pub fn has_filters(&self) -> bool {
        self.rare_non_inherited.has_filters()
    }

    pub fn will_change_properties(&self) -> &[crate::properties::CssPropertyId] {
        &self.rare_non_inherited.will_change.properties
    }

    pub fn set_will_change_properties(&mut self, properties: Vec<crate::properties::CssPropertyId>) {
        if self.will_change_properties() != properties.as_slice() {
            self.rare_non_inherited
                .access()
                .will_change
                .access()
                .properties = properties;
        }
    }

    shared_property!(rare_non_inherited.content, content, set_content, ContentData);
    shared_property!(
        rare_non_inherited.counter_directives,
        counter_directives,
        set_counter_directives,
        CounterDirectiveMap
    );
    shared_property!(rare_non_inherited.box_shadow, box_shadow, set_box_shadow, ShadowList);
    shared_property!(rare_non_inherited.clip_path, clip_path, set_clip_path, ClipPathOperation);
    shared_property!(
        rare_non_inherited.shape_outside,
        shape_outside,
        set_shape_outside,
        ShapeValue
    );

    #[inline]
    pub fn mask_layers(&self) -> &FillLayers {
        &self.rare_non_inherited.mask
    }

    #[inline]
    pub fn access_mask_layers(&mut self) -> &mut FillLayers {
        &mut self.rare_non_inherited.access().mask
    }

    #[inline]
    pub fn mask_box_image(&self) -> &NinePieceImage {
        &self.rare_non_inherited.mask_box_image
    }

    pub fn set_mask_box_image(&mut self, image: NinePieceImage) {
        if self.rare_non_inherited.mask_box_image != image {
            self.rare_non_inherited.access().mask_box_image = image;
        }
    }

    // Rare inherited.

    group_property!(
        rare_inherited.text_stroke_color,
        text_stroke_color,
        set_text_stroke_color,
        StyleColor
    );
    group_property!(
        rare_inherited.text_stroke_width,
        text_stroke_width,
        set_text_stroke_width,
        f32
    );
    group_property!(
        rare_inherited.text_fill_color,
        text_fill_color,
        set_text_fill_color,
        StyleColor
    );
    group_property!(
        rare_inherited.text_emphasis_color,
        text_emphasis_color,
        set_text_emphasis_color,
        StyleColor
    );
    group_property!(rare_inherited.text_indent, text_indent, set_text_indent, Length);
    group_property!(
        rare_inherited.text_align_last,
        text_align_last,
        set_text_align_last,
        TextAlignLast
    );
    group_property!(rare_inherited.text_justify, text_justify, set_text_justify, TextJustify);
    group_property!(
        rare_inherited.text_orientation,
        text_orientation,
        set_text_orientation,
        TextOrientation
    );
    group_property!(rare_inherited.tab_size, tab_size, set_tab_size, u32);
    group_property!(rare_inherited.word_break, word_break, set_word_break, WordBreak);
    group_property!(
        rare_inherited.overflow_wrap,
        overflow_wrap,
        set_overflow_wrap,
        OverflowWrap
    );
    group_property!(rare_inherited.line_break, line_break, set_line_break, LineBreak);
    group_property!(rare_inherited.hyphens, hyphens, set_hyphens, Hyphens);
    group_property!(
        rare_inherited.hyphenation_limit_before,
        hyphenation_limit_before,
        set_hyphenation_limit_before,
        i16
    );
    group_property!(
        rare_inherited.hyphenation_limit_after,
        hyphenation_limit_after,
        set_hyphenation_limit_after,
        i16
    );
    group_property!(
        rare_inherited.hyphenation_limit_lines,
        hyphenation_limit_lines,
        set_hyphenation_limit_lines,
        i16
    );
    group_property_ref!(
        rare_inherited.hyphenation_string,
        hyphenation_string,
        set_hyphenation_string,
        String
    );
    group_property_ref!(rare_inherited.locale, locale, set_locale, String);
    group_property!(
        rare_inherited.line_box_contain,
        line_box_contain,
        set_line_box_contain,
        u8
    );
    group_property!(rare_inherited.user_modify, user_modify, set_user_modify, UserModify);
    group_property!(rare_inherited.user_select, user_select, set_user_select, UserSelect);
    group_property!(
        rare_inherited.image_rendering,
        image_rendering,
        set_image_rendering,
        ImageRendering
    );
    group_property!(
        rare_inherited.text_security,
        text_security,
        set_text_security,
        TextSecurity
    );

    shared_property!(rare_inherited.text_shadow, text_shadow, set_text_shadow, ShadowList);
    shared_property!(rare_inherited.quotes, quotes, set_quotes, QuotesData);

    #[inline]
    pub fn effective_zoom(&self) -> f32 {
        self.rare_inherited.effective_zoom
    }

    /// Returns whether the zoom changed, which dirties the font.
    pub fn set_effective_zoom(&mut self, zoom: f32) -> bool {
        if self.rare_inherited.effective_zoom == zoom {
            return false;
        }
        self.rare_inherited.access().effective_zoom = zoom;
        true
    }

    // Text decorations.

    /// Adds the decorations this element declares to the ones inherited
    /// from its ancestors.
    pub fn apply_text_decorations(&mut self) {
        let lines = self.text_decoration();
        if lines.is_empty() {
            return;
        }

        let style = self.text_decoration_style();
        let color = self.text_decoration_color();

        if lines.contains(TextDecoration::UNDERLINE) {
            let underline = AppliedTextDecoration::new(TextDecoration::UNDERLINE, style, color);
            if self.rare_inherited.applied_text_decorations.is_none() &&
                underline.is_simple_underline()
            {
                self.inherited_flags.has_simple_underline = true;
            } else {
                self.add_applied_text_decoration(underline);
            }
        }
        if lines.contains(TextDecoration::OVERLINE) {
            self.add_applied_text_decoration(AppliedTextDecoration::new(
                TextDecoration::OVERLINE,
                style,
                color,
            ));
        }
        if lines.contains(TextDecoration::LINE_THROUGH) {
            self.add_applied_text_decoration(AppliedTextDecoration::new(
                TextDecoration::LINE_THROUGH,
                style,
                color,
            ));
        }
    }

    pub fn add_applied_text_decoration(&mut self, decoration: AppliedTextDecoration) {
        let had_simple_underline = std::mem::take(&mut self.inherited_flags.has_simple_underline);
        let data = self.rare_inherited.access();
        let list = data
            .applied_text_decorations
            .get_or_insert_with(|| Arc::new(Vec::new()));
        let list = Arc::make_mut(list);
        if had_simple_underline {
            list.push(AppliedTextDecoration::simple_underline());
        }
        list.push(decoration);
    }

    pub fn clear_applied_text_decorations(&mut self) {
        self.inherited_flags.has_simple_underline = false;
        if self.rare_inherited.applied_text_decorations.is_some() {
            self.rare_inherited.access().applied_text_decorations = None;
        }
    }

    /// Every decoration that applies to this element's text, outermost
    /// first.
    pub fn applied_text_decorations(&self) -> &[AppliedTextDecoration] {
        if self.inherited_flags.has_simple_underline {
            return &SIMPLE_UNDERLINE;
        }
        match self.rare_inherited.applied_text_decorations {
            Some(ref list) => list.as_slice(),
            None => &[],
        }
    }

    #[inline]
    pub fn has_simple_underline(&self) -> bool {
        self.inherited_flags.has_simple_underline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_shares_the_default_records() {
        let a = RenderStyle::create();
        let b = RenderStyle::create();
        assert!(a.inherited_data_shared(&b));
        assert!(a.box_data.ptr_eq(&b.box_data));
        assert_eq!(a, b);
    }

    #[test]
    fn setting_the_current_value_keeps_sharing() {
        let a = RenderStyle::create();
        let mut b = a.clone();
        b.set_opacity(1.);
        assert!(a.rare_non_inherited.ptr_eq(&b.rare_non_inherited));
        b.set_opacity(0.5);
        assert!(!a.rare_non_inherited.ptr_eq(&b.rare_non_inherited));
        assert_eq!(a.opacity(), 1.);
    }

    #[test]
    fn z_index_tracks_auto() {
        let mut style = RenderStyle::create();
        assert!(style.has_auto_z_index());
        style.set_z_index(0);
        assert!(!style.has_auto_z_index());
        style.set_has_auto_z_index();
        assert!(style.has_auto_z_index());
    }

    #[test]
    fn user_modify_stops_at_shadow_boundaries() {
        let mut parent = RenderStyle::create();
        parent.set_user_modify(UserModify::ReadWrite);
        parent.set_color(Color::WHITE);

        let mut child = RenderStyle::create();
        child.inherit_from(&parent, IsAtShadowBoundary::AtShadowBoundary);
        assert_eq!(child.user_modify(), UserModify::ReadOnly);
        assert_eq!(child.color(), Color::WHITE);

        let mut child = RenderStyle::create();
        child.inherit_from(&parent, IsAtShadowBoundary::NotAtShadowBoundary);
        assert_eq!(child.user_modify(), UserModify::ReadWrite);
        assert!(child.inherited_data_shared(&parent));
    }

    #[test]
    fn anonymous_styles_inherit_but_keep_their_display() {
        let mut parent = RenderStyle::create();
        parent.set_display(Display::Flex);
        parent.set_unicode_bidi(UnicodeBidi::Isolate);
        parent.set_direction(TextDirection::Rtl);
        parent.set_opacity(0.5);

        let style = RenderStyle::create_anonymous_style_with_display(&parent, Display::Block);
        assert_eq!(style.display(), Display::Block);
        assert_eq!(style.original_display(), Display::Inline);
        assert_eq!(style.unicode_bidi(), UnicodeBidi::Isolate);
        assert_eq!(style.direction(), TextDirection::Rtl);
        assert_eq!(style.opacity(), 1.);
    }

    #[test]
    fn copy_non_inherited_keeps_pseudo_state() {
        let mut source = RenderStyle::create();
        source.set_position(Position::Absolute);
        source.set_style_type(PseudoId::Before);
        source.set_has_explicitly_inherited_properties();

        let mut style = RenderStyle::create();
        style.copy_non_inherited_from(&source);
        assert_eq!(style.position(), Position::Absolute);
        assert_eq!(style.style_type(), PseudoId::None);
        assert!(style.has_explicitly_inherited_properties());
    }

    #[test]
    fn structural_state_is_not_part_of_equality() {
        let a = RenderStyle::create();
        let mut b = a.clone();
        b.set_unique();
        b.set_structural_state(StructuralState::FIRST_CHILD_STATE, true);
        assert_eq!(a, b);
    }

    #[test]
    fn cached_pseudo_styles_are_looked_up_by_type() {
        let mut before = RenderStyle::create();
        before.set_style_type(PseudoId::Before);
        let mut style = RenderStyle::create();
        style.set_has_pseudo_style(PseudoId::Before);
        style.add_cached_pseudo_style(Arc::new(before));

        assert!(style.has_pseudo_style(PseudoId::Before));
        assert!(!style.has_pseudo_style(PseudoId::After));
        assert!(style.get_cached_pseudo_style(PseudoId::Before).is_some());
        assert!(style.get_cached_pseudo_style(PseudoId::After).is_none());
        assert!(style.clone().cached_pseudo_styles().is_empty());

        style.remove_cached_pseudo_style(PseudoId::Before);
        assert!(style.get_cached_pseudo_style(PseudoId::Before).is_none());
    }

    #[test]
    fn simple_underline_avoids_a_list() {
        let mut style = RenderStyle::create();
        style.set_text_decoration(TextDecoration::UNDERLINE);
        style.apply_text_decorations();
        assert!(style.has_simple_underline());
        assert!(style.rare_inherited.applied_text_decorations.is_none());
        assert_eq!(style.applied_text_decorations(), &[AppliedTextDecoration::simple_underline()]);

        let mut child = RenderStyle::create();
        child.inherit_from(&style, IsAtShadowBoundary::NotAtShadowBoundary);
        child.set_text_decoration(TextDecoration::LINE_THROUGH);
        child.apply_text_decorations();
        assert!(!child.has_simple_underline());
        let lines: Vec<TextDecoration> = child
            .applied_text_decorations()
            .iter()
            .map(|decoration| decoration.lines)
            .collect();
        assert_eq!(lines, vec![TextDecoration::UNDERLINE, TextDecoration::LINE_THROUGH]);
        assert_eq!(style.applied_text_decorations().len(), 1);

        child.clear_applied_text_decorations();
        assert!(child.applied_text_decorations().is_empty());
    }

    #[test]
    fn font_description_changes_are_reported() {
        let mut style = RenderStyle::create();
        let mut description = style.font_description().clone();
        assert!(!style.set_font_description(description.clone()));
        description.specified_size = 20.;
        assert!(style.set_font_description(description));
        assert_eq!(style.font_description().specified_size, 20.);
    }
}
