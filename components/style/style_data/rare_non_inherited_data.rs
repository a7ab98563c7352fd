/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use servo_arc::Arc;

use crate::color::StyleColor;
use crate::data_ref::{DataRef, data_equivalent};
use crate::length::{Length, LengthPoint};
use crate::properties::CssPropertyId;
use crate::render_style::constants::{
    ControlPart, FlexDirection, FlexWrap, Isolation, MarginCollapse, ObjectFit,
    StyleContentAlignmentData, StyleSelfAlignmentData, TextOverflow, UserDrag, WrapFlow,
    WrapThrough,
};
use crate::values::clip_path::ClipPathOperation;
use crate::values::content::ContentData;
use crate::values::counter::CounterDirectiveMap;
use crate::values::fill_layer::{BlendMode, FillLayerType, FillLayers};
use crate::values::filter::FilterOperations;
use crate::values::nine_piece_image::NinePieceImage;
use crate::values::shadow::ShadowList;
use crate::values::shape_value::ShapeValue;
use crate::values::text_decoration::TextDecorationStyle;
use crate::values::transform::TransformOperations;

#[derive(Clone, Debug, PartialEq)]
pub struct StyleFlexibleBoxData {
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Length,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
}

impl Default for StyleFlexibleBoxData {
    fn default() -> Self {
        StyleFlexibleBoxData {
            flex_grow: 0.,
            flex_shrink: 1.,
            flex_basis: Length::Auto,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Nowrap,
        }
    }
}

/// `will-change`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleWillChangeData {
    pub properties: Vec<CssPropertyId>,
    pub contents: bool,
    pub scroll_position: bool,
}

impl StyleWillChangeData {
    #[inline]
    pub fn will_change(&self, property: CssPropertyId) -> bool {
        self.properties.contains(&property)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleTransformData {
    pub operations: TransformOperations,
    pub origin: LengthPoint,
    pub origin_z: f32,
}

impl Default for StyleTransformData {
    fn default() -> Self {
        StyleTransformData {
            operations: TransformOperations::none(),
            origin: LengthPoint::new(Length::Percent(50.), Length::Percent(50.)),
            origin_z: 0.,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleFilterData {
    pub operations: FilterOperations,
}

/// Non-inherited properties that most elements leave at their initial
/// values.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRareNonInheritedData {
    /// `-webkit-line-clamp`; zero means none.
    pub line_clamp: i32,
    pub opacity: f32,

    pub flexible_box: DataRef<StyleFlexibleBoxData>,
    pub will_change: DataRef<StyleWillChangeData>,
    pub transform: DataRef<StyleTransformData>,
    pub filter: DataRef<StyleFilterData>,

    pub content: Option<Arc<ContentData>>,
    pub counter_directives: Option<Arc<CounterDirectiveMap>>,
    pub box_shadow: Option<Arc<ShadowList>>,
    pub clip_path: Option<Arc<ClipPathOperation>>,
    pub shape_outside: Option<Arc<ShapeValue>>,
    pub shape_margin: Length,
    pub shape_image_threshold: f32,

    pub mask: FillLayers,
    pub mask_box_image: NinePieceImage,

    pub text_decoration_style: TextDecorationStyle,
    pub text_decoration_color: StyleColor,

    pub order: i32,
    pub object_fit: ObjectFit,
    pub object_position: LengthPoint,

    pub align_content: StyleContentAlignmentData,
    pub align_items: StyleSelfAlignmentData,
    pub align_self: StyleSelfAlignmentData,
    pub justify_content: StyleContentAlignmentData,
    pub justify_items: StyleSelfAlignmentData,
    pub justify_self: StyleSelfAlignmentData,

    pub text_overflow: TextOverflow,
    pub wrap_flow: WrapFlow,
    pub wrap_through: WrapThrough,
    pub appearance: ControlPart,
    pub margin_before_collapse: MarginCollapse,
    pub margin_after_collapse: MarginCollapse,
    pub effective_blend_mode: BlendMode,
    pub isolation: Isolation,
    pub user_drag: UserDrag,
}

impl Default for StyleRareNonInheritedData {
    fn default() -> Self {
        StyleRareNonInheritedData {
            line_clamp: 0,
            opacity: 1.,
            flexible_box: DataRef::default(),
            will_change: DataRef::default(),
            transform: DataRef::default(),
            filter: DataRef::default(),
            content: None,
            counter_directives: None,
            box_shadow: None,
            clip_path: None,
            shape_outside: None,
            shape_margin: Length::zero(),
            shape_image_threshold: 0.,
            mask: FillLayers::new(FillLayerType::Mask),
            mask_box_image: NinePieceImage::mask_defaults(),
            text_decoration_style: TextDecorationStyle::default(),
            text_decoration_color: StyleColor::CurrentColor,
            order: 0,
            object_fit: ObjectFit::Fill,
            object_position: LengthPoint::new(Length::Percent(50.), Length::Percent(50.)),
            align_content: StyleContentAlignmentData::default(),
            align_items: StyleSelfAlignmentData::default(),
            align_self: StyleSelfAlignmentData::default(),
            justify_content: StyleContentAlignmentData::default(),
            justify_items: StyleSelfAlignmentData::default(),
            justify_self: StyleSelfAlignmentData::default(),
            text_overflow: TextOverflow::Clip,
            wrap_flow: WrapFlow::Auto,
            wrap_through: WrapThrough::Wrap,
            appearance: ControlPart::NoControl,
            margin_before_collapse: MarginCollapse::Collapse,
            margin_after_collapse: MarginCollapse::Collapse,
            effective_blend_mode: BlendMode::Normal,
            isolation: Isolation::Auto,
            user_drag: UserDrag::Auto,
        }
    }
}

impl StyleRareNonInheritedData {
    pub fn content_data_equivalent(&self, other: &StyleRareNonInheritedData) -> bool {
        data_equivalent(self.content.as_ref(), other.content.as_ref())
    }

    pub fn counter_data_equivalent(&self, other: &StyleRareNonInheritedData) -> bool {
        data_equivalent(
            self.counter_directives.as_ref(),
            other.counter_directives.as_ref(),
        )
    }

    pub fn shadow_data_equivalent(&self, other: &StyleRareNonInheritedData) -> bool {
        data_equivalent(self.box_shadow.as_ref(), other.box_shadow.as_ref())
    }

    pub fn clip_path_equivalent(&self, other: &StyleRareNonInheritedData) -> bool {
        data_equivalent(self.clip_path.as_ref(), other.clip_path.as_ref())
    }

    pub fn shape_outside_equivalent(&self, other: &StyleRareNonInheritedData) -> bool {
        data_equivalent(self.shape_outside.as_ref(), other.shape_outside.as_ref())
    }

    #[inline]
    pub fn has_opacity(&self) -> bool {
        self.opacity < 1.
    }

    #[inline]
    pub fn has_filters(&self) -> bool {
        !self.filter.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::counter::CounterDirectives;

    #[test]
    fn nested_lists_compare_by_content() {
        let mut map = CounterDirectiveMap::new();
        map.insert(
            "section".to_owned(),
            CounterDirectives {
                reset: Some(0),
                increment: None,
            },
        );

        let mut a = StyleRareNonInheritedData::default();
        let mut b = StyleRareNonInheritedData::default();
        a.counter_directives = Some(Arc::new(map.clone()));
        assert!(!a.counter_data_equivalent(&b));
        b.counter_directives = Some(Arc::new(map));
        assert!(a.counter_data_equivalent(&b));
        assert!(a.shadow_data_equivalent(&b));
    }
}
