/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Background and mask layers.
//!
//! Each `background-*` and `mask-*` longhand is a comma separated list with
//! one entry per layer. Shorter lists repeat to cover all layers, which is
//! what [`FillLayers::fill_unset_properties`] implements.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::image::StyleImage;
use crate::length::{Length, LengthSize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FillAttachment {
    #[default]
    Scroll,
    Local,
    Fixed,
}

/// The painting area of a layer. Variants are ordered from the widest to the
/// narrowest box.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FillBox {
    #[default]
    Border,
    Padding,
    Content,
    Text,
}

impl FillBox {
    /// The wider of two boxes.
    pub fn enclosing(self, other: FillBox) -> FillBox {
        fn rank(fill_box: FillBox) -> u8 {
            match fill_box {
                FillBox::Border => 0,
                FillBox::Padding => 1,
                FillBox::Content => 2,
                FillBox::Text => 3,
            }
        }
        if rank(self) <= rank(other) { self } else { other }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FillRepeat {
    #[default]
    Repeat,
    NoRepeat,
    Round,
    Space,
}

impl FillRepeat {
    #[inline]
    pub fn tiles(self) -> bool {
        matches!(self, FillRepeat::Repeat | FillRepeat::Round)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CompositeOperator {
    Clear,
    Copy,
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Xor,
    PlusDarker,
    PlusLighter,
    Difference,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FillSizeType {
    Contain,
    Cover,
    SizeLength,
    #[default]
    SizeNone,
}

/// A computed `background-size`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FillSize {
    pub size_type: FillSizeType,
    pub size: LengthSize,
}

impl FillSize {
    pub fn new(size_type: FillSizeType, size: LengthSize) -> Self {
        FillSize { size_type, size }
    }
}

/// The edge a background position is measured from.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BackgroundEdgeOrigin {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum FillLayerType {
    #[default]
    Background,
    Mask,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum MaskSourceType {
    #[default]
    Alpha,
    Luminance,
}

bitflags! {
    /// Which properties of a layer were given explicitly.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct FillLayerSet: u16 {
        const IMAGE = 1 << 0;
        const X_POSITION = 1 << 1;
        const Y_POSITION = 1 << 2;
        const BACKGROUND_X_ORIGIN = 1 << 3;
        const BACKGROUND_Y_ORIGIN = 1 << 4;
        const ATTACHMENT = 1 << 5;
        const CLIP = 1 << 6;
        const ORIGIN = 1 << 7;
        const REPEAT_X = 1 << 8;
        const REPEAT_Y = 1 << 9;
        const COMPOSITE = 1 << 10;
        const SIZE = 1 << 11;
        const BLEND_MODE = 1 << 12;
        const MASK_SOURCE_TYPE = 1 << 13;
    }
}

/// One layer of a background or mask.
#[derive(Clone, Debug)]
pub struct FillLayer {
    layer_type: FillLayerType,
    image: Option<StyleImage>,
    x_position: Length,
    y_position: Length,
    background_x_origin: BackgroundEdgeOrigin,
    background_y_origin: BackgroundEdgeOrigin,
    attachment: FillAttachment,
    clip: FillBox,
    origin: FillBox,
    repeat_x: FillRepeat,
    repeat_y: FillRepeat,
    composite: CompositeOperator,
    size: FillSize,
    blend_mode: BlendMode,
    mask_source_type: MaskSourceType,
    set: FillLayerSet,
}

macro_rules! fill_layer_property {
    ($name:ident, $setter:ident, $clear:ident, $is_set:ident, $ty:ty, $flag:ident) => {
        #[inline]
        pub fn $name(&self) -> $ty {
            self.$name
        }

        #[inline]
        pub fn $setter(&mut self, value: $ty) {
            self.$name = value;
            self.set.insert(FillLayerSet::$flag);
        }

        #[inline]
        pub fn $clear(&mut self) {
            self.set.remove(FillLayerSet::$flag);
        }

        #[inline]
        pub fn $is_set(&self) -> bool {
            self.set.contains(FillLayerSet::$flag)
        }
    };
}

impl FillLayer {
    pub fn new(layer_type: FillLayerType) -> Self {
        FillLayer {
            layer_type,
            image: None,
            x_position: Length::Percent(0.),
            y_position: Length::Percent(0.),
            background_x_origin: BackgroundEdgeOrigin::Left,
            background_y_origin: BackgroundEdgeOrigin::Top,
            attachment: FillAttachment::Scroll,
            clip: FillBox::Border,
            origin: FillLayer::initial_origin(layer_type),
            repeat_x: FillRepeat::Repeat,
            repeat_y: FillRepeat::Repeat,
            composite: CompositeOperator::SourceOver,
            size: FillSize::new(FillSizeType::SizeNone, LengthSize::default()),
            blend_mode: BlendMode::Normal,
            mask_source_type: MaskSourceType::Alpha,
            set: FillLayerSet::empty(),
        }
    }

    /// Backgrounds are positioned in the padding box, masks in the border box.
    pub fn initial_origin(layer_type: FillLayerType) -> FillBox {
        match layer_type {
            FillLayerType::Background => FillBox::Padding,
            FillLayerType::Mask => FillBox::Border,
        }
    }

    #[inline]
    pub fn layer_type(&self) -> FillLayerType {
        self.layer_type
    }

    #[inline]
    pub fn image(&self) -> Option<&StyleImage> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<StyleImage>) {
        self.image = image;
        self.set.insert(FillLayerSet::IMAGE);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.set.remove(FillLayerSet::IMAGE);
    }

    #[inline]
    pub fn is_image_set(&self) -> bool {
        self.set.contains(FillLayerSet::IMAGE)
    }

    #[inline]
    pub fn x_position(&self) -> &Length {
        &self.x_position
    }

    pub fn set_x_position(&mut self, position: Length) {
        self.x_position = position;
        self.set.insert(FillLayerSet::X_POSITION);
    }

    pub fn clear_x_position(&mut self) {
        self.set
            .remove(FillLayerSet::X_POSITION | FillLayerSet::BACKGROUND_X_ORIGIN);
    }

    #[inline]
    pub fn is_x_position_set(&self) -> bool {
        self.set.contains(FillLayerSet::X_POSITION)
    }

    #[inline]
    pub fn y_position(&self) -> &Length {
        &self.y_position
    }

    pub fn set_y_position(&mut self, position: Length) {
        self.y_position = position;
        self.set.insert(FillLayerSet::Y_POSITION);
    }

    pub fn clear_y_position(&mut self) {
        self.set
            .remove(FillLayerSet::Y_POSITION | FillLayerSet::BACKGROUND_Y_ORIGIN);
    }

    #[inline]
    pub fn is_y_position_set(&self) -> bool {
        self.set.contains(FillLayerSet::Y_POSITION)
    }

    fill_layer_property!(
        background_x_origin,
        set_background_x_origin,
        clear_background_x_origin,
        is_background_x_origin_set,
        BackgroundEdgeOrigin,
        BACKGROUND_X_ORIGIN
    );
    fill_layer_property!(
        background_y_origin,
        set_background_y_origin,
        clear_background_y_origin,
        is_background_y_origin_set,
        BackgroundEdgeOrigin,
        BACKGROUND_Y_ORIGIN
    );
    fill_layer_property!(
        attachment,
        set_attachment,
        clear_attachment,
        is_attachment_set,
        FillAttachment,
        ATTACHMENT
    );
    fill_layer_property!(clip, set_clip, clear_clip, is_clip_set, FillBox, CLIP);
    fill_layer_property!(origin, set_origin, clear_origin, is_origin_set, FillBox, ORIGIN);
    fill_layer_property!(
        repeat_x,
        set_repeat_x,
        clear_repeat_x,
        is_repeat_x_set,
        FillRepeat,
        REPEAT_X
    );
    fill_layer_property!(
        repeat_y,
        set_repeat_y,
        clear_repeat_y,
        is_repeat_y_set,
        FillRepeat,
        REPEAT_Y
    );
    fill_layer_property!(
        composite,
        set_composite,
        clear_composite,
        is_composite_set,
        CompositeOperator,
        COMPOSITE
    );
    fill_layer_property!(size, set_size, clear_size, is_size_set, FillSize, SIZE);
    fill_layer_property!(
        blend_mode,
        set_blend_mode,
        clear_blend_mode,
        is_blend_mode_set,
        BlendMode,
        BLEND_MODE
    );
    fill_layer_property!(
        mask_source_type,
        set_mask_source_type,
        clear_mask_source_type,
        is_mask_source_type_set,
        MaskSourceType,
        MASK_SOURCE_TYPE
    );

    #[inline]
    pub fn size_type(&self) -> FillSizeType {
        self.size.size_type
    }

    #[inline]
    pub fn size_length(&self) -> &LengthSize {
        &self.size.size
    }

    /// Whether the image repeats across the whole painting area.
    pub fn image_tiles_layer(&self) -> bool {
        self.repeat_x.tiles() && self.repeat_y.tiles()
    }

    pub fn has_opaque_image(&self) -> bool {
        self.image.as_ref().is_some_and(StyleImage::known_to_be_opaque)
    }

    /// Whether this layer paints over everything below it in its clip.
    pub fn image_occludes_next_layers(&self) -> bool {
        let Some(image) = self.image.as_ref() else {
            return false;
        };
        if !image.is_loaded() {
            return false;
        }
        match self.composite {
            CompositeOperator::Clear | CompositeOperator::Copy => self.image_tiles_layer(),
            CompositeOperator::SourceOver => {
                self.blend_mode == BlendMode::Normal &&
                    self.image_tiles_layer() &&
                    self.has_opaque_image()
            },
            _ => false,
        }
    }

    #[inline]
    pub fn has_fixed_image(&self) -> bool {
        self.image.is_some() && self.attachment == FillAttachment::Fixed
    }
}

impl PartialEq for FillLayer {
    /// Compares values only. Whether a value was given explicitly is not
    /// part of the computed style.
    fn eq(&self, other: &Self) -> bool {
        self.image == other.image &&
            self.x_position == other.x_position &&
            self.y_position == other.y_position &&
            self.background_x_origin == other.background_x_origin &&
            self.background_y_origin == other.background_y_origin &&
            self.attachment == other.attachment &&
            self.clip == other.clip &&
            self.composite == other.composite &&
            self.blend_mode == other.blend_mode &&
            self.origin == other.origin &&
            self.repeat_x == other.repeat_x &&
            self.repeat_y == other.repeat_y &&
            self.size == other.size &&
            self.mask_source_type == other.mask_source_type &&
            self.layer_type == other.layer_type
    }
}

/// The layers of a background or mask, topmost first. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct FillLayers {
    layers: Vec<FillLayer>,
}

impl FillLayers {
    pub fn new(layer_type: FillLayerType) -> Self {
        FillLayers {
            layers: vec![FillLayer::new(layer_type)],
        }
    }

    #[inline]
    pub fn layer_type(&self) -> FillLayerType {
        self.layers[0].layer_type
    }

    #[inline]
    pub fn layers(&self) -> &[FillLayer] {
        &self.layers
    }

    #[inline]
    pub fn first(&self) -> &FillLayer {
        &self.layers[0]
    }

    #[inline]
    pub fn first_mut(&mut self) -> &mut FillLayer {
        &mut self.layers[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut FillLayer> {
        self.layers.get_mut(index)
    }

    /// Appends a layer with initial values and nothing set.
    pub fn push_layer(&mut self) -> &mut FillLayer {
        let layer_type = self.layer_type();
        self.layers.push(FillLayer::new(layer_type));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// Makes the list at least `count` layers long.
    pub fn ensure_len(&mut self, count: usize) {
        while self.layers.len() < count {
            self.push_layer();
        }
    }

    /// Gives every property not set on a layer the value of the layer at the
    /// same position in the repeating pattern formed by the layers before the
    /// first unset one.
    pub fn fill_unset_properties(&mut self) {
        fn fill<F, C>(layers: &mut [FillLayer], is_set: F, copy: C)
        where
            F: Fn(&FillLayer) -> bool,
            C: Fn(&mut FillLayer, &FillLayer),
        {
            let Some(first_unset) = layers.iter().position(|layer| !is_set(layer)) else {
                return;
            };
            if first_unset == 0 {
                return;
            }
            for index in first_unset..layers.len() {
                let pattern = layers[index % first_unset].clone();
                copy(&mut layers[index], &pattern);
            }
        }

        let layers = &mut self.layers[..];
        fill(layers, FillLayer::is_x_position_set, |layer, pattern| {
            layer.x_position = pattern.x_position;
            if pattern.is_background_x_origin_set() {
                layer.background_x_origin = pattern.background_x_origin;
            }
        });
        fill(layers, FillLayer::is_y_position_set, |layer, pattern| {
            layer.y_position = pattern.y_position;
            if pattern.is_background_y_origin_set() {
                layer.background_y_origin = pattern.background_y_origin;
            }
        });
        fill(layers, FillLayer::is_attachment_set, |layer, pattern| {
            layer.attachment = pattern.attachment;
        });
        fill(layers, FillLayer::is_clip_set, |layer, pattern| {
            layer.clip = pattern.clip;
        });
        fill(layers, FillLayer::is_composite_set, |layer, pattern| {
            layer.composite = pattern.composite;
        });
        fill(layers, FillLayer::is_blend_mode_set, |layer, pattern| {
            layer.blend_mode = pattern.blend_mode;
        });
        fill(layers, FillLayer::is_origin_set, |layer, pattern| {
            layer.origin = pattern.origin;
        });
        fill(layers, FillLayer::is_repeat_x_set, |layer, pattern| {
            layer.repeat_x = pattern.repeat_x;
        });
        fill(layers, FillLayer::is_repeat_y_set, |layer, pattern| {
            layer.repeat_y = pattern.repeat_y;
        });
        fill(layers, FillLayer::is_size_set, |layer, pattern| {
            layer.size = pattern.size;
        });
        fill(layers, FillLayer::is_mask_source_type_set, |layer, pattern| {
            layer.mask_source_type = pattern.mask_source_type;
        });
    }

    /// Drops everything from the first layer past the head that has no
    /// image set.
    pub fn cull_empty_layers(&mut self) {
        if let Some(index) = self
            .layers
            .iter()
            .skip(1)
            .position(|layer| !layer.is_image_set())
        {
            self.layers.truncate(index + 1);
        }
    }

    /// The widest clip among the layer at `index` and those below it.
    pub fn clip_max(&self, index: usize) -> FillBox {
        self.layers
            .iter()
            .skip(index)
            .map(|layer| layer.clip)
            .fold(FillBox::Text, FillBox::enclosing)
    }

    /// Whether the clip of the layer at `index` covers the clips of all the
    /// layers below it.
    pub fn clip_occludes_next_layers(&self, index: usize) -> bool {
        self.layers
            .get(index)
            .is_some_and(|layer| layer.clip == self.clip_max(index))
    }

    pub fn this_or_next_layers_use_content_box(&self, index: usize) -> bool {
        self.layers
            .iter()
            .skip(index)
            .any(|layer| layer.clip == FillBox::Content || layer.origin == FillBox::Content)
    }

    pub fn this_or_next_layers_have_local_attachment(&self, index: usize) -> bool {
        self.layers
            .iter()
            .skip(index)
            .any(|layer| layer.image.is_some() && layer.attachment == FillAttachment::Local)
    }

    pub fn has_image(&self) -> bool {
        self.layers.iter().any(|layer| layer.image.is_some())
    }

    pub fn has_fixed_image(&self) -> bool {
        self.layers.iter().any(FillLayer::has_fixed_image)
    }

    pub fn images_are_loaded(&self) -> bool {
        self.layers
            .iter()
            .filter_map(FillLayer::image)
            .all(StyleImage::is_loaded)
    }

    pub fn contains_image(&self, image: &StyleImage) -> bool {
        self.layers
            .iter()
            .any(|layer| layer.image.as_ref() == Some(image))
    }

    pub fn has_opaque_image(&self) -> bool {
        self.layers.iter().any(FillLayer::has_opaque_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layers(count: usize) -> FillLayers {
        let mut layers = FillLayers::new(FillLayerType::Background);
        layers.ensure_len(count);
        layers
    }

    #[test]
    fn single_pattern_fills_down() {
        let mut layers = layers(3);
        layers.first_mut().set_repeat_x(FillRepeat::Space);
        layers.fill_unset_properties();
        for layer in layers.layers() {
            assert_eq!(layer.repeat_x(), FillRepeat::Space);
        }
    }

    #[test]
    fn two_layer_pattern_alternates() {
        let mut layers = layers(5);
        layers.get_mut(0).unwrap().set_clip(FillBox::Content);
        layers.get_mut(1).unwrap().set_clip(FillBox::Padding);
        layers.fill_unset_properties();
        let clips: Vec<_> = layers.layers().iter().map(FillLayer::clip).collect();
        assert_eq!(
            clips,
            vec![
                FillBox::Content,
                FillBox::Padding,
                FillBox::Content,
                FillBox::Padding,
                FillBox::Content,
            ]
        );
    }

    #[test]
    fn unset_head_is_left_alone() {
        let mut layers = layers(2);
        layers.get_mut(1).unwrap().set_clip(FillBox::Content);
        layers.fill_unset_properties();
        assert_eq!(layers.layers()[0].clip(), FillBox::Border);
        assert_eq!(layers.layers()[1].clip(), FillBox::Content);
    }

    #[test]
    fn cull_drops_layers_without_images() {
        let mut layers = layers(4);
        layers.get_mut(1).unwrap().set_image(Some(StyleImage::new("a.png")));
        layers.cull_empty_layers();
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn clip_max_is_the_widest_remaining_clip() {
        let mut layers = layers(3);
        layers.get_mut(0).unwrap().set_clip(FillBox::Content);
        layers.get_mut(1).unwrap().set_clip(FillBox::Padding);
        layers.get_mut(2).unwrap().set_clip(FillBox::Content);
        assert_eq!(layers.clip_max(0), FillBox::Padding);
        assert_eq!(layers.clip_max(2), FillBox::Content);
        assert!(!layers.clip_occludes_next_layers(0));
        assert!(layers.clip_occludes_next_layers(1));
    }

    #[test]
    fn equality_ignores_set_bits() {
        let mut a = FillLayer::new(FillLayerType::Background);
        let b = FillLayer::new(FillLayerType::Background);
        a.set_clip(FillBox::Border);
        assert_eq!(a, b);
    }

    #[test]
    fn opaque_tiled_image_occludes() {
        let mut layer = FillLayer::new(FillLayerType::Background);
        layer.set_image(Some(StyleImage::with_state("a.png", true, true)));
        assert!(layer.image_occludes_next_layers());
        layer.set_repeat_x(FillRepeat::NoRepeat);
        assert!(!layer.image_occludes_next_layers());
    }
}
