/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! `border-image` and `-webkit-mask-box-image`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::LayoutUnit;
use crate::data_ref::DataRef;
use crate::image::StyleImage;
use crate::length::{Length, LengthBox};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum NinePieceImageRule {
    #[default]
    Stretch,
    Round,
    Space,
    Repeat,
}

/// A `border-image-width` or `border-image-outset` component: either a
/// multiple of the border width or a length.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum BorderImageLength {
    Number(f64),
    Length(Length),
}

impl BorderImageLength {
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, BorderImageLength::Number(_))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match *self {
            BorderImageLength::Number(number) => number == 0.,
            BorderImageLength::Length(ref length) => length.is_zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BorderImageLengthBox {
    pub top: BorderImageLength,
    pub right: BorderImageLength,
    pub bottom: BorderImageLength,
    pub left: BorderImageLength,
}

impl BorderImageLengthBox {
    pub const fn uniform(value: BorderImageLength) -> Self {
        BorderImageLengthBox {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top.is_zero() && self.right.is_zero() && self.bottom.is_zero() && self.left.is_zero()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NinePieceImageData {
    pub fill: bool,
    pub horizontal_rule: NinePieceImageRule,
    pub vertical_rule: NinePieceImageRule,
    pub image: Option<StyleImage>,
    pub image_slices: LengthBox,
    pub border_slices: BorderImageLengthBox,
    pub outset: BorderImageLengthBox,
}

impl Default for NinePieceImageData {
    fn default() -> Self {
        NinePieceImageData {
            fill: false,
            horizontal_rule: NinePieceImageRule::Stretch,
            vertical_rule: NinePieceImageRule::Stretch,
            image: None,
            image_slices: LengthBox::uniform(Length::Percent(100.)),
            border_slices: BorderImageLengthBox::uniform(BorderImageLength::Number(1.)),
            outset: BorderImageLengthBox::uniform(BorderImageLength::Length(Length::zero())),
        }
    }
}

static DEFAULT_DATA: LazyLock<DataRef<NinePieceImageData>> =
    LazyLock::new(|| DataRef::new(NinePieceImageData::default()));

/// A nine-piece image. Copies share their data until one of them is
/// modified.
#[derive(Clone, Debug, PartialEq)]
pub struct NinePieceImage {
    data: DataRef<NinePieceImageData>,
}

impl Default for NinePieceImage {
    fn default() -> Self {
        NinePieceImage {
            data: DEFAULT_DATA.clone(),
        }
    }
}

impl NinePieceImage {
    /// The initial value of `-webkit-mask-box-image`, which differs from the
    /// border image default.
    pub fn mask_defaults() -> Self {
        let mut image = NinePieceImage::default();
        let data = image.access();
        data.image_slices = LengthBox::uniform(Length::Fixed(0.));
        data.fill = true;
        data.border_slices = BorderImageLengthBox::uniform(BorderImageLength::Length(Length::Auto));
        image
    }

    #[inline]
    pub fn data(&self) -> &NinePieceImageData {
        self.data.get()
    }

    /// Mutable access, cloning the data first if it is shared.
    #[inline]
    pub fn access(&mut self) -> &mut NinePieceImageData {
        self.data.access()
    }

    #[inline]
    pub fn has_image(&self) -> bool {
        self.data.image.is_some()
    }

    #[inline]
    pub fn image(&self) -> Option<&StyleImage> {
        self.data.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<StyleImage>) {
        if self.data.image != image {
            self.access().image = image;
        }
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.image().is_none_or(StyleImage::is_loaded)
    }

    #[inline]
    pub fn image_slices(&self) -> &LengthBox {
        &self.data.image_slices
    }

    #[inline]
    pub fn border_slices(&self) -> &BorderImageLengthBox {
        &self.data.border_slices
    }

    #[inline]
    pub fn outset(&self) -> &BorderImageLengthBox {
        &self.data.outset
    }

    #[inline]
    pub fn fill(&self) -> bool {
        self.data.fill
    }

    #[inline]
    pub fn horizontal_rule(&self) -> NinePieceImageRule {
        self.data.horizontal_rule
    }

    #[inline]
    pub fn vertical_rule(&self) -> NinePieceImageRule {
        self.data.vertical_rule
    }

    /// Resolves one side of an outset into pixels. Numbers multiply the
    /// border width of that side.
    pub fn compute_outset(outset_side: &BorderImageLength, border_side: LayoutUnit) -> LayoutUnit {
        match *outset_side {
            BorderImageLength::Number(number) => LayoutUnit::from_f64(number * border_side.to_f64()),
            BorderImageLength::Length(ref length) => LayoutUnit::from_f32(length.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_share_data() {
        let a = NinePieceImage::default();
        let b = NinePieceImage::default();
        assert!(a.data.ptr_eq(&b.data));
    }

    #[test]
    fn mutation_unshares() {
        let a = NinePieceImage::default();
        let mut b = a.clone();
        b.access().fill = true;
        assert!(!a.fill());
        assert!(b.fill());
        assert_ne!(a, b);
    }

    #[test]
    fn mask_defaults_differ() {
        let mask = NinePieceImage::mask_defaults();
        assert!(mask.fill());
        assert_eq!(mask.image_slices().top, Length::Fixed(0.));
        assert_ne!(mask, NinePieceImage::default());
    }

    #[test]
    fn outset_numbers_multiply_the_border() {
        let border = LayoutUnit::from_int(4);
        assert_eq!(
            NinePieceImage::compute_outset(&BorderImageLength::Number(1.5), border),
            LayoutUnit::from_int(6)
        );
        assert_eq!(
            NinePieceImage::compute_outset(&BorderImageLength::Length(Length::Fixed(3.)), border),
            LayoutUnit::from_int(3)
        );
    }
}
