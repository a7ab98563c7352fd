/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `shape-outside`.

use serde::{Deserialize, Serialize};

use crate::image::StyleImage;
use crate::values::basic_shape::BasicShape;

/// A reference box for shapes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CssBox {
    #[default]
    BoxMissing,
    Margin,
    Border,
    Padding,
    Content,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeValue {
    /// A basic shape, sized against `css_box` (margin box when missing).
    Shape { shape: BasicShape, css_box: CssBox },
    Box(CssBox),
    Image(StyleImage),
}

impl ShapeValue {
    #[inline]
    pub fn shape(&self) -> Option<&BasicShape> {
        match self {
            ShapeValue::Shape { shape, .. } => Some(shape),
            _ => None,
        }
    }

    #[inline]
    pub fn image(&self) -> Option<&StyleImage> {
        match self {
            ShapeValue::Image(image) => Some(image),
            _ => None,
        }
    }

    /// The box the shape is laid out in.
    pub fn css_box(&self) -> CssBox {
        match *self {
            ShapeValue::Shape { css_box, .. } | ShapeValue::Box(css_box) => css_box,
            ShapeValue::Image(_) => CssBox::BoxMissing,
        }
    }

    /// Whether an image shape has finished loading.
    pub fn is_image_valid(&self) -> bool {
        self.image().is_some_and(StyleImage::is_loaded)
    }
}
