/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `clip-path`.

use euclid::default::Rect;
use kurbo::BezPath;
use serde::{Deserialize, Serialize};

use crate::values::basic_shape::{BasicShape, WindRule};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ClipPathOperation {
    /// A reference to an SVG `<clipPath>` element.
    Reference { url: String, fragment: String },
    Shape(BasicShape),
}

impl ClipPathOperation {
    pub fn reference(url: &str) -> Self {
        let fragment = url
            .split_once('#')
            .map(|(_, fragment)| fragment.to_owned())
            .unwrap_or_default();
        ClipPathOperation::Reference {
            url: url.to_owned(),
            fragment,
        }
    }

    #[inline]
    pub fn basic_shape(&self) -> Option<&BasicShape> {
        match self {
            ClipPathOperation::Shape(shape) => Some(shape),
            ClipPathOperation::Reference { .. } => None,
        }
    }

    /// The fill rule used when clipping with this operation.
    pub fn wind_rule(&self) -> WindRule {
        match self {
            ClipPathOperation::Shape(BasicShape::Polygon(polygon)) => polygon.fill_rule,
            _ => WindRule::NonZero,
        }
    }

    /// The clip outline for a reference box. References resolve elsewhere and
    /// produce no path here.
    pub fn path(&self, bounding_box: &Rect<f32>) -> Option<BezPath> {
        self.basic_shape().map(|shape| shape.path(bounding_box))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_keeps_its_fragment() {
        match ClipPathOperation::reference("masks.svg#round") {
            ClipPathOperation::Reference { url, fragment } => {
                assert_eq!(url, "masks.svg#round");
                assert_eq!(fragment, "round");
            },
            other => panic!("unexpected operation {other:?}"),
        }
    }
}
