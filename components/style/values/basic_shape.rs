/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! CSS basic shapes, as used by `clip-path` and `shape-outside`.
//!
//! <https://drafts.csswg.org/css-shapes/#basic-shape-functions>

use euclid::default::{Point2D, Rect, Size2D};
use kurbo::{BezPath, Shape};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::length::{Length, LengthSize, ValueRange, float_value_for_length};
use crate::values::animated::Animate;

/// Tolerance used when flattening circles and ellipses into Bézier paths.
const PATH_TOLERANCE: f64 = 0.1;

/// The standard cubic approximation constant for a quarter ellipse.
const QUARTER_ARC_KAPPA: f64 = 0.552_284_749_8;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum WindRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// The edge a center coordinate is measured from.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CenterDirection {
    #[default]
    TopLeft,
    BottomRight,
}

/// One axis of a shape's center, e.g. the `right 10px` in
/// `circle(at right 10px top)`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BasicShapeCenterCoordinate {
    direction: CenterDirection,
    length: Length,
    /// The same position measured from the top-left edge.
    computed_length: Length,
}

impl Default for BasicShapeCenterCoordinate {
    fn default() -> Self {
        BasicShapeCenterCoordinate::new(CenterDirection::TopLeft, Length::Percent(50.))
    }
}

impl BasicShapeCenterCoordinate {
    pub fn new(direction: CenterDirection, length: Length) -> Self {
        let computed_length = match direction {
            CenterDirection::TopLeft => length,
            CenterDirection::BottomRight => length.subtract_from_one_hundred_percent(),
        };
        BasicShapeCenterCoordinate {
            direction,
            length,
            computed_length,
        }
    }

    #[inline]
    pub fn direction(&self) -> CenterDirection {
        self.direction
    }

    #[inline]
    pub fn length(&self) -> &Length {
        &self.length
    }

    #[inline]
    pub fn computed_length(&self) -> &Length {
        &self.computed_length
    }

    /// Interpolated coordinates are always expressed from the top-left edge.
    pub fn blend(from: &Self, to: &Self, progress: f64) -> Self {
        BasicShapeCenterCoordinate::new(
            CenterDirection::TopLeft,
            Length::blend(
                &from.computed_length,
                &to.computed_length,
                progress,
                ValueRange::All,
            ),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum BasicShapeRadius {
    Value(Length),
    #[default]
    ClosestSide,
    FarthestSide,
}

impl BasicShapeRadius {
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, BasicShapeRadius::Value(_))
    }

    /// Keyword radii do not interpolate and snap to `to`.
    pub fn blend(from: &Self, to: &Self, progress: f64) -> Self {
        match (from, to) {
            (BasicShapeRadius::Value(from), BasicShapeRadius::Value(to)) => BasicShapeRadius::Value(
                Length::blend(from, to, progress, ValueRange::NonNegative),
            ),
            _ => *to,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BasicShapeCircle {
    pub center_x: BasicShapeCenterCoordinate,
    pub center_y: BasicShapeCenterCoordinate,
    pub radius: BasicShapeRadius,
}

impl BasicShapeCircle {
    pub fn float_value_for_radius_in_box(
        &self,
        box_size: Size2D<f32>,
        center: Point2D<f32>,
    ) -> f32 {
        if let BasicShapeRadius::Value(ref length) = self.radius {
            let reference =
                ((box_size.width * box_size.width + box_size.height * box_size.height) / 2.).sqrt();
            return float_value_for_length(length, reference);
        }

        let width_delta = (box_size.width - center.x).abs();
        let height_delta = (box_size.height - center.y).abs();
        let distances = [center.x.abs(), width_delta, center.y.abs(), height_delta];
        match self.radius {
            BasicShapeRadius::FarthestSide => distances.into_iter().fold(0., f32::max),
            _ => distances.into_iter().fold(f32::INFINITY, f32::min),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BasicShapeEllipse {
    pub center_x: BasicShapeCenterCoordinate,
    pub center_y: BasicShapeCenterCoordinate,
    pub radius_x: BasicShapeRadius,
    pub radius_y: BasicShapeRadius,
}

impl BasicShapeEllipse {
    /// Resolves one radius along an axis of `box_length`, with the center at
    /// `center` on that axis.
    pub fn float_value_for_radius_in_box(
        radius: &BasicShapeRadius,
        center: f32,
        box_length: f32,
    ) -> f32 {
        let near = center.abs();
        let far = (box_length - center).abs();
        match *radius {
            BasicShapeRadius::Value(ref length) => float_value_for_length(length, box_length),
            BasicShapeRadius::ClosestSide => near.min(far),
            BasicShapeRadius::FarthestSide => near.max(far),
        }
    }
}

/// A polygon. `values` holds alternating x and y coordinates.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BasicShapePolygon {
    pub fill_rule: WindRule,
    values: Vec<Length>,
}

impl BasicShapePolygon {
    pub fn new(fill_rule: WindRule) -> Self {
        BasicShapePolygon {
            fill_rule,
            values: Vec::new(),
        }
    }

    pub fn append_point(&mut self, x: Length, y: Length) {
        self.values.push(x);
        self.values.push(y);
    }

    #[inline]
    pub fn values(&self) -> &[Length] {
        &self.values
    }

    pub fn vertices(&self) -> impl Iterator<Item = (&Length, &Length)> {
        self.values.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BasicShapeInset {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
    pub top_left_radius: LengthSize,
    pub top_right_radius: LengthSize,
    pub bottom_right_radius: LengthSize,
    pub bottom_left_radius: LengthSize,
}

impl Default for BasicShapeInset {
    fn default() -> Self {
        BasicShapeInset {
            top: Length::zero(),
            right: Length::zero(),
            bottom: Length::zero(),
            left: Length::zero(),
            top_left_radius: LengthSize::zero(),
            top_right_radius: LengthSize::zero(),
            bottom_right_radius: LengthSize::zero(),
            bottom_left_radius: LengthSize::zero(),
        }
    }
}

/// A computed basic shape.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum BasicShape {
    Circle(BasicShapeCircle),
    Ellipse(BasicShapeEllipse),
    Polygon(BasicShapePolygon),
    Inset(BasicShapeInset),
}

fn float_point_for_center_coordinate(
    center_x: &BasicShapeCenterCoordinate,
    center_y: &BasicShapeCenterCoordinate,
    box_size: Size2D<f32>,
) -> Point2D<f32> {
    Point2D::new(
        float_value_for_length(center_x.computed_length(), box_size.width),
        float_value_for_length(center_y.computed_length(), box_size.height),
    )
}

fn float_size_for_length_size(size: &LengthSize, box_size: Size2D<f32>) -> Size2D<f64> {
    Size2D::new(
        float_value_for_length(&size.width, box_size.width) as f64,
        float_value_for_length(&size.height, box_size.height) as f64,
    )
}

impl BasicShape {
    /// Whether the two shapes are of a kind and shape that interpolates
    /// smoothly.
    pub fn can_blend(&self, other: &BasicShape) -> bool {
        match (self, other) {
            (BasicShape::Polygon(a), BasicShape::Polygon(b)) => {
                a.values.len() == b.values.len() && a.fill_rule == b.fill_rule
            },
            (BasicShape::Circle(a), BasicShape::Circle(b)) => {
                a.radius.is_value() && b.radius.is_value()
            },
            (BasicShape::Ellipse(a), BasicShape::Ellipse(b)) => {
                a.radius_x.is_value() &&
                    b.radius_x.is_value() &&
                    a.radius_y.is_value() &&
                    b.radius_y.is_value()
            },
            (BasicShape::Inset(_), BasicShape::Inset(_)) => true,
            _ => false,
        }
    }

    /// Interpolates between two shapes of the same kind.
    ///
    /// Keyword radii snap to `to`. Insets do not interpolate and yield a copy
    /// of `to`.
    pub fn blend(from: &BasicShape, to: &BasicShape, progress: f64) -> Result<BasicShape, ()> {
        Ok(match (from, to) {
            (BasicShape::Circle(from), BasicShape::Circle(to)) => {
                BasicShape::Circle(BasicShapeCircle {
                    center_x: BasicShapeCenterCoordinate::blend(&from.center_x, &to.center_x, progress),
                    center_y: BasicShapeCenterCoordinate::blend(&from.center_y, &to.center_y, progress),
                    radius: BasicShapeRadius::blend(&from.radius, &to.radius, progress),
                })
            },
            (BasicShape::Ellipse(from), BasicShape::Ellipse(to)) => {
                BasicShape::Ellipse(BasicShapeEllipse {
                    center_x: BasicShapeCenterCoordinate::blend(&from.center_x, &to.center_x, progress),
                    center_y: BasicShapeCenterCoordinate::blend(&from.center_y, &to.center_y, progress),
                    radius_x: BasicShapeRadius::blend(&from.radius_x, &to.radius_x, progress),
                    radius_y: BasicShapeRadius::blend(&from.radius_y, &to.radius_y, progress),
                })
            },
            (BasicShape::Polygon(from), BasicShape::Polygon(to)) => {
                if from.values.len() != to.values.len() || from.fill_rule != to.fill_rule {
                    return Err(());
                }
                BasicShape::Polygon(BasicShapePolygon {
                    fill_rule: to.fill_rule,
                    values: from
                        .values
                        .iter()
                        .zip(to.values.iter())
                        .map(|(from, to)| Length::blend(from, to, progress, ValueRange::All))
                        .collect(),
                })
            },
            (BasicShape::Inset(_), BasicShape::Inset(to)) => {
                warn!("Inset shapes do not interpolate, using the target shape");
                BasicShape::Inset(to.clone())
            },
            _ => return Err(()),
        })
    }

    /// Builds the outline of this shape inside `bounding_box`.
    pub fn path(&self, bounding_box: &Rect<f32>) -> BezPath {
        let origin = bounding_box.origin.cast::<f64>();
        let box_size = bounding_box.size;
        match *self {
            BasicShape::Circle(ref circle) => {
                let center =
                    float_point_for_center_coordinate(&circle.center_x, &circle.center_y, box_size);
                let radius = circle.float_value_for_radius_in_box(box_size, center) as f64;
                let center = center.cast::<f64>();
                kurbo::Circle::new((origin.x + center.x, origin.y + center.y), radius)
                    .to_path(PATH_TOLERANCE)
            },
            BasicShape::Ellipse(ref ellipse) => {
                let center =
                    float_point_for_center_coordinate(&ellipse.center_x, &ellipse.center_y, box_size);
                let radius_x = BasicShapeEllipse::float_value_for_radius_in_box(
                    &ellipse.radius_x,
                    center.x,
                    box_size.width,
                ) as f64;
                let radius_y = BasicShapeEllipse::float_value_for_radius_in_box(
                    &ellipse.radius_y,
                    center.y,
                    box_size.height,
                ) as f64;
                let center = center.cast::<f64>();
                kurbo::Ellipse::new(
                    (origin.x + center.x, origin.y + center.y),
                    (radius_x, radius_y),
                    0.,
                )
                .to_path(PATH_TOLERANCE)
            },
            BasicShape::Polygon(ref polygon) => {
                let mut path = BezPath::new();
                for (index, (x, y)) in polygon.vertices().enumerate() {
                    let point = (
                        origin.x + float_value_for_length(x, box_size.width) as f64,
                        origin.y + float_value_for_length(y, box_size.height) as f64,
                    );
                    if index == 0 {
                        path.move_to(point);
                    } else {
                        path.line_to(point);
                    }
                }
                if !path.elements().is_empty() {
                    path.close_path();
                }
                path
            },
            BasicShape::Inset(ref inset) => inset_path(inset, origin, box_size),
        }
    }
}

fn inset_path(inset: &BasicShapeInset, origin: Point2D<f64>, box_size: Size2D<f32>) -> BezPath {
    let left = float_value_for_length(&inset.left, box_size.width) as f64;
    let top = float_value_for_length(&inset.top, box_size.height) as f64;
    let right = float_value_for_length(&inset.right, box_size.width) as f64;
    let bottom = float_value_for_length(&inset.bottom, box_size.height) as f64;
    let x0 = origin.x + left;
    let y0 = origin.y + top;
    let width = (box_size.width as f64 - left - right).max(0.);
    let height = (box_size.height as f64 - top - bottom).max(0.);
    let (x1, y1) = (x0 + width, y0 + height);

    let mut top_left = float_size_for_length_size(&inset.top_left_radius, box_size);
    let mut top_right = float_size_for_length_size(&inset.top_right_radius, box_size);
    let mut bottom_right = float_size_for_length_size(&inset.bottom_right_radius, box_size);
    let mut bottom_left = float_size_for_length_size(&inset.bottom_left_radius, box_size);

    // Radii that overlap along a side are scaled down together.
    let ratio = |length: f64, a: f64, b: f64| if a + b > length { length / (a + b) } else { 1. };
    let factor = ratio(width, top_left.width, top_right.width)
        .min(ratio(width, bottom_left.width, bottom_right.width))
        .min(ratio(height, top_left.height, bottom_left.height))
        .min(ratio(height, top_right.height, bottom_right.height))
        .max(0.);
    if factor < 1. {
        for radius in [
            &mut top_left,
            &mut top_right,
            &mut bottom_right,
            &mut bottom_left,
        ] {
            *radius = *radius * factor;
        }
    }

    let k = QUARTER_ARC_KAPPA;
    let mut path = BezPath::new();
    path.move_to((x0 + top_left.width, y0));
    path.line_to((x1 - top_right.width, y0));
    path.curve_to(
        (x1 - top_right.width * (1. - k), y0),
        (x1, y0 + top_right.height * (1. - k)),
        (x1, y0 + top_right.height),
    );
    path.line_to((x1, y1 - bottom_right.height));
    path.curve_to(
        (x1, y1 - bottom_right.height * (1. - k)),
        (x1 - bottom_right.width * (1. - k), y1),
        (x1 - bottom_right.width, y1),
    );
    path.line_to((x0 + bottom_left.width, y1));
    path.curve_to(
        (x0 + bottom_left.width * (1. - k), y1),
        (x0, y1 - bottom_left.height * (1. - k)),
        (x0, y1 - bottom_left.height),
    );
    path.line_to((x0, y0 + top_left.height));
    path.curve_to(
        (x0, y0 + top_left.height * (1. - k)),
        (x0 + top_left.width * (1. - k), y0),
        (x0 + top_left.width, y0),
    );
    path.close_path();
    path
}

impl Animate for BasicShape {
    fn animate(&self, other: &Self, progress: f64) -> Result<Self, ()> {
        BasicShape::blend(self, other, progress)
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::Point2D;

    use super::*;

    fn bounding_box() -> Rect<f32> {
        Rect::new(Point2D::new(10., 20.), Size2D::new(100., 50.))
    }

    #[test]
    fn bottom_right_center_is_measured_from_the_far_edge() {
        let coordinate =
            BasicShapeCenterCoordinate::new(CenterDirection::BottomRight, Length::Fixed(10.));
        assert_eq!(
            float_value_for_length(coordinate.computed_length(), 100.),
            90.
        );
    }

    #[test]
    fn closest_and_farthest_side_radii() {
        let mut circle = BasicShapeCircle {
            center_x: BasicShapeCenterCoordinate::new(CenterDirection::TopLeft, Length::Fixed(20.)),
            center_y: BasicShapeCenterCoordinate::new(CenterDirection::TopLeft, Length::Fixed(10.)),
            radius: BasicShapeRadius::ClosestSide,
        };
        let size = Size2D::new(100., 50.);
        let center = Point2D::new(20., 10.);
        assert_eq!(circle.float_value_for_radius_in_box(size, center), 10.);
        circle.radius = BasicShapeRadius::FarthestSide;
        assert_eq!(circle.float_value_for_radius_in_box(size, center), 80.);
    }

    #[test]
    fn polygons_need_matching_vertex_counts() {
        let mut a = BasicShapePolygon::new(WindRule::NonZero);
        a.append_point(Length::Fixed(0.), Length::Fixed(0.));
        let mut b = a.clone();
        b.append_point(Length::Fixed(10.), Length::Fixed(10.));
        let (a, b) = (BasicShape::Polygon(a), BasicShape::Polygon(b));
        assert!(!a.can_blend(&b));
        assert!(BasicShape::blend(&a, &b, 0.5).is_err());
    }

    #[test]
    fn keyword_radius_is_not_blendable_but_snaps() {
        let from = BasicShape::Circle(BasicShapeCircle::default());
        let to = BasicShape::Circle(BasicShapeCircle {
            radius: BasicShapeRadius::Value(Length::Fixed(10.)),
            ..Default::default()
        });
        assert!(!from.can_blend(&to));
        match BasicShape::blend(&from, &to, 0.3).unwrap() {
            BasicShape::Circle(circle) => {
                assert_eq!(circle.radius, BasicShapeRadius::Value(Length::Fixed(10.)))
            },
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn different_kinds_do_not_blend() {
        let circle = BasicShape::Circle(BasicShapeCircle::default());
        let inset = BasicShape::Inset(BasicShapeInset::default());
        assert!(!circle.can_blend(&inset));
        assert!(BasicShape::blend(&circle, &inset, 0.5).is_err());
    }

    #[test]
    fn inset_blend_copies_the_target() {
        let from = BasicShape::Inset(BasicShapeInset::default());
        let to = BasicShape::Inset(BasicShapeInset {
            top: Length::Fixed(5.),
            ..Default::default()
        });
        assert_eq!(BasicShape::blend(&from, &to, 0.5), Ok(to));
    }

    #[test]
    fn polygon_path_is_offset_by_the_box() {
        let mut polygon = BasicShapePolygon::new(WindRule::EvenOdd);
        polygon.append_point(Length::Fixed(0.), Length::Fixed(0.));
        polygon.append_point(Length::Percent(100.), Length::Fixed(0.));
        polygon.append_point(Length::Percent(100.), Length::Percent(100.));
        let path = BasicShape::Polygon(polygon).path(&bounding_box());
        let bounds = path.bounding_box();
        assert_eq!((bounds.x0, bounds.y0, bounds.x1, bounds.y1), (10., 20., 110., 70.));
    }

    #[test]
    fn inset_path_shrinks_the_box() {
        let inset = BasicShape::Inset(BasicShapeInset {
            top: Length::Fixed(5.),
            right: Length::Fixed(10.),
            bottom: Length::Fixed(5.),
            left: Length::Fixed(10.),
            ..Default::default()
        });
        let bounds = inset.path(&bounding_box()).bounding_box();
        assert_eq!((bounds.x0, bounds.y0, bounds.x1, bounds.y1), (20., 25., 100., 65.));
    }

    #[test]
    fn circle_path_is_centered() {
        let circle = BasicShape::Circle(BasicShapeCircle {
            radius: BasicShapeRadius::Value(Length::Fixed(10.)),
            ..Default::default()
        });
        let bounds = circle.path(&bounding_box()).bounding_box();
        assert!((bounds.center().x - 60.).abs() < 1e-6);
        assert!((bounds.center().y - 45.).abs() < 1e-6);
        assert!((bounds.width() - 20.).abs() < 1e-6);
    }
}
