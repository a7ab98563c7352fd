/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `transform` lists.

use std::f64::consts::PI;

use euclid::Angle;
use euclid::default::{Box3D, Point3D, Size2D, Transform3D, Vector3D};
use log::debug;
use smallvec::SmallVec;

use crate::length::{Length, ValueRange, float_value_for_length};
use crate::values::animated::lerp_f64;

/// The interpolation family of a transform function. Two functions can be
/// interpolated component-wise only when they share a kind.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransformOperationKind {
    Identity,
    Translate,
    Scale,
    Rotate,
    Skew,
    Perspective,
    Matrix,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransformOperation {
    Identity,
    Translate { x: Length, y: Length, z: f64 },
    Scale { x: f64, y: f64, z: f64 },
    /// Rotation by `angle` degrees around the axis `(x, y, z)`.
    Rotate { x: f64, y: f64, z: f64, angle: f64 },
    /// Skew angles in degrees.
    Skew { x: f64, y: f64 },
    /// Distance to the projection plane; zero means no perspective.
    Perspective(f64),
    Matrix(Transform3D<f64>),
}

impl TransformOperation {
    #[inline]
    pub fn rotate_z(angle: f64) -> Self {
        TransformOperation::Rotate {
            x: 0.,
            y: 0.,
            z: 1.,
            angle,
        }
    }

    #[inline]
    pub fn translate(x: Length, y: Length) -> Self {
        TransformOperation::Translate { x, y, z: 0. }
    }

    pub fn kind(&self) -> TransformOperationKind {
        match self {
            TransformOperation::Identity => TransformOperationKind::Identity,
            TransformOperation::Translate { .. } => TransformOperationKind::Translate,
            TransformOperation::Scale { .. } => TransformOperationKind::Scale,
            TransformOperation::Rotate { .. } => TransformOperationKind::Rotate,
            TransformOperation::Skew { .. } => TransformOperationKind::Skew,
            TransformOperation::Perspective(_) => TransformOperationKind::Perspective,
            TransformOperation::Matrix(_) => TransformOperationKind::Matrix,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, TransformOperation::Identity)
    }

    pub fn depends_on_box_size(&self) -> bool {
        match self {
            TransformOperation::Translate { x, y, .. } => {
                x.is_percent_or_calculated() || y.is_percent_or_calculated()
            },
            _ => false,
        }
    }

    /// The operation of the same kind that has no effect.
    fn identity_of_same_kind(&self) -> Option<TransformOperation> {
        Some(match *self {
            TransformOperation::Identity => TransformOperation::Identity,
            TransformOperation::Translate { .. } => {
                TransformOperation::translate(Length::zero(), Length::zero())
            },
            TransformOperation::Scale { .. } => TransformOperation::Scale {
                x: 1.,
                y: 1.,
                z: 1.,
            },
            TransformOperation::Rotate { x, y, z, .. } => TransformOperation::Rotate {
                x,
                y,
                z,
                angle: 0.,
            },
            TransformOperation::Skew { .. } => TransformOperation::Skew { x: 0., y: 0. },
            TransformOperation::Perspective(_) => TransformOperation::Perspective(0.),
            TransformOperation::Matrix(_) => return None,
        })
    }

    pub fn can_blend_with(&self, other: &TransformOperation) -> bool {
        match (self, other) {
            (
                TransformOperation::Rotate {
                    x: x1,
                    y: y1,
                    z: z1,
                    angle: a1,
                },
                TransformOperation::Rotate {
                    x: x2,
                    y: y2,
                    z: z2,
                    angle: a2,
                },
            ) => *a1 == 0. || *a2 == 0. || same_axis((*x1, *y1, *z1), (*x2, *y2, *z2)),
            (TransformOperation::Matrix(_), TransformOperation::Matrix(_)) => false,
            _ => self.kind() == other.kind(),
        }
    }

    /// Interpolates between two operations of the same kind. A missing
    /// endpoint stands for the identity of the other endpoint's kind.
    ///
    /// Returns `None` when the pair cannot be interpolated.
    pub fn blend(
        from: Option<&TransformOperation>,
        to: Option<&TransformOperation>,
        progress: f64,
    ) -> Option<TransformOperation> {
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from.clone(), to.clone()),
            (Some(from), None) => (from.clone(), from.identity_of_same_kind()?),
            (None, Some(to)) => (to.identity_of_same_kind()?, to.clone()),
            (None, None) => return None,
        };
        if !from.can_blend_with(&to) {
            return None;
        }

        let lerp = |a: f64, b: f64| lerp_f64(a, b, progress);
        Some(match (&from, &to) {
            (TransformOperation::Identity, TransformOperation::Identity) => {
                TransformOperation::Identity
            },
            (
                TransformOperation::Translate {
                    x: x1,
                    y: y1,
                    z: z1,
                },
                TransformOperation::Translate {
                    x: x2,
                    y: y2,
                    z: z2,
                },
            ) => TransformOperation::Translate {
                x: Length::blend(x1, x2, progress, ValueRange::All),
                y: Length::blend(y1, y2, progress, ValueRange::All),
                z: lerp(*z1, *z2),
            },
            (
                TransformOperation::Scale {
                    x: x1,
                    y: y1,
                    z: z1,
                },
                TransformOperation::Scale {
                    x: x2,
                    y: y2,
                    z: z2,
                },
            ) => TransformOperation::Scale {
                x: lerp(*x1, *x2),
                y: lerp(*y1, *y2),
                z: lerp(*z1, *z2),
            },
            (
                TransformOperation::Rotate { angle: a1, .. },
                TransformOperation::Rotate {
                    x,
                    y,
                    z,
                    angle: a2,
                },
            ) => {
                // The axis of a zero rotation is irrelevant; keep the other one.
                let (x, y, z) = if *a2 == 0. {
                    match from {
                        TransformOperation::Rotate { x, y, z, .. } => (x, y, z),
                        _ => (*x, *y, *z),
                    }
                } else {
                    (*x, *y, *z)
                };
                TransformOperation::Rotate {
                    x,
                    y,
                    z,
                    angle: lerp(*a1, *a2),
                }
            },
            (
                TransformOperation::Skew { x: x1, y: y1 },
                TransformOperation::Skew { x: x2, y: y2 },
            ) => TransformOperation::Skew {
                x: lerp(*x1, *x2),
                y: lerp(*y1, *y2),
            },
            (TransformOperation::Perspective(p1), TransformOperation::Perspective(p2)) => {
                // Interpolate the projection coefficient, not the distance.
                let inverse = |p: f64| if p == 0. { 0. } else { 1. / p };
                let blended = lerp(inverse(*p1), inverse(*p2));
                TransformOperation::Perspective(if blended <= 0. { 0. } else { 1. / blended })
            },
            _ => return None,
        })
    }

    /// The matrix for this operation when applied to a box of `box_size`.
    pub fn to_transform(&self, box_size: Size2D<f32>) -> Transform3D<f64> {
        match *self {
            TransformOperation::Identity => Transform3D::identity(),
            TransformOperation::Translate { ref x, ref y, z } => Transform3D::translation(
                float_value_for_length(x, box_size.width) as f64,
                float_value_for_length(y, box_size.height) as f64,
                z,
            ),
            TransformOperation::Scale { x, y, z } => Transform3D::scale(x, y, z),
            TransformOperation::Rotate { x, y, z, angle } => {
                let axis = Vector3D::new(x, y, z);
                if axis.square_length() == 0. {
                    return Transform3D::identity();
                }
                let axis = axis.normalize();
                Transform3D::rotation(axis.x, axis.y, axis.z, Angle::degrees(angle))
            },
            TransformOperation::Skew { x, y } => {
                Transform3D::skew(Angle::degrees(x), Angle::degrees(y))
            },
            TransformOperation::Perspective(distance) => {
                if distance == 0. {
                    Transform3D::identity()
                } else {
                    Transform3D::perspective(distance)
                }
            },
            TransformOperation::Matrix(matrix) => matrix,
        }
    }
}

fn same_axis(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
    let a = Vector3D::new(a.0, a.1, a.2);
    let b = Vector3D::new(b.0, b.1, b.2);
    if a.square_length() == 0. || b.square_length() == 0. {
        return a.square_length() == b.square_length();
    }
    let (a, b) = (a.normalize(), b.normalize());
    (a - b).square_length() < 1e-12
}

/// A computed `transform` value: a list of operations applied right to left.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformOperations(pub SmallVec<[TransformOperation; 2]>);

impl TransformOperations {
    #[inline]
    pub fn none() -> Self {
        TransformOperations(SmallVec::new())
    }

    pub fn new(operations: impl IntoIterator<Item = TransformOperation>) -> Self {
        TransformOperations(operations.into_iter().collect())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn operations(&self) -> &[TransformOperation] {
        &self.0
    }

    /// Whether percentages make this transform depend on the size of the box
    /// it applies to.
    pub fn depends_on_box_size(&self) -> bool {
        self.0.iter().any(TransformOperation::depends_on_box_size)
    }

    /// Whether both lists have the same length and pairwise interpolable
    /// operations.
    pub fn operations_match(&self, other: &TransformOperations) -> bool {
        self.0.len() == other.0.len() &&
            self.0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a.can_blend_with(b))
    }

    /// The combined matrix, with the last operation applied to points first.
    pub fn apply(&self, box_size: Size2D<f32>) -> Transform3D<f64> {
        self.0
            .iter()
            .fold(Transform3D::identity(), |result, operation| {
                operation.to_transform(box_size).then(&result)
            })
    }

    /// Interpolates two lists.
    ///
    /// Lists with matching operations, or where one side is empty, are
    /// interpolated operation by operation. Other pairs swap discretely at
    /// the halfway point.
    pub fn blend(from: &TransformOperations, to: &TransformOperations, progress: f64) -> Self {
        if from == to {
            return to.clone();
        }

        if from.is_empty() || to.is_empty() || from.operations_match(to) {
            let length = from.0.len().max(to.0.len());
            let blended: Option<SmallVec<_>> = (0..length)
                .map(|index| TransformOperation::blend(from.0.get(index), to.0.get(index), progress))
                .collect();
            if let Some(blended) = blended {
                return TransformOperations(blended);
            }
        }

        debug!("Transform lists {from:?} and {to:?} do not interpolate, swapping");
        if progress < 0.5 { from.clone() } else { to.clone() }
    }

    /// Computes the bounds `box_` can reach while this list is interpolated
    /// from `from` over progress values in `[min_progress, max_progress]`.
    ///
    /// Returns `None` if the bounds cannot be determined, for example when a
    /// matrix is involved.
    pub fn blended_bounds_for_box(
        &self,
        box_: &Box3D<f32>,
        from: &TransformOperations,
        min_progress: f64,
        max_progress: f64,
    ) -> Option<Box3D<f32>> {
        let length = from.0.len().max(self.0.len());
        let mut bounds = *box_;
        for index in (0..length).rev() {
            let from_operation = from.0.get(index).filter(|op| !op.is_identity());
            let to_operation = self.0.get(index).filter(|op| !op.is_identity());

            let kind = match to_operation.or(from_operation) {
                Some(operation) => operation.kind(),
                None => {
                    bounds = union(&bounds, box_);
                    continue;
                },
            };
            if let (Some(a), Some(b)) = (from_operation, to_operation) {
                if !a.can_blend_with(b) {
                    return None;
                }
            }

            match kind {
                TransformOperationKind::Identity => {
                    bounds = union(&bounds, box_);
                },
                TransformOperationKind::Translate |
                TransformOperationKind::Scale |
                TransformOperationKind::Skew |
                TransformOperationKind::Perspective => {
                    let (Some(at_min), Some(at_max)) = (
                        TransformOperation::blend(from_operation, to_operation, min_progress),
                        TransformOperation::blend(from_operation, to_operation, max_progress),
                    ) else {
                        continue;
                    };
                    let min_box = transform_box(&at_min.to_transform(Size2D::zero()), &bounds);
                    let max_box = transform_box(&at_max.to_transform(Size2D::zero()), &bounds);
                    bounds = union(&min_box, &max_box);
                },
                TransformOperationKind::Rotate => {
                    let reference = to_operation.or(from_operation)?;
                    let TransformOperation::Rotate { x, y, z, .. } = *reference else {
                        return None;
                    };
                    let angle_of = |operation: Option<&TransformOperation>| match operation {
                        Some(TransformOperation::Rotate { angle, .. }) => *angle,
                        _ => 0.,
                    };
                    let from_angle = angle_of(from_operation);
                    let to_angle = angle_of(to_operation);
                    if from_angle == 0. && to_angle == 0. {
                        continue;
                    }
                    let axis = Vector3D::new(x, y, z);
                    if axis.square_length() == 0. {
                        continue;
                    }
                    let mut start = lerp_f64(from_angle, to_angle, min_progress);
                    let mut end = lerp_f64(from_angle, to_angle, max_progress);
                    if start > end {
                        std::mem::swap(&mut start, &mut end);
                    }
                    let axis = axis.normalize();
                    let mut rotated: Option<Box3D<f32>> = None;
                    for corner in box_corners(&bounds) {
                        let arc = bounding_box_for_arc(corner, axis, start, end);
                        rotated = Some(match rotated {
                            Some(rotated) => union(&rotated, &arc),
                            None => arc,
                        });
                    }
                    if let Some(rotated) = rotated {
                        bounds = rotated;
                    }
                },
                TransformOperationKind::Matrix => return None,
            }
        }
        Some(bounds)
    }
}

/// Unlike `Box3D::union`, treats flat boxes as having extent.
fn union(a: &Box3D<f32>, b: &Box3D<f32>) -> Box3D<f32> {
    Box3D::new(a.min.min(b.min), a.max.max(b.max))
}

fn box_corners(box_: &Box3D<f32>) -> [Point3D<f64>; 8] {
    let (min, max) = (box_.min.cast::<f64>(), box_.max.cast::<f64>());
    [
        Point3D::new(min.x, min.y, min.z),
        Point3D::new(max.x, min.y, min.z),
        Point3D::new(min.x, max.y, min.z),
        Point3D::new(max.x, max.y, min.z),
        Point3D::new(min.x, min.y, max.z),
        Point3D::new(max.x, min.y, max.z),
        Point3D::new(min.x, max.y, max.z),
        Point3D::new(max.x, max.y, max.z),
    ]
}

fn box_from_points(points: impl IntoIterator<Item = Point3D<f64>>) -> Box3D<f32> {
    Box3D::from_points(points.into_iter().map(|point| point.cast::<f32>()))
}

fn transform_box(transform: &Transform3D<f64>, box_: &Box3D<f32>) -> Box3D<f32> {
    box_from_points(
        box_corners(box_)
            .into_iter()
            .filter_map(|corner| transform.transform_point3d(corner)),
    )
}

/// The bounds of the arc traced by `point` rotating about the unit vector
/// `axis` from `start` to `end` degrees.
fn bounding_box_for_arc(
    point: Point3D<f64>,
    axis: Vector3D<f64>,
    start: f64,
    end: f64,
) -> Box3D<f32> {
    let rotate = |degrees: f64| {
        Transform3D::rotation(axis.x, axis.y, axis.z, Angle::degrees(degrees))
            .transform_point3d(point)
    };

    // Decompose the point into a center on the axis plus two orthogonal
    // radius vectors. Each coordinate of the arc is then
    // c + u cos(t) ± v sin(t), whose extrema sit at atan2(±v, u) + kπ.
    let position = point.to_vector();
    let center = axis * axis.dot(position);
    let u = position - center;
    let v = axis.cross(position);

    let mut angles = vec![start, end];
    let (start_radians, end_radians) = (start.to_radians(), end.to_radians());
    for (uk, vk) in [(u.x, v.x), (u.y, v.y), (u.z, v.z)] {
        for phase in [vk.atan2(uk), (-vk).atan2(uk)] {
            let mut candidate = phase + ((start_radians - phase) / PI).ceil() * PI;
            while candidate <= end_radians {
                angles.push(candidate.to_degrees());
                candidate += PI;
            }
        }
    }

    box_from_points(angles.into_iter().filter_map(rotate))
}

#[cfg(test)]
mod tests {
    use euclid::default::Point3D;

    use super::*;

    fn unit_box() -> Box3D<f32> {
        Box3D::new(Point3D::new(0., 0., 0.), Point3D::new(10., 10., 0.))
    }

    #[test]
    fn percent_translation_depends_on_box_size() {
        let fixed = TransformOperations::new([TransformOperation::translate(
            Length::Fixed(10.),
            Length::Fixed(0.),
        )]);
        let percent = TransformOperations::new([TransformOperation::translate(
            Length::Percent(50.),
            Length::Fixed(0.),
        )]);
        assert!(!fixed.depends_on_box_size());
        assert!(percent.depends_on_box_size());
    }

    #[test]
    fn apply_composes_right_to_left() {
        let operations = TransformOperations::new([
            TransformOperation::translate(Length::Fixed(10.), Length::Fixed(0.)),
            TransformOperation::Scale {
                x: 2.,
                y: 2.,
                z: 1.,
            },
        ]);
        let matrix = operations.apply(Size2D::new(100., 100.));
        let point = matrix
            .transform_point3d(Point3D::new(1., 1., 0.))
            .unwrap();
        assert!((point.x - 12.).abs() < 1e-9);
        assert!((point.y - 2.).abs() < 1e-9);
    }

    #[test]
    fn blend_matching_operations() {
        let from = TransformOperations::new([TransformOperation::rotate_z(0.)]);
        let to = TransformOperations::new([TransformOperation::rotate_z(90.)]);
        let blended = TransformOperations::blend(&from, &to, 0.5);
        assert_eq!(blended, TransformOperations::new([TransformOperation::rotate_z(45.)]));
    }

    #[test]
    fn blend_from_none_uses_identity() {
        let to = TransformOperations::new([TransformOperation::Scale {
            x: 3.,
            y: 3.,
            z: 1.,
        }]);
        let blended = TransformOperations::blend(&TransformOperations::none(), &to, 0.5);
        assert_eq!(
            blended,
            TransformOperations::new([TransformOperation::Scale {
                x: 2.,
                y: 2.,
                z: 1.,
            }])
        );
    }

    #[test]
    fn translation_bounds_cover_both_ends() {
        let from = TransformOperations::new([TransformOperation::translate(
            Length::Fixed(0.),
            Length::Fixed(0.),
        )]);
        let to = TransformOperations::new([TransformOperation::translate(
            Length::Fixed(20.),
            Length::Fixed(0.),
        )]);
        let bounds = to
            .blended_bounds_for_box(&unit_box(), &from, 0., 1.)
            .unwrap();
        assert_eq!(bounds.min.x, 0.);
        assert_eq!(bounds.max.x, 30.);
        assert_eq!(bounds.max.y, 10.);
    }

    #[test]
    fn rotation_bounds_include_the_arc() {
        let from = TransformOperations::new([TransformOperation::rotate_z(0.)]);
        let to = TransformOperations::new([TransformOperation::rotate_z(90.)]);
        let bounds = to
            .blended_bounds_for_box(&unit_box(), &from, 0., 1.)
            .unwrap();
        // The far corner (10, 10) sweeps through a point at distance
        // sqrt(200) along an axis on its way.
        let radius = (200f32).sqrt();
        let mut extents = [
            bounds.max.x - bounds.min.x,
            bounds.max.y - bounds.min.y,
        ];
        extents.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((extents[0] - radius).abs() < 1e-3);
        assert!((extents[1] - 20.).abs() < 1e-3);
    }

    #[test]
    fn matrix_bounds_are_unknown() {
        let matrix = TransformOperations::new([TransformOperation::Matrix(Transform3D::identity())]);
        assert!(matrix.blended_bounds_for_box(&unit_box(), &matrix, 0., 1.).is_none());
    }
}
