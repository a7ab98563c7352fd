/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Computed `filter` lists.

use euclid::default::SideOffsets2D;
use log::debug;
use smallvec::SmallVec;

use crate::color::Color;
use crate::length::{Length, ValueRange, float_value_for_length};
use crate::values::animated::lerp_f64;

#[derive(Clone, Debug, PartialEq)]
pub enum FilterOperation {
    /// A reference to an SVG `<filter>`.
    Reference(String),
    Grayscale(f64),
    Sepia(f64),
    Saturate(f64),
    /// Degrees.
    HueRotate(f64),
    Invert(f64),
    Opacity(f64),
    Brightness(f64),
    Contrast(f64),
    Blur(Length),
    DropShadow {
        offset_x: f32,
        offset_y: f32,
        std_deviation: f32,
        color: Color,
    },
}

impl FilterOperation {
    /// Whether applying this filter can move a pixel's content to a
    /// different location.
    pub fn moves_pixels(&self) -> bool {
        matches!(
            self,
            FilterOperation::Reference(_) |
                FilterOperation::Blur(_) |
                FilterOperation::DropShadow { .. }
        )
    }

    fn same_kind(&self, other: &FilterOperation) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// The filter of the same kind that leaves the input unchanged.
    fn passthrough(&self) -> Option<FilterOperation> {
        Some(match self {
            FilterOperation::Reference(_) => return None,
            FilterOperation::Grayscale(_) => FilterOperation::Grayscale(0.),
            FilterOperation::Sepia(_) => FilterOperation::Sepia(0.),
            FilterOperation::Saturate(_) => FilterOperation::Saturate(1.),
            FilterOperation::HueRotate(_) => FilterOperation::HueRotate(0.),
            FilterOperation::Invert(_) => FilterOperation::Invert(0.),
            FilterOperation::Opacity(_) => FilterOperation::Opacity(1.),
            FilterOperation::Brightness(_) => FilterOperation::Brightness(1.),
            FilterOperation::Contrast(_) => FilterOperation::Contrast(1.),
            FilterOperation::Blur(_) => FilterOperation::Blur(Length::zero()),
            FilterOperation::DropShadow { .. } => FilterOperation::DropShadow {
                offset_x: 0.,
                offset_y: 0.,
                std_deviation: 0.,
                color: Color::TRANSPARENT,
            },
        })
    }

    /// Interpolates two filters of the same kind. A missing endpoint stands
    /// for the passthrough filter of the other endpoint's kind.
    pub fn blend(
        from: Option<&FilterOperation>,
        to: Option<&FilterOperation>,
        progress: f64,
    ) -> Option<FilterOperation> {
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from.clone(), to.clone()),
            (Some(from), None) => (from.clone(), from.passthrough()?),
            (None, Some(to)) => (to.passthrough()?, to.clone()),
            (None, None) => return None,
        };
        if !from.same_kind(&to) {
            return None;
        }

        let amount = |a: f64, b: f64| lerp_f64(a, b, progress);
        let unit = |a: f64, b: f64| amount(a, b).clamp(0., 1.);
        let non_negative = |a: f64, b: f64| amount(a, b).max(0.);
        Some(match (&from, &to) {
            (FilterOperation::Grayscale(a), FilterOperation::Grayscale(b)) => {
                FilterOperation::Grayscale(unit(*a, *b))
            },
            (FilterOperation::Sepia(a), FilterOperation::Sepia(b)) => {
                FilterOperation::Sepia(unit(*a, *b))
            },
            (FilterOperation::Saturate(a), FilterOperation::Saturate(b)) => {
                FilterOperation::Saturate(non_negative(*a, *b))
            },
            (FilterOperation::HueRotate(a), FilterOperation::HueRotate(b)) => {
                FilterOperation::HueRotate(amount(*a, *b))
            },
            (FilterOperation::Invert(a), FilterOperation::Invert(b)) => {
                FilterOperation::Invert(unit(*a, *b))
            },
            (FilterOperation::Opacity(a), FilterOperation::Opacity(b)) => {
                FilterOperation::Opacity(unit(*a, *b))
            },
            (FilterOperation::Brightness(a), FilterOperation::Brightness(b)) => {
                FilterOperation::Brightness(non_negative(*a, *b))
            },
            (FilterOperation::Contrast(a), FilterOperation::Contrast(b)) => {
                FilterOperation::Contrast(non_negative(*a, *b))
            },
            (FilterOperation::Blur(a), FilterOperation::Blur(b)) => {
                FilterOperation::Blur(Length::blend(a, b, progress, ValueRange::NonNegative))
            },
            (
                FilterOperation::DropShadow {
                    offset_x: x1,
                    offset_y: y1,
                    std_deviation: d1,
                    color: c1,
                },
                FilterOperation::DropShadow {
                    offset_x: x2,
                    offset_y: y2,
                    std_deviation: d2,
                    color: c2,
                },
            ) => FilterOperation::DropShadow {
                offset_x: amount(*x1 as f64, *x2 as f64) as f32,
                offset_y: amount(*y1 as f64, *y2 as f64) as f32,
                std_deviation: non_negative(*d1 as f64, *d2 as f64) as f32,
                color: Color::blend(*c1, *c2, progress),
            },
            _ => return None,
        })
    }
}

/// A computed `filter` value, applied in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOperations(pub SmallVec<[FilterOperation; 2]>);

impl FilterOperations {
    pub fn new(operations: impl IntoIterator<Item = FilterOperation>) -> Self {
        FilterOperations(operations.into_iter().collect())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn operations(&self) -> &[FilterOperation] {
        &self.0
    }

    pub fn has_filter_that_moves_pixels(&self) -> bool {
        self.0.iter().any(FilterOperation::moves_pixels)
    }

    pub fn has_reference_filter(&self) -> bool {
        self.0
            .iter()
            .any(|operation| matches!(operation, FilterOperation::Reference(_)))
    }

    /// How far blurs and drop shadows can spread painted content past each
    /// edge.
    pub fn outsets(&self) -> SideOffsets2D<f32> {
        let mut outsets = SideOffsets2D::zero();
        for operation in &self.0 {
            match *operation {
                FilterOperation::Blur(ref deviation) => {
                    let extent = 3. * float_value_for_length(deviation, 0.);
                    outsets = outsets + SideOffsets2D::new_all_same(extent);
                },
                FilterOperation::DropShadow {
                    offset_x,
                    offset_y,
                    std_deviation,
                    ..
                } => {
                    let extent = 3. * std_deviation;
                    outsets = SideOffsets2D::new(
                        outsets.top.max(extent - offset_y),
                        outsets.right.max(extent + offset_x),
                        outsets.bottom.max(extent + offset_y),
                        outsets.left.max(extent - offset_x),
                    );
                },
                _ => {},
            }
        }
        outsets
    }

    /// Interpolates two lists. Matching prefixes interpolate pairwise and
    /// the longer list's tail interpolates from passthrough filters. Lists
    /// whose kinds differ swap at the halfway point.
    pub fn blend(from: &FilterOperations, to: &FilterOperations, progress: f64) -> Self {
        if from == to {
            return to.clone();
        }

        let length = from.0.len().max(to.0.len());
        let blended: Option<SmallVec<_>> = (0..length)
            .map(|index| FilterOperation::blend(from.0.get(index), to.0.get(index), progress))
            .collect();
        match blended {
            Some(blended) => FilterOperations(blended),
            None => {
                debug!("Filter lists {from:?} and {to:?} do not interpolate, swapping");
                if progress < 0.5 { from.clone() } else { to.clone() }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_moves_pixels() {
        let filters = FilterOperations::new([
            FilterOperation::Grayscale(0.5),
            FilterOperation::Blur(Length::Fixed(2.)),
        ]);
        assert!(filters.has_filter_that_moves_pixels());
        assert!(!FilterOperations::new([FilterOperation::Sepia(1.)]).has_filter_that_moves_pixels());
    }

    #[test]
    fn missing_entries_blend_from_passthrough() {
        let from = FilterOperations::default();
        let to = FilterOperations::new([FilterOperation::Opacity(0.)]);
        let blended = FilterOperations::blend(&from, &to, 0.25);
        assert_eq!(blended, FilterOperations::new([FilterOperation::Opacity(0.75)]));
    }

    #[test]
    fn mismatched_kinds_swap() {
        let from = FilterOperations::new([FilterOperation::Sepia(1.)]);
        let to = FilterOperations::new([FilterOperation::Invert(1.)]);
        assert_eq!(FilterOperations::blend(&from, &to, 0.4), from);
        assert_eq!(FilterOperations::blend(&from, &to, 0.6), to);
    }

    #[test]
    fn amounts_are_clamped() {
        let blended = FilterOperation::blend(
            Some(&FilterOperation::Grayscale(0.)),
            Some(&FilterOperation::Grayscale(1.)),
            1.5,
        );
        assert_eq!(blended, Some(FilterOperation::Grayscale(1.)));
    }
}
