/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Timing functions for transitions and animations.

use euclid::default::Point2D;
use serde::{Deserialize, Serialize};

use crate::bezier::Bezier;

/// Which named curve, if any, a cubic Bézier timing function came from.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CubicBezierSubtype {
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Custom,
}

impl CubicBezierSubtype {
    /// The control points of the named curves.
    pub fn control_points(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            CubicBezierSubtype::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            CubicBezierSubtype::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            CubicBezierSubtype::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            CubicBezierSubtype::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            CubicBezierSubtype::Custom => None,
        }
    }
}

/// Where within each interval a step function jumps.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum StepPosition {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum TimingFunction {
    #[default]
    Linear,
    CubicBezier {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        subtype: CubicBezierSubtype,
    },
    Steps {
        steps: u32,
        position: StepPosition,
    },
}

impl TimingFunction {
    #[inline]
    pub fn ease() -> Self {
        TimingFunction::preset(CubicBezierSubtype::Ease)
    }

    /// One of the named cubic Bézier curves. `Custom` falls back to `ease`.
    pub fn preset(subtype: CubicBezierSubtype) -> Self {
        match subtype.control_points() {
            Some((x1, y1, x2, y2)) => TimingFunction::CubicBezier {
                x1,
                y1,
                x2,
                y2,
                subtype,
            },
            None => {
                debug_assert!(false, "Custom is not a preset");
                TimingFunction::ease()
            },
        }
    }

    #[inline]
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        TimingFunction::CubicBezier {
            x1,
            y1,
            x2,
            y2,
            subtype: CubicBezierSubtype::Custom,
        }
    }

    #[inline]
    pub fn steps(steps: u32, position: StepPosition) -> Self {
        TimingFunction::Steps {
            steps: steps.max(1),
            position,
        }
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, TimingFunction::Linear)
    }

    #[inline]
    pub fn is_steps(&self) -> bool {
        matches!(self, TimingFunction::Steps { .. })
    }

    /// Maps input progress to output progress. `accuracy` bounds the error
    /// of the Bézier solver.
    pub fn evaluate(&self, fraction: f64, accuracy: f64) -> f64 {
        match *self {
            TimingFunction::Linear => fraction,
            TimingFunction::CubicBezier { x1, y1, x2, y2, .. } => {
                Bezier::new(Point2D::new(x1, y1), Point2D::new(x2, y2)).solve(fraction, accuracy)
            },
            TimingFunction::Steps { steps, position } => {
                let start_offset = match position {
                    StepPosition::Start => 1.,
                    StepPosition::Middle => 0.5,
                    StepPosition::End => 0.,
                };
                let steps = steps as f64;
                ((steps * fraction + start_offset).floor() / steps).clamp(0., 1.)
            },
        }
    }

    /// Given an input range, returns the range of outputs the function can
    /// produce over it. The result always includes `[0, 1]` for curves.
    pub fn range(&self, min: f64, max: f64) -> (f64, f64) {
        match *self {
            TimingFunction::Linear => (min, max),
            TimingFunction::Steps { .. } => (0., 1.),
            TimingFunction::CubicBezier { x1, y1, x2, y2, .. } => {
                if (0. ..=1.).contains(&y1) && (0. ..=1.).contains(&y2) {
                    return (min, max);
                }

                let bezier = Bezier::new(Point2D::new(x1, y1), Point2D::new(x2, y2));
                let epsilon = 1e-6;
                let at_min = bezier.solve(min, epsilon);
                let at_max = bezier.solve(max, epsilon);
                let mut low = at_min.min(at_max).min(0.);
                let mut high = at_min.max(at_max).max(1.);
                for t in bezier.y_extrema() {
                    let y = bezier.sample_curve_y(t);
                    low = low.min(y);
                    high = high.max(y);
                }
                (low, high)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_identity() {
        assert_eq!(TimingFunction::Linear.evaluate(0.3, 1e-6), 0.3);
        assert_eq!(TimingFunction::Linear.range(-0.5, 1.5), (-0.5, 1.5));
    }

    #[test]
    fn steps_jump_at_the_requested_position() {
        let end = TimingFunction::steps(4, StepPosition::End);
        assert_eq!(end.evaluate(0.3, 0.), 0.25);
        assert_eq!(end.evaluate(1.0, 0.), 1.0);
        let start = TimingFunction::steps(4, StepPosition::Start);
        assert_eq!(start.evaluate(0.0, 0.), 0.25);
        assert_eq!(start.evaluate(0.3, 0.), 0.5);
        assert_eq!(end.range(0., 1.), (0., 1.));
    }

    #[test]
    fn presets_hit_endpoints() {
        for subtype in [
            CubicBezierSubtype::Ease,
            CubicBezierSubtype::EaseIn,
            CubicBezierSubtype::EaseOut,
            CubicBezierSubtype::EaseInOut,
        ] {
            let function = TimingFunction::preset(subtype);
            assert!(function.evaluate(0., 1e-6).abs() < 1e-3);
            assert!((function.evaluate(1., 1e-6) - 1.).abs() < 1e-3);
        }
    }

    #[test]
    fn overshooting_curve_range() {
        let function = TimingFunction::cubic_bezier(0.3, -0.5, 0.7, 1.5);
        let (low, high) = function.range(0., 1.);
        assert!(low < 0.);
        assert!(high > 1.);

        let tame = TimingFunction::ease();
        assert_eq!(tame.range(0., 1.), (0., 1.));
    }
}
