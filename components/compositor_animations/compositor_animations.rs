/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Deciding which animations can run on the compositor, and handing them
//! over.

use std::error::Error;
use std::fmt;

use euclid::default::Box3D;
use log::{debug, warn};
use style::properties::CssPropertyId;
use style::values::easing::{CubicBezierSubtype, TimingFunction};
use style_config::CompositorSettings;

use crate::animatable_value::AnimatableValue;
use crate::keyframe_effect::{CompositeOperation, KeyframeEffectModel, PropertySpecificKeyframe};
use crate::platform::{
    AnimationCurve, AnimationId, CompositedLayer, CompositingElement, CompositingState,
    CompositorAnimation, CompositorSupport, Curve, CurveTimingFunction, FilterKeyframe,
    FloatKeyframe, TargetProperty, TransformKeyframe,
};
use crate::timing::{Timing, TimingConversionError, convert_timing_for_compositor};

/// Why [`start_animation_on_compositor`] started nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StartAnimationError {
    /// The element does not paint into its own compositing backing.
    NotComposited,
    Timing(TimingConversionError),
    /// The layer refused the animation for `property`. Animations started
    /// earlier in the same call have been removed again.
    LayerRejected { property: CssPropertyId },
}

impl fmt::Display for StartAnimationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StartAnimationError::NotComposited => {
                f.write_str("element does not have its own compositing backing")
            },
            StartAnimationError::Timing(error) => write!(f, "timing not supported: {error}"),
            StartAnimationError::LayerRejected { property } => {
                write!(f, "layer rejected the {} animation", property.name())
            },
        }
    }
}

impl Error for StartAnimationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StartAnimationError::Timing(error) => Some(error),
            _ => None,
        }
    }
}

impl From<TimingConversionError> for StartAnimationError {
    fn from(error: TimingConversionError) -> Self {
        StartAnimationError::Timing(error)
    }
}

/// Whether `effect`, played with `timing`, can be represented on the
/// compositor.
///
/// Only opacity, transforms that do not depend on the box size, and filters
/// that do not move pixels qualify. Every keyframe must replace the
/// underlying value, and only the last keyframe of a property may use a step
/// easing. A non-linear overall easing is only accepted for a pair of
/// keyframes whose own easing is linear.
pub fn is_candidate_for_animation_on_compositor(
    timing: &Timing,
    effect: &KeyframeEffectModel,
    settings: &CompositorSettings,
) -> bool {
    if !settings.accelerated_animations_enabled || !effect.has_properties() {
        return false;
    }

    for property in effect.properties() {
        if !property.is_compositable() {
            return false;
        }
        let keyframes = effect.property_specific_keyframes(property);
        debug_assert!(keyframes.len() >= 2);
        for (index, keyframe) in keyframes.iter().enumerate() {
            if keyframe.composite != CompositeOperation::Replace {
                return false;
            }
            let Some(value) = keyframe.value.as_ref() else {
                return false;
            };
            if index + 1 < keyframes.len() && keyframe.easing.is_steps() {
                return false;
            }
            let supported = match property {
                CssPropertyId::Opacity => value.as_double().is_some(),
                CssPropertyId::Transform => value
                    .as_transform()
                    .is_some_and(|operations| !operations.depends_on_box_size()),
                CssPropertyId::WebkitFilter => value
                    .as_filter()
                    .is_some_and(|operations| !operations.has_filter_that_moves_pixels()),
                _ => false,
            };
            if !supported {
                return false;
            }
        }
    }

    if convert_timing_for_compositor(timing, 0.).is_err() {
        return false;
    }

    match timing.timing_function {
        TimingFunction::Linear => true,
        TimingFunction::Steps { .. } => false,
        TimingFunction::CubicBezier { .. } => {
            // Counts whole keyframes rather than those of one property.
            let frames = effect.frames();
            frames.len() == 2 && frames[0].easing.is_linear()
        },
    }
}

#[inline]
pub fn can_start_animation_on_compositor<E: CompositingElement>(element: &E) -> bool {
    element.compositing_state() == CompositingState::PaintsIntoOwnBacking
}

/// The easing that produces the same curve when time runs backwards.
///
/// Step functions cannot be reversed; they never reach the compositor, and
/// `None` is returned for them.
pub fn reverse_timing_function(timing_function: &TimingFunction) -> Option<TimingFunction> {
    match *timing_function {
        TimingFunction::Linear => Some(TimingFunction::Linear),
        TimingFunction::CubicBezier {
            x1,
            y1,
            x2,
            y2,
            subtype,
        } => Some(match subtype {
            CubicBezierSubtype::EaseIn => TimingFunction::preset(CubicBezierSubtype::EaseOut),
            CubicBezierSubtype::EaseOut => TimingFunction::preset(CubicBezierSubtype::EaseIn),
            CubicBezierSubtype::EaseInOut => *timing_function,
            // Ease is not symmetrical.
            CubicBezierSubtype::Ease | CubicBezierSubtype::Custom => {
                TimingFunction::cubic_bezier(1. - x2, 1. - y2, 1. - x1, 1. - y1)
            },
        }),
        TimingFunction::Steps { .. } => {
            debug_assert!(false, "step timing functions cannot be reversed");
            warn!("Asked to reverse {timing_function:?}, ignoring");
            None
        },
    }
}

fn curve_timing_function(timing_function: &TimingFunction) -> Option<CurveTimingFunction> {
    match *timing_function {
        TimingFunction::Linear => Some(CurveTimingFunction::Linear),
        TimingFunction::CubicBezier {
            x1,
            y1,
            x2,
            y2,
            subtype,
        } => Some(match subtype {
            CubicBezierSubtype::Ease => CurveTimingFunction::Ease,
            CubicBezierSubtype::EaseIn => CurveTimingFunction::EaseIn,
            CubicBezierSubtype::EaseOut => CurveTimingFunction::EaseOut,
            CubicBezierSubtype::EaseInOut => CurveTimingFunction::EaseInOut,
            CubicBezierSubtype::Custom => CurveTimingFunction::CubicBezier { x1, y1, x2, y2 },
        }),
        TimingFunction::Steps { .. } => {
            debug_assert!(false, "step timing functions have no compositor curve");
            warn!("Dropping {timing_function:?} from a compositor curve");
            None
        },
    }
}

/// The keyframes of `property` with offsets scaled to seconds. When
/// `reverse` is set the keyframes are listed back to front and their
/// offsets mirrored.
fn keyframe_values_for_property(
    effect: &KeyframeEffectModel,
    property: CssPropertyId,
    scale: f64,
    reverse: bool,
) -> Vec<PropertySpecificKeyframe> {
    let group = effect.property_specific_keyframes(property);
    if reverse {
        group
            .iter()
            .rev()
            .map(|keyframe| keyframe.with_offset((1. - keyframe.offset) * scale))
            .collect()
    } else {
        group
            .iter()
            .map(|keyframe| keyframe.with_offset(keyframe.offset * scale))
            .collect()
    }
}

fn add_keyframes_to_curve<K, C, F>(
    curve: &mut C,
    keyframes: &[PropertySpecificKeyframe],
    timing: &Timing,
    reverse: bool,
    to_curve_keyframe: F,
) where
    C: AnimationCurve<K>,
    F: Fn(f64, &AnimatableValue) -> Option<K>,
{
    for (index, keyframe) in keyframes.iter().enumerate() {
        // The last keyframe eases nowhere.
        let timing_function = keyframes.get(index + 1).and_then(|next| {
            // Walking backwards, the segment ending here was eased by the
            // next keyframe in the list.
            let easing = if reverse { &next.easing } else { &keyframe.easing };
            let easing = if keyframes.len() == 2 && easing.is_linear() {
                timing.timing_function
            } else {
                *easing
            };
            let easing = if reverse {
                reverse_timing_function(&easing)?
            } else {
                easing
            };
            curve_timing_function(&easing)
        });

        let Some(curve_keyframe) = keyframe
            .value
            .as_ref()
            .and_then(|value| to_curve_keyframe(keyframe.offset, value))
        else {
            warn!("Keyframe at {} has no value for its curve", keyframe.offset);
            continue;
        };
        curve.add(curve_keyframe, timing_function);
    }
}

fn build_animations<S: CompositorSupport>(
    support: &S,
    timing: &Timing,
    start_time: Option<f64>,
    time_offset: f64,
    effect: &KeyframeEffectModel,
) -> Result<Vec<(CssPropertyId, S::Animation)>, TimingConversionError> {
    let compositor_timing = convert_timing_for_compositor(timing, time_offset)?;
    let reverse = compositor_timing.reverse;
    debug_assert!(effect.has_properties());

    let mut animations = Vec::new();
    for property in effect.properties() {
        let keyframes = keyframe_values_for_property(
            effect,
            property,
            compositor_timing.scaled_duration,
            reverse,
        );

        let (target, curve) = match property {
            CssPropertyId::Opacity => {
                let mut curve = support.create_float_animation_curve();
                add_keyframes_to_curve(&mut curve, &keyframes, timing, reverse, |time, value| {
                    value.as_double().map(|value| FloatKeyframe {
                        time,
                        value: value as f32,
                    })
                });
                (TargetProperty::Opacity, Curve::Float(curve))
            },
            CssPropertyId::WebkitFilter => {
                let mut curve = support.create_filter_animation_curve();
                add_keyframes_to_curve(&mut curve, &keyframes, timing, reverse, |time, value| {
                    value.as_filter().map(|operations| FilterKeyframe {
                        time,
                        value: operations.clone(),
                    })
                });
                (TargetProperty::Filter, Curve::Filter(curve))
            },
            CssPropertyId::Transform => {
                let mut curve = support.create_transform_animation_curve();
                add_keyframes_to_curve(&mut curve, &keyframes, timing, reverse, |time, value| {
                    value.as_transform().map(|operations| TransformKeyframe {
                        time,
                        value: operations.clone(),
                    })
                });
                (TargetProperty::Transform, Curve::Transform(curve))
            },
            _ => {
                debug_assert!(false, "{property:?} cannot be animated on the compositor");
                warn!("Skipping {property:?}, which the compositor cannot animate");
                continue;
            },
        };

        let mut animation = support.create_animation(curve, target);
        if let Some(start_time) = start_time {
            animation.set_start_time(start_time);
        }
        animation.set_iterations(compositor_timing.adjusted_iteration_count);
        animation.set_time_offset(compositor_timing.scaled_time_offset);
        animation.set_alternates_direction(compositor_timing.alternate);
        animations.push((property, animation));
    }
    Ok(animations)
}

/// Builds one compositor animation per property of `effect`.
///
/// Callers are expected to have checked
/// [`is_candidate_for_animation_on_compositor`]; the timing is validated
/// again here.
pub fn get_animation_on_compositor<S: CompositorSupport>(
    support: &S,
    timing: &Timing,
    start_time: Option<f64>,
    time_offset: f64,
    effect: &KeyframeEffectModel,
) -> Result<Vec<S::Animation>, TimingConversionError> {
    Ok(build_animations(support, timing, start_time, time_offset, effect)?
        .into_iter()
        .map(|(_, animation)| animation)
        .collect())
}

/// Grows `box_` to cover every position its transform animations reach
/// while the effect's progress moves through `[min_value, max_value]`,
/// which is widened to include `[0, 1]`.
///
/// Returns `None` if the bounds cannot be computed.
pub fn get_animated_bounding_box(
    box_: &Box3D<f32>,
    effect: &KeyframeEffectModel,
    min_value: f64,
    max_value: f64,
) -> Option<Box3D<f32>> {
    let min_value = min_value.min(0.);
    let max_value = max_value.max(1.);
    let mut bounds = *box_;

    // TODO: expand for filters that move pixels too.
    let frames = effect.property_specific_keyframes(CssPropertyId::Transform);
    if frames.len() < 2 {
        return Some(bounds);
    }

    for (index, pair) in frames.windows(2).enumerate() {
        let (start, end) = (&pair[0], &pair[1]);
        let start_transform = start.value.as_ref().and_then(AnimatableValue::as_transform)?;
        let end_transform = end.value.as_ref().and_then(AnimatableValue::as_transform)?;
        if start.composite != CompositeOperation::Replace {
            return None;
        }

        let mut min = 0.;
        let mut max = 1.;
        if index == 0 && end.offset > 0. {
            min = min_value / end.offset;
        }
        if index == frames.len() - 2 && start.offset < 1. {
            max = 1. + (max_value - 1.) / (1. - start.offset);
        }
        let (min, max) = start.easing.range(min, max);

        let segment = end_transform.blended_bounds_for_box(box_, start_transform, min, max)?;
        bounds = Box3D::new(bounds.min.min(segment.min), bounds.max.max(segment.max));
    }
    Some(bounds)
}

/// Starts the compositor animations for `effect` on `element`'s layer.
///
/// Either every property's animation is started and their ids returned, or
/// none is: if the layer refuses one, those already added are removed.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "CompositorAnimations::start",
        skip_all,
        fields(servo_profiling = true),
        level = "trace",
    )
)]
pub fn start_animation_on_compositor<S, E>(
    support: &S,
    element: &mut E,
    start_time: Option<f64>,
    time_offset: f64,
    timing: &Timing,
    effect: &KeyframeEffectModel,
) -> Result<Vec<AnimationId>, StartAnimationError>
where
    S: CompositorSupport,
    E: CompositingElement,
    E::Layer: CompositedLayer<Animation = S::Animation>,
{
    if !can_start_animation_on_compositor(element) {
        return Err(StartAnimationError::NotComposited);
    }
    let animations = build_animations(support, timing, start_time, time_offset, effect)?;
    let layer = element
        .main_graphics_layer()
        .ok_or(StartAnimationError::NotComposited)?;

    let mut started = Vec::with_capacity(animations.len());
    for (property, animation) in animations {
        let id = animation.id();
        if !layer.add_animation(animation) {
            debug!(
                "Layer rejected {} animation {id}, rolling back {started:?}",
                property.name()
            );
            for id in started {
                layer.remove_animation(id);
            }
            return Err(StartAnimationError::LayerRejected { property });
        }
        started.push(id);
    }
    debug!("Started compositor animations {started:?}");
    Ok(started)
}

pub fn cancel_animation_on_compositor<E: CompositingElement>(element: &mut E, id: AnimationId) {
    // An element being detached may already have lost its backing.
    if !can_start_animation_on_compositor(element) {
        debug!("Not cancelling compositor animation {id}: element is not composited");
        return;
    }
    if let Some(layer) = element.main_graphics_layer() {
        debug!("Cancelling compositor animation {id}");
        layer.remove_animation(id);
    }
}

pub fn pause_animation_for_testing_on_compositor<E: CompositingElement>(
    element: &mut E,
    id: AnimationId,
    pause_time: f64,
) {
    if !can_start_animation_on_compositor(element) {
        debug_assert!(false, "pausing an animation on an element without a backing");
        warn!("Cannot pause compositor animation {id}: element is not composited");
        return;
    }
    if let Some(layer) = element.main_graphics_layer() {
        layer.pause_animation(id, pause_time);
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::Point3D;
    use style::length::Length;
    use style::values::easing::StepPosition;
    use style::values::filter::{FilterOperation, FilterOperations};
    use style::values::transform::{TransformOperation, TransformOperations};

    use super::*;
    use crate::keyframe_effect::Keyframe;

    fn timing() -> Timing {
        Timing {
            iteration_duration: 1.,
            ..Timing::default()
        }
    }

    fn two_keyframes(
        property: CssPropertyId,
        from: AnimatableValue,
        to: AnimatableValue,
    ) -> KeyframeEffectModel {
        KeyframeEffectModel::new(vec![
            Keyframe::new(Some(0.)).with_value(property, from),
            Keyframe::new(Some(1.)).with_value(property, to),
        ])
    }

    fn opacity_effect() -> KeyframeEffectModel {
        two_keyframes(
            CssPropertyId::Opacity,
            AnimatableValue::Double(1.),
            AnimatableValue::Double(0.),
        )
    }

    fn translate_x(length: Length) -> AnimatableValue {
        AnimatableValue::Transform(TransformOperations::new([TransformOperation::translate(
            length,
            Length::zero(),
        )]))
    }

    #[test]
    fn reversal_table() {
        let ease_in = TimingFunction::preset(CubicBezierSubtype::EaseIn);
        let ease_out = TimingFunction::preset(CubicBezierSubtype::EaseOut);
        let ease_in_out = TimingFunction::preset(CubicBezierSubtype::EaseInOut);
        assert_eq!(reverse_timing_function(&ease_in), Some(ease_out));
        assert_eq!(reverse_timing_function(&ease_out), Some(ease_in));
        assert_eq!(reverse_timing_function(&ease_in_out), Some(ease_in_out));
        assert_eq!(
            reverse_timing_function(&TimingFunction::Linear),
            Some(TimingFunction::Linear)
        );

        let custom = TimingFunction::cubic_bezier(0.1, 0.2, 0.3, 0.4);
        assert_eq!(
            reverse_timing_function(&custom),
            Some(TimingFunction::cubic_bezier(1. - 0.3, 1. - 0.4, 1. - 0.1, 1. - 0.2))
        );
    }

    #[test]
    fn ease_reverses_through_its_control_points() {
        let Some(TimingFunction::CubicBezier {
            x1,
            y1,
            x2,
            y2,
            subtype,
        }) = reverse_timing_function(&TimingFunction::ease())
        else {
            panic!("ease should reverse to a cubic bezier");
        };
        assert_eq!(subtype, CubicBezierSubtype::Custom);
        assert!((x1 - 0.75).abs() < 1e-9);
        assert!((y1 - 0.).abs() < 1e-9);
        assert!((x2 - 0.75).abs() < 1e-9);
        assert!((y2 - 0.9).abs() < 1e-9);
    }

    #[test]
    fn opacity_is_a_candidate() {
        let settings = CompositorSettings::default();
        assert!(is_candidate_for_animation_on_compositor(
            &timing(),
            &opacity_effect(),
            &settings
        ));
    }

    #[test]
    fn kill_switch_disables_candidates() {
        let settings = CompositorSettings {
            accelerated_animations_enabled: false,
        };
        assert!(!is_candidate_for_animation_on_compositor(
            &timing(),
            &opacity_effect(),
            &settings
        ));
    }

    #[test]
    fn layout_properties_are_not_candidates() {
        let effect = KeyframeEffectModel::new(vec![
            Keyframe::new(Some(0.))
                .with_value(CssPropertyId::Opacity, AnimatableValue::Double(1.))
                .with_value(CssPropertyId::Left, AnimatableValue::Unknown("0px".to_owned())),
            Keyframe::new(Some(1.))
                .with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.))
                .with_value(CssPropertyId::Left, AnimatableValue::Unknown("10px".to_owned())),
        ]);
        assert!(!is_candidate_for_animation_on_compositor(
            &timing(),
            &effect,
            &CompositorSettings::default()
        ));
    }

    #[test]
    fn percentage_translations_are_not_candidates() {
        let settings = CompositorSettings::default();
        let fixed = two_keyframes(
            CssPropertyId::Transform,
            translate_x(Length::Fixed(0.)),
            translate_x(Length::Fixed(10.)),
        );
        assert!(is_candidate_for_animation_on_compositor(&timing(), &fixed, &settings));

        let percent = two_keyframes(
            CssPropertyId::Transform,
            translate_x(Length::Fixed(0.)),
            translate_x(Length::Percent(50.)),
        );
        assert!(!is_candidate_for_animation_on_compositor(&timing(), &percent, &settings));
    }

    #[test]
    fn pixel_moving_filters_are_not_candidates() {
        let settings = CompositorSettings::default();
        let grayscale = two_keyframes(
            CssPropertyId::WebkitFilter,
            AnimatableValue::Filter(FilterOperations::new([FilterOperation::Grayscale(0.)])),
            AnimatableValue::Filter(FilterOperations::new([FilterOperation::Grayscale(1.)])),
        );
        assert!(is_candidate_for_animation_on_compositor(&timing(), &grayscale, &settings));

        let blur = two_keyframes(
            CssPropertyId::WebkitFilter,
            AnimatableValue::Filter(FilterOperations::new([FilterOperation::Blur(Length::zero())])),
            AnimatableValue::Filter(FilterOperations::new([FilterOperation::Blur(Length::Fixed(
                4.,
            ))])),
        );
        assert!(!is_candidate_for_animation_on_compositor(&timing(), &blur, &settings));
    }

    #[test]
    fn missing_end_keyframe_is_not_a_candidate() {
        let effect = KeyframeEffectModel::new(vec![
            Keyframe::new(Some(0.)).with_value(CssPropertyId::Opacity, AnimatableValue::Double(1.)),
            Keyframe::new(Some(0.5)).with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.)),
        ]);
        assert!(!is_candidate_for_animation_on_compositor(
            &timing(),
            &effect,
            &CompositorSettings::default()
        ));
    }

    #[test]
    fn inner_step_easing_is_not_a_candidate() {
        let effect = KeyframeEffectModel::new(vec![
            Keyframe::new(Some(0.))
                .with_easing(TimingFunction::steps(4, StepPosition::End))
                .with_value(CssPropertyId::Opacity, AnimatableValue::Double(1.)),
            Keyframe::new(Some(1.)).with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.)),
        ]);
        assert!(!is_candidate_for_animation_on_compositor(
            &timing(),
            &effect,
            &CompositorSettings::default()
        ));
    }

    #[test]
    fn overall_easing_needs_two_linear_keyframes() {
        let settings = CompositorSettings::default();
        let eased = Timing {
            timing_function: TimingFunction::ease(),
            ..timing()
        };
        assert!(is_candidate_for_animation_on_compositor(&eased, &opacity_effect(), &settings));

        let three = KeyframeEffectModel::new(vec![
            Keyframe::new(None).with_value(CssPropertyId::Opacity, AnimatableValue::Double(1.)),
            Keyframe::new(None).with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.5)),
            Keyframe::new(None).with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.)),
        ]);
        assert!(is_candidate_for_animation_on_compositor(&timing(), &three, &settings));
        assert!(!is_candidate_for_animation_on_compositor(&eased, &three, &settings));

        let stepped = Timing {
            timing_function: TimingFunction::steps(2, StepPosition::End),
            ..timing()
        };
        assert!(!is_candidate_for_animation_on_compositor(&stepped, &opacity_effect(), &settings));
    }

    #[test]
    fn bounding_box_covers_translation() {
        let effect = two_keyframes(
            CssPropertyId::Transform,
            translate_x(Length::Fixed(0.)),
            translate_x(Length::Fixed(10.)),
        );
        let box_ = Box3D::new(Point3D::new(0., 0., 0.), Point3D::new(10., 10., 0.));
        let bounds = get_animated_bounding_box(&box_, &effect, 0., 1.).unwrap();
        assert_eq!(bounds.min.x, 0.);
        assert_eq!(bounds.max.x, 20.);
        assert_eq!(bounds.max.y, 10.);
    }

    #[test]
    fn bounding_box_ignores_other_properties() {
        let box_ = Box3D::new(Point3D::new(0., 0., 0.), Point3D::new(5., 5., 0.));
        assert_eq!(
            get_animated_bounding_box(&box_, &opacity_effect(), 0., 1.),
            Some(box_)
        );
    }
}
