/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use compositor_animations::platform::{CompositingState, CurveTimingFunction, TargetProperty};
use compositor_animations::{
    AnimatableValue, CompositorTiming, Keyframe, KeyframeEffectModel, PlaybackDirection,
    StartAnimationError, Timing, cancel_animation_on_compositor, convert_timing_for_compositor,
    get_animation_on_compositor, is_candidate_for_animation_on_compositor,
    pause_animation_for_testing_on_compositor, start_animation_on_compositor,
};
use style::properties::CssPropertyId;
use style::values::easing::{CubicBezierSubtype, TimingFunction};
use style::values::filter::{FilterOperation, FilterOperations};
use style::values::transform::{TransformOperation, TransformOperations};
use style_config::CompositorSettings;

use crate::recording::{RecordedCurve, RecordingSupport, TestElement};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn timing() -> Timing {
    Timing {
        iteration_duration: 1.,
        ..Timing::default()
    }
}

fn fade_out() -> KeyframeEffectModel {
    KeyframeEffectModel::new(vec![
        Keyframe::new(Some(0.)).with_value(CssPropertyId::Opacity, AnimatableValue::Double(1.)),
        Keyframe::new(Some(1.)).with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.)),
    ])
}

fn rotation(angle: f64) -> AnimatableValue {
    AnimatableValue::Transform(TransformOperations::new([TransformOperation::rotate_z(angle)]))
}

fn fade_and_spin() -> KeyframeEffectModel {
    KeyframeEffectModel::new(vec![
        Keyframe::new(Some(0.))
            .with_value(CssPropertyId::Opacity, AnimatableValue::Double(1.))
            .with_value(CssPropertyId::Transform, rotation(0.)),
        Keyframe::new(Some(1.))
            .with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.))
            .with_value(CssPropertyId::Transform, rotation(180.)),
    ])
}

#[test]
fn two_iteration_fade_runs_on_the_compositor() {
    init_logging();
    let timing = Timing {
        iteration_count: 2.,
        ..timing()
    };
    let effect = fade_out();

    assert!(is_candidate_for_animation_on_compositor(
        &timing,
        &effect,
        &CompositorSettings::default()
    ));
    assert_eq!(
        convert_timing_for_compositor(&timing, 0.),
        Ok(CompositorTiming {
            reverse: false,
            alternate: false,
            scaled_duration: 1.,
            scaled_time_offset: 0.,
            adjusted_iteration_count: 2.,
        })
    );

    let support = RecordingSupport::new();
    let animations = get_animation_on_compositor(&support, &timing, None, 0., &effect).unwrap();
    assert_eq!(animations.len(), 1);

    let animation = &animations[0];
    assert_eq!(animation.target, TargetProperty::Opacity);
    assert_eq!(animation.iterations, 2.);
    assert_eq!(animation.time_offset, 0.);
    assert!(!animation.alternates);
    assert_eq!(animation.start_time, None);

    let keyframes = animation.curve.float_keyframes();
    assert_eq!(keyframes.len(), 2);
    assert_eq!(keyframes[0].0.time, 0.);
    assert_eq!(keyframes[0].0.value, 1.);
    assert_eq!(keyframes[0].1, Some(CurveTimingFunction::Linear));
    assert_eq!(keyframes[1].0.time, 1.);
    assert_eq!(keyframes[1].0.value, 0.);
    assert_eq!(keyframes[1].1, None);
}

#[test]
fn reversed_playback_mirrors_the_curve() {
    let timing = Timing {
        iteration_duration: 2.,
        direction: PlaybackDirection::Reverse,
        timing_function: TimingFunction::preset(CubicBezierSubtype::EaseIn),
        ..Timing::default()
    };
    let support = RecordingSupport::new();
    let animations =
        get_animation_on_compositor(&support, &timing, None, 0., &fade_out()).unwrap();

    let keyframes = animations[0].curve.float_keyframes();
    assert_eq!(keyframes.len(), 2);
    assert_eq!((keyframes[0].0.time, keyframes[0].0.value), (0., 0.));
    assert_eq!((keyframes[1].0.time, keyframes[1].0.value), (2., 1.));
    assert_eq!(keyframes[0].1, Some(CurveTimingFunction::EaseOut));
}

#[test]
fn keyframe_easings_are_kept_per_segment() {
    let effect = KeyframeEffectModel::new(vec![
        Keyframe::new(None)
            .with_easing(TimingFunction::preset(CubicBezierSubtype::EaseIn))
            .with_value(CssPropertyId::Opacity, AnimatableValue::Double(1.)),
        Keyframe::new(None)
            .with_easing(TimingFunction::cubic_bezier(0.1, 0.2, 0.3, 0.4))
            .with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.5)),
        Keyframe::new(None).with_value(CssPropertyId::Opacity, AnimatableValue::Double(0.)),
    ]);
    let timing = Timing {
        iteration_duration: 4.,
        ..Timing::default()
    };
    assert!(is_candidate_for_animation_on_compositor(
        &timing,
        &effect,
        &CompositorSettings::default()
    ));

    let support = RecordingSupport::new();
    let animations = get_animation_on_compositor(&support, &timing, None, 0., &effect).unwrap();
    let keyframes = animations[0].curve.float_keyframes();
    let times: Vec<f64> = keyframes.iter().map(|(keyframe, _)| keyframe.time).collect();
    assert_eq!(times, vec![0., 2., 4.]);
    let easings: Vec<_> = keyframes.iter().map(|(_, easing)| *easing).collect();
    assert_eq!(
        easings,
        vec![
            Some(CurveTimingFunction::EaseIn),
            Some(CurveTimingFunction::CubicBezier {
                x1: 0.1,
                y1: 0.2,
                x2: 0.3,
                y2: 0.4,
            }),
            None,
        ]
    );
}

#[test]
fn infinite_alternating_timing_is_applied_to_the_animation() {
    let timing = Timing {
        iteration_count: f64::INFINITY,
        direction: PlaybackDirection::Alternate,
        start_delay: 0.5,
        ..timing()
    };
    let support = RecordingSupport::new();
    let animations =
        get_animation_on_compositor(&support, &timing, Some(10.), 0.25, &fade_out()).unwrap();
    let animation = &animations[0];
    assert_eq!(animation.iterations, -1.);
    assert!(animation.alternates);
    assert_eq!(animation.time_offset, -0.25);
    assert_eq!(animation.start_time, Some(10.));
}

#[test]
fn transform_curves_carry_the_operations() {
    let effect = KeyframeEffectModel::new(vec![
        Keyframe::new(Some(0.)).with_value(CssPropertyId::Transform, rotation(0.)),
        Keyframe::new(Some(1.)).with_value(CssPropertyId::Transform, rotation(90.)),
    ]);
    let support = RecordingSupport::new();
    let animations = get_animation_on_compositor(&support, &timing(), None, 0., &effect).unwrap();
    assert_eq!(animations[0].target, TargetProperty::Transform);
    let RecordedCurve::Transform(keyframes) = &animations[0].curve else {
        panic!("expected a transform curve");
    };
    assert_eq!(keyframes.len(), 2);
    assert_eq!(
        keyframes[1].0.value,
        TransformOperations::new([TransformOperation::rotate_z(90.)])
    );
}

#[test]
fn filter_curves_carry_the_operations() {
    let sepia =
        |amount| AnimatableValue::Filter(FilterOperations::new([FilterOperation::Sepia(amount)]));
    let effect = KeyframeEffectModel::new(vec![
        Keyframe::new(Some(0.)).with_value(CssPropertyId::WebkitFilter, sepia(0.)),
        Keyframe::new(Some(1.)).with_value(CssPropertyId::WebkitFilter, sepia(1.)),
    ]);
    assert!(is_candidate_for_animation_on_compositor(
        &timing(),
        &effect,
        &CompositorSettings::default()
    ));

    let support = RecordingSupport::new();
    let animations = get_animation_on_compositor(&support, &timing(), None, 0., &effect).unwrap();
    assert_eq!(animations[0].target, TargetProperty::Filter);
    let RecordedCurve::Filter(keyframes) = &animations[0].curve else {
        panic!("expected a filter curve");
    };
    let times: Vec<f64> = keyframes.iter().map(|(keyframe, _)| keyframe.time).collect();
    assert_eq!(times, vec![0., 1.]);
    assert_eq!(
        keyframes[0].0.value,
        FilterOperations::new([FilterOperation::Sepia(0.)])
    );
}

#[test]
fn starting_adds_one_animation_per_property() {
    init_logging();
    let support = RecordingSupport::new();
    let mut element = TestElement::composited();
    let ids = start_animation_on_compositor(
        &support,
        &mut element,
        None,
        0.,
        &timing(),
        &fade_and_spin(),
    )
    .unwrap();

    assert_eq!(ids.len(), 2);
    let targets: Vec<_> = element
        .layer
        .animations
        .iter()
        .map(|animation| animation.target)
        .collect();
    assert_eq!(targets, vec![TargetProperty::Opacity, TargetProperty::Transform]);

    cancel_animation_on_compositor(&mut element, ids[0]);
    assert_eq!(element.layer.animations.len(), 1);
    assert_eq!(element.layer.removed, vec![ids[0]]);

    pause_animation_for_testing_on_compositor(&mut element, ids[1], 0.5);
    assert_eq!(element.layer.paused, vec![(ids[1], 0.5)]);
}

#[test]
fn elements_without_their_own_backing_are_refused() {
    for state in [
        CompositingState::NotComposited,
        CompositingState::PaintsIntoGroupedBacking,
    ] {
        let support = RecordingSupport::new();
        let mut element = TestElement::new(state);
        let result =
            start_animation_on_compositor(&support, &mut element, None, 0., &timing(), &fade_out());
        assert_eq!(result, Err(StartAnimationError::NotComposited));
        assert!(element.layer.animations.is_empty());

        cancel_animation_on_compositor(&mut element, 1);
        assert!(element.layer.removed.is_empty());
    }
}

#[test]
fn rejected_animation_rolls_back_the_batch() {
    init_logging();
    let support = RecordingSupport::new();
    let mut element = TestElement::composited();
    element.layer.capacity = 1;

    let result = start_animation_on_compositor(
        &support,
        &mut element,
        None,
        0.,
        &timing(),
        &fade_and_spin(),
    );
    assert_eq!(
        result,
        Err(StartAnimationError::LayerRejected {
            property: CssPropertyId::Transform,
        })
    );
    assert!(element.layer.animations.is_empty());
    assert_eq!(element.layer.removed.len(), 1);
}

#[test]
fn unconvertible_timing_starts_nothing() {
    let support = RecordingSupport::new();
    let mut element = TestElement::composited();
    let timing = Timing {
        playback_rate: 2.,
        ..timing()
    };
    let result =
        start_animation_on_compositor(&support, &mut element, None, 0., &timing, &fade_out());
    assert!(matches!(result, Err(StartAnimationError::Timing(_))));
    assert!(element.layer.animations.is_empty());
}
