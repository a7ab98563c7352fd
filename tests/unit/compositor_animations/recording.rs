/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! A compositor that records what it is asked to do.

use std::cell::Cell;

use compositor_animations::platform::{
    AnimationCurve, AnimationId, CompositedLayer, CompositingElement, CompositingState,
    CompositorAnimation, CompositorSupport, Curve, CurveTimingFunction, FilterKeyframe,
    FloatKeyframe, TargetProperty, TransformKeyframe,
};

pub struct RecordingCurve<K> {
    pub keyframes: Vec<(K, Option<CurveTimingFunction>)>,
}

impl<K> Default for RecordingCurve<K> {
    fn default() -> Self {
        RecordingCurve {
            keyframes: Vec::new(),
        }
    }
}

impl<K> AnimationCurve<K> for RecordingCurve<K> {
    fn add(&mut self, keyframe: K, timing_function: Option<CurveTimingFunction>) {
        self.keyframes.push((keyframe, timing_function));
    }
}

#[derive(Debug)]
pub enum RecordedCurve {
    Float(Vec<(FloatKeyframe, Option<CurveTimingFunction>)>),
    Filter(Vec<(FilterKeyframe, Option<CurveTimingFunction>)>),
    Transform(Vec<(TransformKeyframe, Option<CurveTimingFunction>)>),
}

impl RecordedCurve {
    pub fn float_keyframes(&self) -> &[(FloatKeyframe, Option<CurveTimingFunction>)] {
        match self {
            RecordedCurve::Float(keyframes) => keyframes,
            other => panic!("expected a float curve, got {other:?}"),
        }
    }
}

#[derive(Debug)]
pub struct RecordedAnimation {
    pub id: AnimationId,
    pub target: TargetProperty,
    pub curve: RecordedCurve,
    pub start_time: Option<f64>,
    pub iterations: f64,
    pub time_offset: f64,
    pub alternates: bool,
}

impl CompositorAnimation for RecordedAnimation {
    fn id(&self) -> AnimationId {
        self.id
    }

    fn set_start_time(&mut self, start_time: f64) {
        self.start_time = Some(start_time);
    }

    fn set_iterations(&mut self, iterations: f64) {
        self.iterations = iterations;
    }

    fn set_time_offset(&mut self, time_offset: f64) {
        self.time_offset = time_offset;
    }

    fn set_alternates_direction(&mut self, alternates: bool) {
        self.alternates = alternates;
    }
}

pub struct RecordingSupport {
    next_id: Cell<AnimationId>,
}

impl RecordingSupport {
    pub fn new() -> Self {
        RecordingSupport {
            next_id: Cell::new(1),
        }
    }
}

impl CompositorSupport for RecordingSupport {
    type FloatCurve = RecordingCurve<FloatKeyframe>;
    type FilterCurve = RecordingCurve<FilterKeyframe>;
    type TransformCurve = RecordingCurve<TransformKeyframe>;
    type Animation = RecordedAnimation;

    fn create_float_animation_curve(&self) -> Self::FloatCurve {
        RecordingCurve::default()
    }

    fn create_filter_animation_curve(&self) -> Self::FilterCurve {
        RecordingCurve::default()
    }

    fn create_transform_animation_curve(&self) -> Self::TransformCurve {
        RecordingCurve::default()
    }

    fn create_animation(&self, curve: Curve<Self>, target: TargetProperty) -> RecordedAnimation {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let curve = match curve {
            Curve::Float(curve) => RecordedCurve::Float(curve.keyframes),
            Curve::Filter(curve) => RecordedCurve::Filter(curve.keyframes),
            Curve::Transform(curve) => RecordedCurve::Transform(curve.keyframes),
        };
        RecordedAnimation {
            id,
            target,
            curve,
            start_time: None,
            iterations: 1.,
            time_offset: 0.,
            alternates: false,
        }
    }
}

pub struct RecordingLayer {
    pub animations: Vec<RecordedAnimation>,
    pub removed: Vec<AnimationId>,
    pub paused: Vec<(AnimationId, f64)>,
    /// How many animations the layer accepts before refusing more.
    pub capacity: usize,
}

impl CompositedLayer for RecordingLayer {
    type Animation = RecordedAnimation;

    fn add_animation(&mut self, animation: RecordedAnimation) -> bool {
        if self.animations.len() >= self.capacity {
            return false;
        }
        self.animations.push(animation);
        true
    }

    fn remove_animation(&mut self, id: AnimationId) {
        self.animations.retain(|animation| animation.id != id);
        self.removed.push(id);
    }

    fn pause_animation(&mut self, id: AnimationId, time_offset: f64) {
        self.paused.push((id, time_offset));
    }
}

pub struct TestElement {
    pub state: CompositingState,
    pub layer: RecordingLayer,
}

impl TestElement {
    pub fn new(state: CompositingState) -> Self {
        TestElement {
            state,
            layer: RecordingLayer {
                animations: Vec::new(),
                removed: Vec::new(),
                paused: Vec::new(),
                capacity: usize::MAX,
            },
        }
    }

    pub fn composited() -> Self {
        TestElement::new(CompositingState::PaintsIntoOwnBacking)
    }
}

impl CompositingElement for TestElement {
    type Layer = RecordingLayer;

    fn compositing_state(&self) -> CompositingState {
        self.state
    }

    fn main_graphics_layer(&mut self) -> Option<&mut RecordingLayer> {
        Some(&mut self.layer)
    }
}
