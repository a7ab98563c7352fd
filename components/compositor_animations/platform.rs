/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The interface of the compositor that runs accelerated animations.
//!
//! Curves and animations are created through [`CompositorSupport`] and
//! attached to the [`CompositedLayer`] that paints an element. Everything
//! after that happens on the compositor's own schedule.

use style::values::filter::FilterOperations;
use style::values::transform::TransformOperations;

pub type AnimationId = u32;

/// The properties a compositor knows how to animate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TargetProperty {
    Opacity,
    Transform,
    Filter,
}

/// Easing between a curve keyframe and the next, as the compositor
/// understands it. Step functions have no compositor equivalent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveTimingFunction {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatKeyframe {
    /// Seconds from the start of the iteration.
    pub time: f64,
    pub value: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransformKeyframe {
    pub time: f64,
    pub value: TransformOperations,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterKeyframe {
    pub time: f64,
    pub value: FilterOperations,
}

/// A keyframed curve under construction.
pub trait AnimationCurve<K> {
    /// Appends a keyframe. `timing_function` eases towards the next
    /// keyframe; `None` leaves the compositor's default in place.
    fn add(&mut self, keyframe: K, timing_function: Option<CurveTimingFunction>);
}

/// A finished curve, handed over to [`CompositorSupport::create_animation`].
pub enum Curve<S: CompositorSupport + ?Sized> {
    Float(S::FloatCurve),
    Filter(S::FilterCurve),
    Transform(S::TransformCurve),
}

/// An animation owned by the compositor once it is added to a layer.
pub trait CompositorAnimation {
    fn id(&self) -> AnimationId;
    fn set_start_time(&mut self, start_time: f64);
    /// `-1` repeats forever.
    fn set_iterations(&mut self, iterations: f64);
    fn set_time_offset(&mut self, time_offset: f64);
    fn set_alternates_direction(&mut self, alternates: bool);
}

/// Factory for compositor curves and animations.
pub trait CompositorSupport {
    type FloatCurve: AnimationCurve<FloatKeyframe>;
    type FilterCurve: AnimationCurve<FilterKeyframe>;
    type TransformCurve: AnimationCurve<TransformKeyframe>;
    type Animation: CompositorAnimation;

    fn create_float_animation_curve(&self) -> Self::FloatCurve;
    fn create_filter_animation_curve(&self) -> Self::FilterCurve;
    fn create_transform_animation_curve(&self) -> Self::TransformCurve;
    fn create_animation(&self, curve: Curve<Self>, target: TargetProperty) -> Self::Animation;
}

/// A compositor layer that runs animations by id.
pub trait CompositedLayer {
    type Animation: CompositorAnimation;

    /// Returns false if the layer refused the animation.
    fn add_animation(&mut self, animation: Self::Animation) -> bool;
    fn remove_animation(&mut self, id: AnimationId);
    fn pause_animation(&mut self, id: AnimationId, time_offset: f64);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompositingState {
    NotComposited,
    /// Painted into a backing shared with other elements.
    PaintsIntoGroupedBacking,
    PaintsIntoOwnBacking,
}

/// An element whose rendering may be composited.
pub trait CompositingElement {
    type Layer: CompositedLayer;

    fn compositing_state(&self) -> CompositingState;

    /// The layer painting the element itself. Only meaningful when the
    /// element paints into its own backing.
    fn main_graphics_layer(&mut self) -> Option<&mut Self::Layer>;
}
