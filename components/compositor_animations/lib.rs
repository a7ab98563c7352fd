/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Hands keyframe animations of opacity, transform and filter to a
//! compositor so they can run without the main thread.
//!
//! The compositor itself lives behind the traits in [`platform`]. This crate
//! decides whether an effect can be represented there at all
//! ([`is_candidate_for_animation_on_compositor`]), projects the main-thread
//! [`Timing`] onto the compositor's simpler timeline
//! ([`convert_timing_for_compositor`]) and builds one curve per animated
//! property.

#![deny(unsafe_code)]

pub mod animatable_value;
pub mod compositor_animations;
pub mod keyframe_effect;
pub mod platform;
pub mod timing;

pub use crate::animatable_value::AnimatableValue;
pub use crate::compositor_animations::{
    StartAnimationError, can_start_animation_on_compositor, cancel_animation_on_compositor,
    get_animated_bounding_box, get_animation_on_compositor,
    is_candidate_for_animation_on_compositor, pause_animation_for_testing_on_compositor,
    reverse_timing_function, start_animation_on_compositor,
};
pub use crate::keyframe_effect::{
    CompositeOperation, Keyframe, KeyframeEffectModel, PropertySpecificKeyframe,
};
pub use crate::timing::{
    CompositorTiming, FillMode, PlaybackDirection, Timing, TimingConversionError,
    convert_timing_for_compositor,
};
