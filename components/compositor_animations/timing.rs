/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Animation timing and its projection onto the compositor timeline.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use style::values::easing::TimingFunction;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlaybackDirection {
    #[default]
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl PlaybackDirection {
    /// Whether the first iteration plays backwards.
    #[inline]
    pub fn starts_reversed(self) -> bool {
        matches!(
            self,
            PlaybackDirection::Reverse | PlaybackDirection::AlternateReverse
        )
    }

    /// Whether consecutive iterations flip direction.
    #[inline]
    pub fn alternates(self) -> bool {
        matches!(
            self,
            PlaybackDirection::Alternate | PlaybackDirection::AlternateReverse
        )
    }
}

/// Fill modes are resolved by the animation player; the compositor accepts
/// all of them.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FillMode {
    None,
    Forwards,
    Backwards,
    Both,
    #[default]
    Auto,
}

/// The timing of one animation effect, in seconds.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Timing {
    pub start_delay: f64,
    pub end_delay: f64,
    pub fill_mode: FillMode,
    pub iteration_start: f64,
    /// May be `f64::INFINITY`.
    pub iteration_count: f64,
    /// `NaN` stands for `auto`.
    pub iteration_duration: f64,
    pub playback_rate: f64,
    pub direction: PlaybackDirection,
    pub timing_function: TimingFunction,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            start_delay: 0.,
            end_delay: 0.,
            fill_mode: FillMode::Auto,
            iteration_start: 0.,
            iteration_count: 1.,
            iteration_duration: f64::NAN,
            playback_rate: 1.,
            direction: PlaybackDirection::Normal,
            timing_function: TimingFunction::Linear,
        }
    }
}

impl Timing {
    /// Duration of all iterations together, before playback rate scaling.
    pub fn active_duration(&self) -> f64 {
        let duration = if self.iteration_duration.is_nan() {
            0.
        } else {
            self.iteration_duration
        };
        if duration == 0. || self.iteration_count == 0. {
            return 0.;
        }
        duration * self.iteration_count
    }
}

/// A [`Timing`] expressed the way the compositor schedules animations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorTiming {
    pub reverse: bool,
    pub alternate: bool,
    pub scaled_duration: f64,
    /// Positive values seek into the animation.
    pub scaled_time_offset: f64,
    /// `-1` for an infinite number of iterations.
    pub adjusted_iteration_count: f64,
}

/// Why a [`Timing`] has no compositor representation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimingConversionError {
    NonZeroIterationStart,
    NonPositiveIterationCount,
    FractionalIterationCount,
    UnresolvedDuration,
    UnsupportedPlaybackRate,
    DelayExceedsActiveDuration,
}

impl fmt::Display for TimingConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match *self {
            TimingConversionError::NonZeroIterationStart => "iteration start is not zero",
            TimingConversionError::NonPositiveIterationCount => "iteration count is not positive",
            TimingConversionError::FractionalIterationCount => "iteration count is fractional",
            TimingConversionError::UnresolvedDuration => "iteration duration is not a positive finite time",
            TimingConversionError::UnsupportedPlaybackRate => "playback rate is not 1",
            TimingConversionError::DelayExceedsActiveDuration => {
                "start delay exceeds the active duration"
            },
        };
        f.write_str(message)
    }
}

impl Error for TimingConversionError {}

/// Projects `timing` onto the compositor timeline, `time_offset` seconds
/// after the animation was started.
pub fn convert_timing_for_compositor(
    timing: &Timing,
    time_offset: f64,
) -> Result<CompositorTiming, TimingConversionError> {
    if timing.iteration_start != 0. {
        return Err(TimingConversionError::NonZeroIterationStart);
    }
    if !(timing.iteration_count > 0.) {
        return Err(TimingConversionError::NonPositiveIterationCount);
    }
    if timing.iteration_count.floor() != timing.iteration_count {
        return Err(TimingConversionError::FractionalIterationCount);
    }
    if !(timing.iteration_duration.is_finite() && timing.iteration_duration > 0.) {
        return Err(TimingConversionError::UnresolvedDuration);
    }
    if timing.playback_rate != 1. {
        return Err(TimingConversionError::UnsupportedPlaybackRate);
    }

    let scaled_duration = timing.iteration_duration;
    debug_assert!(scaled_duration > 0.);
    let scaled_start_delay = timing.start_delay;
    if scaled_start_delay > 0. && scaled_start_delay > scaled_duration * timing.iteration_count {
        return Err(TimingConversionError::DelayExceedsActiveDuration);
    }

    let adjusted_iteration_count = if timing.iteration_count.is_finite() {
        timing.iteration_count.floor()
    } else {
        -1.
    };

    Ok(CompositorTiming {
        reverse: timing.direction.starts_reversed(),
        alternate: timing.direction.alternates(),
        scaled_duration,
        scaled_time_offset: -scaled_start_delay + time_offset,
        adjusted_iteration_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> Timing {
        Timing {
            iteration_duration: 1.,
            ..Timing::default()
        }
    }

    #[test]
    fn directions_map_to_flags() {
        let cases = [
            (PlaybackDirection::Normal, false, false),
            (PlaybackDirection::Reverse, true, false),
            (PlaybackDirection::Alternate, false, true),
            (PlaybackDirection::AlternateReverse, true, true),
        ];
        for (direction, reverse, alternate) in cases {
            let timing = Timing {
                direction,
                ..timing()
            };
            let converted = convert_timing_for_compositor(&timing, 0.).unwrap();
            assert_eq!(converted.reverse, reverse, "{direction:?}");
            assert_eq!(converted.alternate, alternate, "{direction:?}");
        }
    }

    #[test]
    fn infinite_iterations_become_minus_one() {
        let timing = Timing {
            iteration_count: f64::INFINITY,
            ..timing()
        };
        let converted = convert_timing_for_compositor(&timing, 0.).unwrap();
        assert_eq!(converted.adjusted_iteration_count, -1.);
    }

    #[test]
    fn delay_shifts_the_time_offset() {
        let timing = Timing {
            start_delay: 2.,
            iteration_count: 5.,
            ..timing()
        };
        let converted = convert_timing_for_compositor(&timing, 0.5).unwrap();
        assert_eq!(converted.scaled_time_offset, -1.5);
    }

    #[test]
    fn negative_delay_seeks_forward() {
        let timing = Timing {
            start_delay: -0.25,
            ..timing()
        };
        let converted = convert_timing_for_compositor(&timing, 0.).unwrap();
        assert_eq!(converted.scaled_time_offset, 0.25);
    }

    #[test]
    fn unsupported_timings_are_rejected() {
        let cases = [
            (
                Timing {
                    iteration_start: 0.5,
                    ..timing()
                },
                TimingConversionError::NonZeroIterationStart,
            ),
            (
                Timing {
                    iteration_count: 0.,
                    ..timing()
                },
                TimingConversionError::NonPositiveIterationCount,
            ),
            (
                Timing {
                    iteration_count: 1.5,
                    ..timing()
                },
                TimingConversionError::FractionalIterationCount,
            ),
            (Timing::default(), TimingConversionError::UnresolvedDuration),
            (
                Timing {
                    iteration_duration: f64::INFINITY,
                    ..timing()
                },
                TimingConversionError::UnresolvedDuration,
            ),
            (
                Timing {
                    iteration_duration: -1.,
                    ..timing()
                },
                TimingConversionError::UnresolvedDuration,
            ),
            (
                Timing {
                    playback_rate: 2.,
                    ..timing()
                },
                TimingConversionError::UnsupportedPlaybackRate,
            ),
            (
                Timing {
                    start_delay: 3.,
                    iteration_count: 2.,
                    ..timing()
                },
                TimingConversionError::DelayExceedsActiveDuration,
            ),
        ];
        for (timing, error) in cases {
            assert_eq!(convert_timing_for_compositor(&timing, 0.), Err(error));
        }
    }

    #[test]
    fn active_duration_treats_auto_as_zero() {
        assert_eq!(Timing::default().active_duration(), 0.);
        let timing = Timing {
            iteration_count: 3.,
            ..timing()
        };
        assert_eq!(timing.active_duration(), 3.);
    }
}
