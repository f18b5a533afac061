//! Pinch-distance to actuator mapping.
//!
//! Each actuator listens to one hand, turns the pinch distance into a clamped
//! target and smooths it with its own exponential filter. When the hand is
//! not pinching the smoothed value is held, not decayed.

use crate::{
    constants::{DEFAULT_ACTUATOR_GAIN, DEFAULT_BRIGHTNESS_MAX, DEFAULT_SMOOTHING_ALPHA, DEFAULT_VOLUME_MAX},
    filters::{exponential::ExponentialFilter, SignalFilter},
    landmarks::Handedness,
    utils::safe_cast::f64_to_percent,
};

/// Continuous output driven by a pinch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorChannel {
    /// Display brightness, driven by the left hand
    Brightness,
    /// Master volume, driven by the right hand
    Volume,
}

impl ActuatorChannel {
    /// Hand that drives this channel
    #[must_use]
    pub const fn handedness(self) -> Handedness {
        match self {
            Self::Brightness => Handedness::Left,
            Self::Volume => Handedness::Right,
        }
    }

    /// Overlay label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Brightness => "BRIGHTNESS",
            Self::Volume => "VOLUME",
        }
    }
}

/// Value handed to an actuator collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCommand {
    /// Integer brightness percentage, 0 to 100
    Brightness(u8),
    /// Master volume scalar, 0.0 to 1.0
    Volume(f64),
}

impl ActuatorCommand {
    /// Channel this command targets
    #[must_use]
    pub const fn channel(&self) -> ActuatorChannel {
        match self {
            Self::Brightness(_) => ActuatorChannel::Brightness,
            Self::Volume(_) => ActuatorChannel::Volume,
        }
    }
}

/// Tuning shared by every actuator mapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapperTuning {
    /// Exponential smoothing weight
    pub alpha: f64,
    /// Multiplier applied to the distance/threshold ratio
    pub gain: f64,
}

impl Default for MapperTuning {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_ALPHA,
            gain: DEFAULT_ACTUATOR_GAIN,
        }
    }
}

/// Smoothed pinch-to-actuator mapping for one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorMapper {
    channel: ActuatorChannel,
    max_output: f64,
    gain: f64,
    filter: ExponentialFilter,
}

impl ActuatorMapper {
    /// Create a mapper whose output lies in `0..=max_output` percent
    ///
    /// # Panics
    ///
    /// Panics if alpha is not in the range (0, 1]
    #[must_use]
    pub fn new(channel: ActuatorChannel, max_output: f64, tuning: MapperTuning) -> Self {
        Self {
            channel,
            max_output,
            gain: tuning.gain,
            filter: ExponentialFilter::new(tuning.alpha, 0.0),
        }
    }

    /// Brightness mapper capped at 100 percent
    #[must_use]
    pub fn brightness(tuning: MapperTuning) -> Self {
        Self::new(ActuatorChannel::Brightness, DEFAULT_BRIGHTNESS_MAX, tuning)
    }

    /// Volume mapper capped at 70 percent
    #[must_use]
    pub fn volume(tuning: MapperTuning) -> Self {
        Self::new(ActuatorChannel::Volume, DEFAULT_VOLUME_MAX, tuning)
    }

    /// Channel driven by this mapper
    #[must_use]
    pub const fn channel(&self) -> ActuatorChannel {
        self.channel
    }

    /// Upper bound of the output range in percent
    #[must_use]
    pub const fn max_output(&self) -> f64 {
        self.max_output
    }

    /// Current smoothed value in percent
    #[must_use]
    pub fn smoothed(&self) -> f64 {
        self.filter.value()
    }

    /// Clamped target for a pinch distance
    ///
    /// The gain lets the user reach the cap before the fingers are fully
    /// apart, so distances at or above the threshold always hit the cap.
    #[must_use]
    pub fn target(&self, distance: f64, threshold: f64) -> f64 {
        (distance / threshold * self.gain).clamp(0.0, self.max_output)
    }

    /// Blend one pinch sample into the smoothed value and build the command
    pub fn update(&mut self, distance: f64, threshold: f64) -> ActuatorCommand {
        let target = self.target(distance, threshold);
        let smoothed = self.filter.apply(target);
        match self.channel {
            ActuatorChannel::Brightness => ActuatorCommand::Brightness(f64_to_percent(smoothed)),
            ActuatorChannel::Volume => ActuatorCommand::Volume(smoothed / 100.0),
        }
    }

    /// Overlay readout such as `VOLUME: 42%`
    #[must_use]
    pub fn readout(&self) -> String {
        format!("{}: {}%", self.channel.label(), f64_to_percent(self.smoothed()))
    }
}
