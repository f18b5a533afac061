//! Control-mode toggle driven by the fist gesture.
//!
//! The mode flips on a fist when the toggle cooldown has elapsed. The state
//! machine never plays the audio cue itself; it reports which state it
//! entered and the caller turns that into a tone request.

use crate::constants::{
    TONE_OFF_DURATION_MS, TONE_OFF_FREQUENCY_HZ, TONE_ON_DURATION_MS, TONE_ON_FREQUENCY_HZ,
};

/// Transition reported by the toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    /// Control mode switched on
    EnteredOn,
    /// Control mode switched off
    EnteredOff,
}

/// Audible cue for a mode transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl ToggleEvent {
    /// Default cue: high short beep when entering, low longer beep when leaving
    #[must_use]
    pub const fn default_tone(self) -> Tone {
        match self {
            Self::EnteredOn => Tone {
                frequency_hz: TONE_ON_FREQUENCY_HZ,
                duration_ms: TONE_ON_DURATION_MS,
            },
            Self::EnteredOff => Tone {
                frequency_hz: TONE_OFF_FREQUENCY_HZ,
                duration_ms: TONE_OFF_DURATION_MS,
            },
        }
    }
}

/// Control-mode flag plus the time of its last flip
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeToggle {
    on: bool,
    last_toggle: Option<f64>,
}

impl ModeToggle {
    /// Starts in the off state and has never toggled
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on: false,
            last_toggle: None,
        }
    }

    /// Whether control mode is on
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Time of the last flip, if any
    #[must_use]
    pub const fn last_toggle(&self) -> Option<f64> {
        self.last_toggle
    }

    /// Whether a fist at `now` would flip the mode
    #[must_use]
    pub fn cooldown_elapsed(&self, now: f64, toggle_delay: f64) -> bool {
        self.last_toggle.map_or(true, |last| now - last > toggle_delay)
    }

    /// Feed one fist observation
    ///
    /// Returns the transition when the mode flipped.
    pub fn observe(&mut self, fist: bool, now: f64, toggle_delay: f64) -> Option<ToggleEvent> {
        if !fist || !self.cooldown_elapsed(now, toggle_delay) {
            return None;
        }
        self.on = !self.on;
        self.last_toggle = Some(now);
        Some(if self.on {
            ToggleEvent::EnteredOn
        } else {
            ToggleEvent::EnteredOff
        })
    }
}
