//! Per-frame gesture control reducer.
//!
//! [`process_frame`] is the whole control loop for one frame: it takes the
//! previous [`ControlState`] and the frame's hand observations and returns the
//! next state together with the effects the host should carry out and an
//! overlay snapshot for rendering. Nothing here talks to the operating system.
//!
//! Hands are processed in detector order. For every hand the fist check runs
//! first, so a hand that switches control mode on can act in the same frame,
//! and a second hand sees the mode the first one left behind.

use crate::{
    actuator::{ActuatorChannel, ActuatorCommand, ActuatorMapper, MapperTuning},
    constants::{
        DEFAULT_ACTION_DELAY_SECS, DEFAULT_PINCH_THRESHOLD_PX, DEFAULT_SCREENSHOT_BANNER_SECS,
        DEFAULT_TOGGLE_DELAY_SECS, PLAY_PAUSE_KEY, REFERENCE_FRAME_HEIGHT, REFERENCE_FRAME_WIDTH,
    },
    gesture::{arbitrate, DiscreteAction},
    landmarks::{classify, Frame, Handedness},
    mode_toggle::{ModeToggle, Tone, ToggleEvent},
    pinch::{PinchMetric, PixelPoint},
    rate_limiter::{screenshot_filename, ActionRateLimiter},
    transient::TransientMarker,
    Result,
};
use log::{debug, info};

/// Text shown while the screenshot confirmation is active
pub const SCREENSHOT_BANNER_TEXT: &str = "Screenshot Taken";

/// Fixed tuning of the control loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    /// Minimum seconds between two mode toggles
    pub toggle_delay: f64,
    /// Minimum seconds between two fires of the same action
    pub action_delay: f64,
    /// Pinch detector for the capture resolution
    pub pinch: PinchMetric,
    /// Smoothing and gain of the actuator mappers
    pub tuning: MapperTuning,
    /// Output cap of the brightness actuator in percent
    pub brightness_max: f64,
    /// Output cap of the volume actuator in percent
    pub volume_max: f64,
    /// How long the screenshot confirmation stays visible
    pub screenshot_banner_secs: f64,
    /// Cue played when control mode switches on
    pub tone_on: Tone,
    /// Cue played when control mode switches off
    pub tone_off: Tone,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            toggle_delay: DEFAULT_TOGGLE_DELAY_SECS,
            action_delay: DEFAULT_ACTION_DELAY_SECS,
            pinch: PinchMetric::new(REFERENCE_FRAME_WIDTH, REFERENCE_FRAME_HEIGHT, DEFAULT_PINCH_THRESHOLD_PX),
            tuning: MapperTuning::default(),
            brightness_max: crate::constants::DEFAULT_BRIGHTNESS_MAX,
            volume_max: crate::constants::DEFAULT_VOLUME_MAX,
            screenshot_banner_secs: DEFAULT_SCREENSHOT_BANNER_SECS,
            tone_on: ToggleEvent::EnteredOn.default_tone(),
            tone_off: ToggleEvent::EnteredOff.default_tone(),
        }
    }
}

impl ControlSettings {
    /// Cue for a mode transition
    #[must_use]
    pub const fn tone_for(&self, event: ToggleEvent) -> Tone {
        match event {
            ToggleEvent::EnteredOn => self.tone_on,
            ToggleEvent::EnteredOff => self.tone_off,
        }
    }
}

/// Everything the control loop remembers between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    /// Control-mode flag and toggle cooldown
    pub mode: ModeToggle,
    /// Per-action cooldowns
    pub limiter: ActionRateLimiter,
    /// Left-hand pinch to display brightness
    pub brightness: ActuatorMapper,
    /// Right-hand pinch to master volume
    pub volume: ActuatorMapper,
    /// Last screenshot, for the confirmation banner
    pub screenshot_marker: TransientMarker,
}

impl ControlState {
    /// Initial state: control mode off, nothing fired, actuators at zero
    #[must_use]
    pub fn new(settings: &ControlSettings) -> Self {
        Self {
            mode: ModeToggle::new(),
            limiter: ActionRateLimiter::new(),
            brightness: ActuatorMapper::new(ActuatorChannel::Brightness, settings.brightness_max, settings.tuning),
            volume: ActuatorMapper::new(ActuatorChannel::Volume, settings.volume_max, settings.tuning),
            screenshot_marker: TransientMarker::new(),
        }
    }

    fn mapper_mut(&mut self, handedness: Handedness) -> &mut ActuatorMapper {
        match handedness {
            Handedness::Left => &mut self.brightness,
            Handedness::Right => &mut self.volume,
        }
    }
}

/// Side effect requested from a host collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Audible cue for a mode transition
    Tone(Tone),
    /// Single logical key press
    KeyPress {
        /// Key identifier
        key: &'static str,
    },
    /// Capture the screen to a file
    Screenshot {
        /// File name keyed by the firing second
        filename: String,
    },
    /// Set a continuous actuator
    Actuate(ActuatorCommand),
}

/// Per-hand drawing hints
#[derive(Debug, Clone, PartialEq)]
pub struct HandOverlay {
    /// Hand label
    pub handedness: Handedness,
    /// All landmarks in frame pixels
    pub points: Vec<PixelPoint>,
    /// Thumb and index tips when a pinch is active in control mode
    pub pinch_line: Option<(PixelPoint, PixelPoint)>,
    /// Actuator readout when this hand moved an actuator
    pub readout: Option<String>,
}

/// Snapshot for the render collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Control mode after this frame
    pub control_mode_on: bool,
    /// Screenshot confirmation visible this frame
    pub screenshot_banner: bool,
    /// Hands in detector order
    pub hands: Vec<HandOverlay>,
}

impl Overlay {
    /// Mode status line
    #[must_use]
    pub const fn mode_label(&self) -> &'static str {
        if self.control_mode_on {
            "CONTROL MODE ON"
        } else {
            "CONTROL MODE OFF"
        }
    }

    /// Mode status colour as RGB, green when on and red when off
    #[must_use]
    pub const fn mode_color(&self) -> [u8; 3] {
        if self.control_mode_on {
            [0, 255, 0]
        } else {
            [255, 0, 0]
        }
    }
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Effects in the order they were decided
    pub effects: Vec<Effect>,
    /// Rendering snapshot
    pub overlay: Overlay,
}

/// Run the control loop for one frame
///
/// The input state is not modified; the caller replaces it with the returned
/// state.
///
/// # Errors
///
/// Returns `Error::InvalidLandmarks` if any hand in the frame is malformed.
/// The whole frame is rejected before any state changes.
pub fn process_frame(
    state: &ControlState,
    settings: &ControlSettings,
    frame: &Frame,
    now: f64,
) -> Result<(ControlState, FrameOutput)> {
    for hand in &frame.hands {
        hand.validate()?;
    }

    let mut next = *state;
    let mut effects = Vec::new();
    let mut hands = Vec::with_capacity(frame.hands.len());
    let mut toggled = false;
    let (width, height) = settings.pinch.frame_size();

    for hand in &frame.hands {
        let fingers = classify(hand)?;
        let mut overlay = HandOverlay {
            handedness: hand.handedness,
            points: hand
                .landmarks
                .iter()
                .map(|lm| PixelPoint::from_landmark(*lm, width, height))
                .collect(),
            pinch_line: None,
            readout: None,
        };

        if !toggled {
            if let Some(event) = next.mode.observe(fingers.is_fist(), now, settings.toggle_delay) {
                toggled = true;
                info!("Control mode {:?} at {:.3}", event, now);
                effects.push(Effect::Tone(settings.tone_for(event)));
            }
        }

        if !next.mode.is_on() {
            hands.push(overlay);
            continue;
        }

        if let Some(action) = arbitrate(hand.handedness, &fingers) {
            if next.limiter.try_fire(action, now, settings.action_delay) {
                info!("Firing {} at {:.3}", action.as_str(), now);
                effects.push(match action {
                    DiscreteAction::PlayPause => Effect::KeyPress { key: PLAY_PAUSE_KEY },
                    DiscreteAction::Screenshot => {
                        next.screenshot_marker.mark(now);
                        Effect::Screenshot {
                            filename: screenshot_filename(now),
                        }
                    }
                });
            } else {
                debug!("{} suppressed by cooldown", action.as_str());
            }
        }

        let pinch = settings.pinch.measure(hand)?;
        if pinch.active {
            let mapper = next.mapper_mut(hand.handedness);
            let command = mapper.update(pinch.distance, settings.pinch.threshold_px());
            debug!(
                "{:?} pinch {:.1}px -> {:?}",
                hand.handedness, pinch.distance, command
            );
            overlay.readout = Some(mapper.readout());
            overlay.pinch_line = Some((pinch.thumb, pinch.index));
            effects.push(Effect::Actuate(command));
        }

        hands.push(overlay);
    }

    let overlay = Overlay {
        control_mode_on: next.mode.is_on(),
        screenshot_banner: next
            .screenshot_marker
            .is_active(now, settings.screenshot_banner_secs),
        hands,
    };

    Ok((next, FrameOutput { effects, overlay }))
}

/// Owns the settings and the evolving state of the control loop
#[derive(Debug, Clone)]
pub struct GestureController {
    settings: ControlSettings,
    state: ControlState,
}

impl GestureController {
    /// Controller in its initial state
    #[must_use]
    pub fn new(settings: ControlSettings) -> Self {
        let state = ControlState::new(&settings);
        Self { settings, state }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &ControlState {
        &self.state
    }

    /// Fixed tuning
    #[must_use]
    pub const fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    /// Process one frame, keeping the previous state if the frame is rejected
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLandmarks` for malformed frames
    pub fn step(&mut self, frame: &Frame, now: f64) -> Result<FrameOutput> {
        let (next, output) = process_frame(&self.state, &self.settings, frame, now)?;
        self.state = next;
        Ok(output)
    }
}
