//! Configuration management for the gesture control application

use crate::{
    actuator::MapperTuning,
    constants::{
        DEFAULT_ACTION_DELAY_SECS, DEFAULT_ACTUATOR_GAIN, DEFAULT_BRIGHTNESS_MAX, DEFAULT_PINCH_THRESHOLD_PX,
        DEFAULT_SCREENSHOT_BANNER_SECS, DEFAULT_SMOOTHING_ALPHA, DEFAULT_TOGGLE_DELAY_SECS, DEFAULT_VOLUME_MAX,
        REFERENCE_FRAME_HEIGHT, REFERENCE_FRAME_WIDTH, TONE_OFF_DURATION_MS, TONE_OFF_FREQUENCY_HZ,
        TONE_ON_DURATION_MS, TONE_ON_FREQUENCY_HZ,
    },
    controller::ControlSettings,
    mode_toggle::Tone,
    pinch::{scale_threshold_to_width, PinchMetric},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture timing configuration
    pub gestures: GestureConfig,

    /// Pinch detection configuration
    pub pinch: PinchConfig,

    /// Continuous actuator configuration
    pub actuators: ActuatorConfig,

    /// Overlay configuration
    pub display: DisplayConfig,

    /// Mode toggle cues
    pub tones: ToneConfig,

    /// Host output configuration
    pub output: OutputConfig,
}

/// Cooldowns for the mode toggle and discrete actions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum seconds between two mode toggles
    pub toggle_delay_secs: f64,

    /// Minimum seconds between two fires of the same action
    pub action_delay_secs: f64,
}

/// Pinch threshold and the capture resolution it applies to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Threshold in pixels at `reference_width`
    pub threshold_px: f64,

    /// Capture frame width in pixels
    pub frame_width: u32,

    /// Capture frame height in pixels
    pub frame_height: u32,

    /// Scale the threshold by `frame_width / reference_width`
    pub scale_with_frame_width: bool,

    /// Width the threshold was tuned at
    pub reference_width: u32,
}

/// Smoothing and output ranges of the continuous actuators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Exponential smoothing weight
    pub smoothing_alpha: f64,

    /// Gain applied to the distance/threshold ratio
    pub gain: f64,

    /// Brightness cap in percent
    pub brightness_max: f64,

    /// Volume cap in percent
    pub volume_max: f64,
}

/// Overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Seconds the screenshot confirmation stays visible
    pub screenshot_banner_secs: f64,
}

/// Tones for the mode toggle cues
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub on_frequency_hz: u32,
    pub on_duration_ms: u32,
    pub off_frequency_hz: u32,
    pub off_duration_ms: u32,
}

/// Where effects go
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Log effects instead of performing them
    pub dry_run: bool,

    /// Use X11 for key presses and screenshots
    pub use_x11: bool,

    /// Directory screenshots are written to
    pub screenshot_dir: PathBuf,

    /// Command template for the master volume, `{value}` is the 0-100 percentage
    pub volume_command: Option<String>,

    /// Command template for the brightness, `{value}` is the 0-100 percentage
    pub brightness_command: Option<String>,

    /// Command template for the tone cue, `{freq}` in Hz and `{ms}` in milliseconds
    pub tone_command: Option<String>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            toggle_delay_secs: DEFAULT_TOGGLE_DELAY_SECS,
            action_delay_secs: DEFAULT_ACTION_DELAY_SECS,
        }
    }
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_PINCH_THRESHOLD_PX,
            frame_width: REFERENCE_FRAME_WIDTH,
            frame_height: REFERENCE_FRAME_HEIGHT,
            scale_with_frame_width: false,
            reference_width: REFERENCE_FRAME_WIDTH,
        }
    }
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            gain: DEFAULT_ACTUATOR_GAIN,
            brightness_max: DEFAULT_BRIGHTNESS_MAX,
            volume_max: DEFAULT_VOLUME_MAX,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            screenshot_banner_secs: DEFAULT_SCREENSHOT_BANNER_SECS,
        }
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            on_frequency_hz: TONE_ON_FREQUENCY_HZ,
            on_duration_ms: TONE_ON_DURATION_MS,
            off_frequency_hz: TONE_OFF_FREQUENCY_HZ,
            off_duration_ms: TONE_OFF_DURATION_MS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            use_x11: true,
            screenshot_dir: PathBuf::from("."),
            volume_command: Some("pactl set-sink-volume @DEFAULT_SINK@ {value}%".to_string()),
            brightness_command: Some("brightnessctl set {value}%".to_string()),
            tone_command: None,
        }
    }
}

impl PinchConfig {
    /// Threshold for the configured frame width
    #[must_use]
    pub fn effective_threshold(&self) -> f64 {
        if self.scale_with_frame_width {
            scale_threshold_to_width(self.threshold_px, self.frame_width, self.reference_width)
        } else {
            self.threshold_px
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Build the control loop tuning
    ///
    /// Call [`Config::validate`] first; invalid values panic here.
    #[must_use]
    pub fn control_settings(&self) -> ControlSettings {
        ControlSettings {
            toggle_delay: self.gestures.toggle_delay_secs,
            action_delay: self.gestures.action_delay_secs,
            pinch: PinchMetric::new(
                self.pinch.frame_width,
                self.pinch.frame_height,
                self.pinch.effective_threshold(),
            ),
            tuning: MapperTuning {
                alpha: self.actuators.smoothing_alpha,
                gain: self.actuators.gain,
            },
            brightness_max: self.actuators.brightness_max,
            volume_max: self.actuators.volume_max,
            screenshot_banner_secs: self.display.screenshot_banner_secs,
            tone_on: Tone {
                frequency_hz: self.tones.on_frequency_hz,
                duration_ms: self.tones.on_duration_ms,
            },
            tone_off: Tone {
                frequency_hz: self.tones.off_frequency_hz,
                duration_ms: self.tones.off_duration_ms,
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate timing
        if self.gestures.toggle_delay_secs < 0.0 || !self.gestures.toggle_delay_secs.is_finite() {
            return Err(Error::ConfigError(
                "Toggle delay must be a non-negative number of seconds".to_string(),
            ));
        }
        if self.gestures.action_delay_secs < 0.0 || !self.gestures.action_delay_secs.is_finite() {
            return Err(Error::ConfigError(
                "Action delay must be a non-negative number of seconds".to_string(),
            ));
        }

        // Validate pinch settings
        if self.pinch.frame_width == 0 || self.pinch.frame_height == 0 {
            return Err(Error::ConfigError("Frame size must be greater than 0".to_string()));
        }
        if self.pinch.scale_with_frame_width && self.pinch.reference_width == 0 {
            return Err(Error::ConfigError(
                "Reference width must be greater than 0 when scaling the threshold".to_string(),
            ));
        }
        if !(self.pinch.effective_threshold() > 0.0 && self.pinch.effective_threshold().is_finite()) {
            return Err(Error::ConfigError("Pinch threshold must be positive".to_string()));
        }

        // Validate actuator settings
        if !(self.actuators.smoothing_alpha > 0.0 && self.actuators.smoothing_alpha <= 1.0) {
            return Err(Error::ConfigError(
                "Smoothing alpha must be in (0, 1]".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.actuators.brightness_max) {
            return Err(Error::ConfigError(
                "Brightness cap must be between 0 and 100".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.actuators.volume_max) {
            return Err(Error::ConfigError(
                "Volume cap must be between 0 and 100".to_string(),
            ));
        }
        if !(self.actuators.gain >= 0.0 && self.actuators.gain.is_finite()) {
            return Err(Error::ConfigError(
                "Actuator gain must be a finite non-negative number".to_string(),
            ));
        }

        if !(self.display.screenshot_banner_secs >= 0.0 && self.display.screenshot_banner_secs.is_finite()) {
            return Err(Error::ConfigError(
                "Screenshot banner duration must be a finite non-negative number of seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Control Configuration

# Cooldowns (seconds)
gestures:
  toggle_delay_secs: 2.0
  action_delay_secs: 1.2

# Pinch threshold in pixels of the capture frame
pinch:
  threshold_px: 250.0
  frame_width: 640
  frame_height: 480
  scale_with_frame_width: false
  reference_width: 640

# Continuous actuators
actuators:
  smoothing_alpha: 0.15
  gain: 130.0
  brightness_max: 100.0
  volume_max: 70.0

# Overlay
display:
  screenshot_banner_secs: 0.8

# Mode toggle cues
tones:
  on_frequency_hz: 1200
  on_duration_ms: 300
  off_frequency_hz: 500
  off_duration_ms: 400

# Effect outputs
output:
  dry_run: false
  use_x11: true
  screenshot_dir: "."
  volume_command: "pactl set-sink-volume @DEFAULT_SINK@ {value}%"
  brightness_command: "brightnessctl set {value}%"
  tone_command: null
"#;
