//! Constants used throughout the application

/// Number of landmarks per detected hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Landmark indices used by the classifier and the pinch metric
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Reference capture resolution the pinch threshold was tuned for
pub const REFERENCE_FRAME_WIDTH: u32 = 640;
pub const REFERENCE_FRAME_HEIGHT: u32 = 480;

/// Pinch threshold in pixels at the reference resolution
pub const DEFAULT_PINCH_THRESHOLD_PX: f64 = 250.0;

/// Minimum seconds between two control-mode toggles
pub const DEFAULT_TOGGLE_DELAY_SECS: f64 = 2.0;

/// Minimum seconds between two fires of the same discrete action
pub const DEFAULT_ACTION_DELAY_SECS: f64 = 1.2;

/// Exponential smoothing weight for actuator values
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.15;

/// Pinch-ratio gain applied before clamping the actuator target
pub const DEFAULT_ACTUATOR_GAIN: f64 = 130.0;

/// Output caps in percent
pub const DEFAULT_BRIGHTNESS_MAX: f64 = 100.0;
pub const DEFAULT_VOLUME_MAX: f64 = 70.0;

/// How long the screenshot confirmation stays visible
pub const DEFAULT_SCREENSHOT_BANNER_SECS: f64 = 0.8;

/// Tone cues for mode transitions (Hz, ms)
pub const TONE_ON_FREQUENCY_HZ: u32 = 1200;
pub const TONE_ON_DURATION_MS: u32 = 300;
pub const TONE_OFF_FREQUENCY_HZ: u32 = 500;
pub const TONE_OFF_DURATION_MS: u32 = 400;

/// Key sent for the play/pause gesture
pub const PLAY_PAUSE_KEY: &str = "space";

/// Smoothing factor bounds
pub const SMOOTHING_ALPHA_MIN: f64 = 0.0;
pub const SMOOTHING_ALPHA_MAX: f64 = 1.0;
