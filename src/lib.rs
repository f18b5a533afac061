//! Hand gesture control library for real-time media and display control.
//!
//! This library interprets per-frame hand landmarks (21 points per hand, as
//! produced by an external hand-landmark detector) and turns them into
//! control signals:
//! - a fist toggles control mode on and off, with a cooldown
//! - a right-hand open palm with the thumb tucked presses play/pause
//! - a right-hand victory sign takes a screenshot
//! - a left-hand pinch sets display brightness
//! - a right-hand pinch sets master volume
//!
//! The processing pipeline for each frame consists of:
//! 1. Finger openness classification per hand
//! 2. Pinch distance measurement in frame pixels
//! 3. Mode toggle on a fist
//! 4. Gesture arbitration and per-action rate limiting
//! 5. Smoothed pinch-to-actuator mapping
//!
//! # Examples
//!
//! ## Processing Frames
//!
//! ```
//! use hand_gesture_control::{
//!     controller::{ControlSettings, GestureController},
//!     landmarks::Frame,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = GestureController::new(ControlSettings::default());
//!
//! // A frame without hands changes nothing
//! let output = controller.step(&Frame::default(), 0.0)?;
//! assert!(output.effects.is_empty());
//! assert_eq!(output.overlay.mode_label(), "CONTROL MODE OFF");
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading Landmarks
//!
//! ```
//! use hand_gesture_control::frame_source::{FrameSource, JsonLinesSource};
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = JsonLinesSource::new(Cursor::new("{\"timestamp\": 1.0, \"hands\": []}\n"));
//! let frame = source.next_frame()?.expect("one frame");
//! assert_eq!(frame.timestamp, Some(1.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Smoothing
//!
//! ```
//! use hand_gesture_control::filters::{exponential::ExponentialFilter, SignalFilter};
//!
//! let mut filter = ExponentialFilter::new(0.15, 0.0);
//! let smoothed = filter.apply(100.0);
//! assert!((smoothed - 15.0).abs() < 1e-9);
//! ```

/// Landmark input types and finger openness classification
pub mod landmarks;

/// Thumb-to-index pinch measurement
pub mod pinch;

/// Control-mode toggle state machine
pub mod mode_toggle;

/// Discrete gesture arbitration
pub mod gesture;

/// Per-action rate limiting
pub mod rate_limiter;

/// Signal filtering for actuator smoothing
pub mod filters;

/// Pinch-to-actuator mapping
pub mod actuator;

/// Time-window predicate for transient notices
pub mod transient;

/// Per-frame control reducer
pub mod controller;

/// Landmark frame sources
pub mod frame_source;

/// Effect sinks for host collaborators
pub mod sinks;

/// X11 key press and screenshot output
pub mod x11_control;

/// Utility functions for numeric conversions and time
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
