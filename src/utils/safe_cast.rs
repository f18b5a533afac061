//! Safe casting utilities for pixel coordinates and actuator percentages

use crate::{Error, Result};

/// Safely convert f64 to i32 with bounds checking
///
/// Truncates toward zero, matching an integer cast of a non-negative pixel value.
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Truncate a percentage to an integer in `0..=100`
///
/// Non-finite input maps to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Clamping ensures safe truncation
pub fn f64_to_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, 100.0) as u8
}

/// Convert a normalized coordinate to a pixel coordinate along an axis of `extent` pixels
///
/// Values that cannot be represented fall back to 0.
#[must_use]
pub fn normalized_to_pixel(normalized: f32, extent: u32) -> i32 {
    f64_to_i32(f64::from(normalized) * f64::from(extent)).unwrap_or(0)
}
