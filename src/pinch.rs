//! Thumb-to-index pinch distance in frame pixels.
//!
//! The threshold is expressed in pixels of the capture frame and therefore
//! depends on the capture resolution. It is tuned for a 640x480 frame.

use crate::{
    constants::{INDEX_TIP, REFERENCE_FRAME_WIDTH, THUMB_TIP},
    landmarks::{HandObservation, Landmark},
    utils::safe_cast::normalized_to_pixel,
    Result,
};

/// Integer pixel position in the capture frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    /// Scale a normalized landmark to the frame, truncating toward zero
    #[must_use]
    pub fn from_landmark(landmark: Landmark, frame_width: u32, frame_height: u32) -> Self {
        Self {
            x: normalized_to_pixel(landmark.x, frame_width),
            y: normalized_to_pixel(landmark.y, frame_height),
        }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (f64::from(other.x) - f64::from(self.x)).hypot(f64::from(other.y) - f64::from(self.y))
    }
}

/// Pinch measurement for one hand in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinch {
    /// Thumb tip in pixels
    pub thumb: PixelPoint,
    /// Index tip in pixels
    pub index: PixelPoint,
    /// Pixel distance between the two tips
    pub distance: f64,
    /// Whether the distance is below the threshold
    pub active: bool,
}

/// Pinch detector bound to a frame size and a pixel threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchMetric {
    frame_width: u32,
    frame_height: u32,
    threshold_px: f64,
}

impl PinchMetric {
    /// Create a pinch metric
    ///
    /// # Panics
    ///
    /// Panics if the threshold is not positive
    #[must_use]
    pub fn new(frame_width: u32, frame_height: u32, threshold_px: f64) -> Self {
        assert!(threshold_px > 0.0, "Pinch threshold must be positive");
        Self {
            frame_width,
            frame_height,
            threshold_px,
        }
    }

    /// Threshold in pixels
    #[must_use]
    pub const fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Frame size in pixels
    #[must_use]
    pub const fn frame_size(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    /// Measure the pinch between two tip landmarks
    #[must_use]
    pub fn measure_points(&self, thumb_tip: Landmark, index_tip: Landmark) -> Pinch {
        let thumb = PixelPoint::from_landmark(thumb_tip, self.frame_width, self.frame_height);
        let index = PixelPoint::from_landmark(index_tip, self.frame_width, self.frame_height);
        let distance = thumb.distance_to(&index);
        Pinch {
            thumb,
            index,
            distance,
            active: distance < self.threshold_px,
        }
    }

    /// Measure the pinch of a hand observation
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLandmarks` when the hand is malformed
    pub fn measure(&self, hand: &HandObservation) -> Result<Pinch> {
        Ok(self.measure_points(hand.landmark(THUMB_TIP)?, hand.landmark(INDEX_TIP)?))
    }
}

/// Scale a threshold tuned at `reference_width` to a frame `frame_width` pixels wide
#[must_use]
pub fn scale_threshold_to_width(threshold_px: f64, frame_width: u32, reference_width: u32) -> f64 {
    if reference_width == 0 {
        return threshold_px;
    }
    threshold_px * f64::from(frame_width) / f64::from(reference_width)
}

/// Scale a threshold tuned at the 640-pixel reference width
#[must_use]
pub fn scale_reference_threshold(threshold_px: f64, frame_width: u32) -> f64 {
    scale_threshold_to_width(threshold_px, frame_width, REFERENCE_FRAME_WIDTH)
}
