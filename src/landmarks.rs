//! Hand landmark input types and per-finger openness classification.
//!
//! Coordinates are normalized to `[0, 1]` with the origin at the top-left of
//! an already horizontally flipped frame, so a smaller `y` is higher on
//! screen.

use crate::{
    constants::{
        INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, NUM_HAND_LANDMARKS, PINKY_PIP, PINKY_TIP, RING_PIP,
        RING_TIP, THUMB_IP, THUMB_TIP,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// A single tracked point on a hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized horizontal coordinate
    pub x: f32,
    /// Normalized vertical coordinate
    pub y: f32,
    /// Relative depth, ignored by the classifier
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    /// Create a landmark with zero depth
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Detector-assigned hand label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand
    #[serde(alias = "left")]
    Left,
    /// Right hand
    #[serde(alias = "right")]
    Right,
}

impl Handedness {
    /// The opposite label
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One detected hand in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    /// Left or right hand
    pub handedness: Handedness,
    /// Detector confidence, carried through but never filtered on
    #[serde(default = "default_score")]
    pub score: f32,
    /// Ordered landmark set, 21 points when well formed
    pub landmarks: Vec<Landmark>,
}

const fn default_score() -> f32 {
    1.0
}

impl HandObservation {
    /// Create an observation with full confidence
    #[must_use]
    pub fn new(handedness: Handedness, landmarks: Vec<Landmark>) -> Self {
        Self {
            handedness,
            score: 1.0,
            landmarks,
        }
    }

    /// Check that the landmark set has the fixed size the classifier indexes into
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLandmarks` when the count is not 21
    pub fn validate(&self) -> Result<()> {
        if self.landmarks.len() == NUM_HAND_LANDMARKS {
            Ok(())
        } else {
            Err(Error::InvalidLandmarks {
                expected: NUM_HAND_LANDMARKS,
                actual: self.landmarks.len(),
            })
        }
    }

    /// Landmark at `index`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLandmarks` when the landmark set is malformed
    pub fn landmark(&self, index: usize) -> Result<Landmark> {
        self.validate()?;
        self.landmarks.get(index).copied().ok_or(Error::InvalidLandmarks {
            expected: NUM_HAND_LANDMARKS,
            actual: self.landmarks.len(),
        })
    }
}

/// All hands observed in one captured frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Capture time in seconds, if the producer supplied one
    #[serde(default)]
    pub timestamp: Option<f64>,
    /// Detected hands in detector order
    #[serde(default)]
    pub hands: Vec<HandObservation>,
}

impl Frame {
    /// Frame without a capture timestamp
    #[must_use]
    pub fn new(hands: Vec<HandObservation>) -> Self {
        Self { timestamp: None, hands }
    }
}

/// Open/closed flag per finger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Flags in thumb-to-pinky order
    #[must_use]
    pub const fn as_array(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Number of open fingers, 0 to 5
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.as_array().iter().filter(|open| **open).count()
    }

    /// A fist is a hand with no open finger
    #[must_use]
    pub fn is_fist(&self) -> bool {
        self.open_count() == 0
    }
}

/// Classify finger openness for one hand
///
/// The thumb extends sideways, so it is compared horizontally and the
/// comparison is mirrored for the left hand. The other fingers are open when
/// the tip sits above the proximal joint.
///
/// # Errors
///
/// Returns `Error::InvalidLandmarks` when the hand does not carry 21 landmarks
pub fn classify(hand: &HandObservation) -> Result<FingerStates> {
    hand.validate()?;
    let lm = &hand.landmarks;

    let thumb = match hand.handedness {
        Handedness::Right => lm[THUMB_TIP].x > lm[THUMB_IP].x,
        Handedness::Left => lm[THUMB_TIP].x < lm[THUMB_IP].x,
    };
    let raised = |tip: usize, pip: usize| lm[tip].y < lm[pip].y;

    Ok(FingerStates {
        thumb,
        index: raised(INDEX_TIP, INDEX_PIP),
        middle: raised(MIDDLE_TIP, MIDDLE_PIP),
        ring: raised(RING_TIP, RING_PIP),
        pinky: raised(PINKY_TIP, PINKY_PIP),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_with(handedness: Handedness, thumb_tip_x: f32, raised: [bool; 4]) -> HandObservation {
        let mut lm = vec![Landmark::new(0.5, 0.5); NUM_HAND_LANDMARKS];
        lm[THUMB_IP] = Landmark::new(0.5, 0.6);
        lm[THUMB_TIP] = Landmark::new(thumb_tip_x, 0.6);
        let fingers = [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ];
        for (i, (tip, pip)) in fingers.into_iter().enumerate() {
            lm[pip] = Landmark::new(0.5, 0.5);
            lm[tip] = Landmark::new(0.5, if raised[i] { 0.3 } else { 0.6 });
        }
        HandObservation::new(handedness, lm)
    }

    #[test]
    fn test_right_thumb_open_when_tip_right_of_joint() {
        let fingers = classify(&hand_with(Handedness::Right, 0.6, [false; 4])).unwrap();
        assert!(fingers.thumb);
        let fingers = classify(&hand_with(Handedness::Right, 0.4, [false; 4])).unwrap();
        assert!(!fingers.thumb);
    }

    #[test]
    fn test_left_thumb_is_mirrored() {
        let fingers = classify(&hand_with(Handedness::Left, 0.4, [false; 4])).unwrap();
        assert!(fingers.thumb);
        let fingers = classify(&hand_with(Handedness::Left, 0.6, [false; 4])).unwrap();
        assert!(!fingers.thumb);
    }

    #[test]
    fn test_equal_x_is_closed_for_both_hands() {
        assert!(!classify(&hand_with(Handedness::Right, 0.5, [false; 4])).unwrap().thumb);
        assert!(!classify(&hand_with(Handedness::Left, 0.5, [false; 4])).unwrap().thumb);
    }

    #[test]
    fn test_fingers_use_vertical_rule_for_both_hands() {
        for handedness in [Handedness::Left, Handedness::Right] {
            let fingers = classify(&hand_with(handedness, 0.5, [true, false, true, false])).unwrap();
            assert!(fingers.index);
            assert!(!fingers.middle);
            assert!(fingers.ring);
            assert!(!fingers.pinky);
            assert_eq!(fingers.open_count(), 2);
        }
    }

    #[test]
    fn test_fist() {
        let fingers = classify(&hand_with(Handedness::Right, 0.4, [false; 4])).unwrap();
        assert!(fingers.is_fist());
        let fingers = classify(&hand_with(Handedness::Right, 0.6, [false; 4])).unwrap();
        assert!(!fingers.is_fist());
    }

    #[test]
    fn test_malformed_landmark_set_is_rejected() {
        let hand = HandObservation::new(Handedness::Right, vec![Landmark::default(); 20]);
        match classify(&hand) {
            Err(Error::InvalidLandmarks { expected, actual }) => {
                assert_eq!(expected, 21);
                assert_eq!(actual, 20);
            }
            other => panic!("Expected InvalidLandmarks, got {other:?}"),
        }
        assert!(hand.landmark(THUMB_TIP).is_err());
    }

    #[test]
    fn test_handedness_deserializes_detector_labels() {
        let h: Handedness = serde_json::from_str("\"Right\"").unwrap();
        assert_eq!(h, Handedness::Right);
        let h: Handedness = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(h, Handedness::Left);
        assert_eq!(Handedness::Left.mirrored(), Handedness::Right);
    }
}
