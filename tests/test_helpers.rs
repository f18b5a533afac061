//! Helper functions for building synthetic hands in tests
//!
//! Hands are laid out for a 640x480 frame. Pinch distances that are multiples
//! of 5 px map to exactly representable normalized coordinates, so pixel
//! truncation does not shift them.

#![allow(dead_code)]

use hand_gesture_control::{
    constants::{
        INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, NUM_HAND_LANDMARKS, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP,
        THUMB_IP, THUMB_TIP,
    },
    landmarks::{Frame, HandObservation, Handedness, Landmark},
};

/// Frame width the helpers lay hands out for
pub const FRAME_WIDTH: f32 = 640.0;

/// Pinch distance well outside the default 250 px threshold
pub const NO_PINCH_PX: f32 = 300.0;

/// Build a hand with the given finger pattern and thumb-to-index distance
///
/// `fingers` holds index, middle, ring and pinky openness. Thumb openness is
/// expressed relative to the hand, so the landmark placement mirrors for the
/// left hand.
pub fn hand(handedness: Handedness, thumb_open: bool, fingers: [bool; 4], pinch_px: f32) -> HandObservation {
    let mut lm = vec![Landmark::new(0.5, 0.5); NUM_HAND_LANDMARKS];

    // Right thumb is open when its tip is right of the IP joint
    let tip_right_of_joint = match handedness {
        Handedness::Right => thumb_open,
        Handedness::Left => !thumb_open,
    };
    let thumb_x = if tip_right_of_joint { 0.5625 } else { 0.4375 };
    lm[THUMB_IP] = Landmark::new(0.5, 0.55);
    lm[THUMB_TIP] = Landmark::new(thumb_x, 0.5);

    // Index tip sits level with the thumb tip, towards the frame centre
    let offset = pinch_px / FRAME_WIDTH;
    let index_x = if thumb_x > 0.5 { thumb_x - offset } else { thumb_x + offset };
    lm[INDEX_TIP] = Landmark::new(index_x, 0.5);
    lm[INDEX_PIP] = Landmark::new(0.5, if fingers[0] { 0.6 } else { 0.4 });

    for (open, (tip, pip)) in fingers[1..]
        .iter()
        .zip([(MIDDLE_TIP, MIDDLE_PIP), (RING_TIP, RING_PIP), (PINKY_TIP, PINKY_PIP)])
    {
        lm[pip] = Landmark::new(0.5, 0.5);
        lm[tip] = Landmark::new(0.5, if *open { 0.3 } else { 0.7 });
    }

    HandObservation::new(handedness, lm)
}

/// Closed fist, tips far apart
pub fn fist(handedness: Handedness) -> HandObservation {
    hand(handedness, false, [false; 4], NO_PINCH_PX)
}

/// Four fingers up with the thumb tucked
pub fn open_palm(handedness: Handedness) -> HandObservation {
    hand(handedness, false, [true; 4], NO_PINCH_PX)
}

/// Index and middle up
pub fn victory(handedness: Handedness) -> HandObservation {
    hand(handedness, false, [true, true, false, false], NO_PINCH_PX)
}

/// Thumb out with the index tip `distance_px` away
pub fn pinch(handedness: Handedness, distance_px: f32) -> HandObservation {
    hand(handedness, true, [false; 4], distance_px)
}

/// Frame holding `hands` in detector order
pub fn frame(hands: Vec<HandObservation>) -> Frame {
    Frame::new(hands)
}
