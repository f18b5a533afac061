//! Discrete gesture arbitration for one hand.
//!
//! Rules are evaluated in priority order and the first match wins. Only the
//! right hand carries discrete gestures.

use crate::landmarks::{FingerStates, Handedness};

/// Discrete action a gesture can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscreteAction {
    /// Media play/pause key
    PlayPause,
    /// Full-screen capture
    Screenshot,
}

impl DiscreteAction {
    /// Short name for logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlayPause => "play-pause",
            Self::Screenshot => "screenshot",
        }
    }
}

/// Finger pattern that triggers a discrete action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureRule {
    /// Hand the rule applies to
    pub handedness: Handedness,
    /// Exact thumb-to-pinky pattern
    pub pattern: [bool; 5],
    /// Action requested on match
    pub action: DiscreteAction,
}

/// Built-in rules in priority order
pub const GESTURE_RULES: [GestureRule; 2] = [
    // Open palm with the thumb tucked
    GestureRule {
        handedness: Handedness::Right,
        pattern: [false, true, true, true, true],
        action: DiscreteAction::PlayPause,
    },
    // Victory sign
    GestureRule {
        handedness: Handedness::Right,
        pattern: [false, true, true, false, false],
        action: DiscreteAction::Screenshot,
    },
];

impl GestureRule {
    /// Whether this rule matches a classified hand
    #[must_use]
    pub fn matches(&self, handedness: Handedness, fingers: &FingerStates) -> bool {
        self.handedness == handedness && self.pattern == fingers.as_array()
    }
}

/// Pick at most one discrete action for a hand
#[must_use]
pub fn arbitrate(handedness: Handedness, fingers: &FingerStates) -> Option<DiscreteAction> {
    GESTURE_RULES
        .iter()
        .find(|rule| rule.matches(handedness, fingers))
        .map(|rule| rule.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingers(pattern: [bool; 5]) -> FingerStates {
        FingerStates {
            thumb: pattern[0],
            index: pattern[1],
            middle: pattern[2],
            ring: pattern[3],
            pinky: pattern[4],
        }
    }

    #[test]
    fn test_play_pause_pattern() {
        let f = fingers([false, true, true, true, true]);
        assert_eq!(arbitrate(Handedness::Right, &f), Some(DiscreteAction::PlayPause));
    }

    #[test]
    fn test_screenshot_pattern() {
        let f = fingers([false, true, true, false, false]);
        assert_eq!(arbitrate(Handedness::Right, &f), Some(DiscreteAction::Screenshot));
    }

    #[test]
    fn test_left_hand_has_no_discrete_gestures() {
        for pattern in [[false, true, true, true, true], [false, true, true, false, false]] {
            assert_eq!(arbitrate(Handedness::Left, &fingers(pattern)), None);
        }
    }

    #[test]
    fn test_thumb_open_blocks_both_gestures() {
        assert_eq!(arbitrate(Handedness::Right, &fingers([true, true, true, true, true])), None);
        assert_eq!(arbitrate(Handedness::Right, &fingers([true, true, true, false, false])), None);
    }

    #[test]
    fn test_every_right_hand_pattern_maps_to_at_most_the_two_rules() {
        let mut hits = 0;
        for bits in 0u8..32 {
            let pattern = [0, 1, 2, 3, 4].map(|i| bits & (1 << i) != 0);
            if arbitrate(Handedness::Right, &fingers(pattern)).is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 2);
    }
}
