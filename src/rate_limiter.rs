//! Per-action minimum interval between fires.
//!
//! A held pose produces a candidate every frame; only the first one after the
//! cooldown actually fires. Rejected candidates are dropped silently.

use crate::gesture::DiscreteAction;

/// Last fire time for each discrete action kind
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionRateLimiter {
    last_play_pause: Option<f64>,
    last_screenshot: Option<f64>,
}

impl ActionRateLimiter {
    /// No action has fired yet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_play_pause: None,
            last_screenshot: None,
        }
    }

    /// Time `action` last fired
    #[must_use]
    pub const fn last_fired(&self, action: DiscreteAction) -> Option<f64> {
        match action {
            DiscreteAction::PlayPause => self.last_play_pause,
            DiscreteAction::Screenshot => self.last_screenshot,
        }
    }

    fn slot(&mut self, action: DiscreteAction) -> &mut Option<f64> {
        match action {
            DiscreteAction::PlayPause => &mut self.last_play_pause,
            DiscreteAction::Screenshot => &mut self.last_screenshot,
        }
    }

    /// Fire `action` at `now` if its cooldown has elapsed
    ///
    /// Returns `true` and records the fire time when the action fires.
    pub fn try_fire(&mut self, action: DiscreteAction, now: f64, action_delay: f64) -> bool {
        let slot = self.slot(action);
        let ready = slot.map_or(true, |last| now - last > action_delay);
        if ready {
            *slot = Some(now);
        }
        ready
    }
}

/// File name for a screenshot fired at `now`, keyed by whole Unix seconds
#[must_use]
#[allow(clippy::cast_possible_truncation)] // floor of a finite timestamp
pub fn screenshot_filename(now: f64) -> String {
    let secs = if now.is_finite() { now.floor() as i64 } else { 0 };
    format!("screenshot_{secs}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_fires() {
        let mut limiter = ActionRateLimiter::new();
        assert!(limiter.try_fire(DiscreteAction::PlayPause, 0.0, 1.2));
        assert_eq!(limiter.last_fired(DiscreteAction::PlayPause), Some(0.0));
    }

    #[test]
    fn test_candidate_within_delay_is_dropped() {
        let mut limiter = ActionRateLimiter::new();
        assert!(limiter.try_fire(DiscreteAction::Screenshot, 5.0, 1.2));
        assert!(!limiter.try_fire(DiscreteAction::Screenshot, 6.0, 1.2));
        // A dropped candidate does not extend the cooldown
        assert_eq!(limiter.last_fired(DiscreteAction::Screenshot), Some(5.0));
        assert!(limiter.try_fire(DiscreteAction::Screenshot, 6.3, 1.2));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut limiter = ActionRateLimiter::new();
        assert!(limiter.try_fire(DiscreteAction::PlayPause, 1.0, 1.2));
        assert!(limiter.try_fire(DiscreteAction::Screenshot, 1.1, 1.2));
        assert!(!limiter.try_fire(DiscreteAction::PlayPause, 1.5, 1.2));
        assert_eq!(limiter.last_fired(DiscreteAction::Screenshot), Some(1.1));
    }

    #[test]
    fn test_screenshot_filename() {
        assert_eq!(screenshot_filename(0.1), "screenshot_0.png");
        assert_eq!(screenshot_filename(1_700_000_000.99), "screenshot_1700000000.png");
        assert_eq!(screenshot_filename(f64::NAN), "screenshot_0.png");
    }
}
