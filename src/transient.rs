//! Time-window predicate for short-lived on-screen notices.

/// Whether an event marked at `marker` is still inside its display window
#[must_use]
pub fn is_active(marker: f64, now: f64, duration: f64) -> bool {
    now - marker < duration
}

/// Timestamp of the last occurrence of a transient event
///
/// Never torn down; the marker simply falls out of its window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransientMarker {
    marked_at: Option<f64>,
}

impl TransientMarker {
    /// Marker that has never fired
    #[must_use]
    pub const fn new() -> Self {
        Self { marked_at: None }
    }

    /// Record an occurrence at `now`
    pub fn mark(&mut self, now: f64) {
        self.marked_at = Some(now);
    }

    /// Time of the last occurrence
    #[must_use]
    pub const fn marked_at(&self) -> Option<f64> {
        self.marked_at
    }

    /// Whether the last occurrence is younger than `duration`
    #[must_use]
    pub fn is_active(&self, now: f64, duration: f64) -> bool {
        self.marked_at.is_some_and(|marker| is_active(marker, now, duration))
    }
}
