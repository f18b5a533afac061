//! Signal smoothing for continuous actuator values.
//!
//! Pinch distances jitter from frame to frame; actuators are driven by a
//! filtered value instead of the raw target.

/// Exponential moving average seeded with an initial value
pub mod exponential;

/// Trait for scalar smoothing filters
pub trait SignalFilter: Send + Sync {
    /// Feed one sample and return the filtered value
    fn apply(&mut self, sample: f64) -> f64;

    /// Current filtered value without feeding a sample
    fn value(&self) -> f64;

    /// Reset filter state
    fn reset(&mut self);
}
