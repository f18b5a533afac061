use super::SignalFilter;
use crate::{
    constants::{SMOOTHING_ALPHA_MAX, SMOOTHING_ALPHA_MIN},
    Error, Result,
};

/// Exponential smoothing filter
///
/// Unlike a pass-through-first-sample EMA, the state starts at a fixed seed
/// and every sample, including the first, is blended with weight `alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialFilter {
    alpha: f64,
    seed: f64,
    value: f64,
}

impl ExponentialFilter {
    /// Create a filter starting at `seed`
    ///
    /// # Panics
    ///
    /// Panics if alpha is not in the range (0, 1]
    #[must_use]
    pub fn new(alpha: f64, seed: f64) -> Self {
        assert!(
            alpha > SMOOTHING_ALPHA_MIN && alpha <= SMOOTHING_ALPHA_MAX,
            "Alpha must be in (0, 1]"
        );
        Self {
            alpha,
            seed,
            value: seed,
        }
    }

    /// Fallible variant of [`ExponentialFilter::new`]
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if alpha is not in the range (0, 1]
    pub fn try_new(alpha: f64, seed: f64) -> Result<Self> {
        if alpha > SMOOTHING_ALPHA_MIN && alpha <= SMOOTHING_ALPHA_MAX {
            Ok(Self::new(alpha, seed))
        } else {
            Err(Error::InvalidInput(format!("Alpha must be in (0, 1], got {alpha}")))
        }
    }

    /// Blend weight of a new sample
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl SignalFilter for ExponentialFilter {
    fn apply(&mut self, sample: f64) -> f64 {
        self.value = self.value * (1.0 - self.alpha) + sample * self.alpha;
        self.value
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn reset(&mut self) {
        self.value = self.seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_blended_with_seed() {
        let mut filter = ExponentialFilter::new(0.15, 0.0);
        let v = filter.apply(100.0);
        assert!((v - 15.0).abs() < 1e-12);
        let v = filter.apply(100.0);
        // 15 * 0.85 + 15
        assert!((v - 27.75).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut filter1 = ExponentialFilter::new(0.9, 10.0);
        let v = filter1.apply(20.0);
        assert!((v - 19.0).abs() < 0.001);

        // Low alpha = more smoothing
        let mut filter2 = ExponentialFilter::new(0.1, 10.0);
        let v = filter2.apply(20.0);
        assert!((v - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_alpha_one_tracks_input() {
        let mut filter = ExponentialFilter::new(1.0, 0.0);
        assert_eq!(filter.apply(42.0), 42.0);
    }

    #[test]
    fn test_reset_returns_to_seed() {
        let mut filter = ExponentialFilter::new(0.5, 3.0);
        filter.apply(10.0);
        filter.reset();
        assert_eq!(filter.value(), 3.0);
    }

    #[test]
    #[should_panic(expected = "Alpha must be in (0, 1]")]
    fn test_zero_alpha_panics() {
        let _ = ExponentialFilter::new(0.0, 0.0);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(ExponentialFilter::try_new(0.0, 0.0).is_err());
        assert!(ExponentialFilter::try_new(1.01, 0.0).is_err());
        assert!(ExponentialFilter::try_new(0.15, 0.0).is_ok());
    }
}
