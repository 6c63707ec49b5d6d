//! Wheel delta normalization.
//!
//! Platforms report wheel motion in wildly different units (pixels, lines,
//! pages, per-device multiples). The smallest non-zero magnitude seen so far is
//! taken as one notch, and every delta is expressed as a rounded multiple of it.

use glyph_loop_types::INITIAL_MIN_WHEEL_DELTA;

/// Running-minimum wheel normalizer. One per session.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelNormalizer {
    min_delta: f64,
}

impl WheelNormalizer {
    pub fn new() -> Self {
        Self {
            min_delta: INITIAL_MIN_WHEEL_DELTA,
        }
    }

    /// Smallest non-zero |delta| observed so far. Never increases.
    pub fn min_delta(&self) -> f64 {
        self.min_delta
    }

    /// Fold `delta_y` into the running minimum and return its notch count.
    ///
    /// Zero and non-finite deltas leave the minimum untouched and count as
    /// zero notches. Rounding is half-up, so `-0.5` rounds to `0`.
    pub fn observe(&mut self, delta_y: f64) -> i32 {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return 0;
        }
        self.min_delta = self.min_delta.min(delta_y.abs());
        (delta_y / self.min_delta + 0.5).floor() as i32
    }
}

impl Default for WheelNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_is_always_one_notch() {
        let mut wheel = WheelNormalizer::new();
        assert_eq!(wheel.observe(-240.0), -1);
        assert_eq!(wheel.min_delta(), 240.0);
    }

    #[test]
    fn running_minimum_sequence() {
        let mut wheel = WheelNormalizer::new();
        let notches: Vec<i32> = [120.0, -60.0, 30.0]
            .into_iter()
            .map(|d| wheel.observe(d))
            .collect();
        assert_eq!(notches, vec![1, -1, 1]);
        assert_eq!(wheel.min_delta(), 30.0);

        // Later large deltas are multiples of the smallest one.
        assert_eq!(wheel.observe(120.0), 4);
        assert_eq!(wheel.observe(-45.0), -1);
        assert_eq!(wheel.min_delta(), 30.0);
    }

    #[test]
    fn zero_and_nan_deltas_are_ignored() {
        let mut wheel = WheelNormalizer::new();
        assert_eq!(wheel.observe(100.0), 1);
        assert_eq!(wheel.observe(0.0), 0);
        assert_eq!(wheel.observe(f64::NAN), 0);
        assert_eq!(wheel.min_delta(), 100.0);
    }
}
