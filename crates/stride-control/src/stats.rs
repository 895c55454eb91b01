//! Tracking error statistics.
//!
//! [`TrackingStats`] accumulates the norm of a task-space error over a
//! rollout: sample count, RMS and worst case.

use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// TrackingStats
// ---------------------------------------------------------------------------

/// Running statistics of a tracking error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingStats {
    /// Number of recorded samples.
    pub samples: u64,
    sum_sq: f64,
    max: f64,
}

impl TrackingStats {
    /// Create empty stats.
    pub const fn new() -> Self {
        Self {
            samples: 0,
            sum_sq: 0.0,
            max: 0.0,
        }
    }

    /// Record the error between `actual` and `target`.
    pub fn record(&mut self, actual: &Vector3<f64>, target: &Vector3<f64>) {
        let error = (actual - target).norm();
        self.samples += 1;
        self.sum_sq += error * error;
        self.max = self.max.max(error);
    }

    /// Root-mean-square error over all samples.
    pub fn rms(&self) -> Option<f64> {
        if self.samples == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some((self.sum_sq / self.samples as f64).sqrt())
    }

    /// Largest error seen so far.
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_stats_have_no_rms() {
        let stats = TrackingStats::new();
        assert_eq!(stats.samples, 0);
        assert!(stats.rms().is_none());
        assert_eq!(stats.max(), 0.0);
    }

    #[test]
    fn rms_and_max() {
        let mut stats = TrackingStats::new();
        stats.record(&Vector3::new(0.3, 0.0, 0.0), &Vector3::zeros());
        stats.record(&Vector3::new(0.0, 0.4, 1.0), &Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(stats.samples, 2);
        assert_relative_eq!(stats.rms().unwrap(), (0.125f64).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(stats.max(), 0.4);
    }

    #[test]
    fn reset_clears() {
        let mut stats = TrackingStats::new();
        stats.record(&Vector3::new(1.0, 0.0, 0.0), &Vector3::zeros());
        stats.reset();
        assert_eq!(stats, TrackingStats::default());
    }
}
