//! Tilt angle estimation from gravity samples.

use std::f64::consts::{FRAC_PI_2, PI};

use horizonlock_model::GravitySample;

/// Default exponential smoothing factor (weight on history).
///
/// 0.9 is heavy smoothing: the gravity stream at 60 Hz is jittery
/// enough that anything lighter shows up as visible wobble in the
/// stabilized output.
pub const DEFAULT_SMOOTHING: f64 = 0.9;

/// Converts raw gravity samples into a smoothed tilt angle.
///
/// The estimator runs continuously, independent of recording state:
/// `ingest` once per sensor sample, `current_angle` whenever the frame
/// path needs the latest estimate. Single-threaded by design; the
/// session layer publishes the result through an atomic cell.
#[derive(Debug)]
pub struct OrientationEstimator {
    smoothing: f64,
    previous: Option<f64>,
}

impl OrientationEstimator {
    /// Create an estimator with the given smoothing factor in `[0, 1)`.
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing: smoothing.clamp(0.0, 0.999),
            previous: None,
        }
    }

    /// Create an estimator with the default heavy smoothing.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }

    /// Fold one gravity sample into the estimate and return the
    /// updated angle.
    ///
    /// A sample with both in-plane components zero carries no tilt
    /// information (`atan2(0, 0)` is undefined) and leaves the
    /// previous estimate untouched.
    pub fn ingest(&mut self, sample: &GravitySample) -> f64 {
        if sample.is_degenerate() {
            return self.current_angle();
        }

        let raw = Self::raw_tilt(sample);

        let smoothed = match self.previous {
            // First sample seeds the filter unsmoothed.
            None => raw,
            Some(prev) => self.smoothing * prev + (1.0 - self.smoothing) * raw,
        };

        self.previous = Some(smoothed);
        smoothed
    }

    /// The current smoothed tilt angle, in `(-π, π]`.
    ///
    /// Reports 0 before the first usable sample arrives.
    pub fn current_angle(&self) -> f64 {
        self.previous.unwrap_or(0.0)
    }

    /// Whether at least one usable sample has been ingested.
    pub fn is_seeded(&self) -> bool {
        self.previous.is_some()
    }

    /// Unsmoothed tilt angle for a single sample.
    ///
    /// `atan2(y, x) - π/2` measures rotation from the sensor's frame,
    /// the `+π` corrects for the camera module being mounted upside
    /// down relative to the sensor, and the negation flips into the
    /// compensation direction. The intermediate lies in `[-3π/2, π/2)`,
    /// so one correction brings it into `(-π, π]`.
    fn raw_tilt(sample: &GravitySample) -> f64 {
        let mut tilt = -(sample.y.atan2(sample.x) - FRAC_PI_2 + PI);
        if tilt <= -PI {
            tilt += 2.0 * PI;
        } else if tilt > PI {
            tilt -= 2.0 * PI;
        }
        tilt
    }
}

impl Default for OrientationEstimator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64) -> GravitySample {
        GravitySample::new(x, y, 0.0, 0)
    }

    #[test]
    fn test_upright_device_reads_zero() {
        // Device upright in portrait: gravity along -y.
        let mut est = OrientationEstimator::with_defaults();
        let a = est.ingest(&sample(0.0, -1.0));
        assert!(a.abs() < 1e-12, "upright tilt should be 0, got {a}");
    }

    #[test]
    fn test_gravity_along_x_reads_quarter_turn() {
        // atan2(0, 1) - π/2 = -π/2; +π then negated gives -π/2.
        let mut est = OrientationEstimator::with_defaults();
        let a = est.ingest(&sample(1.0, 0.0));
        assert!((a - (-FRAC_PI_2)).abs() < 1e-12, "got {a}");
        assert!((a.abs() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_output_always_normalized() {
        let mut est = OrientationEstimator::new(0.0);
        for deg in (0..360).step_by(5) {
            let rad = (deg as f64).to_radians();
            let a = est.ingest(&sample(rad.cos(), rad.sin()));
            assert!(a > -PI && a <= PI, "angle {a} out of range at {deg}°");
        }
    }

    #[test]
    fn test_first_sample_is_unsmoothed() {
        let mut est = OrientationEstimator::with_defaults();
        let a = est.ingest(&sample(1.0, 0.0));
        // Heavy smoothing would pull toward the zero cold-start value
        // if the filter were (incorrectly) seeded before the first sample.
        assert!((a - (-FRAC_PI_2)).abs() < 1e-12);
    }

    #[test]
    fn test_smoothing_weights_history() {
        let mut est = OrientationEstimator::new(0.9);
        let first = est.ingest(&sample(0.0, -1.0)); // 0
        let second = est.ingest(&sample(1.0, 0.0)); // raw -π/2
        assert_eq!(first, 0.0);
        let expected = 0.9 * 0.0 + 0.1 * (-FRAC_PI_2);
        assert!((second - expected).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_sample_retains_previous_angle() {
        let mut est = OrientationEstimator::new(0.0);
        // Drive the estimate to a known value first.
        let rad: f64 = 0.3;
        // Invert the correction chain to find the gravity direction
        // that produces a raw tilt of exactly 0.3.
        let theta = FRAC_PI_2 - PI - rad;
        let a = est.ingest(&sample(theta.cos(), theta.sin()));
        assert!((a - 0.3).abs() < 1e-9, "setup angle {a}");

        let retained = est.ingest(&GravitySample::new(0.0, 0.0, 1.0, 1));
        assert!((retained - 0.3).abs() < 1e-9);
        assert!(!retained.is_nan());
    }

    #[test]
    fn test_cold_start_reports_zero() {
        let est = OrientationEstimator::with_defaults();
        assert_eq!(est.current_angle(), 0.0);
        assert!(!est.is_seeded());
    }
}
