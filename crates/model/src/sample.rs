//! Gravity sensor samples.

use serde::{Deserialize, Serialize};

/// A single gravity-vector reading in the device frame.
///
/// Produced by the external sensor service at a nominal 60 Hz.
/// Components follow the sensor convention: a device held upright in
/// portrait reports gravity along `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravitySample {
    /// Gravity component along the device x axis.
    pub x: f64,
    /// Gravity component along the device y axis.
    pub y: f64,
    /// Gravity component along the device z axis (toward/away from the screen).
    pub z: f64,
    /// Capture timestamp in nanoseconds on the sensor clock.
    pub timestamp_ns: u64,
}

impl GravitySample {
    pub fn new(x: f64, y: f64, z: f64, timestamp_ns: u64) -> Self {
        Self {
            x,
            y,
            z,
            timestamp_ns,
        }
    }

    /// Whether the in-plane components carry no direction information.
    ///
    /// `atan2(0, 0)` is undefined; samples where gravity is entirely
    /// along the z axis (device flat on a table) must not update the
    /// tilt estimate.
    pub fn is_degenerate(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Magnitude of the gravity vector.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_sample_detection() {
        assert!(GravitySample::new(0.0, 0.0, 1.0, 0).is_degenerate());
        assert!(!GravitySample::new(0.0, -1.0, 0.0, 0).is_degenerate());
        assert!(!GravitySample::new(1e-12, 0.0, 1.0, 0).is_degenerate());
    }

    #[test]
    fn test_magnitude() {
        let s = GravitySample::new(0.0, -1.0, 0.0, 0);
        assert!((s.magnitude() - 1.0).abs() < 1e-12);
    }
}
