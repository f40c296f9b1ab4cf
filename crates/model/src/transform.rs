//! Baseline orientation and per-frame stabilization transforms.

use serde::{Deserialize, Serialize};

/// Coarse device orientation at the moment recording starts.
///
/// Chosen once per recording by the external capture layer; drives
/// which frame axis is treated as the long axis during scale
/// computation and how landscape baselines canonicalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineOrientation {
    Portrait,
    Landscape,
}

/// The rotation and cover scale applied to one frame.
///
/// Derived per frame from the current effective angle; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilizationTransform {
    /// Compensating rotation in radians.
    pub rotation_radians: f64,
    /// Uniform enlargement that keeps the rotated frame free of border gaps.
    pub scale: f64,
}

impl StabilizationTransform {
    /// The no-op transform.
    pub const IDENTITY: StabilizationTransform = StabilizationTransform {
        rotation_radians: 0.0,
        scale: 1.0,
    };

    pub fn new(rotation_radians: f64, scale: f64) -> Self {
        Self {
            rotation_radians,
            scale,
        }
    }

    /// Whether applying this transform would leave the frame unchanged.
    pub fn is_identity(&self) -> bool {
        self.rotation_radians == 0.0 && self.scale == 1.0
    }

    /// Whether both components are finite and the scale is usable.
    pub fn is_valid(&self) -> bool {
        self.rotation_radians.is_finite() && self.scale.is_finite() && self.scale > 0.0
    }
}

impl Default for StabilizationTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert!(StabilizationTransform::IDENTITY.is_identity());
        assert!(StabilizationTransform::IDENTITY.is_valid());
        assert!(!StabilizationTransform::new(0.1, 1.2).is_identity());
    }

    #[test]
    fn test_invalid_transforms_rejected() {
        assert!(!StabilizationTransform::new(f64::NAN, 1.0).is_valid());
        assert!(!StabilizationTransform::new(0.0, 0.0).is_valid());
        assert!(!StabilizationTransform::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_orientation_serde() {
        let json = serde_json::to_string(&BaselineOrientation::Landscape).unwrap();
        assert_eq!(json, "\"landscape\"");
        let parsed: BaselineOrientation = serde_json::from_str("\"portrait\"").unwrap();
        assert_eq!(parsed, BaselineOrientation::Portrait);
    }
}
