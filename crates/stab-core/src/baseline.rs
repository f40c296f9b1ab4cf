//! Baseline calibration at record start.

use std::f64::consts::{FRAC_PI_2, PI};

use horizonlock_model::BaselineOrientation;

use crate::angle;

/// Tolerance for matching a quantized angle against a canonical value.
const CANONICAL_EPS: f64 = 1e-9;

/// Captures the "what counts as upright" angle for one recording.
///
/// The baseline is a pure function of the tilt angle at the instant
/// recording starts; it must be captured exactly once per recording
/// and never recomputed mid-session, since in-flight frame transforms
/// assume it is fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineCalibrator;

impl BaselineCalibrator {
    /// Quantize `current_angle` to the nearest right angle and
    /// canonicalize it for the given orientation.
    ///
    /// Landscape baselines that quantize to `-π/2` are folded to
    /// `+π/2`: a device rotated 90° either way is the same landscape
    /// hold, and calibrating the two differently would flip the
    /// stabilized output depending on which way the user turned.
    pub fn capture(current_angle: f64, orientation: BaselineOrientation) -> f64 {
        let mut baseline = Self::quantize_to_right_angle(current_angle);

        if orientation == BaselineOrientation::Landscape
            && (baseline + FRAC_PI_2).abs() < CANONICAL_EPS
        {
            baseline = angle::normalize(baseline + PI);
        }

        baseline
    }

    /// Snap an angle to the nearest multiple of π/2, in `(-π, π]`.
    ///
    /// Under that normalization the four canonical values are
    /// `{-π/2, 0, π/2, π}`.
    pub fn quantize_to_right_angle(a: f64) -> f64 {
        angle::normalize((a / FRAC_PI_2).round() * FRAC_PI_2)
    }
}
