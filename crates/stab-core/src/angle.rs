//! Angle normalization helpers.
//!
//! Every angle the engine hands around lives in `(-π, π]`. Keeping a
//! single canonical range makes baseline subtraction and quantization
//! comparisons exact instead of modular.

use std::f64::consts::{PI, TAU};

/// Normalize an angle into `(-π, π]`.
pub fn normalize(mut angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Difference `a - b`, re-normalized into `(-π, π]`.
pub fn difference(a: f64, b: f64) -> f64 {
    normalize(a - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_in_range() {
        for raw in [-7.0, -PI, -FRAC_PI_2, 0.0, FRAC_PI_2, PI, 7.0, 100.0] {
            let n = normalize(raw);
            assert!(n > -PI && n <= PI, "normalize({raw}) = {n} out of range");
        }
    }

    #[test]
    fn test_pi_maps_to_pi_not_minus_pi() {
        assert_eq!(normalize(PI), PI);
        assert_eq!(normalize(-PI), PI);
    }

    #[test]
    fn test_difference_wraps() {
        // 170° - (-170°) wraps to -20°, not 340°
        let a = 170.0_f64.to_radians();
        let b = (-170.0_f64).to_radians();
        let d = difference(a, b);
        assert!((d - (-20.0_f64).to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_input_collapses_to_zero() {
        assert_eq!(normalize(f64::NAN), 0.0);
        assert_eq!(normalize(f64::INFINITY), 0.0);
    }
}
