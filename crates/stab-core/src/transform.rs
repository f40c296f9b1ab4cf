//! Per-frame transform derivation: rotation plus cover scale.

use horizonlock_model::{BaselineOrientation, FrameDimensions, StabilizationTransform};

/// Builds the stabilization transform for one frame.
///
/// Rotation is exactly the effective angle — zero deviation from the
/// baseline means zero applied rotation. Scale is the minimum uniform
/// enlargement that keeps a centered rotate-then-crop free of empty
/// border pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformBuilder;

impl TransformBuilder {
    /// Compute the transform for the given effective angle and frame
    /// geometry.
    pub fn build(
        effective_angle: f64,
        dims: FrameDimensions,
        orientation: BaselineOrientation,
    ) -> StabilizationTransform {
        StabilizationTransform {
            rotation_radians: effective_angle,
            scale: Self::cover_scale(effective_angle, dims, orientation),
        }
    }

    /// Minimum uniform scale so the rotated reference rectangle still
    /// covers its original bounding box.
    ///
    /// The reference rectangle is the frame's intended upright shape
    /// (encoded axes swapped for a landscape baseline). Its axis-
    /// aligned bounding box after rotating by θ is
    /// `(w·|cosθ| + h·|sinθ|, w·|sinθ| + h·|cosθ|)`; taking the larger
    /// per-axis ratio is exact for a centered rotate-then-crop.
    pub fn cover_scale(
        effective_angle: f64,
        dims: FrameDimensions,
        orientation: BaselineOrientation,
    ) -> f64 {
        let (ref_w, ref_h) = dims.reference_axes(orientation);
        if ref_w <= 0.0 || ref_h <= 0.0 {
            return 1.0;
        }

        let cos = effective_angle.cos().abs();
        let sin = effective_angle.sin().abs();

        let rotated_w = ref_w * cos + ref_h * sin;
        let rotated_h = ref_w * sin + ref_h * cos;

        (rotated_w / ref_w).max(rotated_h / ref_h)
    }
}
