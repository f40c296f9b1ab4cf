//! Centered rotate-and-scale warping of RGBA8 frames.

use horizonlock_common::{HorizonError, HorizonResult};
use horizonlock_model::{FrameDimensions, StabilizationTransform, VideoFrame, BYTES_PER_PIXEL};

/// Fill color for destination pixels the source does not cover
/// (opaque black).
const FILL: [u8; 4] = [0, 0, 0, 255];

/// Applies a stabilization transform to a frame.
///
/// Purely functional: no owned mutable state, safe to call from a
/// dedicated processing thread. The composite transform is
/// translate(-center) → rotate → scale → translate(+center), realized
/// as an inverse mapping per destination pixel with bilinear sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameWarper;

impl FrameWarper {
    /// Warp `frame` by `transform`, producing a new frame of exactly
    /// `dims` carrying the original timestamp.
    ///
    /// Every failure here is scoped to this one frame: the caller
    /// drops it and continues, a skipped frame being a minor visual
    /// blip rather than corruption.
    pub fn warp(
        frame: &VideoFrame,
        transform: &StabilizationTransform,
        dims: FrameDimensions,
    ) -> HorizonResult<VideoFrame> {
        if frame.width != dims.width || frame.height != dims.height {
            return Err(HorizonError::warp(format!(
                "frame is {}x{} but session dimensions are {}x{}",
                frame.width, frame.height, dims.width, dims.height
            )));
        }
        if !frame.is_complete() {
            return Err(HorizonError::warp(format!(
                "partial frame: {} bytes for declared {}x{}",
                frame.data.len(),
                frame.width,
                frame.height
            )));
        }
        if !transform.is_valid() {
            return Err(HorizonError::warp(format!(
                "unusable transform: rotation={}, scale={}",
                transform.rotation_radians, transform.scale
            )));
        }

        let out_len = dims.expected_byte_len();

        if transform.is_identity() {
            // is_complete tolerates trailing extra bytes in the input;
            // the output is always exactly the declared size.
            return Ok(VideoFrame::new(
                frame.width,
                frame.height,
                frame.timestamp_ns,
                frame.data[..out_len].to_vec(),
            ));
        }
        let mut out = Vec::new();
        out.try_reserve_exact(out_len)
            .map_err(|e| HorizonError::warp(format!("output buffer allocation failed: {e}")))?;
        out.resize(out_len, 0);

        let width = dims.width as usize;
        let height = dims.height as usize;
        let (cx, cy) = dims.center();
        let (sin_t, cos_t) = transform.rotation_radians.sin_cos();
        let inv_scale = 1.0 / transform.scale;
        let max_x = width as f64 - 1.0;
        let max_y = height as f64 - 1.0;

        for y in 0..height {
            for x in 0..width {
                // Invert the composite: un-translate, un-scale, rotate
                // back, re-translate.
                let dx = (x as f64 - cx) * inv_scale;
                let dy = (y as f64 - cy) * inv_scale;
                let src_x = cos_t * dx + sin_t * dy + cx;
                let src_y = -sin_t * dx + cos_t * dy + cy;

                let dst = (y * width + x) * BYTES_PER_PIXEL;
                let epsilon = 1e-6;
                if !src_x.is_finite()
                    || !src_y.is_finite()
                    || src_x < -epsilon
                    || src_y < -epsilon
                    || src_x > max_x + epsilon
                    || src_y > max_y + epsilon
                {
                    out[dst..dst + BYTES_PER_PIXEL].copy_from_slice(&FILL);
                    continue;
                }

                let pixel = sample_bilinear(
                    &frame.data,
                    width,
                    height,
                    src_x.clamp(0.0, max_x),
                    src_y.clamp(0.0, max_y),
                );
                out[dst..dst + BYTES_PER_PIXEL].copy_from_slice(&pixel);
            }
        }

        Ok(VideoFrame::new(
            dims.width,
            dims.height,
            frame.timestamp_ns,
            out,
        ))
    }
}

/// Bilinear RGBA sample at a fractional source coordinate.
///
/// Coordinates must already be clamped into `[0, w-1] x [0, h-1]`.
fn sample_bilinear(data: &[u8], width: usize, height: usize, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    let p00 = (y0 * width + x0) * BYTES_PER_PIXEL;
    let p10 = (y0 * width + x1) * BYTES_PER_PIXEL;
    let p01 = (y1 * width + x0) * BYTES_PER_PIXEL;
    let p11 = (y1 * width + x1) * BYTES_PER_PIXEL;

    let mut pixel = [0u8; 4];
    for (c, slot) in pixel.iter_mut().enumerate() {
        let value = data[p00 + c] as f64 * w00
            + data[p10 + c] as f64 * w10
            + data[p01 + c] as f64 * w01
            + data[p11 + c] as f64 * w11;
        *slot = value.round().clamp(0.0, 255.0) as u8;
    }
    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn gradient_frame(dims: FrameDimensions, timestamp_ns: u64) -> VideoFrame {
        let mut data = Vec::with_capacity(dims.expected_byte_len());
        for y in 0..dims.height {
            for x in 0..dims.width {
                data.extend_from_slice(&[
                    (x * 16 % 256) as u8,
                    (y * 16 % 256) as u8,
                    ((x + y) * 8 % 256) as u8,
                    255,
                ]);
            }
        }
        VideoFrame::new(dims.width, dims.height, timestamp_ns, data)
    }

    #[test]
    fn test_identity_transform_reproduces_frame() {
        let dims = FrameDimensions::new(16, 16);
        let frame = gradient_frame(dims, 42);
        let out = FrameWarper::warp(&frame, &StabilizationTransform::IDENTITY, dims).unwrap();
        assert_eq!(out.data, frame.data);
        assert_eq!(out.timestamp_ns, 42);
    }

    #[test]
    fn test_output_dimensions_match_input() {
        let dims = FrameDimensions::new(20, 12);
        let frame = gradient_frame(dims, 0);
        let t = StabilizationTransform::new(0.3, 1.5);
        let out = FrameWarper::warp(&frame, &t, dims).unwrap();
        assert_eq!(out.width, 20);
        assert_eq!(out.height, 12);
        assert_eq!(out.data.len(), dims.expected_byte_len());
    }

    #[test]
    fn test_timestamp_passes_through() {
        let dims = FrameDimensions::new(8, 8);
        let frame = gradient_frame(dims, 1_234_567);
        let t = StabilizationTransform::new(0.1, 1.1);
        let out = FrameWarper::warp(&frame, &t, dims).unwrap();
        assert_eq!(out.timestamp_ns, 1_234_567);
    }

    #[test]
    fn test_oversized_buffer_truncated_to_declared_size() {
        let dims = FrameDimensions::new(8, 8);
        let mut frame = gradient_frame(dims, 3);
        let pixels = frame.data.clone();
        frame.data.extend_from_slice(&[7; 32]); // trailing garbage

        let out = FrameWarper::warp(&frame, &StabilizationTransform::IDENTITY, dims).unwrap();
        assert_eq!(out.data.len(), dims.expected_byte_len());
        assert_eq!(out.data, pixels);

        let rotated =
            FrameWarper::warp(&frame, &StabilizationTransform::new(0.2, 1.2), dims).unwrap();
        assert_eq!(rotated.data.len(), dims.expected_byte_len());
    }

    #[test]
    fn test_partial_frame_rejected() {
        let dims = FrameDimensions::new(8, 8);
        let short = VideoFrame::new(8, 8, 0, vec![0; 16]);
        let err = FrameWarper::warp(&short, &StabilizationTransform::IDENTITY, dims);
        assert!(err.is_err());
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let dims = FrameDimensions::new(8, 8);
        let frame = gradient_frame(FrameDimensions::new(4, 4), 0);
        assert!(FrameWarper::warp(&frame, &StabilizationTransform::IDENTITY, dims).is_err());
    }

    #[test]
    fn test_non_finite_transform_rejected() {
        let dims = FrameDimensions::new(8, 8);
        let frame = gradient_frame(dims, 0);
        let t = StabilizationTransform::new(f64::NAN, 1.0);
        assert!(FrameWarper::warp(&frame, &t, dims).is_err());
    }

    #[test]
    fn test_quarter_turn_of_uniform_square_is_uniform() {
        // A solid-color square is invariant under rotation away from
        // the edges; spot-check the interior.
        let dims = FrameDimensions::new(9, 9);
        let frame = VideoFrame::new(9, 9, 0, vec![128; dims.expected_byte_len()]);
        let t = StabilizationTransform::new(FRAC_PI_2, 1.0);
        let out = FrameWarper::warp(&frame, &t, dims).unwrap();

        let center = (4 * 9 + 4) * BYTES_PER_PIXEL;
        assert_eq!(&out.data[center..center + 4], &[128, 128, 128, 128]);
    }

    #[test]
    fn test_rotation_moves_gradient() {
        let dims = FrameDimensions::new(16, 16);
        let frame = gradient_frame(dims, 0);
        let t = StabilizationTransform::new(0.5, 1.5);
        let out = FrameWarper::warp(&frame, &t, dims).unwrap();
        assert_ne!(out.data, frame.data);
    }
}
