//! Frame dimensions and pixel buffers.

use serde::{Deserialize, Serialize};

use crate::transform::BaselineOrientation;

/// Bytes per pixel for RGBA8 frames.
pub const BYTES_PER_PIXEL: usize = 4;

/// Fixed dimensions of a capture session's frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDimensions {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl FrameDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reference axes for scale computation.
    ///
    /// Scale is always derived against the frame's intended upright
    /// rectangle: for a Landscape baseline the encoded width/height are
    /// swapped so the long axis lines up with the viewing orientation.
    pub fn reference_axes(&self, orientation: BaselineOrientation) -> (f64, f64) {
        match orientation {
            BaselineOrientation::Portrait => (self.width as f64, self.height as f64),
            BaselineOrientation::Landscape => (self.height as f64, self.width as f64),
        }
    }

    /// Geometric center of the frame, in pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Total pixel count.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Expected RGBA8 buffer length for these dimensions.
    pub fn expected_byte_len(&self) -> usize {
        self.pixel_count() * BYTES_PER_PIXEL
    }
}

/// A single video frame: tightly packed RGBA8 pixels.
///
/// The engine treats pixel contents as opaque beyond sampling; the
/// timestamp is carried through warping untouched so the downstream
/// encoder sees the original capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    /// Declared width in pixels.
    pub width: u32,
    /// Declared height in pixels.
    pub height: u32,
    /// Capture timestamp in nanoseconds.
    pub timestamp_ns: u64,
    /// RGBA8 pixel data, row-major, stride = 4 * width.
    pub data: Vec<u8>,
}

impl VideoFrame {
    pub fn new(width: u32, height: u32, timestamp_ns: u64, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            timestamp_ns,
            data,
        }
    }

    /// Allocate a black (all-zero) frame of the given dimensions.
    pub fn black(dims: FrameDimensions, timestamp_ns: u64) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            timestamp_ns,
            data: vec![0; dims.expected_byte_len()],
        }
    }

    /// Dimensions as declared by the frame header.
    pub fn dimensions(&self) -> FrameDimensions {
        FrameDimensions::new(self.width, self.height)
    }

    /// Whether the pixel buffer actually holds the declared dimensions.
    ///
    /// Capture layers can deliver partial buffers when a frame arrives
    /// late or a transfer is truncated; such frames must be dropped
    /// rather than warped.
    pub fn is_complete(&self) -> bool {
        self.data.len() >= self.dimensions().expected_byte_len()
    }
}
