//! HorizonLock Data Model
//!
//! Defines the core data contracts for the stabilization engine:
//! - **Samples:** Timestamped gravity-vector readings from the motion sensor
//! - **Frames:** Pixel buffers and fixed capture dimensions
//! - **Transforms:** Baseline orientation and per-frame rotation/scale
//!
//! All angles are radians normalized to `(-π, π]`; all timestamps are
//! nanoseconds on the capture clock and pass through the engine untouched.

pub mod frame;
pub mod sample;
pub mod transform;

pub use frame::*;
pub use sample::*;
pub use transform::*;
