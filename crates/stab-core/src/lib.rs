//! HorizonLock Stabilization Core
//!
//! Turns raw gravity samples into per-frame stabilization transforms:
//! - **Estimation:** Smoothed tilt angle from the gravity vector
//! - **Calibration:** Right-angle baseline captured at record start
//! - **Transform:** Compensating rotation plus border-free cover scale
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod angle;
pub mod baseline;
pub mod estimator;
pub mod transform;

pub use baseline::BaselineCalibrator;
pub use estimator::OrientationEstimator;
pub use transform::TransformBuilder;
