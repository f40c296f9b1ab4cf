//! HorizonLock Session Engine
//!
//! Orchestrates stabilization across the lifetime of one recording:
//! - **AngleCell:** Lock-free handoff of the current tilt estimate from
//!   the sensor path to the frame path
//! - **Session:** The `Idle → Calibrating → Active → Idle` state machine
//! - **Pipeline:** Channel-based wiring of the two independent producers
//!   (gravity samples and video frames) to the warper and the external
//!   encoder sink

pub mod angle_cell;
pub mod pipeline;
pub mod session;

pub use angle_cell::AngleCell;
pub use pipeline::{FrameSink, StabilizationPipeline};
pub use session::{SessionState, SessionStats, StabilizationSession};
