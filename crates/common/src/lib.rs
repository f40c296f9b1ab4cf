//! HorizonLock Common Utilities
//!
//! Shared infrastructure for all HorizonLock crates:
//! - Error types and result aliases
//! - Clock and rate-gating utilities for sensor/frame synchronization
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
