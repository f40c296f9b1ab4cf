//! Clock and rate-gating utilities.
//!
//! Sensor samples and video frames arrive from independent producers at
//! uncorrelated rates. Everything is anchored to a monotonic clock epoch
//! recorded when the session starts; this module provides:
//! - Capturing the epoch and converting elapsed time
//! - Gating an over-eager sample stream down to a target rate

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to a
/// fixed epoch (the moment the stabilization session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Nanoseconds elapsed since session start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}

/// Gate that passes samples through at no more than a target rate.
///
/// Used to decimate a gravity stream that reports faster than the
/// nominal 60 Hz the estimator is tuned for.
#[derive(Debug)]
pub struct RateGate {
    target_interval_ns: u64,
    last_pass_ns: Option<u64>,
}

impl RateGate {
    /// Create a gate targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ns: 1_000_000_000 / target_hz.max(1) as u64,
            last_pass_ns: None,
        }
    }

    /// Check whether a sample at `current_ns` should pass the gate.
    /// The first sample always passes.
    pub fn should_pass(&mut self, current_ns: u64) -> bool {
        match self.last_pass_ns {
            None => {
                self.last_pass_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_pass_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}
