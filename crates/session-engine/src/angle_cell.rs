//! Lock-free single-writer angle handoff.

use std::sync::atomic::{AtomicU64, Ordering};

/// An atomic cell holding the current tilt angle as an `f64` bit
/// pattern.
///
/// The sensor task is the single writer; the frame path reads. A plain
/// shared `f64` field could tear under a concurrent write — publishing
/// through an `AtomicU64` makes every read a consistent snapshot
/// without a lock. Release/Acquire ordering makes a stored angle
/// visible to the reader that observes it.
#[derive(Debug)]
pub struct AngleCell {
    bits: AtomicU64,
}

impl AngleCell {
    /// Create a cell holding the given initial angle.
    pub fn new(initial: f64) -> Self {
        Self {
            bits: AtomicU64::new(initial.to_bits()),
        }
    }

    /// Publish a new angle.
    pub fn store(&self, angle: f64) {
        self.bits.store(angle.to_bits(), Ordering::Release);
    }

    /// Read the latest published angle.
    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl Default for AngleCell {
    fn default() -> Self {
        Self::new(0.0)
    }
}
