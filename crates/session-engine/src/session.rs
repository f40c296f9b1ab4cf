//! Stabilization session state machine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use horizonlock_common::clock::SessionClock;
use horizonlock_common::error::{HorizonError, HorizonResult};
use horizonlock_model::{BaselineOrientation, FrameDimensions, VideoFrame};
use horizonlock_stab_core::{angle, BaselineCalibrator, TransformBuilder};
use horizonlock_warp_engine::FrameWarper;

use crate::angle_cell::AngleCell;

/// Lifecycle of one recording's stabilization context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No recording; the estimator still runs but nothing consumes it.
    Idle,
    /// Baseline capture in progress (transient, inside `start`).
    Calibrating,
    /// Frames are being warped.
    Active,
}

/// Counters for one recording.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    /// Frames warped and handed to the sink.
    pub frames_warped: u64,

    /// Frames dropped because warping failed.
    pub frames_dropped: u64,
}

impl SessionStats {
    /// Drop rate as a percentage.
    pub fn drop_rate(&self) -> f64 {
        let total = self.frames_warped + self.frames_dropped;
        if total == 0 {
            return 0.0;
        }
        self.frames_dropped as f64 / total as f64 * 100.0
    }
}

/// Per-recording state, created at `start` and discarded at `stop`.
#[derive(Debug)]
struct ActiveRecording {
    baseline: f64,
    orientation: BaselineOrientation,
    dims: FrameDimensions,
    clock: SessionClock,
    frames_warped: AtomicU64,
    frames_dropped: AtomicU64,
}

impl ActiveRecording {
    fn stats(&self) -> SessionStats {
        SessionStats {
            frames_warped: self.frames_warped.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    recording: Option<ActiveRecording>,
}

/// Orchestrates estimation, calibration, and warping for one recording
/// at a time.
///
/// Control calls (`start`/`stop`) and the frame path may run on
/// different threads: the baseline lives under an `RwLock`, written
/// once at `start` and read per frame, and `stop` acquires the write
/// lock so an in-flight warp drains before the baseline is freed.
#[derive(Debug)]
pub struct StabilizationSession {
    angle: Arc<AngleCell>,
    inner: RwLock<Inner>,
}

impl StabilizationSession {
    /// Create a session reading tilt estimates from the given cell.
    pub fn new(angle: Arc<AngleCell>) -> Self {
        Self {
            angle,
            inner: RwLock::new(Inner {
                state: SessionState::Idle,
                recording: None,
            }),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.inner.read().expect("session lock poisoned").state
    }

    /// The shared angle cell this session reads from.
    pub fn angle_cell(&self) -> Arc<AngleCell> {
        self.angle.clone()
    }

    /// Start a recording: capture the baseline from the current tilt
    /// estimate and begin accepting frames.
    ///
    /// Rejected without any state change when a recording is already
    /// in progress; the originally captured baseline survives.
    pub fn start(
        &self,
        orientation: BaselineOrientation,
        dims: FrameDimensions,
    ) -> HorizonResult<()> {
        let mut inner = self.inner.write().expect("session lock poisoned");
        if inner.state != SessionState::Idle {
            return Err(HorizonError::session("Session already started"));
        }

        inner.state = SessionState::Calibrating;
        let tilt = self.angle.load();
        let baseline = BaselineCalibrator::capture(tilt, orientation);

        tracing::info!(
            ?orientation,
            width = dims.width,
            height = dims.height,
            tilt_deg = tilt.to_degrees(),
            baseline_deg = baseline.to_degrees(),
            "Stabilization session started"
        );

        inner.recording = Some(ActiveRecording {
            baseline,
            orientation,
            dims,
            clock: SessionClock::start(),
            frames_warped: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
        });
        inner.state = SessionState::Active;
        Ok(())
    }

    /// Warp one frame against the current tilt estimate.
    ///
    /// The returned frame has the session's declared dimensions and
    /// carries the input frame's timestamp. Rejected while no
    /// recording is active; a frame that fails to warp counts as
    /// dropped and the error is returned for the caller to log.
    pub fn process_frame(&self, frame: &VideoFrame) -> HorizonResult<VideoFrame> {
        let inner = self.inner.read().expect("session lock poisoned");
        let recording = match (&inner.state, &inner.recording) {
            (SessionState::Active, Some(recording)) => recording,
            _ => return Err(HorizonError::session("No active recording")),
        };

        let effective = angle::difference(self.angle.load(), recording.baseline);
        let transform = TransformBuilder::build(effective, recording.dims, recording.orientation);

        match FrameWarper::warp(frame, &transform, recording.dims) {
            Ok(warped) => {
                recording.frames_warped.fetch_add(1, Ordering::Relaxed);
                Ok(warped)
            }
            Err(e) => {
                recording.frames_dropped.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Stop the recording, discarding baseline and per-session state.
    ///
    /// Waits for any in-flight `process_frame` to finish before the
    /// baseline is freed.
    pub fn stop(&self) -> HorizonResult<SessionStats> {
        let mut inner = self.inner.write().expect("session lock poisoned");
        if inner.state != SessionState::Active {
            return Err(HorizonError::session("Session not active"));
        }

        let recording = inner
            .recording
            .take()
            .ok_or_else(|| HorizonError::session("Active session missing recording state"))?;
        inner.state = SessionState::Idle;

        let stats = recording.stats();
        tracing::info!(
            duration_secs = recording.clock.elapsed_secs(),
            frames_warped = stats.frames_warped,
            frames_dropped = stats.frames_dropped,
            drop_rate_pct = stats.drop_rate(),
            "Stabilization session stopped"
        );
        Ok(stats)
    }

    /// Counters for the active recording, if any.
    pub fn stats(&self) -> Option<SessionStats> {
        let inner = self.inner.read().expect("session lock poisoned");
        inner.recording.as_ref().map(|r| r.stats())
    }

    /// The baseline captured at `start`, if a recording is active.
    pub fn baseline(&self) -> Option<f64> {
        let inner = self.inner.read().expect("session lock poisoned");
        inner.recording.as_ref().map(|r| r.baseline)
    }
}
