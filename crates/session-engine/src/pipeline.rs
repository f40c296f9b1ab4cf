//! Channel-based wiring of the sensor and frame producers.
//!
//! The gravity sensor (~60 Hz) and the video source (24-60 Hz) are
//! independent producers at uncorrelated rates. Each feeds the engine
//! through its own mpsc channel and is consumed by its own task, which
//! keeps the estimator and the warper independently testable and free
//! of shared callback state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use horizonlock_common::clock::RateGate;
use horizonlock_common::config::StabilizationDefaults;
use horizonlock_common::error::HorizonResult;
use horizonlock_model::{GravitySample, VideoFrame};
use horizonlock_stab_core::OrientationEstimator;

use crate::session::{SessionState, StabilizationSession};

/// Destination for stabilized frames — the external encoder/writer
/// boundary.
#[async_trait]
pub trait FrameSink: Send {
    /// Accept one output frame. Timestamps arrive exactly as captured.
    async fn submit(&mut self, frame: VideoFrame) -> HorizonResult<()>;
}

/// The running stabilization pipeline: a sensor task feeding the angle
/// cell and a frame task pulling frames through the session.
pub struct StabilizationPipeline {
    stop_flag: Arc<AtomicBool>,
    sensor_task: JoinHandle<u64>,
    frame_task: JoinHandle<u64>,
}

impl StabilizationPipeline {
    /// Spawn the pipeline tasks.
    ///
    /// The sensor task owns the estimator outright and publishes each
    /// updated angle through the session's atomic cell; the frame task
    /// reads the cell indirectly via `process_frame`. Closing both
    /// input channels shuts the pipeline down.
    pub fn spawn(
        config: &StabilizationDefaults,
        session: Arc<StabilizationSession>,
        gravity_rx: mpsc::Receiver<GravitySample>,
        frame_rx: mpsc::Receiver<VideoFrame>,
        sink: impl FrameSink + 'static,
    ) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));

        let sensor_task = tokio::spawn(run_sensor_loop(
            OrientationEstimator::new(config.smoothing_factor),
            RateGate::new(config.sensor_rate_hz),
            session.clone(),
            gravity_rx,
            stop_flag.clone(),
        ));

        let frame_task = tokio::spawn(run_frame_loop(
            session,
            frame_rx,
            sink,
            stop_flag.clone(),
        ));

        Self {
            stop_flag,
            sensor_task,
            frame_task,
        }
    }

    /// Get a clone of the stop flag for use by a session controller.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Request shutdown and wait for both tasks to drain.
    ///
    /// Returns `(samples_ingested, frames_forwarded)`.
    pub async fn join(self) -> HorizonResult<(u64, u64)> {
        self.stop_flag.store(true, Ordering::SeqCst);

        let samples = match self.sensor_task.await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "Sensor task join failed");
                0
            }
        };
        let frames = match self.frame_task.await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "Frame task join failed");
                0
            }
        };
        Ok((samples, frames))
    }
}

/// Ingest gravity samples until the channel closes or the stop flag is
/// set. Returns the number of samples folded into the estimate.
async fn run_sensor_loop(
    mut estimator: OrientationEstimator,
    mut gate: RateGate,
    session: Arc<StabilizationSession>,
    mut gravity_rx: mpsc::Receiver<GravitySample>,
    stop_flag: Arc<AtomicBool>,
) -> u64 {
    let cell = session.angle_cell();
    let mut ingested = 0u64;

    while let Some(sample) = gravity_rx.recv().await {
        if stop_flag.load(Ordering::Relaxed) {
            break;
        }
        if !gate.should_pass(sample.timestamp_ns) {
            continue;
        }
        let angle = estimator.ingest(&sample);
        cell.store(angle);
        ingested += 1;
    }

    tracing::debug!(ingested, "Sensor loop finished");
    ingested
}

/// Pull frames through the session until the channel closes or the
/// stop flag is set. Returns the number of frames forwarded to the
/// sink.
///
/// Frames that arrive while no recording is active are forwarded
/// unwarped; a frame the warper rejects is dropped with a warning and
/// the loop continues — one lost frame is a visual skip, not
/// corruption.
async fn run_frame_loop(
    session: Arc<StabilizationSession>,
    mut frame_rx: mpsc::Receiver<VideoFrame>,
    mut sink: impl FrameSink,
    stop_flag: Arc<AtomicBool>,
) -> u64 {
    let mut forwarded = 0u64;

    while let Some(frame) = frame_rx.recv().await {
        if stop_flag.load(Ordering::Relaxed) {
            break;
        }

        let output = if session.state() == SessionState::Active {
            match session.process_frame(&frame) {
                Ok(warped) => warped,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        timestamp_ns = frame.timestamp_ns,
                        "Dropping frame that failed to warp"
                    );
                    continue;
                }
            }
        } else {
            frame
        };

        if let Err(e) = sink.submit(output).await {
            tracing::warn!(error = %e, "Frame sink rejected output frame");
            continue;
        }
        forwarded += 1;
    }

    tracing::debug!(forwarded, "Frame loop finished");
    forwarded
}
