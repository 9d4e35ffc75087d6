//! Periodic FPS / camera reporting on a background thread.
//!
//! The frame loop publishes a cumulative [`FrameStats`] snapshot after every
//! rendered frame. The reporter wakes once per period, diffs the latest
//! snapshot against the previous one, and logs the result. It only ever
//! reads snapshots, so it cannot disturb playback or layout.

use std::{sync::mpsc, thread::JoinHandle, time::Duration};

use glam::Vec3;

use crate::error::AtomataError;

/// Cumulative frame counters plus the latest camera position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Frames rendered since startup.
    pub frames: u64,
    /// Total time spent inside the renderer since startup.
    pub render_time: Duration,
    /// Camera position at the last rendered frame.
    pub camera: Vec3,
}

/// One period's worth of activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Frames per second over the period.
    pub fps: f32,
    /// Milliseconds spent rendering during the period.
    pub render_ms: f32,
    /// Camera position at the end of the period.
    pub camera: Vec3,
}

impl Report {
    /// Activity between two snapshots taken `elapsed` apart, or `None` if no
    /// frame was rendered in between.
    #[must_use]
    pub fn between(
        previous: &FrameStats,
        latest: &FrameStats,
        elapsed: Duration,
    ) -> Option<Self> {
        let frames = latest.frames.checked_sub(previous.frames)?;
        if frames == 0 {
            return None;
        }
        let secs = elapsed.as_secs_f32();
        let fps = if secs > 0.0 { frames as f32 / secs } else { 0.0 };
        let render_ms = latest
            .render_time
            .saturating_sub(previous.render_time)
            .as_secs_f32()
            * 1000.0;
        Some(Self {
            fps,
            render_ms,
            camera: latest.camera,
        })
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} FPS, spent {:.1} ms rendering. <{:.2}, {:.2}, {:.2}>",
            self.fps,
            self.render_ms,
            self.camera.x,
            self.camera.y,
            self.camera.z
        )
    }
}

/// Background thread that logs a [`Report`] every period.
pub struct DiagnosticsReporter {
    stats: triple_buffer::Input<FrameStats>,
    shutdown_tx: mpsc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl DiagnosticsReporter {
    /// Spawn the reporter thread.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::ThreadSpawn`] if the thread fails to start.
    pub fn spawn(period: Duration) -> Result<Self, AtomataError> {
        let (input, output) =
            triple_buffer::triple_buffer(&FrameStats::default());
        let (shutdown_tx, shutdown_rx) = mpsc::channel();

        let thread = std::thread::Builder::new()
            .name("diagnostics".into())
            .spawn(move || Self::thread_loop(period, &shutdown_rx, output))
            .map_err(AtomataError::ThreadSpawn)?;

        Ok(Self {
            stats: input,
            shutdown_tx,
            thread: Some(thread),
        })
    }

    /// Hand the latest snapshot to the reporter (non-blocking).
    pub fn publish(&mut self, stats: FrameStats) {
        self.stats.write(stats);
    }

    /// Stop the reporter thread and wait for it to finish.
    pub fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }

    fn thread_loop(
        period: Duration,
        shutdown_rx: &mpsc::Receiver<()>,
        mut output: triple_buffer::Output<FrameStats>,
    ) {
        let mut previous = FrameStats::default();
        while let Err(mpsc::RecvTimeoutError::Timeout) =
            shutdown_rx.recv_timeout(period)
        {
            let _ = output.update();
            let latest = *output.output_buffer_mut();
            if let Some(report) = Report::between(&previous, &latest, period) {
                log::info!("{report}");
            }
            previous = latest;
        }
        log::debug!("Diagnostics reporter stopped");
    }
}

impl std::fmt::Debug for DiagnosticsReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsReporter")
            .field("running", &self.thread.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for DiagnosticsReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
