//! Frame-loop facade over layout, playback, and diagnostics.

use std::{sync::Arc, time::Duration};

use glam::Vec3;

use crate::{
    coordinator::LayoutCoordinator,
    diagnostics::{DiagnosticsReporter, FrameStats},
    error::AtomataError,
    options::Options,
    render::{Renderer, TransformSink},
    trajectory::CheckpointSequence,
};

/// Everything the frame loop needs, built once at startup.
///
/// Whatever drives frames holds the session by `&mut` and calls
/// [`animate`](Self::animate) then [`render`](Self::render) each tick.
#[derive(Debug)]
pub struct Session {
    coordinator: LayoutCoordinator,
    reporter: Option<DiagnosticsReporter>,
    stats: FrameStats,
    needs_redraw: bool,
    outlines_published: bool,
}

impl Session {
    /// Lay out the trajectories and start diagnostics (if enabled).
    ///
    /// # Errors
    ///
    /// Propagates layout errors from [`LayoutCoordinator::new`], and
    /// [`AtomataError::ThreadSpawn`] if the reporter cannot start.
    pub fn new(
        sequences: Vec<CheckpointSequence>,
        options: &Options,
    ) -> Result<Self, AtomataError> {
        let sequences = sequences.into_iter().map(Arc::new).collect();
        let coordinator = LayoutCoordinator::new(sequences, options)?;

        let reporter = if options.diagnostics.report_fps {
            Some(DiagnosticsReporter::spawn(options.diagnostics.period())?)
        } else {
            None
        };

        let stats = FrameStats {
            camera: default_camera(&coordinator),
            ..FrameStats::default()
        };
        Ok(Self {
            coordinator,
            reporter,
            stats,
            needs_redraw: true,
            outlines_published: false,
        })
    }

    /// Advance playback by `dt`, publishing changed slots to `sink`.
    ///
    /// The first call also hands the slot outlines to the sink.
    /// Returns true if any slot moved.
    pub fn animate(
        &mut self,
        dt: Duration,
        sink: &mut impl TransformSink,
    ) -> bool {
        if !self.outlines_published {
            sink.publish_outlines(&self.coordinator.outline_instances());
            self.outlines_published = true;
        }
        let changed = self.coordinator.advance(dt, sink);
        self.needs_redraw |= changed;
        changed
    }

    /// Draw a frame unless nothing moved and the camera is still.
    ///
    /// Returns true if the renderer was called.
    pub fn render(
        &mut self,
        camera_moving: bool,
        renderer: &mut impl Renderer,
    ) -> bool {
        if !self.needs_redraw && !camera_moving {
            return false;
        }
        let spent = renderer.render();
        self.needs_redraw = false;

        self.stats.frames += 1;
        self.stats.render_time += spent;
        if let Some(reporter) = &mut self.reporter {
            reporter.publish(self.stats);
        }
        true
    }

    /// Force the next [`render`](Self::render) to draw, e.g. after the
    /// window was resized.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Record where the camera is, for diagnostics.
    pub fn set_camera(&mut self, position: Vec3) {
        self.stats.camera = position;
    }

    /// The layout coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &LayoutCoordinator {
        &self.coordinator
    }

    /// Cumulative frame statistics.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

/// Default camera spot: straight back from the scene center along +Z.
fn default_camera(coordinator: &LayoutCoordinator) -> Vec3 {
    let extent = coordinator
        .bounding_volumes()
        .iter()
        .map(|b| b.size().max_element())
        .fold(0.0_f32, f32::max);
    coordinator.world_center() + Vec3::Z * extent * 2.0
}
