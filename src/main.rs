//! Headless playback driver.
//!
//! Usage: `atomata [OPTIONS.toml] [TRAJECTORY_DIR]`
//!
//! Loads trajectories (falling back to the demo fixture), lays them out,
//! and runs the frame loop for a fixed wall-clock span against a renderer
//! that only tallies instances. Logging is controlled by `RUST_LOG`.

use std::{path::PathBuf, process::ExitCode, time::Duration};

use atomata::{
    error::AtomataError,
    options::Options,
    render::{InstanceRaw, Renderer, SlotTransforms, TransformSink},
    session::Session,
    trajectory::{
        load_with_fallback, CheckpointSequence, DirectorySource,
        FixtureSource, TrajectorySource,
    },
    util::frame_timing::FrameTiming,
};
use web_time::Instant;

const TARGET_FPS: u32 = 60;
const RUN_FOR: Duration = Duration::from_secs(10);

/// Stand-in for a GPU renderer: remembers instance counts per slot.
#[derive(Default)]
struct TallyRenderer {
    instances: Vec<(usize, usize)>,
    outlines: usize,
}

impl TransformSink for TallyRenderer {
    fn publish(&mut self, slot: usize, transforms: &SlotTransforms) {
        if self.instances.len() <= slot {
            self.instances.resize(slot + 1, (0, 0));
        }
        self.instances[slot] =
            (transforms.atoms.len(), transforms.bonds.len());
    }

    fn publish_outlines(&mut self, outlines: &[InstanceRaw]) {
        self.outlines = outlines.len();
    }
}

impl Renderer for TallyRenderer {
    fn render(&mut self) -> Duration {
        let start = Instant::now();
        for (slot, (atoms, bonds)) in self.instances.iter().enumerate() {
            log::trace!("slot {slot}: {atoms} atoms, {bonds} bonds");
        }
        log::trace!("{} slot outlines", self.outlines);
        start.elapsed()
    }
}

fn load_options(path: Option<PathBuf>) -> Options {
    let Some(path) = path else {
        return Options::default();
    };
    match Options::load(&path) {
        Ok(options) => {
            log::info!("Loaded options from {}", path.display());
            options
        }
        Err(e) => {
            log::warn!(
                "Ignoring options file {}: {e}; using defaults",
                path.display()
            );
            Options::default()
        }
    }
}

/// Start a session, retrying once with the demo fixture when the loaded
/// data is unusable but a layout is still possible.
fn start_session(
    sequences: Vec<CheckpointSequence>,
    options: &Options,
) -> Result<Session, AtomataError> {
    match Session::new(sequences, options) {
        Err(e) if !e.is_fatal_to_session() => {
            log::warn!("{e}; using demo protein");
            let fallback =
                FixtureSource::new(&options.source.fallback_fixture).load()?;
            Session::new(fallback, options)
        }
        result => result,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut options = load_options(args.next().map(PathBuf::from));
    if let Some(dir) = args.next() {
        options.source.trajectory_dir = Some(PathBuf::from(dir));
    }

    let fallback = options.source.fallback_fixture.clone();
    let loaded = match &options.source.trajectory_dir {
        Some(dir) => {
            load_with_fallback(&mut DirectorySource::new(dir), &fallback)
        }
        None => FixtureSource::new(&fallback).load(),
    };
    let sequences = match loaded {
        Ok(sequences) => sequences,
        Err(e) => {
            log::error!("No trajectory data: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = match start_session(sequences, &options) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to start session: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut renderer = TallyRenderer::default();
    let mut timing = FrameTiming::new(TARGET_FPS);
    let started = Instant::now();
    let mut dt = Duration::ZERO;

    while started.elapsed() < RUN_FOR {
        let _ = session.animate(dt, &mut renderer);
        let _ = session.render(false, &mut renderer);

        std::thread::sleep(timing.time_until_next_frame());
        dt = timing.end_frame();
    }

    let stats = session.stats();
    log::info!(
        "Done: {} frames drawn, loop ran at {:.1} FPS",
        stats.frames,
        timing.fps()
    );
    ExitCode::SUCCESS
}
