//! Per-trajectory playback state machine.
//!
//! A slot starts in [`SlotState::AwaitingData`], enters
//! [`SlotState::Exploding`] as soon as it has a [`CheckpointSequence`], and
//! settles into [`SlotState::Playing`], where it steps through every
//! checkpoint in order and loops forever.
//!
//! - Exploding interpolates from the compact layout to checkpoint "first"
//!   and reports a change on every tick until it lands.
//! - Playing shows checkpoints as discrete frames with no interpolation
//!   and reports a change only when the checkpoint index moves.

use std::{sync::Arc, time::Duration};

use glam::Vec3;

use super::{
    interpolation::{lerp_positions_into, InterpolationContext},
    EasingFunction,
};
use crate::{
    error::AtomataError,
    options::{CompactLayout, PlaybackOptions},
    trajectory::{CheckpointSequence, Topology},
};

/// Shortest checkpoint interval honored; smaller values are raised to this.
const MIN_CHECKPOINT_INTERVAL: Duration = Duration::from_millis(1);

/// Externally visible playback state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No topology or geometry yet.
    AwaitingData,
    /// One-time transition from the compact layout to the first checkpoint.
    Exploding,
    /// Steady-state cycling through checkpoints.
    Playing,
}

/// Timing and compact-layout settings, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotSettings {
    /// Length of the explosion transition.
    pub explosion_duration: Duration,
    /// Time each checkpoint stays on screen while playing.
    pub checkpoint_interval: Duration,
    /// Easing applied to explosion progress.
    pub easing: EasingFunction,
    /// Source of the explosion's starting positions.
    pub compact_layout: CompactLayout,
}

impl From<&PlaybackOptions> for SlotSettings {
    fn from(opts: &PlaybackOptions) -> Self {
        Self {
            explosion_duration: opts.explosion_duration(),
            checkpoint_interval: opts.checkpoint_interval(),
            easing: opts.explosion_easing,
            compact_layout: opts.compact_layout,
        }
    }
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self::from(&PlaybackOptions::default())
    }
}

/// World-space segment between two bonded atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondSegment {
    /// Position of the bond's first atom.
    pub start: Vec3,
    /// Position of the bond's second atom.
    pub end: Vec3,
}

/// Positions produced by one [`SlotAnimator::advance`] call.
#[derive(Debug, Clone, Copy)]
pub struct CurrentFrame<'a> {
    /// World-space atom centers, indexed like the topology's atoms.
    pub atoms: &'a [Vec3],
    /// World-space bond segments, indexed like the topology's bonds.
    pub bonds: &'a [BondSegment],
    /// Whether anything moved since the previous frame.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    AwaitingData,
    Exploding { elapsed: Duration },
    Playing { index: usize, accumulated: Duration },
}

/// Animates one trajectory at a fixed world offset.
#[derive(Debug, Clone)]
pub struct SlotAnimator {
    phase: Phase,
    offset: Vec3,
    settings: SlotSettings,
    sequence: Option<Arc<CheckpointSequence>>,
    /// Explosion start positions, in trajectory-local space.
    compact: Vec<Vec3>,
    atoms: Vec<Vec3>,
    bonds: Vec<BondSegment>,
}

impl SlotAnimator {
    /// Slot with no data yet; advancing it yields an empty, unchanged frame.
    #[must_use]
    pub fn awaiting(offset: Vec3, settings: SlotSettings) -> Self {
        Self {
            phase: Phase::AwaitingData,
            offset,
            settings,
            sequence: None,
            compact: Vec::new(),
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Slot that starts exploding immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::EmptyGeometry`] if the trajectory has no
    /// atoms.
    pub fn new(
        sequence: Arc<CheckpointSequence>,
        offset: Vec3,
        settings: SlotSettings,
    ) -> Result<Self, AtomataError> {
        let mut slot = Self::awaiting(offset, settings);
        slot.provide(sequence)?;
        Ok(slot)
    }

    /// Hand the slot its trajectory and (re)start the explosion.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::EmptyGeometry`] if the trajectory has no
    /// atoms; the slot is left unchanged.
    pub fn provide(
        &mut self,
        sequence: Arc<CheckpointSequence>,
    ) -> Result<(), AtomataError> {
        if sequence.topology().atom_count() == 0 {
            return Err(AtomataError::EmptyGeometry { slot: None });
        }

        self.compact = resolve_compact(&sequence, self.settings.compact_layout);
        self.sequence = Some(sequence);
        self.phase = Phase::Exploding {
            elapsed: Duration::ZERO,
        };
        self.write_explosion(0.0);
        Ok(())
    }

    /// Step the animation by `dt` and return the resulting frame.
    pub fn advance(&mut self, dt: Duration) -> CurrentFrame<'_> {
        let changed = match self.phase {
            Phase::AwaitingData => false,
            Phase::Exploding { elapsed } => self.step_explosion(elapsed + dt),
            Phase::Playing { index, accumulated } => {
                self.step_playback(index, accumulated + dt)
            }
        };
        self.frame(changed)
    }

    /// Current positions without advancing time.
    #[must_use]
    pub fn current_frame(&self) -> CurrentFrame<'_> {
        self.frame(false)
    }

    /// Playback state.
    #[must_use]
    pub fn state(&self) -> SlotState {
        match self.phase {
            Phase::AwaitingData => SlotState::AwaitingData,
            Phase::Exploding { .. } => SlotState::Exploding,
            Phase::Playing { .. } => SlotState::Playing,
        }
    }

    /// Index of the checkpoint on screen while playing.
    #[must_use]
    pub fn checkpoint_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Playing { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Raw explosion progress: 0 before data arrives, 1 once playing.
    #[must_use]
    pub fn explosion_progress(&self) -> f32 {
        match self.phase {
            Phase::AwaitingData => 0.0,
            Phase::Exploding { elapsed } => self.explosion_t(elapsed),
            Phase::Playing { .. } => 1.0,
        }
    }

    /// World offset assigned by the layout.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Trajectory being played, once provided.
    #[must_use]
    pub fn sequence(&self) -> Option<&Arc<CheckpointSequence>> {
        self.sequence.as_ref()
    }

    /// Topology of the trajectory being played, once provided.
    #[must_use]
    pub fn topology(&self) -> Option<&Topology> {
        self.sequence.as_deref().map(CheckpointSequence::topology)
    }

    fn frame(&self, changed: bool) -> CurrentFrame<'_> {
        CurrentFrame {
            atoms: &self.atoms,
            bonds: &self.bonds,
            changed,
        }
    }

    fn explosion_t(&self, elapsed: Duration) -> f32 {
        let duration = self.settings.explosion_duration;
        if elapsed >= duration {
            return 1.0;
        }
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0) as f32
    }

    /// Returns true: every explosion tick moves the atoms.
    fn step_explosion(&mut self, elapsed: Duration) -> bool {
        if elapsed >= self.settings.explosion_duration {
            self.phase = Phase::Playing {
                index: 0,
                accumulated: Duration::ZERO,
            };
            self.write_checkpoint(0);
            log::debug!("slot at {} finished exploding", self.offset);
            return true;
        }

        self.phase = Phase::Exploding { elapsed };
        self.write_explosion(self.explosion_t(elapsed));
        true
    }

    fn step_playback(&mut self, index: usize, accumulated: Duration) -> bool {
        let count = self.sequence.as_ref().map_or(1, |s| s.len());
        let interval = self
            .settings
            .checkpoint_interval
            .max(MIN_CHECKPOINT_INTERVAL)
            .as_nanos();

        let elapsed = accumulated.as_nanos();
        let steps = elapsed / interval;
        let remainder = u64::try_from(elapsed % interval)
            .map_or(Duration::ZERO, Duration::from_nanos);
        let next = (index + (steps % count as u128) as usize) % count;

        self.phase = Phase::Playing {
            index: next,
            accumulated: remainder,
        };

        if next == index {
            return false;
        }
        self.write_checkpoint(next);
        true
    }

    fn write_explosion(&mut self, raw_t: f32) {
        let Some(sequence) = self.sequence.as_ref() else {
            return;
        };
        let ctx = InterpolationContext::eased(raw_t, self.settings.easing);
        lerp_positions_into(
            &ctx,
            &self.compact,
            &sequence.first().positions,
            self.offset,
            &mut self.atoms,
        );
        self.refresh_bonds();
    }

    fn write_checkpoint(&mut self, index: usize) {
        let Some(checkpoint) =
            self.sequence.as_ref().and_then(|s| s.checkpoint(index))
        else {
            return;
        };
        let offset = self.offset;
        self.atoms.clear();
        self.atoms
            .extend(checkpoint.positions.iter().map(|&p| p + offset));
        self.refresh_bonds();
    }

    fn refresh_bonds(&mut self) {
        let Some(sequence) = self.sequence.as_ref() else {
            return;
        };
        let atoms = &self.atoms;
        self.bonds.clear();
        self.bonds.extend(sequence.topology().bonds.iter().map(|bond| {
            BondSegment {
                start: atoms[bond.a],
                end: atoms[bond.b],
            }
        }));
    }
}

/// Explosion start positions for `sequence` under `mode`.
fn resolve_compact(
    sequence: &CheckpointSequence,
    mode: CompactLayout,
) -> Vec<Vec3> {
    let first = sequence.first();
    match mode {
        CompactLayout::Provided => {
            if let Some(compact) = sequence.compact() {
                compact.positions.clone()
            } else {
                log::debug!(
                    "no compact layout supplied; exploding from the first \
                     checkpoint"
                );
                first.positions.clone()
            }
        }
        CompactLayout::FirstCheckpoint => first.positions.clone(),
        CompactLayout::Collapsed => {
            vec![first.centroid(); first.positions.len()]
        }
    }
}
