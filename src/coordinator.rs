//! Startup layout of every trajectory and per-frame slot stepping.

use std::{sync::Arc, time::Duration};

use glam::{Mat4, Vec3};

use crate::{
    animation::{SlotAnimator, SlotSettings},
    error::AtomataError,
    layout::{BoundingVolume, LayoutSeparator, OffsetTable},
    options::{ColorOptions, DisplayOptions, Options},
    render::{InstanceRaw, SlotTransforms, TransformSink},
    trajectory::CheckpointSequence,
};

/// One placed slot: its animator, its world-space region, and a reusable
/// instance buffer.
#[derive(Debug)]
pub struct Slot {
    animator: SlotAnimator,
    bounds: BoundingVolume,
    transforms: SlotTransforms,
}

impl Slot {
    /// The slot's animator.
    #[must_use]
    pub fn animator(&self) -> &SlotAnimator {
        &self.animator
    }

    /// World-space region reserved for this slot.
    #[must_use]
    pub fn bounds(&self) -> BoundingVolume {
        self.bounds
    }

    /// Instances most recently packed for this slot.
    #[must_use]
    pub fn transforms(&self) -> &SlotTransforms {
        &self.transforms
    }
}

/// Lays out every trajectory once and drives their animators each frame.
#[derive(Debug)]
pub struct LayoutCoordinator {
    slots: Vec<Slot>,
    display: DisplayOptions,
    colors: ColorOptions,
}

impl LayoutCoordinator {
    /// Place every trajectory and build one animator per slot.
    ///
    /// - With `layout.show_one_slot`, only the first trajectory is used and
    ///   it sits at the origin.
    /// - Trajectories beyond what the offset table can place are dropped
    ///   with a warning.
    /// - Trajectories with no atoms are dropped with an error log; the rest
    ///   are still laid out.
    ///
    /// # Errors
    ///
    /// - [`AtomataError::EmptyGeometry`] if no usable trajectory remains.
    /// - [`AtomataError::LayoutNonConvergence`] if the separator cannot pull
    ///   the regions apart.
    pub fn new(
        sequences: Vec<Arc<CheckpointSequence>>,
        options: &Options,
    ) -> Result<Self, AtomataError> {
        Self::with_separator(
            sequences,
            options,
            &LayoutSeparator::new(
                OffsetTable::default(),
                options.layout.max_rounds,
            ),
        )
    }

    /// Like [`new`](Self::new), with an explicit separator.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_separator(
        mut sequences: Vec<Arc<CheckpointSequence>>,
        options: &Options,
        separator: &LayoutSeparator,
    ) -> Result<Self, AtomataError> {
        let capacity = if options.layout.show_one_slot {
            1
        } else {
            separator.table().max_slots()
        };
        if sequences.len() > capacity {
            log::warn!(
                "{}; placing only the first {capacity}",
                AtomataError::LayoutCapacityExceeded {
                    requested: sequences.len(),
                    supported: capacity,
                }
            );
            sequences.truncate(capacity);
        }

        let placeable = bounded_sequences(sequences);
        if placeable.is_empty() {
            return Err(AtomataError::EmptyGeometry { slot: None });
        }

        let volumes: Vec<BoundingVolume> =
            placeable.iter().map(|(_, bounds)| *bounds).collect();
        log::info!("Separating {} bounding volumes", volumes.len());
        let offsets = separator.separate(&volumes)?;

        let settings = SlotSettings::from(&options.playback);
        let mut slots = Vec::with_capacity(placeable.len());
        for ((sequence, bounds), offset) in placeable.into_iter().zip(offsets)
        {
            match SlotAnimator::new(sequence, offset, settings) {
                Ok(animator) => slots.push(Slot {
                    animator,
                    bounds: bounds.translated(offset),
                    transforms: SlotTransforms::default(),
                }),
                Err(e) => log::error!("Dropping slot at {offset}: {e}"),
            }
        }
        if slots.is_empty() {
            return Err(AtomataError::EmptyGeometry { slot: None });
        }

        log::info!("Placed {} trajectory slots", slots.len());
        Ok(Self {
            slots,
            display: options.display.clone(),
            colors: options.colors.clone(),
        })
    }

    /// Advance every slot by `dt`, publishing instances for slots whose
    /// frame changed.
    ///
    /// Returns true if any slot changed.
    pub fn advance(
        &mut self,
        dt: Duration,
        sink: &mut impl TransformSink,
    ) -> bool {
        let mut any_changed = false;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let sequence = slot.animator.sequence().cloned();
            let frame = slot.animator.advance(dt);
            if !frame.changed {
                continue;
            }
            any_changed = true;
            let Some(sequence) = sequence else {
                continue;
            };
            slot.transforms.refill(
                &frame,
                sequence.topology(),
                &self.display,
                &self.colors,
            );
            sink.publish(i, &slot.transforms);
        }
        any_changed
    }

    /// Placed slots, in layout order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// World-space regions of every slot.
    #[must_use]
    pub fn bounding_volumes(&self) -> Vec<BoundingVolume> {
        self.slots.iter().map(|s| s.bounds).collect()
    }

    /// Unit-cube transforms outlining each slot's region; empty when
    /// outlines are disabled.
    #[must_use]
    pub fn outline_transforms(&self) -> Vec<Mat4> {
        if !self.display.show_bounding_boxes {
            return Vec::new();
        }
        self.slots
            .iter()
            .map(|s| s.bounds.outline_transform())
            .collect()
    }

    /// [`outline_transforms`](Self::outline_transforms) packed as
    /// instances in the outline color.
    #[must_use]
    pub fn outline_instances(&self) -> Vec<InstanceRaw> {
        self.outline_transforms()
            .into_iter()
            .map(|m| InstanceRaw::new(m, self.colors.outline))
            .collect()
    }

    /// Center of everything placed, a reasonable camera target.
    #[must_use]
    pub fn world_center(&self) -> Vec3 {
        self.slots
            .iter()
            .map(|s| s.bounds)
            .reduce(|a, b| {
                BoundingVolume::new(a.min().min(b.min()), a.max().max(b.max()))
            })
            .map_or(Vec3::ZERO, |b| b.center())
    }
}

/// Pair each sequence with its bounding volume, dropping (and logging)
/// those without geometry.
fn bounded_sequences(
    sequences: Vec<Arc<CheckpointSequence>>,
) -> Vec<(Arc<CheckpointSequence>, BoundingVolume)> {
    sequences
        .into_iter()
        .enumerate()
        .filter_map(|(i, seq)| match seq.bounding_volume() {
            Ok(bounds) => Some((seq, bounds)),
            Err(_) => {
                log::error!(
                    "{}; skipping it",
                    AtomataError::EmptyGeometry { slot: Some(i) }
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animation::SlotState,
        trajectory::{test_support::chain, Checkpoint, Topology},
    };

    #[derive(Default)]
    struct RecordingSink {
        published: Vec<(usize, usize)>,
    }

    impl TransformSink for RecordingSink {
        fn publish(&mut self, slot: usize, transforms: &SlotTransforms) {
            self.published.push((slot, transforms.atoms.len()));
        }
    }

    fn options() -> Options {
        let mut opts = Options::default();
        opts.playback.explosion_ms = 100;
        opts.playback.checkpoint_interval_ms = 50;
        opts
    }

    fn overlapping(n: usize) -> Vec<Arc<CheckpointSequence>> {
        (0..n).map(|_| Arc::new(chain(5, &[0.0, 1.0, 2.0]))).collect()
    }

    fn empty_sequence() -> Arc<CheckpointSequence> {
        Arc::new(
            CheckpointSequence::new(
                Topology::default(),
                None,
                vec![Checkpoint::default()],
            )
            .unwrap(),
        )
    }

    fn assert_disjoint(coordinator: &LayoutCoordinator) {
        let volumes = coordinator.bounding_volumes();
        for j in 0..volumes.len() {
            for k in (j + 1)..volumes.len() {
                assert!(!volumes[j].intersects(&volumes[k]));
            }
        }
    }

    #[test]
    fn places_every_slot_without_overlap() {
        for n in 1..=5 {
            let coordinator =
                LayoutCoordinator::new(overlapping(n), &options()).unwrap();
            assert_eq!(coordinator.slots().len(), n);
            assert_disjoint(&coordinator);
        }
    }

    #[test]
    fn single_slot_sits_at_origin() {
        let coordinator =
            LayoutCoordinator::new(overlapping(1), &options()).unwrap();
        assert_eq!(coordinator.slots()[0].animator().offset(), Vec3::ZERO);
    }

    #[test]
    fn show_one_slot_keeps_only_the_first() {
        let mut opts = options();
        opts.layout.show_one_slot = true;
        let coordinator =
            LayoutCoordinator::new(overlapping(4), &opts).unwrap();

        assert_eq!(coordinator.slots().len(), 1);
        assert_eq!(coordinator.slots()[0].animator().offset(), Vec3::ZERO);
    }

    #[test]
    fn excess_trajectories_are_truncated() {
        let coordinator =
            LayoutCoordinator::new(overlapping(7), &options()).unwrap();
        assert_eq!(coordinator.slots().len(), 5);
        assert_disjoint(&coordinator);
    }

    #[test]
    fn empty_trajectory_is_isolated() {
        let mut sequences = overlapping(2);
        sequences.insert(1, empty_sequence());
        let mut coordinator =
            LayoutCoordinator::new(sequences, &options()).unwrap();

        assert_eq!(coordinator.slots().len(), 2);
        assert_disjoint(&coordinator);

        let mut sink = RecordingSink::default();
        assert!(coordinator.advance(Duration::from_millis(10), &mut sink));
        assert_eq!(sink.published, vec![(0, 5), (1, 5)]);
    }

    #[test]
    fn only_empty_trajectories_fail() {
        let result =
            LayoutCoordinator::new(vec![empty_sequence()], &options());
        assert!(matches!(result, Err(AtomataError::EmptyGeometry { .. })));
    }

    #[test]
    fn advance_publishes_only_changed_slots() {
        let sequences = vec![
            Arc::new(chain(3, &[0.0, 1.0])),
            Arc::new(chain(4, &[0.0])),
        ];
        let mut coordinator =
            LayoutCoordinator::new(sequences, &options()).unwrap();
        let mut sink = RecordingSink::default();

        // Finish the explosion: both slots change.
        assert!(coordinator.advance(Duration::from_millis(100), &mut sink));
        assert_eq!(sink.published, vec![(0, 3), (1, 4)]);
        for slot in coordinator.slots() {
            assert_eq!(slot.animator().state(), SlotState::Playing);
        }

        // Mid-interval tick: nothing moves.
        sink.published.clear();
        assert!(!coordinator.advance(Duration::from_millis(20), &mut sink));
        assert!(sink.published.is_empty());

        // Interval crossed: only the two-checkpoint slot steps.
        assert!(coordinator.advance(Duration::from_millis(30), &mut sink));
        assert_eq!(sink.published, vec![(0, 3)]);
    }

    #[test]
    fn outlines_follow_display_toggle() {
        let mut opts = options();
        let coordinator =
            LayoutCoordinator::new(overlapping(3), &opts).unwrap();
        assert_eq!(coordinator.outline_transforms().len(), 3);

        opts.display.show_bounding_boxes = false;
        let coordinator =
            LayoutCoordinator::new(overlapping(3), &opts).unwrap();
        assert!(coordinator.outline_transforms().is_empty());
    }

    #[test]
    fn outline_instances_use_outline_color() {
        let mut opts = options();
        opts.colors.outline = [0.2, 0.4, 0.6];
        let coordinator =
            LayoutCoordinator::new(overlapping(3), &opts).unwrap();

        let outlines = coordinator.outline_instances();
        assert_eq!(outlines.len(), 3);
        for (instance, transform) in
            outlines.iter().zip(coordinator.outline_transforms())
        {
            assert_eq!(instance.color, [0.2, 0.4, 0.6, 1.0]);
            assert_eq!(instance.matrix(), transform);
        }
    }

    #[test]
    fn published_atoms_sit_inside_slot_bounds() {
        let mut coordinator =
            LayoutCoordinator::new(overlapping(3), &options()).unwrap();
        let mut sink = RecordingSink::default();
        let _ = coordinator.advance(Duration::from_millis(100), &mut sink);

        for slot in coordinator.slots() {
            let bounds = slot.bounds();
            for instance in &slot.transforms().atoms {
                let center = instance.matrix().transform_point3(Vec3::ZERO);
                assert!(center.cmpge(bounds.min() - 1e-4).all());
                assert!(center.cmple(bounds.max() + 1e-4).all());
            }
        }
    }
}
