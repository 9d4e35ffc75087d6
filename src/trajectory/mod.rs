//! Trajectory data: fixed topology plus an ordered run of checkpoints.
//!
//! A [`CheckpointSequence`] is produced once by a [`TrajectorySource`] and
//! then shared read-only with the slot animator that plays it.

mod fixture;
mod source;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use fixture::TrajectoryFixture;
pub use source::{
    load_with_fallback, DirectorySource, FixtureSource, TrajectorySource,
};

use crate::{error::AtomataError, layout::BoundingVolume};

/// One atom of a topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// Element or atom-type label, used for coloring (e.g. `"C"`, `"N"`).
    pub kind: String,
}

/// A bond between two atoms, by index into the topology's atom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Bond {
    /// First atom index.
    pub a: usize,
    /// Second atom index.
    pub b: usize,
}

impl From<[usize; 2]> for Bond {
    fn from([a, b]: [usize; 2]) -> Self {
        Self { a, b }
    }
}

impl From<Bond> for [usize; 2] {
    fn from(bond: Bond) -> Self {
        [bond.a, bond.b]
    }
}

/// Atom/bond structure shared by every checkpoint of a trajectory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    /// Atoms, in checkpoint position order.
    pub atoms: Vec<Atom>,
    /// Bonds referencing `atoms`.
    pub bonds: Vec<Bond>,
}

impl Topology {
    /// Number of atoms.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Check that every bond references an existing atom.
    fn validate(&self) -> Result<(), AtomataError> {
        let n = self.atoms.len();
        if let Some((i, bond)) =
            self.bonds.iter().enumerate().find(|(_, b)| b.a >= n || b.b >= n)
        {
            return Err(AtomataError::InvalidTrajectory(format!(
                "bond {i} ({}, {}) references a missing atom ({n} atoms)",
                bond.a, bond.b
            )));
        }
        Ok(())
    }
}

/// Positions of every atom at one instant of simulated time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Checkpoint {
    /// One position per topology atom.
    pub positions: Vec<Vec3>,
}

impl Checkpoint {
    /// Checkpoint from per-atom positions.
    #[must_use]
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    /// Mean atom position, or the origin for an empty checkpoint.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().copied().sum::<Vec3>()
            / self.positions.len() as f32
    }
}

/// A trajectory's topology, its recorded checkpoints, and an optional
/// separately supplied compact layout.
///
/// Invariants, checked by [`CheckpointSequence::new`]:
/// - at least one checkpoint;
/// - every checkpoint (and the compact layout) holds exactly one position
///   per atom;
/// - every bond references an existing atom.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointSequence {
    topology: Topology,
    compact: Option<Checkpoint>,
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointSequence {
    /// Validate and assemble a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::InvalidTrajectory`] if any invariant listed
    /// on the type is violated.
    pub fn new(
        topology: Topology,
        compact: Option<Checkpoint>,
        checkpoints: Vec<Checkpoint>,
    ) -> Result<Self, AtomataError> {
        if checkpoints.is_empty() {
            return Err(AtomataError::InvalidTrajectory(
                "trajectory has no checkpoints".to_owned(),
            ));
        }
        topology.validate()?;

        let atoms = topology.atom_count();
        for (i, checkpoint) in checkpoints.iter().enumerate() {
            if checkpoint.positions.len() != atoms {
                return Err(AtomataError::InvalidTrajectory(format!(
                    "checkpoint {i} has {} positions for {atoms} atoms",
                    checkpoint.positions.len()
                )));
            }
        }
        if let Some(compact) = &compact {
            if compact.positions.len() != atoms {
                return Err(AtomataError::InvalidTrajectory(format!(
                    "compact layout has {} positions for {atoms} atoms",
                    compact.positions.len()
                )));
            }
        }

        Ok(Self {
            topology,
            compact,
            checkpoints,
        })
    }

    /// Atom/bond structure.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Number of recorded checkpoints (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Always false; kept alongside [`len`](Self::len) for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Checkpoint at `index`, if in range.
    #[must_use]
    pub fn checkpoint(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    /// First recorded checkpoint (the explosion target).
    #[must_use]
    pub fn first(&self) -> &Checkpoint {
        &self.checkpoints[0]
    }

    /// Separately supplied compact layout, if the source had one.
    #[must_use]
    pub fn compact(&self) -> Option<&Checkpoint> {
        self.compact.as_ref()
    }

    /// Box enclosing every position of every checkpoint and the compact
    /// layout, so the slot's region covers the whole animation.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::EmptyGeometry`] for a trajectory with no
    /// atoms.
    pub fn bounding_volume(&self) -> Result<BoundingVolume, AtomataError> {
        let all = self
            .checkpoints
            .iter()
            .chain(self.compact.iter())
            .flat_map(|c| c.positions.iter());
        BoundingVolume::from_points(all)
    }
}
