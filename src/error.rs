//! Crate-level error types.

use std::fmt;

/// Errors produced by the atomata crate.
#[derive(Debug)]
pub enum AtomataError {
    /// More trajectories were supplied than the offset table can place.
    LayoutCapacityExceeded {
        /// Number of slots that were requested.
        requested: usize,
        /// Largest slot count the offset table supports.
        supported: usize,
    },
    /// The separator hit its round cap without pulling every volume apart.
    LayoutNonConvergence {
        /// Number of expansion rounds that were attempted.
        rounds: u32,
    },
    /// A trajectory has no atoms, so it has no extent and cannot animate.
    EmptyGeometry {
        /// Slot index of the offending trajectory, when known.
        slot: Option<usize>,
    },
    /// Checkpoint data could not be obtained from a trajectory source.
    DataUnavailable(String),
    /// Trajectory data is structurally inconsistent.
    InvalidTrajectory(String),
    /// Trajectory fixture could not be decoded.
    FixtureParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl AtomataError {
    /// Whether this error prevents any consistent world layout, as opposed
    /// to affecting a single slot or being recoverable by a fallback.
    #[must_use]
    pub fn is_fatal_to_session(&self) -> bool {
        matches!(
            self,
            Self::LayoutCapacityExceeded { .. }
                | Self::LayoutNonConvergence { .. }
        )
    }
}

impl fmt::Display for AtomataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayoutCapacityExceeded {
                requested,
                supported,
            } => write!(
                f,
                "layout capacity exceeded: {requested} slots requested, at \
                 most {supported} supported"
            ),
            Self::LayoutNonConvergence { rounds } => write!(
                f,
                "bounding volumes still overlap after {rounds} expansion \
                 rounds"
            ),
            Self::EmptyGeometry { slot: Some(slot) } => {
                write!(f, "slot {slot} has no atoms")
            }
            Self::EmptyGeometry { slot: None } => {
                write!(f, "trajectory has no atoms")
            }
            Self::DataUnavailable(msg) => {
                write!(f, "trajectory data unavailable: {msg}")
            }
            Self::InvalidTrajectory(msg) => {
                write!(f, "invalid trajectory: {msg}")
            }
            Self::FixtureParse(msg) => {
                write!(f, "fixture parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for AtomataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AtomataError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
