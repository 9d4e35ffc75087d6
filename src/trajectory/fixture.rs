//! Local JSON trajectory fixtures.
//!
//! The fixture format mirrors the data a live source yields:
//!
//! ```json
//! {
//!   "atoms": [{ "kind": "N" }, { "kind": "C" }],
//!   "bonds": [[0, 1]],
//!   "compact": [[0.0, 0.0, 0.0], [0.1, 0.0, 0.0]],
//!   "checkpoints": [
//!     [[0.0, 0.0, 0.0], [1.4, 0.0, 0.0]],
//!     [[0.0, 0.2, 0.0], [1.4, 0.1, 0.0]]
//!   ]
//! }
//! ```
//!
//! `bonds` and `compact` may be omitted.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{Atom, Bond, Checkpoint, CheckpointSequence, Topology};
use crate::error::AtomataError;

/// Serialized form of one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryFixture {
    /// Atom list.
    pub atoms: Vec<Atom>,
    /// Bonds as atom-index pairs.
    #[serde(default)]
    pub bonds: Vec<Bond>,
    /// Optional compact layout, one position per atom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact: Option<Vec<Vec3>>,
    /// Checkpoints, each one position per atom.
    pub checkpoints: Vec<Vec<Vec3>>,
}

impl TrajectoryFixture {
    /// Decode a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::FixtureParse`] on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, AtomataError> {
        serde_json::from_str(text)
            .map_err(|e| AtomataError::FixtureParse(e.to_string()))
    }

    /// Read and decode a fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::Io`] if the file cannot be read, or
    /// [`AtomataError::FixtureParse`] if it is not a valid fixture.
    pub fn load(path: &Path) -> Result<Self, AtomataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            AtomataError::FixtureParse(msg) => AtomataError::FixtureParse(
                format!("{}: {msg}", path.display()),
            ),
            other => other,
        })
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::FixtureParse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, AtomataError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AtomataError::FixtureParse(e.to_string()))
    }

    /// Validate and convert into a playable sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::InvalidTrajectory`] if the fixture breaks a
    /// [`CheckpointSequence`] invariant.
    pub fn into_sequence(self) -> Result<CheckpointSequence, AtomataError> {
        let topology = Topology {
            atoms: self.atoms,
            bonds: self.bonds,
        };
        CheckpointSequence::new(
            topology,
            self.compact.map(Checkpoint::new),
            self.checkpoints.into_iter().map(Checkpoint::new).collect(),
        )
    }
}

impl From<&CheckpointSequence> for TrajectoryFixture {
    fn from(seq: &CheckpointSequence) -> Self {
        Self {
            atoms: seq.topology().atoms.clone(),
            bonds: seq.topology().bonds.clone(),
            compact: seq.compact().map(|c| c.positions.clone()),
            checkpoints: seq
                .checkpoints
                .iter()
                .map(|c| c.positions.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ATOMS: &str = r#"{
        "atoms": [{ "kind": "N" }, { "kind": "C" }],
        "bonds": [[0, 1]],
        "compact": [[0.0, 0.0, 0.0], [0.1, 0.0, 0.0]],
        "checkpoints": [
            [[0.0, 0.0, 0.0], [1.4, 0.0, 0.0]],
            [[0.0, 0.2, 0.0], [1.4, 0.1, 0.0]]
        ]
    }"#;

    #[test]
    fn parses_full_fixture() {
        let seq = TrajectoryFixture::from_json(TWO_ATOMS)
            .unwrap()
            .into_sequence()
            .unwrap();

        assert_eq!(seq.topology().atom_count(), 2);
        assert_eq!(seq.topology().bonds, vec![Bond { a: 0, b: 1 }]);
        assert_eq!(seq.len(), 2);
        assert_eq!(
            seq.compact().unwrap().positions[1],
            Vec3::new(0.1, 0.0, 0.0)
        );
        assert_eq!(seq.checkpoint(1).unwrap().positions[0].y, 0.2);
    }

    #[test]
    fn bonds_and_compact_are_optional() {
        let text = r#"{
            "atoms": [{ "kind": "O" }],
            "checkpoints": [[[1.0, 2.0, 3.0]]]
        }"#;
        let seq = TrajectoryFixture::from_json(text)
            .unwrap()
            .into_sequence()
            .unwrap();

        assert!(seq.topology().bonds.is_empty());
        assert!(seq.compact().is_none());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = TrajectoryFixture::from_json("{ \"atoms\": ");
        assert!(matches!(result, Err(AtomataError::FixtureParse(_))));
    }

    #[test]
    fn position_count_mismatch_is_rejected() {
        let text = r#"{
            "atoms": [{ "kind": "C" }, { "kind": "C" }],
            "checkpoints": [[[0.0, 0.0, 0.0]]]
        }"#;
        let result = TrajectoryFixture::from_json(text)
            .unwrap()
            .into_sequence();
        assert!(matches!(result, Err(AtomataError::InvalidTrajectory(_))));
    }

    #[test]
    fn bad_bond_index_is_rejected() {
        let text = r#"{
            "atoms": [{ "kind": "C" }],
            "bonds": [[0, 5]],
            "checkpoints": [[[0.0, 0.0, 0.0]]]
        }"#;
        let result = TrajectoryFixture::from_json(text)
            .unwrap()
            .into_sequence();
        assert!(result.is_err());
    }

    #[test]
    fn sequence_converts_back_to_equivalent_fixture() {
        let fixture = TrajectoryFixture::from_json(TWO_ATOMS).unwrap();
        let seq = fixture.clone().into_sequence().unwrap();
        assert_eq!(TrajectoryFixture::from(&seq), fixture);
    }

    #[test]
    fn saved_fixture_loads_back() {
        let fixture = TrajectoryFixture::from_json(TWO_ATOMS).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.json");
        std::fs::write(&path, fixture.to_json().unwrap()).unwrap();

        assert_eq!(TrajectoryFixture::load(&path).unwrap(), fixture);
    }

    #[test]
    fn bundled_demo_fixture_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets/demo_protein.json");
        let seq = TrajectoryFixture::load(&path)
            .unwrap()
            .into_sequence()
            .unwrap();

        assert_eq!(seq.topology().atom_count(), 48);
        assert_eq!(seq.len(), 8);
        assert!(seq.compact().is_some());
        assert!(seq.bounding_volume().is_ok());
    }
}
