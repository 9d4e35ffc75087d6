//! Trajectory-loading seam and the demo-fixture fallback.

use std::path::{Path, PathBuf};

use super::{CheckpointSequence, TrajectoryFixture};
use crate::error::AtomataError;

/// Anything that can hand over finished trajectories.
///
/// Implementations may block (network, disk); they run to completion before
/// any slot animator is built.
pub trait TrajectorySource {
    /// Produce every available trajectory, one per slot.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::DataUnavailable`] (or an I/O / parse error)
    /// when no data can be obtained.
    fn load(&mut self) -> Result<Vec<CheckpointSequence>, AtomataError>;

    /// Short label for log messages.
    fn describe(&self) -> String;
}

/// A single JSON fixture file.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    /// Source reading the fixture at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TrajectorySource for FixtureSource {
    fn load(&mut self) -> Result<Vec<CheckpointSequence>, AtomataError> {
        let sequence = TrajectoryFixture::load(&self.path)?.into_sequence()?;
        Ok(vec![sequence])
    }

    fn describe(&self) -> String {
        format!("fixture {}", self.path.display())
    }
}

/// Every `*.json` fixture in a directory, one slot per file, ordered by
/// file name.
///
/// Files that fail to parse are skipped with an error log so one corrupt
/// trajectory does not hide the others.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Source scanning `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn fixture_paths(&self) -> Result<Vec<PathBuf>, AtomataError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl TrajectorySource for DirectorySource {
    fn load(&mut self) -> Result<Vec<CheckpointSequence>, AtomataError> {
        let mut sequences = Vec::new();
        for path in self.fixture_paths()? {
            match TrajectoryFixture::load(&path)
                .and_then(TrajectoryFixture::into_sequence)
            {
                Ok(seq) => sequences.push(seq),
                Err(e) => {
                    log::error!("Skipping trajectory {}: {e}", path.display());
                }
            }
        }

        if sequences.is_empty() {
            return Err(AtomataError::DataUnavailable(format!(
                "no usable trajectories in {}",
                self.dir.display()
            )));
        }
        Ok(sequences)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}

/// Load from `primary`, substituting the fixture at `fallback` when the
/// primary source fails or yields nothing.
///
/// # Errors
///
/// Returns the fallback's error if the fallback fixture also fails.
pub fn load_with_fallback(
    primary: &mut dyn TrajectorySource,
    fallback: &Path,
) -> Result<Vec<CheckpointSequence>, AtomataError> {
    let reason = match primary.load() {
        Ok(sequences) if !sequences.is_empty() => {
            log::info!(
                "Loaded {} trajectories from {}",
                sequences.len(),
                primary.describe()
            );
            return Ok(sequences);
        }
        Ok(_) => AtomataError::DataUnavailable(format!(
            "{} returned no trajectories",
            primary.describe()
        )),
        Err(AtomataError::DataUnavailable(msg)) => {
            AtomataError::DataUnavailable(msg)
        }
        Err(e) => AtomataError::DataUnavailable(format!(
            "{}: {e}",
            primary.describe()
        )),
    };

    log::warn!("{reason}. Using demo protein.");
    FixtureSource::new(fallback).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ATOM: &str = r#"{
        "atoms": [{ "kind": "C" }],
        "checkpoints": [[[0.0, 0.0, 0.0]], [[1.0, 0.0, 0.0]]]
    }"#;

    struct Failing;

    impl TrajectorySource for Failing {
        fn load(&mut self) -> Result<Vec<CheckpointSequence>, AtomataError> {
            Err(AtomataError::DataUnavailable("connection refused".into()))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    struct Empty;

    impl TrajectorySource for Empty {
        fn load(&mut self) -> Result<Vec<CheckpointSequence>, AtomataError> {
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "empty".into()
        }
    }

    #[test]
    fn fixture_source_loads_one_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        std::fs::write(&path, ONE_ATOM).unwrap();

        let sequences = FixtureSource::new(&path).load().unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].len(), 2);

        // Scratch files go away with the directory guard.
        let root = dir.path().to_path_buf();
        drop(dir);
        assert!(!root.exists());
    }

    #[test]
    fn directory_source_orders_by_name_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), ONE_ATOM).unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            ONE_ATOM.replace("[[1.0, 0.0, 0.0]]", "[[2.0, 0.0, 0.0]]"),
        )
        .unwrap();
        std::fs::write(dir.path().join("c.json"), "not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sequences = DirectorySource::new(dir.path()).load().unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].checkpoint(1).unwrap().positions[0].x, 2.0);
        assert_eq!(sequences[1].checkpoint(1).unwrap().positions[0].x, 1.0);
    }

    #[test]
    fn empty_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = DirectorySource::new(dir.path()).load();
        assert!(matches!(result, Err(AtomataError::DataUnavailable(_))));
    }

    #[test]
    fn failing_primary_falls_back_to_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        std::fs::write(&path, ONE_ATOM).unwrap();

        let sequences = load_with_fallback(&mut Failing, &path).unwrap();
        assert_eq!(sequences.len(), 1);
    }

    #[test]
    fn empty_primary_falls_back_to_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        std::fs::write(&path, ONE_ATOM).unwrap();

        let sequences = load_with_fallback(&mut Empty, &path).unwrap();
        assert_eq!(sequences.len(), 1);
    }

    #[test]
    fn missing_fallback_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let result = load_with_fallback(&mut Failing, &missing);
        assert!(matches!(result, Err(AtomataError::Io(_))));
    }

    #[test]
    fn working_primary_skips_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        std::fs::write(&path, ONE_ATOM).unwrap();

        let mut primary = FixtureSource::new(&path);
        let sequences =
            load_with_fallback(&mut primary, &dir.path().join("missing.json"))
                .unwrap();
        assert_eq!(sequences.len(), 1);
    }
}
