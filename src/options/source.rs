use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where trajectories come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceOptions {
    /// Directory of JSON trajectory fixtures, one slot per file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory_dir: Option<PathBuf>,
    /// Demo trajectory substituted when no other data is available.
    pub fallback_fixture: PathBuf,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            trajectory_dir: None,
            fallback_fixture: PathBuf::from("assets/demo_protein.json"),
        }
    }
}
