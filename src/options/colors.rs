use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Color palette for atoms, bonds, and slot outlines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Per-kind atom color keyed by element / atom-type label.
    pub atom_kinds: FxHashMap<String, [f32; 3]>,
    /// RGB color for atom kinds missing from `atom_kinds`.
    pub default_atom: [f32; 3],
    /// RGB color for bond cylinders.
    pub bond: [f32; 3],
    /// RGB color for slot bounding-box outlines.
    pub outline: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        let mut atom_kinds = FxHashMap::default();
        let _ = atom_kinds.insert("C".to_owned(), [0.25, 0.25, 0.25]);
        let _ = atom_kinds.insert("N".to_owned(), [0.2, 0.3, 0.9]);
        let _ = atom_kinds.insert("O".to_owned(), [0.9, 0.15, 0.15]);
        let _ = atom_kinds.insert("S".to_owned(), [0.9, 0.8, 0.2]);
        let _ = atom_kinds.insert("H".to_owned(), [0.9, 0.9, 0.9]);
        let _ = atom_kinds.insert("P".to_owned(), [1.0, 0.5, 0.0]);

        Self {
            atom_kinds,
            default_atom: [0.8, 0.4, 0.8],
            bond: [0.6, 0.6, 0.6],
            outline: [0.0, 0.1, 0.0],
        }
    }
}

impl ColorOptions {
    /// Look up an atom color by kind. Falls back to `default_atom`.
    #[must_use]
    pub fn atom_color(&self, kind: &str) -> [f32; 3] {
        self.atom_kinds
            .get(kind.trim())
            .copied()
            .unwrap_or(self.default_atom)
    }
}
