//! Centralized configuration with TOML file support.
//!
//! Playback timing, layout, display sizing, colors, trajectory sources, and
//! diagnostics are consolidated here. Options are read once at startup;
//! there is no hot reload.

mod colors;
mod diagnostics;
mod display;
mod layout;
mod playback;
mod source;

use std::path::Path;

pub use colors::ColorOptions;
pub use diagnostics::DiagnosticsOptions;
pub use display::DisplayOptions;
pub use layout::LayoutOptions;
pub use playback::{
    CompactLayout, PlaybackOptions, MAX_CHECKPOINT_INTERVAL_MS,
    MAX_EXPLOSION_MS,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use source::SourceOptions;

use crate::error::AtomataError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[playback]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Explosion and checkpoint timing.
    pub playback: PlaybackOptions,
    /// Slot placement.
    pub layout: LayoutOptions,
    /// Instance sizing and overlays.
    pub display: DisplayOptions,
    /// Color palette.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Trajectory sources.
    #[schemars(skip)]
    pub source: SourceOptions,
    /// Periodic reporting.
    pub diagnostics: DiagnosticsOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::Io`] if the file cannot be read, or
    /// [`AtomataError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, AtomataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, AtomataError> {
        toml::from_str(content)
            .map_err(|e| AtomataError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::OptionsParse`] if serialization fails, or
    /// [`AtomataError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), AtomataError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AtomataError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[playback]
explosion_ms = 500
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.playback.explosion_ms, 500);
        // Everything else should be default
        assert_eq!(opts.playback.checkpoint_interval_ms, 250);
        assert_eq!(opts.playback.compact_layout, CompactLayout::Provided);
        assert!(!opts.layout.show_one_slot);
        assert_eq!(opts.display.atom_scale, 0.1);
    }

    #[test]
    fn enums_parse_from_snake_case() {
        let toml_str = r#"
[playback]
compact_layout = "collapsed"
explosion_easing = { kind = "cubic_hermite", c1 = 0.33, c2 = 1.0 }
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.playback.compact_layout, CompactLayout::Collapsed);
        let EasingFunction::CubicHermite { c1, c2 } =
            opts.playback.explosion_easing
        else {
            panic!("expected cubic hermite easing");
        };
        assert!((c1 - 0.33).abs() < 1e-6);
        assert_eq!(c2, 1.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let result = Options::from_toml("[playback\nexplosion_ms = ");
        assert!(matches!(result, Err(AtomataError::OptionsParse(_))));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config/view.toml");
        let mut opts = Options::default();
        opts.layout.show_one_slot = true;
        opts.playback.checkpoint_interval_ms = 33;

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
    }

    #[test]
    fn out_of_range_timings_are_clamped() {
        let opts: Options = toml::from_str(
            "[playback]\n\
             explosion_ms = 9223372036854775807\n\
             checkpoint_interval_ms = 9223372036854775807\n",
        )
        .unwrap();
        assert_eq!(
            opts.playback.explosion_duration(),
            Duration::from_millis(MAX_EXPLOSION_MS)
        );
        assert_eq!(
            opts.playback.checkpoint_interval(),
            Duration::from_millis(MAX_CHECKPOINT_INTERVAL_MS)
        );

        let mut opts = Options::default();
        opts.playback.checkpoint_interval_ms = 0;
        assert_eq!(
            opts.playback.checkpoint_interval(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn atom_color_lookup() {
        let colors = ColorOptions::default();
        assert_eq!(colors.atom_color("O"), [0.9, 0.15, 0.15]);
        assert_eq!(colors.atom_color(" N "), [0.2, 0.3, 0.9]);
        assert_eq!(colors.atom_color("Zz"), colors.default_atom);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("playback"));
        assert!(props.contains_key("layout"));
        assert!(props.contains_key("display"));
        assert!(props.contains_key("diagnostics"));

        // Skipped sections should be absent
        assert!(!props.contains_key("colors"));
        assert!(!props.contains_key("source"));

        let playback = &props["playback"]["properties"];
        assert!(playback.get("explosion_ms").is_some());
        assert!(playback.get("explosion_easing").is_none());
    }
}
