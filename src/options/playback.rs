use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

/// Longest explosion honored, in milliseconds.
pub const MAX_EXPLOSION_MS: u64 = 20_000;
/// Longest checkpoint interval honored, in milliseconds.
pub const MAX_CHECKPOINT_INTERVAL_MS: u64 = 10_000;

/// Where a slot's explosion starts from.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CompactLayout {
    /// Use the compact layout supplied with the trajectory, falling back to
    /// the first checkpoint when none was supplied.
    #[default]
    Provided,
    /// Start from the first checkpoint itself (no visible unfolding).
    FirstCheckpoint,
    /// Start with every atom at the first checkpoint's centroid.
    Collapsed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Timing of the explosion and checkpoint stepping.
pub struct PlaybackOptions {
    /// Length of the one-time unfold into the first checkpoint, in
    /// milliseconds.
    #[schemars(title = "Explosion Duration (ms)", range(max = 20000))]
    pub explosion_ms: u64,
    /// Time each checkpoint stays on screen, in milliseconds.
    #[schemars(title = "Checkpoint Interval (ms)", range(min = 1, max = 10000))]
    pub checkpoint_interval_ms: u64,
    /// Source of the explosion's starting positions.
    #[schemars(title = "Compact Layout")]
    pub compact_layout: CompactLayout,
    /// Easing curve applied to explosion progress.
    #[schemars(skip)]
    pub explosion_easing: EasingFunction,
}

impl PlaybackOptions {
    /// Explosion duration, capped at [`MAX_EXPLOSION_MS`].
    #[must_use]
    pub fn explosion_duration(&self) -> Duration {
        Duration::from_millis(self.explosion_ms.min(MAX_EXPLOSION_MS))
    }

    /// Per-checkpoint display interval, clamped to
    /// `1..=`[`MAX_CHECKPOINT_INTERVAL_MS`].
    #[must_use]
    pub fn checkpoint_interval(&self) -> Duration {
        Duration::from_millis(
            self.checkpoint_interval_ms
                .clamp(1, MAX_CHECKPOINT_INTERVAL_MS),
        )
    }
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            explosion_ms: 2000,
            checkpoint_interval_ms: 250,
            compact_layout: CompactLayout::default(),
            explosion_easing: EasingFunction::Linear,
        }
    }
}
