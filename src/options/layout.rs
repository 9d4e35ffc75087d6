use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::DEFAULT_MAX_ROUNDS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Slot placement parameters.
pub struct LayoutOptions {
    /// Place only the first trajectory, at the origin.
    #[schemars(title = "Show One Slot")]
    pub show_one_slot: bool,
    /// Expansion rounds the separator may run before giving up.
    #[schemars(skip)]
    pub max_rounds: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            show_one_slot: false,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}
