use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Instance sizing and overlay toggles.
pub struct DisplayOptions {
    /// Uniform scale applied to the unit atom sphere.
    #[schemars(title = "Atom Scale", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub atom_scale: f32,
    /// Radius of the unit bond cylinder.
    #[schemars(title = "Bond Radius", range(min = 0.001, max = 0.5), extend("step" = 0.001))]
    pub bond_radius: f32,
    /// Whether to draw a wireframe box around each slot's region.
    #[schemars(title = "Show Bounding Boxes")]
    pub show_bounding_boxes: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            atom_scale: 0.1,
            bond_radius: 0.01,
            show_bounding_boxes: true,
        }
    }
}
