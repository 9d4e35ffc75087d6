//! World-space placement of trajectory slots.
//!
//! Each trajectory's atoms are enclosed in a [`BoundingVolume`]; the
//! [`LayoutSeparator`] then assigns every slot a translation so that no two
//! regions overlap in the shared world.

mod bounding_volume;
mod separator;

pub use bounding_volume::BoundingVolume;
pub use separator::{LayoutSeparator, OffsetTable, DEFAULT_MAX_ROUNDS};
