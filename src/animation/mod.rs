//! Checkpoint playback for trajectory slots.
//!
//! - [`SlotAnimator`]: per-trajectory state machine (awaiting data →
//!   exploding → playing)
//! - [`EasingFunction`]: optional shaping of the explosion progress
//! - [`interpolation`]: lerp helpers shared by the animator

mod easing;
pub mod interpolation;
mod slot;

pub use easing::EasingFunction;
pub use slot::{
    BondSegment, CurrentFrame, SlotAnimator, SlotSettings, SlotState,
};
