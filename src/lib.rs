// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Trajectory playback with automatic multi-slot layout.
//!
//! Atomata plays back several molecular trajectories side by side. Each
//! trajectory is a fixed topology plus an ordered list of checkpoints
//! (atom positions). At startup every trajectory's bounding volume is
//! pushed apart until no two overlap; each slot then "explodes" from a
//! compact layout into its first checkpoint and loops through the rest.
//!
//! # Key entry points
//!
//! - [`session::Session`] - what a frame loop drives: `animate` then
//!   `render`
//! - [`coordinator::LayoutCoordinator`] - startup layout plus per-slot
//!   stepping
//! - [`layout::LayoutSeparator`] - geometric expansion along a fixed
//!   direction table
//! - [`animation::SlotAnimator`] - per-trajectory explosion and playback
//! - [`trajectory::TrajectorySource`] - where checkpoint data comes from
//! - [`options::Options`] - TOML configuration read once at startup
//!
//! # Architecture
//!
//! The core never touches a graphics API. Changed slots are packed into
//! [`render::SlotTransforms`] and handed to a [`render::TransformSink`];
//! a [`render::Renderer`] draws on request. A background
//! [`diagnostics::DiagnosticsReporter`] reads frame statistics through a
//! lock-free triple buffer and logs them periodically.

pub mod animation;
pub mod coordinator;
pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod options;
pub mod render;
pub mod session;
pub mod trajectory;
pub mod util;
