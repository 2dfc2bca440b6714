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

//! Interactive 3D molecular structure viewer core.
//!
//! Molview owns the render loop of a molecular viewer: a trackball
//! camera, an observable input layer, a render-object scene set, and a
//! typed command bus through which application logic requests
//! data-state mutations. Render objects themselves are opaque: they
//! are produced by an external scene-construction subsystem and only
//! referenced here.
//!
//! # Key entry points
//!
//! - [`viewer::Viewer`] - the frame loop and top-level lifecycle
//! - [`controls::TrackballControls`] - orbit/pan/zoom camera motion
//! - [`command::CommandBus`] - typed publish/dispatch for state commands
//! - [`options::ViewerOptions`] - runtime configuration (camera, controls)
//!
//! # Architecture
//!
//! Everything runs on one logical thread. The host feeds raw input
//! events into the viewer between frames and delivers one
//! [`Viewer::on_frame`](viewer::Viewer::on_frame) callback per
//! scheduled frame; within a frame the order is strictly controls →
//! camera → renderer. [`Viewer::request_draw`](viewer::Viewer::request_draw)
//! coalesces redundant draw requests down to at most one pending frame.

pub mod camera;
pub mod command;
pub mod controls;
pub mod error;
pub mod frame;
pub mod gpu;
#[cfg(feature = "viewer")]
pub mod host;
pub mod input;
pub mod options;
pub mod render;
pub mod util;
pub mod viewer;

pub use error::MolviewError;
pub use input::{InputEvent, PointerButton};
pub use viewer::Viewer;
