// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
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
// Complexity limits
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
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]

//! Protein structure exploration: cached RCSB fetching, distance
//! measurement, side-by-side comparison and export.
//!
//! # Key entry points
//!
//! - [`fetch::ProteinDataLoader`] - resolves an identifier to a structure
//!   file and metadata, cache first, discarding superseded requests
//! - [`cache::StructureCache`] - age- and size-bounded cache over a
//!   pluggable [`cache::CacheStore`]
//! - [`measurement::MeasurementSession`] - two-click distance measurement
//! - [`visualization::Viewer`] - drives any
//!   [`visualization::MolecularRenderer`] and keeps distance labels in sync
//! - [`options::Options`] - runtime configuration (cache, repository,
//!   display, chat, keybindings)
//!
//! # Architecture
//!
//! The loader runs each fetch cycle on a background thread and reports
//! back over a channel. Every identifier change bumps a generation
//! counter; the owning thread only commits results whose generation is
//! still current. Cache failures are absorbed at the cache boundary and
//! read as misses, so storage trouble never blocks the fetch-and-display
//! flow.

pub mod cache;
pub mod catalog;
pub mod chat;
pub mod compare;
pub mod error;
pub mod export;
pub mod fetch;
pub mod input;
pub mod measurement;
pub mod metadata;
pub mod options;
pub mod repository;
pub mod visualization;

pub use error::MolscopeError;
