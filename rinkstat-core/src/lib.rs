// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `rinkstat` Core
//!
//! Core types shared by every `rinkstat` crate.
//!
//! The request fetcher hands back either a decoded [`Payload`] or a
//! [`FetchFailure`]. Both are plain values: nothing in this crate performs I/O.
//!
//! ## Key Types
//!
//! ### Payloads
//! - [`Payload`] - Decoded JSON document, opaque to the fetcher
//!
//! ### Failures
//! - [`FetchFailure`] - Why a fetch did not produce a payload
//!
//! ### Diagnostics
//! - [`AttemptRecord`] - One network attempt within a fetch
//! - [`AttemptResult`] - What that attempt produced

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{AttemptRecord, AttemptResult, FetchFailure, Payload};
