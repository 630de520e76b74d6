//! # CVM Common
//!
//! Shared types, errors and logging for the ClinVar Miner UI utilities.
//!
//! Every other crate in the workspace reports failures through [`UiError`]
//! and emits diagnostics through `tracing`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod macros;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, UiError};
pub use logging::{init_logging_with_writer, LoggingConfig};
pub use types::*;
