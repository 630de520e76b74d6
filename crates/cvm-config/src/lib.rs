//! # CVM Config
//!
//! Typed configuration for the table and chart utilities.
//!
//! Every knob the page scripts used to hard-code (marker class names, the
//! swapped sort-direction classes, chart dimensions, the categorical palette)
//! lives here with its historical value as the default.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cache::*;
pub use loader::*;
pub use schema::*;
