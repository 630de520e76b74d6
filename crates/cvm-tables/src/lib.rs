//! # CVM Tables
//!
//! Table behaviors for the result pages: sorter setup with the checkbox
//! bulk toggle, case-insensitive row filtering, and CSV export.
//!
//! Everything here works on a [`TableSnapshot`], a plain copy of a table's
//! cells. Reading the live document into a snapshot and writing visibility or
//! checkbox state back is left to the browser adapter.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod behavior;
pub mod csv;
pub mod filter;
pub mod model;

pub use behavior::{
    apply_bulk_toggle, bulk_toggle_state, initialize, sorter_options, HeaderOptions,
    SorterOptions, TableSetup, TableSorter,
};
pub use csv::CsvDownload;
pub use filter::FilterOutcome;
pub use model::*;
