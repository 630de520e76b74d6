//! # CVM Graphs
//!
//! The line graph of the result pages: one line per series, an extra
//! "total" line summing every series per date, a yearly time axis, a numeric
//! axis restricted to caller-chosen ticks, and a legend in ranking order.
//!
//! The series summary and the [`LineChart`] built from it are plain data;
//! [`LineGraphRenderer`] hands them to a plotters chart on any drawing
//! backend.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod observation;
pub mod palette;
pub mod renderer;
pub mod summary;

pub use chart::{format_tick, time_extent, year_ticks, LineChart, SeriesLine};
pub use observation::{finite_y, from_millis, observations_from_json, parse_x, Observation};
pub use palette::Palette;
pub use renderer::LineGraphRenderer;
pub use summary::{append_totals, summarize, LatestPoint, SeriesSummary};
