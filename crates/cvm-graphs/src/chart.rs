//! The line graph in data space: which lines to draw, the axis domains and
//! their key points. Pixel mapping is left to plotters.

use crate::observation::Observation;
use crate::palette::Palette;
use crate::summary::SeriesSummary;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use cvm_common::{ensure, Result, UiError};
use plotters::style::RGBColor;
use std::ops::Range;

/// One series line.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    /// Series label.
    pub label: String,
    /// Stroke colour.
    pub color: RGBColor,
    /// Points ordered by time.
    pub points: Vec<(DateTime<Utc>, f64)>,
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    /// Series lines in ranking order.
    pub lines: Vec<SeriesLine>,
    /// Extent of the time axis.
    pub time_range: Range<DateTime<Utc>>,
    /// January 1st of every year inside the time axis.
    pub year_ticks: Vec<DateTime<Utc>>,
    /// Top of the value axis.
    pub value_ceiling: f64,
    /// Labelled values on the value axis.
    pub value_ticks: Vec<f64>,
    /// Title of the value axis.
    pub y_label: String,
    /// Whether a legend is drawn.
    pub legend: bool,
}

impl LineChart {
    /// Build the chart for `data`, which must already contain any
    /// synthesized totals.
    ///
    /// The value axis runs from zero to the largest of `y_ticks`.
    pub fn build(
        data: &[Observation],
        summary: &SeriesSummary,
        y_label: &str,
        y_ticks: &[f64],
        palette: &Palette,
    ) -> Result<Self> {
        ensure!(
            !y_ticks.is_empty(),
            UiError::validation_field("at least one axis tick is required", "yAxisTickValues")
        );
        let value_ceiling = y_ticks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        ensure!(
            value_ceiling.is_finite() && value_ceiling > 0.0,
            UiError::validation_field(
                format!("axis ceiling must be a positive number, got {value_ceiling}"),
                "yAxisTickValues"
            )
        );

        let lines = summary
            .ranked
            .iter()
            .enumerate()
            .map(|(i, serie)| {
                let mut points: Vec<(DateTime<Utc>, f64)> = data
                    .iter()
                    .filter(|obs| &obs.serie == serie)
                    .map(|obs| (obs.x, obs.y))
                    .collect();
                points.sort_by_key(|(x, _)| *x);

                SeriesLine {
                    label: serie.clone(),
                    color: palette.color(i),
                    points,
                }
            })
            .collect();

        let time_range = time_extent(data.iter().map(|obs| obs.x));
        let year_ticks = year_ticks(&time_range);
        let value_ticks = y_ticks
            .iter()
            .copied()
            .filter(|tick| (0.0..=value_ceiling).contains(tick))
            .collect();

        Ok(Self {
            lines,
            time_range,
            year_ticks,
            value_ceiling,
            value_ticks,
            y_label: y_label.to_string(),
            legend: summary.has_total(),
        })
    }
}

/// Extent of `instants`, widened by a day on each side when it is empty or a
/// single instant. No instants at all gives a range around the epoch.
pub fn time_extent<I>(instants: I) -> Range<DateTime<Utc>>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut iter = instants.into_iter();
    let Some(first) = iter.next() else {
        let epoch = DateTime::<Utc>::default();
        return epoch - Duration::days(1)..epoch + Duration::days(1);
    };

    let (min, max) = iter.fold((first, first), |(min, max), x| (min.min(x), max.max(x)));
    if min < max {
        min..max
    } else {
        min - Duration::days(1)..max + Duration::days(1)
    }
}

/// January 1st of every year inside `range`, ends included.
pub fn year_ticks(range: &Range<DateTime<Utc>>) -> Vec<DateTime<Utc>> {
    (range.start.year()..=range.end.year())
        .filter_map(|year| Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single())
        .filter(|tick| *tick >= range.start && *tick <= range.end)
        .collect()
}

/// Value axis label: integers with thousands separators, anything else as is.
pub fn format_tick(value: f64) -> String {
    if value.fract() != 0.0 || !value.is_finite() || value.abs() >= 1e15 {
        return value.to_string();
    }

    let digits = (value.abs() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
