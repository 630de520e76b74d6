//! Per-series latest values, per-date totals and series ranking.

use crate::observation::Observation;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// The most recent point of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestPoint {
    /// Largest `x` seen for the series.
    pub x: DateTime<Utc>,
    /// `y` of the first observation seen at that `x`.
    pub y: f64,
}

/// Everything the chart needs to know about its series before drawing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesSummary {
    /// Series labels in drawing and legend order. Starts with the total label
    /// when more than one real series exists.
    pub ranked: Vec<String>,
    /// Sum of `y` over all observations sharing each `x`.
    pub totals: BTreeMap<DateTime<Utc>, f64>,
    /// Most recent point of every real series.
    pub latest: HashMap<String, LatestPoint>,
    /// Number of distinct real series.
    pub series_count: usize,
}

impl SeriesSummary {
    /// Whether a total series is drawn and a legend shown.
    pub fn has_total(&self) -> bool {
        self.series_count > 1
    }
}

/// Summarize observations in one pass and rank the series.
///
/// Series are ordered by their latest value, highest first, under the IEEE
/// total order (a positive NaN sorts above every number); equal values keep
/// the order in which the series first appeared. With more than one series,
/// `total_label` is placed first. A real series carrying that label is merged
/// into the total's line.
pub fn summarize(data: &[Observation], total_label: &str) -> SeriesSummary {
    let mut first_seen: Vec<String> = Vec::new();
    let mut latest: HashMap<String, LatestPoint> = HashMap::new();
    let mut totals: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();

    for obs in data {
        match latest.get_mut(&obs.serie) {
            Some(point) if obs.x > point.x => {
                *point = LatestPoint { x: obs.x, y: obs.y };
            }
            Some(_) => {}
            None => {
                first_seen.push(obs.serie.clone());
                latest.insert(obs.serie.clone(), LatestPoint { x: obs.x, y: obs.y });
            }
        }

        *totals.entry(obs.x).or_insert(0.0) += obs.y;
    }

    let series_count = first_seen.len();
    let mut ranked = first_seen;
    ranked.sort_by(|a, b| latest[b].y.total_cmp(&latest[a].y));

    if series_count > 1 {
        ranked.retain(|serie| serie != total_label);
        ranked.insert(0, total_label.to_string());
    }

    debug!(
        observations = data.len(),
        series = series_count,
        dates = totals.len(),
        ranking = ?ranked,
        "Summarized graph data"
    );

    SeriesSummary {
        ranked,
        totals,
        latest,
        series_count,
    }
}

/// Append one `total_label` observation per distinct date, in date order.
///
/// Does nothing unless the summary has more than one series. Returns the
/// number of observations appended.
pub fn append_totals(data: &mut Vec<Observation>, summary: &SeriesSummary, total_label: &str) -> usize {
    if !summary.has_total() {
        return 0;
    }

    data.extend(
        summary
            .totals
            .iter()
            .map(|(x, y)| Observation::new(*x, *y, total_label)),
    );
    summary.totals.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn obs(year: i32, y: f64, serie: &str) -> Observation {
        Observation::new(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(), y, serie)
    }

    fn year(y: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap()
    }

    fn two_series() -> Vec<Observation> {
        vec![
            obs(2020, 10.0, "A"),
            obs(2020, 5.0, "B"),
            obs(2021, 8.0, "A"),
            obs(2021, 12.0, "B"),
        ]
    }

    #[test]
    fn test_totals_and_ranking() {
        let summary = summarize(&two_series(), "total");

        assert_eq!(summary.totals[&year(2020)], 15.0);
        assert_eq!(summary.totals[&year(2021)], 20.0);
        assert_eq!(summary.ranked, ["total", "B", "A"]);
        assert_eq!(summary.series_count, 2);
        assert_eq!(summary.latest["A"], LatestPoint { x: year(2021), y: 8.0 });
    }

    #[test]
    fn test_latest_ignores_input_order() {
        let mut data = two_series();
        data.reverse();
        let summary = summarize(&data, "total");
        assert_eq!(summary.latest["B"].y, 12.0);
        assert_eq!(summary.ranked, ["total", "B", "A"]);
    }

    #[test]
    fn test_first_point_at_latest_date_wins() {
        let data = vec![obs(2021, 3.0, "A"), obs(2021, 9.0, "A")];
        assert_eq!(summarize(&data, "total").latest["A"].y, 3.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let data = vec![
            obs(2020, 1.0, "late"),
            obs(2020, 4.0, "first"),
            obs(2021, 6.0, "second"),
            obs(2021, 6.0, "third"),
            obs(2021, 6.0, "first"),
        ];
        // "late" appeared first but ranks last; the three tied series keep
        // first-seen order among themselves.
        let summary = summarize(&data, "total");
        assert_eq!(summary.ranked, ["total", "first", "second", "third", "late"]);
    }

    #[test]
    fn test_single_series_has_no_total() {
        let data = vec![obs(2019, 3.0, "pathogenic"), obs(2020, 7.0, "pathogenic")];
        let mut appended = data.clone();
        let summary = summarize(&data, "total");

        assert!(!summary.has_total());
        assert_eq!(summary.ranked, ["pathogenic"]);
        assert_eq!(append_totals(&mut appended, &summary, "total"), 0);
        assert_eq!(appended, data);
    }

    #[test]
    fn test_append_totals() {
        let mut data = two_series();
        let summary = summarize(&data, "total");

        assert_eq!(append_totals(&mut data, &summary, "total"), 2);
        assert_eq!(data.len(), 6);
        assert_eq!(data[4], obs(2020, 15.0, "total"));
        assert_eq!(data[5], obs(2021, 20.0, "total"));
    }

    #[test]
    fn test_series_named_like_total_is_merged() {
        let data = vec![obs(2020, 1.0, "total"), obs(2020, 2.0, "other")];
        let summary = summarize(&data, "total");
        assert_eq!(summary.ranked, ["total", "other"]);
        assert_eq!(summary.series_count, 2);
    }

    #[test]
    fn test_non_finite_latest_values_still_rank() {
        let data: Vec<Observation> = (0..64)
            .map(|i| {
                let y = if i % 3 == 0 { f64::NAN } else { f64::from(i) };
                obs(2020, y, &format!("s{i}"))
            })
            .collect();

        let summary = summarize(&data, "total");
        assert_eq!(summary.ranked.len(), 65);
        assert_eq!(summary.ranked[0], "total");

        let finite: Vec<f64> = summary.ranked[1..]
            .iter()
            .map(|serie| summary.latest[serie].y)
            .filter(|y| !y.is_nan())
            .collect();
        assert!(finite.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_empty_data() {
        let summary = summarize(&[], "total");
        assert!(summary.ranked.is_empty());
        assert!(summary.totals.is_empty());
        assert!(!summary.has_total());
    }
}
