//! Graph input points and parsing of their time keys.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use cvm_common::{Result, UiError};
use serde::{Deserialize, Deserializer, Serialize};

/// Date-time layouts accepted without an offset; all are read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// One `{x, y, serie}` point of the graph input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Time key. Serialized back as epoch milliseconds.
    #[serde(
        deserialize_with = "deserialize_x",
        serialize_with = "chrono::serde::ts_milliseconds::serialize"
    )]
    pub x: DateTime<Utc>,
    /// Value.
    pub y: f64,
    /// Series label.
    pub serie: String,
}

impl Observation {
    /// Create an observation.
    pub fn new(x: DateTime<Utc>, y: f64, serie: impl Into<String>) -> Self {
        Self {
            x,
            y,
            serie: serie.into(),
        }
    }
}

/// Parse a time key.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, date-times with or without
/// seconds and fractions, and RFC 3339. Forms without an offset are UTC.
pub fn parse_x(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    let date = match text.len() {
        4 if text.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::parse_from_str(&format!("{text}-01-01"), "%Y-%m-%d").ok()
        }
        6 | 7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
    };

    date.and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| UiError::validation_field(format!("unrecognized date '{text}'"), "x"))
}

/// Time key from epoch milliseconds, the way JavaScript dates carry them.
pub fn from_millis(millis: f64) -> Result<DateTime<Utc>> {
    let out_of_range = || UiError::validation_field(format!("timestamp {millis} out of range"), "x");
    if !millis.is_finite() {
        return Err(out_of_range());
    }
    Utc.timestamp_millis_opt(millis.round() as i64)
        .single()
        .ok_or_else(out_of_range)
}

/// A value, which must be a finite number.
pub fn finite_y(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(UiError::validation_field(format!("value {value} is not a finite number"), "y"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawX {
    Millis(f64),
    Text(String),
}

fn deserialize_x<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawX::deserialize(deserializer)? {
        RawX::Millis(millis) => from_millis(millis),
        RawX::Text(text) => parse_x(&text),
    };
    parsed.map_err(serde::de::Error::custom)
}

/// Parse a JSON array of observations.
pub fn observations_from_json(json: &str) -> Result<Vec<Observation>> {
    serde_json::from_str(json)
        .map_err(|e| UiError::validation_field(format!("invalid graph data: {e}"), "data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_partial_dates() {
        assert_eq!(parse_x("2020").unwrap(), utc(2020, 1, 1));
        assert_eq!(parse_x("2018-06").unwrap(), utc(2018, 6, 1));
        assert_eq!(parse_x("2018-06-15").unwrap(), utc(2018, 6, 15));
        assert_eq!(parse_x(" 2019 ").unwrap(), utc(2019, 1, 1));
    }

    #[test]
    fn test_parse_datetimes() {
        let parsed = parse_x("2021-03-04T05:06:07").unwrap();
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (5, 6, 7));

        let parsed = parse_x("2021-03-04 05:06").unwrap();
        assert_eq!(parsed.minute(), 6);

        let parsed = parse_x("2021-03-04T23:30:00-02:00").unwrap();
        assert_eq!((parsed.day(), parsed.hour(), parsed.minute()), (5, 1, 30));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "yesterday", "2021-13", "20201", "2021-02-30"] {
            let err = parse_x(text).unwrap_err();
            assert!(matches!(err, UiError::Validation { .. }), "{text}: {err}");
        }
    }

    #[test]
    fn test_deserialize_mixed_keys() {
        let data = observations_from_json(
            r#"[
                {"x": "2020", "y": 1, "serie": "a"},
                {"x": 1577836800000, "y": 2.5, "serie": "b"},
                {"x": 1577836800000.0, "y": 3, "serie": "c"}
            ]"#,
        )
        .unwrap();

        assert!(data.iter().all(|obs| obs.x == utc(2020, 1, 1)));
        assert_eq!(data[1].y, 2.5);
    }

    #[test]
    fn test_deserialize_bad_x_is_validation_error() {
        let err = observations_from_json(r#"[{"x": "soon", "y": 1, "serie": "a"}]"#).unwrap_err();
        assert!(matches!(err, UiError::Validation { ref field, .. } if field.as_deref() == Some("data")));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_serializes_x_as_millis() {
        let obs = Observation::new(utc(2021, 1, 1), 20.0, "total");
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["x"], 1_609_459_200_000_i64);
        assert_eq!(json["serie"], "total");
    }

    #[test]
    fn test_from_millis_bounds() {
        assert_eq!(from_millis(0.0).unwrap(), utc(1970, 1, 1));
        assert!(from_millis(f64::NAN).is_err());
        assert!(from_millis(1e300).is_err());
    }

    #[test]
    fn test_finite_y() {
        assert_eq!(finite_y(-2.5).unwrap(), -2.5);
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = finite_y(value).unwrap_err();
            assert!(matches!(err, UiError::Validation { ref field, .. } if field.as_deref() == Some("y")));
        }
    }
}
