//! Calendar-month aggregation of daily climate data
//!
//! Buckets a daily series by year-month and averages each bucket, producing
//! the rows behind the detail overlay's climate chart. An August from two
//! different years is two distinct buckets.

use crate::climate::ClimateSeries;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One aggregated row per calendar month present in the data
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlyNormal {
    /// Grouping key, `YYYY-MM`
    pub month: String,
    /// Display label, month abbreviation (`"Aug"`)
    pub label: String,
    /// Mean daily temperature, rounded to the nearest degree
    pub temperature: i32,
    /// Mean daily humidity, rounded to the nearest percent
    pub humidity: i32,
}

#[derive(Default)]
struct MonthAccumulator {
    temperature_sum: f64,
    humidity_sum: f64,
    days: u32,
}

/// Aggregate a daily series into per-month means
///
/// Rows are emitted in ascending lexicographic order of the `YYYY-MM` key,
/// which for this date format is chronological order. An empty series
/// yields an empty result; a bucket exists only if at least one day
/// contributed to it, so the division is always defined.
pub fn aggregate_monthly(series: &ClimateSeries) -> Vec<MonthlyNormal> {
    let mut buckets: BTreeMap<String, MonthAccumulator> = BTreeMap::new();

    let days = series
        .time
        .iter()
        .zip(&series.temperature)
        .zip(&series.humidity);

    for ((date, &temperature), &humidity) in days {
        // First 7 chars of the ISO date: YYYY-MM
        let key = match date.get(..7) {
            Some(key) => key,
            None => continue,
        };

        let bucket = buckets.entry(key.to_string()).or_default();
        bucket.temperature_sum += temperature;
        bucket.humidity_sum += humidity;
        bucket.days += 1;
    }

    buckets
        .into_iter()
        .map(|(month, bucket)| {
            let days = bucket.days as f64;
            MonthlyNormal {
                label: month_label(&month),
                month,
                temperature: (bucket.temperature_sum / days).round() as i32,
                humidity: (bucket.humidity_sum / days).round() as i32,
            }
        })
        .collect()
}

/// Month abbreviation for a `YYYY-MM` key, parsed as the first of the month
fn month_label(month: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d") {
        Ok(date) => date.format("%b").to_string(),
        Err(_) => month.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_series(start: NaiveDate, days: u64, temperature: f64, humidity: f64) -> ClimateSeries {
        let time: Vec<String> = (0..days)
            .map(|d| (start + chrono::Days::new(d)).format("%Y-%m-%d").to_string())
            .collect();
        ClimateSeries {
            temperature: vec![temperature; time.len()],
            humidity: vec![humidity; time.len()],
            time,
        }
    }

    #[test]
    fn test_constant_year_within_calendar_year() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let series = constant_series(start, 365, 20.0, 50.0);

        let rows = aggregate_monthly(&series);
        assert_eq!(rows.len(), 12);
        for row in &rows {
            assert_eq!(row.temperature, 20);
            assert_eq!(row.humidity, 50);
        }
    }

    #[test]
    fn test_constant_year_spanning_year_boundary() {
        // Mid-year start covers 13 distinct year-months
        let start = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let series = constant_series(start, 365, 20.0, 50.0);

        let rows = aggregate_monthly(&series);
        assert_eq!(rows.len(), 13);
        assert_eq!(rows.first().unwrap().month, "2023-06");
        assert_eq!(rows.last().unwrap().month, "2024-06");
        // Same calendar month from two years stays two buckets
        assert_eq!(rows.first().unwrap().label, "Jun");
        assert_eq!(rows.last().unwrap().label, "Jun");
    }

    #[test]
    fn test_rows_strictly_ascending_by_month_key() {
        let start = NaiveDate::from_ymd_opt(2022, 11, 1).unwrap();
        let series = constant_series(start, 120, 5.0, 80.0);

        let rows = aggregate_monthly(&series);
        for pair in rows.windows(2) {
            assert!(pair[0].month < pair[1].month);
        }
    }

    #[test]
    fn test_means_are_rounded_per_bucket() {
        let series = ClimateSeries {
            time: vec![
                "2023-08-01".to_string(),
                "2023-08-02".to_string(),
                "2023-09-01".to_string(),
            ],
            temperature: vec![20.0, 21.0, 30.4],
            humidity: vec![50.0, 51.0, 70.6],
        };

        let rows = aggregate_monthly(&series);
        assert_eq!(rows.len(), 2);
        // 20.5 rounds away from zero, 30.4 rounds down
        assert_eq!(rows[0].month, "2023-08");
        assert_eq!(rows[0].temperature, 21);
        assert_eq!(rows[0].humidity, 51);
        assert_eq!(rows[1].temperature, 30);
        assert_eq!(rows[1].humidity, 71);
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label("2023-08"), "Aug");
        assert_eq!(month_label("2024-01"), "Jan");
        // Unparseable keys fall back to the raw key
        assert_eq!(month_label("junk"), "junk");
    }

    #[test]
    fn test_empty_series_yields_empty_result() {
        let series = ClimateSeries {
            time: Vec::new(),
            temperature: Vec::new(),
            humidity: Vec::new(),
        };
        assert!(aggregate_monthly(&series).is_empty());
    }
}
