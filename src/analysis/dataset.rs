//! Synthetic analytics dataset.
//!
//! A daily weather-style series generated from a seeded RNG at startup. The
//! same seed always yields the same table, so tool results are reproducible
//! across runs and the statistics handlers stay pure readers.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DatasetConfig;

/// The generated table: one date column plus five numeric columns.
pub struct SampleDataset {
    dates: Vec<String>,
    columns: IndexMap<String, Vec<f64>>,
}

impl SampleDataset {
    /// Generates the dataset described by `config`.
    ///
    /// An unparseable `start_date` falls back to 2023-01-01; the config
    /// validation layer keeps `rows` within sane bounds.
    #[must_use]
    pub fn generate(config: &DatasetConfig) -> Self {
        let start = NaiveDate::parse_from_str(&config.start_date, "%Y-%m-%d")
            .unwrap_or_else(|_| NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default());

        let mut rng = StdRng::seed_from_u64(config.seed);
        let rows = config.rows;

        let dates: Vec<String> = (0..rows)
            .map(|i| {
                (start + Duration::days(i64::try_from(i).unwrap_or(i64::MAX)))
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .collect();

        let mut columns = IndexMap::new();
        columns.insert(
            "temperature".to_string(),
            (0..rows).map(|_| rng.gen_range(-5.0..35.0)).collect(),
        );
        columns.insert(
            "humidity".to_string(),
            (0..rows).map(|_| rng.gen_range(20.0..100.0)).collect(),
        );
        columns.insert(
            "wind_speed".to_string(),
            (0..rows).map(|_| rng.gen_range(0.0..25.0)).collect(),
        );
        columns.insert(
            "precipitation".to_string(),
            (0..rows).map(|_| rng.gen_range(0.0_f64..8.0).powi(2) / 8.0).collect(),
        );
        columns.insert(
            "air_quality_index".to_string(),
            (0..rows).map(|_| f64::from(rng.gen_range(0..300))).collect(),
        );

        Self { dates, columns }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The date column.
    #[must_use]
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// A numeric column by name, or `None` for unknown columns and the date
    /// column.
    #[must_use]
    pub fn numeric_column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// All column names, date first, in table order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = vec!["date"];
        names.extend(self.columns.keys().map(String::as_str));
        names
    }

    /// Names of the numeric columns, in table order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether `name` names any column, including the date column.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        name == "date" || self.columns.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: usize, seed: u64) -> DatasetConfig {
        DatasetConfig {
            rows,
            seed,
            start_date: "2023-01-01".to_string(),
        }
    }

    #[test]
    fn generates_requested_rows() {
        let ds = SampleDataset::generate(&config(30, 42));
        assert_eq!(ds.len(), 30);
        assert_eq!(ds.dates()[0], "2023-01-01");
        assert_eq!(ds.dates()[29], "2023-01-30");
    }

    #[test]
    fn same_seed_is_deterministic() {
        let a = SampleDataset::generate(&config(50, 42));
        let b = SampleDataset::generate(&config(50, 42));

        assert_eq!(
            a.numeric_column("temperature").unwrap(),
            b.numeric_column("temperature").unwrap()
        );
    }

    #[test]
    fn different_seeds_differ() {
        let a = SampleDataset::generate(&config(50, 1));
        let b = SampleDataset::generate(&config(50, 2));

        assert_ne!(
            a.numeric_column("temperature").unwrap(),
            b.numeric_column("temperature").unwrap()
        );
    }

    #[test]
    fn values_stay_in_range() {
        let ds = SampleDataset::generate(&config(365, 42));
        for &aqi in ds.numeric_column("air_quality_index").unwrap() {
            assert!((0.0..300.0).contains(&aqi));
            assert!((aqi.fract()).abs() < f64::EPSILON);
        }
        for &p in ds.numeric_column("precipitation").unwrap() {
            assert!(p >= 0.0);
        }
    }

    #[test]
    fn column_catalogue() {
        let ds = SampleDataset::generate(&config(5, 42));
        assert_eq!(
            ds.column_names(),
            [
                "date",
                "temperature",
                "humidity",
                "wind_speed",
                "precipitation",
                "air_quality_index"
            ]
        );
        assert!(ds.has_column("date"));
        assert!(ds.has_column("humidity"));
        assert!(!ds.has_column("pressure"));
        assert!(ds.numeric_column("date").is_none());
    }

    #[test]
    fn bad_start_date_falls_back() {
        let ds = SampleDataset::generate(&DatasetConfig {
            rows: 2,
            seed: 42,
            start_date: "not-a-date".to_string(),
        });
        assert_eq!(ds.dates()[0], "2023-01-01");
    }
}
