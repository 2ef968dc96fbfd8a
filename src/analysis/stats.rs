//! Summary statistics, filtering, and correlation over the sample dataset.
//!
//! Domain failures (unknown column, unusable operand) are reported as
//! `Err(String)`; the catalogue layer maps them onto handler domain errors,
//! which the dispatcher in turn surfaces as `isError` tool results.

use serde_json::{json, Map, Value};

use crate::analysis::dataset::SampleDataset;

/// Comparison operators accepted by [`filter_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Equal.
    Eq,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Substring match on the value's textual form.
    Contains,
}

impl FilterOp {
    /// Parses the wire spelling of an operator.
    #[must_use]
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "eq" => Some(Self::Eq),
            "gt" => Some(Self::Gt),
            "lt" => Some(Self::Lt),
            "gte" => Some(Self::Gte),
            "lte" => Some(Self::Lte),
            "contains" => Some(Self::Contains),
            _ => None,
        }
    }

    fn compare_f64(self, x: f64, y: f64) -> bool {
        match self {
            Self::Eq => (x - y).abs() < f64::EPSILON,
            Self::Gt => x > y,
            Self::Lt => x < y,
            Self::Gte => x >= y,
            Self::Lte => x <= y,
            Self::Contains => format_number(x).contains(&format_number(y)),
        }
    }

    fn compare_str(self, x: &str, y: &str) -> bool {
        match self {
            Self::Eq => x == y,
            Self::Gt => x > y,
            Self::Lt => x < y,
            Self::Gte => x >= y,
            Self::Lte => x <= y,
            Self::Contains => x.contains(y),
        }
    }
}

/// Formats a numeric cell the way it appears in result payloads.
fn format_number(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{x:.0}")
    } else {
        format!("{x}")
    }
}

/// Summary statistics for one column or the whole table.
///
/// With a column name: count, mean, std, min, quartiles, max. Without:
/// count/mean/std/min/max for every numeric column.
///
/// # Errors
///
/// Returns a description if the column is unknown or non-numeric.
pub fn summary_statistics(dataset: &SampleDataset, column: Option<&str>) -> Result<Value, String> {
    match column {
        Some(name) => {
            let values = numeric_column(dataset, name)?;
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);

            Ok(json!({
                "count": values.len(),
                "mean": mean(values),
                "std": std_dev(values),
                "min": sorted.first().copied().unwrap_or(0.0),
                "25%": quantile(&sorted, 0.25),
                "50%": quantile(&sorted, 0.5),
                "75%": quantile(&sorted, 0.75),
                "max": sorted.last().copied().unwrap_or(0.0),
            }))
        }
        None => {
            let mut result = Map::new();
            for (name, values) in dataset.numeric_columns() {
                result.insert(
                    name.to_string(),
                    json!({
                        "count": values.len(),
                        "mean": mean(values),
                        "std": std_dev(values),
                        "min": values.iter().copied().fold(f64::INFINITY, f64::min),
                        "max": values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    }),
                );
            }
            Ok(Value::Object(result))
        }
    }
}

/// Filters the dataset on one column and summarises the matching rows.
///
/// # Errors
///
/// Returns a description if the column is unknown, the operator is not
/// recognised, or the comparison value's type does not fit the column.
pub fn filter_data(
    dataset: &SampleDataset,
    column: &str,
    operator: &str,
    value: &Value,
) -> Result<Value, String> {
    if !dataset.has_column(column) {
        return Err(format!("Column '{column}' not found in dataset"));
    }
    let op = FilterOp::parse(operator)
        .ok_or_else(|| format!("Operator '{operator}' not supported"))?;

    let matching: Vec<usize> = if column == "date" {
        let needle = value
            .as_str()
            .ok_or_else(|| "Filtering the date column requires a string value".to_string())?;
        dataset
            .dates()
            .iter()
            .enumerate()
            .filter(|(_, d)| op.compare_str(d, needle))
            .map(|(i, _)| i)
            .collect()
    } else {
        let values = numeric_column(dataset, column)?;
        match op {
            FilterOp::Contains => {
                let needle = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return Err("Unusable comparison value".to_string()),
                };
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, &x)| format_number(x).contains(&needle))
                    .map(|(i, _)| i)
                    .collect()
            }
            _ => {
                let needle = value.as_f64().ok_or_else(|| {
                    format!("Comparing column '{column}' requires a numeric value")
                })?;
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, &x)| op.compare_f64(x, needle))
                    .map(|(i, _)| i)
                    .collect()
            }
        }
    };

    let sample: Vec<Value> = matching.iter().take(5).map(|&i| row_record(dataset, i)).collect();

    let mut summary = Map::new();
    for (name, values) in dataset.numeric_columns() {
        let subset: Vec<f64> = matching.iter().map(|&i| values[i]).collect();
        summary.insert(
            name.to_string(),
            if subset.is_empty() {
                json!({ "mean": null, "min": null, "max": null })
            } else {
                json!({
                    "mean": mean(&subset),
                    "min": subset.iter().copied().fold(f64::INFINITY, f64::min),
                    "max": subset.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                })
            },
        );
    }

    Ok(json!({
        "count": matching.len(),
        "columns": dataset.column_names(),
        "sample": sample,
        "summary": summary,
    }))
}

/// Pearson correlation between two numeric columns, with a plain-language
/// interpretation.
///
/// # Errors
///
/// Returns a description if either column is unknown or non-numeric, or if a
/// column is constant (correlation undefined).
pub fn correlation(dataset: &SampleDataset, column1: &str, column2: &str) -> Result<Value, String> {
    let xs = numeric_column(dataset, column1)?;
    let ys = numeric_column(dataset, column2)?;

    let n = xs.len();
    if n < 2 {
        return Err("Correlation requires at least two rows".to_string());
    }

    let mx = mean(xs);
    let my = mean(ys);
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for i in 0..n {
        let dx = xs[i] - mx;
        let dy = ys[i] - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    if vx == 0.0 || vy == 0.0 {
        return Err(format!(
            "Correlation is undefined: column '{}' is constant",
            if vx == 0.0 { column1 } else { column2 }
        ));
    }

    let r = cov / (vx.sqrt() * vy.sqrt());

    Ok(json!({
        "correlation": r,
        "interpretation": interpret_correlation(r),
    }))
}

/// Interprets a correlation coefficient.
#[must_use]
pub fn interpret_correlation(r: f64) -> String {
    let strength = match r.abs() {
        a if a < 0.1 => "negligible",
        a if a < 0.3 => "weak",
        a if a < 0.5 => "moderate",
        a if a < 0.7 => "strong",
        _ => "very strong",
    };
    let direction = if r >= 0.0 { "positive" } else { "negative" };

    format!("A {strength} {direction} correlation")
}

fn numeric_column<'a>(dataset: &'a SampleDataset, name: &str) -> Result<&'a [f64], String> {
    if name == "date" {
        return Err("Column 'date' is not numeric".to_string());
    }
    dataset
        .numeric_column(name)
        .ok_or_else(|| format!("Column '{name}' not found in dataset"))
}

fn row_record(dataset: &SampleDataset, index: usize) -> Value {
    let mut record = Map::new();
    record.insert("date".to_string(), json!(dataset.dates()[index]));
    for (name, values) in dataset.numeric_columns() {
        record.insert(name.to_string(), json!(values[index]));
    }
    Value::Object(record)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.iter().sum::<f64>() / n
}

/// Sample standard deviation (ddof = 1); zero for fewer than two values.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    #[allow(clippy::cast_precision_loss)]
    let n = (values.len() - 1) as f64;
    (values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n).sqrt()
}

/// Linearly interpolated quantile over an already-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pos = q * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = pos.floor() as usize;
    let frac = pos - pos.floor();
    if lo + 1 >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}
