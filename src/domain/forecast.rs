//! Forecast records produced by an upstream forecasting process.

use chrono::NaiveDateTime;

/// A predicted value with confidence bounds for one future date.
///
/// `lower_bound <= predicted_value <= upper_bound` is assumed but not
/// enforced; rows are plotted exactly as supplied, with no clipping or
/// date-range filtering.
#[derive(Debug, Clone)]
pub struct ForecastRecord {
    pub date: NaiveDateTime,
    pub predicted_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}
