//! Sales records and revenue aggregations.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

/// Rows shown in each preview table.
pub const PREVIEW_ROWS: usize = 5;

/// Products shown in the top-sellers bar chart.
pub const TOP_PRODUCT_COUNT: usize = 10;

/// One invoice line from the cleaned retail export.
#[derive(Debug, Clone)]
pub struct SalesRecord {
    pub invoice_timestamp: NaiveDateTime,
    pub product_description: String,
    pub line_total: f64,
}

impl SalesRecord {
    /// Date portion of the invoice timestamp, used for daily grouping.
    pub fn calendar_date(&self) -> NaiveDate {
        self.invoice_timestamp.date()
    }
}

/// Sum of `line_total` per calendar date, ascending by date.
pub fn daily_revenue(records: &[SalesRecord]) -> Vec<(NaiveDate, f64)> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.calendar_date()).or_insert(0.0) += record.line_total;
    }
    totals.into_iter().collect()
}

/// Sum of `line_total` per product, descending by total, truncated to `limit`.
///
/// The sort is stable, so products with equal totals keep their
/// first-encounter order from the input.
pub fn top_products(records: &[SalesRecord], limit: usize) -> Vec<(String, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, f64)> = Vec::new();

    for record in records {
        match index.get(record.product_description.as_str()) {
            Some(&i) => totals[i].1 += record.line_total,
            None => {
                index.insert(record.product_description.as_str(), totals.len());
                totals.push((record.product_description.clone(), record.line_total));
            }
        }
    }

    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(limit);
    totals
}

/// Everything the sales view renders: preview rows, daily series, top sellers.
#[derive(Debug, Clone)]
pub struct SalesView {
    pub preview: Vec<SalesRecord>,
    pub daily_revenue: Vec<(NaiveDate, f64)>,
    pub top_products: Vec<(String, f64)>,
}

impl SalesView {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        Self {
            preview: records.iter().take(PREVIEW_ROWS).cloned().collect(),
            daily_revenue: daily_revenue(records),
            top_products: top_products(records, TOP_PRODUCT_COUNT),
        }
    }

    pub fn total_revenue(&self) -> f64 {
        self.daily_revenue.iter().map(|(_, total)| total).sum()
    }
}
