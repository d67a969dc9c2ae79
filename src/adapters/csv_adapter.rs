//! CSV parsing for the three input tables.
//!
//! Column names must match the upstream exports exactly; there is no header
//! normalization. Parse functions work on in-memory bytes so both the file
//! adapter and the web upload handler can share them.

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

use crate::domain::error::DashboardError;
use crate::domain::forecast::ForecastRecord;
use crate::domain::sales::SalesRecord;
use crate::domain::segmentation::SegmentationRecord;
use crate::ports::data_port::DataPort;

fn column_index(
    headers: &csv::StringRecord,
    name: &str,
    source: &str,
) -> Result<usize, DashboardError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DashboardError::MissingColumn {
            file: source.to_string(),
            column: name.to_string(),
        })
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    column: &str,
    row: usize,
    source: &str,
) -> Result<&'r str, DashboardError> {
    record.get(index).ok_or_else(|| DashboardError::InvalidValue {
        file: source.to_string(),
        row,
        column: column.to_string(),
        value: String::new(),
        reason: "field missing".to_string(),
    })
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`, or a bare date
/// (interpreted as midnight).
fn parse_timestamp(
    value: &str,
    column: &str,
    row: usize,
    source: &str,
) -> Result<NaiveDateTime, DashboardError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|e| DashboardError::InvalidValue {
            file: source.to_string(),
            row,
            column: column.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_f64(value: &str, column: &str, row: usize, source: &str) -> Result<f64, DashboardError> {
    value.trim().parse().map_err(|e: std::num::ParseFloatError| {
        DashboardError::InvalidValue {
            file: source.to_string(),
            row,
            column: column.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

fn parse_i64(value: &str, column: &str, row: usize, source: &str) -> Result<i64, DashboardError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| {
        DashboardError::InvalidValue {
            file: source.to_string(),
            row,
            column: column.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

fn csv_error(source: &str, e: csv::Error) -> DashboardError {
    DashboardError::Csv {
        file: source.to_string(),
        reason: e.to_string(),
    }
}

/// Parse a cleaned retail export (`InvoiceDate`, `Description`, `TotalPrice`).
pub fn parse_sales(input: &[u8], source: &str) -> Result<Vec<SalesRecord>, DashboardError> {
    let mut rdr = csv::Reader::from_reader(input);
    let headers = rdr.headers().map_err(|e| csv_error(source, e))?.clone();

    let date_col = column_index(&headers, "InvoiceDate", source)?;
    let desc_col = column_index(&headers, "Description", source)?;
    let total_col = column_index(&headers, "TotalPrice", source)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| csv_error(source, e))?;
        let row = i + 1;

        let timestamp = field(&record, date_col, "InvoiceDate", row, source)?;
        let description = field(&record, desc_col, "Description", row, source)?;
        let total = field(&record, total_col, "TotalPrice", row, source)?;

        records.push(SalesRecord {
            invoice_timestamp: parse_timestamp(timestamp, "InvoiceDate", row, source)?,
            product_description: description.to_string(),
            line_total: parse_f64(total, "TotalPrice", row, source)?,
        });
    }
    Ok(records)
}

/// Parse an RFM segmentation export (`CustomerID`, `Recency`, `Frequency`,
/// `Monetary`, `Segment`).
pub fn parse_segmentation(
    input: &[u8],
    source: &str,
) -> Result<Vec<SegmentationRecord>, DashboardError> {
    let mut rdr = csv::Reader::from_reader(input);
    let headers = rdr.headers().map_err(|e| csv_error(source, e))?.clone();

    let id_col = column_index(&headers, "CustomerID", source)?;
    let recency_col = column_index(&headers, "Recency", source)?;
    let frequency_col = column_index(&headers, "Frequency", source)?;
    let monetary_col = column_index(&headers, "Monetary", source)?;
    let segment_col = column_index(&headers, "Segment", source)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| csv_error(source, e))?;
        let row = i + 1;

        records.push(SegmentationRecord {
            customer_id: field(&record, id_col, "CustomerID", row, source)?.to_string(),
            recency: parse_i64(
                field(&record, recency_col, "Recency", row, source)?,
                "Recency",
                row,
                source,
            )?,
            frequency: parse_i64(
                field(&record, frequency_col, "Frequency", row, source)?,
                "Frequency",
                row,
                source,
            )?,
            monetary: parse_f64(
                field(&record, monetary_col, "Monetary", row, source)?,
                "Monetary",
                row,
                source,
            )?,
            segment: field(&record, segment_col, "Segment", row, source)?.to_string(),
        });
    }
    Ok(records)
}

/// Parse a forecast export (`ds`, `yhat`, `yhat_lower`, `yhat_upper`).
pub fn parse_forecast(input: &[u8], source: &str) -> Result<Vec<ForecastRecord>, DashboardError> {
    let mut rdr = csv::Reader::from_reader(input);
    let headers = rdr.headers().map_err(|e| csv_error(source, e))?.clone();

    let date_col = column_index(&headers, "ds", source)?;
    let yhat_col = column_index(&headers, "yhat", source)?;
    let lower_col = column_index(&headers, "yhat_lower", source)?;
    let upper_col = column_index(&headers, "yhat_upper", source)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| csv_error(source, e))?;
        let row = i + 1;

        records.push(ForecastRecord {
            date: parse_timestamp(field(&record, date_col, "ds", row, source)?, "ds", row, source)?,
            predicted_value: parse_f64(
                field(&record, yhat_col, "yhat", row, source)?,
                "yhat",
                row,
                source,
            )?,
            lower_bound: parse_f64(
                field(&record, lower_col, "yhat_lower", row, source)?,
                "yhat_lower",
                row,
                source,
            )?,
            upper_bound: parse_f64(
                field(&record, upper_col, "yhat_upper", row, source)?,
                "yhat_upper",
                row,
                source,
            )?,
        });
    }
    Ok(records)
}

/// File-backed [`DataPort`]: each input is an optional CSV path. An
/// unconfigured path loads as `None`; a configured path that cannot be read
/// or parsed is an error.
pub struct CsvAdapter {
    sales_path: Option<PathBuf>,
    segmentation_path: Option<PathBuf>,
    forecast_path: Option<PathBuf>,
}

impl CsvAdapter {
    pub fn new(
        sales_path: Option<PathBuf>,
        segmentation_path: Option<PathBuf>,
        forecast_path: Option<PathBuf>,
    ) -> Self {
        Self {
            sales_path,
            segmentation_path,
            forecast_path,
        }
    }

    fn read(path: &PathBuf) -> Result<Vec<u8>, DashboardError> {
        fs::read(path).map_err(|e| {
            DashboardError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read {}: {}", path.display(), e),
            ))
        })
    }
}

impl DataPort for CsvAdapter {
    fn load_sales(&self) -> Result<Option<Vec<SalesRecord>>, DashboardError> {
        match &self.sales_path {
            Some(path) => {
                let bytes = Self::read(path)?;
                parse_sales(&bytes, &path.display().to_string()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn load_segmentation(&self) -> Result<Option<Vec<SegmentationRecord>>, DashboardError> {
        match &self.segmentation_path {
            Some(path) => {
                let bytes = Self::read(path)?;
                parse_segmentation(&bytes, &path.display().to_string()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn load_forecast(&self) -> Result<Option<Vec<ForecastRecord>>, DashboardError> {
        match &self.forecast_path {
            Some(path) => {
                let bytes = Self::read(path)?;
                parse_forecast(&bytes, &path.display().to_string()).map(Some)
            }
            None => Ok(None),
        }
    }
}
