#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use retaildash::domain::error::DashboardError;
pub use retaildash::domain::forecast::ForecastRecord;
pub use retaildash::domain::sales::SalesRecord;
pub use retaildash::domain::segmentation::SegmentationRecord;
use retaildash::ports::data_port::DataPort;
use std::collections::HashMap;

#[derive(Default)]
pub struct MockDataPort {
    pub sales: Option<Vec<SalesRecord>>,
    pub segmentation: Option<Vec<SegmentationRecord>>,
    pub forecast: Option<Vec<ForecastRecord>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sales(mut self, records: Vec<SalesRecord>) -> Self {
        self.sales = Some(records);
        self
    }

    pub fn with_segmentation(mut self, records: Vec<SegmentationRecord>) -> Self {
        self.segmentation = Some(records);
        self
    }

    pub fn with_forecast(mut self, records: Vec<ForecastRecord>) -> Self {
        self.forecast = Some(records);
        self
    }

    pub fn with_error(mut self, table: &str, reason: &str) -> Self {
        self.errors.insert(table.to_string(), reason.to_string());
        self
    }

    fn check(&self, table: &str) -> Result<(), DashboardError> {
        match self.errors.get(table) {
            Some(reason) => Err(DashboardError::Csv {
                file: format!("{table}.csv"),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_sales(&self) -> Result<Option<Vec<SalesRecord>>, DashboardError> {
        self.check("sales")?;
        Ok(self.sales.clone())
    }

    fn load_segmentation(&self) -> Result<Option<Vec<SegmentationRecord>>, DashboardError> {
        self.check("segmentation")?;
        Ok(self.segmentation.clone())
    }

    fn load_forecast(&self) -> Result<Option<Vec<ForecastRecord>>, DashboardError> {
        self.check("forecast")?;
        Ok(self.forecast.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn timestamp(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.and_hms_opt(0, 0, 0).unwrap())
        })
        .unwrap()
}

pub fn make_sale(ts: &str, product: &str, total: f64) -> SalesRecord {
    SalesRecord {
        invoice_timestamp: timestamp(ts),
        product_description: product.to_string(),
        line_total: total,
    }
}

pub fn make_segment(id: &str, segment: &str) -> SegmentationRecord {
    SegmentationRecord {
        customer_id: id.to_string(),
        recency: 30,
        frequency: 2,
        monetary: 100.0,
        segment: segment.to_string(),
    }
}

pub fn make_forecast(ts: &str, yhat: f64, lower: f64, upper: f64) -> ForecastRecord {
    ForecastRecord {
        date: timestamp(ts),
        predicted_value: yhat,
        lower_bound: lower,
        upper_bound: upper,
    }
}

pub const SALES_CSV: &str = "InvoiceDate,Description,TotalPrice\n\
    2024-01-01 09:00:00,Widget,10.0\n\
    2024-01-01 17:30:00,Widget,5.0\n\
    2024-01-02 10:15:00,Gadget,20.0\n";

pub const RFM_CSV: &str = "CustomerID,Recency,Frequency,Monetary,Segment\n\
    1,10,5,1500.50,A\n\
    2,200,1,25.00,A\n\
    3,40,2,300.00,B\n\
    4,80,3,450.00,C\n";

pub const FORECAST_CSV: &str = "ds,yhat,yhat_lower,yhat_upper\n\
    2025-01-01,100.0,80.0,120.0\n\
    2025-01-02,105.0,82.0,128.0\n\
    2025-01-03,110.0,85.0,135.0\n";
