//! Data access port trait.

use crate::domain::error::DashboardError;
use crate::domain::forecast::ForecastRecord;
use crate::domain::sales::SalesRecord;
use crate::domain::segmentation::SegmentationRecord;

/// Loads the three optional input tables. `Ok(None)` means the input was
/// never supplied and its view is skipped; a supplied-but-broken input is an
/// error.
pub trait DataPort {
    fn load_sales(&self) -> Result<Option<Vec<SalesRecord>>, DashboardError>;

    fn load_segmentation(&self) -> Result<Option<Vec<SegmentationRecord>>, DashboardError>;

    fn load_forecast(&self) -> Result<Option<Vec<ForecastRecord>>, DashboardError>;
}
