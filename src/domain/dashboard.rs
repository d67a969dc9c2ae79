//! Dashboard assembly: one view per present input, absent inputs skipped.

use crate::domain::forecast::ForecastRecord;
use crate::domain::sales::{SalesRecord, SalesView};
use crate::domain::segmentation::{SegmentationRecord, SegmentationView};

/// The fully aggregated page model. Each view is present iff its input was
/// supplied; no relationships exist between the three.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub sales: Option<SalesView>,
    pub segmentation: Option<SegmentationView>,
    pub forecast: Option<Vec<ForecastRecord>>,
}

impl Dashboard {
    pub fn build(
        sales: Option<Vec<SalesRecord>>,
        segmentation: Option<Vec<SegmentationRecord>>,
        forecast: Option<Vec<ForecastRecord>>,
    ) -> Self {
        Self {
            sales: sales.map(|records| SalesView::from_records(&records)),
            segmentation: segmentation.map(|records| SegmentationView::from_records(&records)),
            forecast,
        }
    }

    /// True when no input was supplied; the rendered page then contains only
    /// the static header and footer.
    pub fn is_empty(&self) -> bool {
        self.sales.is_none() && self.segmentation.is_none() && self.forecast.is_none()
    }
}
