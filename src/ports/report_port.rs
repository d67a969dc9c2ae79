//! Report generation port trait.

use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;

/// Port for writing a rendered dashboard page.
pub trait ReportPort {
    fn write(&self, dashboard: &Dashboard, output_path: &str) -> Result<(), DashboardError>;
}
