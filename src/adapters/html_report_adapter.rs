//! HTML dashboard adapter implementing ReportPort.
//!
//! Renders the dashboard page with an Askama template and inline SVG charts.
//! The template model here is also used by the web adapter, so one template
//! serves both the written report and the served page.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::adapters::chart_svg;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::ports::report_port::ReportPort;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub sales: Option<SalesSection>,
    pub segmentation: Option<SegmentationSection>,
    pub forecast: Option<ForecastSection>,
}

pub struct SalesPreviewRow {
    pub invoice_timestamp: String,
    pub product_description: String,
    pub line_total: String,
}

pub struct SalesSection {
    pub preview: Vec<SalesPreviewRow>,
    pub total_revenue: String,
    pub daily_revenue_svg: String,
    pub top_products_svg: String,
}

pub struct SegmentationPreviewRow {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: i64,
    pub monetary: String,
    pub segment: String,
}

pub struct SegmentationSection {
    pub total_customers: usize,
    pub preview: Vec<SegmentationPreviewRow>,
    pub pie_svg: String,
}

pub struct ForecastSection {
    pub points: usize,
    pub chart_svg: String,
}

impl DashboardTemplate {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let sales = dashboard.sales.as_ref().map(|view| SalesSection {
            preview: view
                .preview
                .iter()
                .map(|r| SalesPreviewRow {
                    invoice_timestamp: r.invoice_timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    product_description: r.product_description.clone(),
                    line_total: format!("{:.2}", r.line_total),
                })
                .collect(),
            total_revenue: format!("{:.2}", view.total_revenue()),
            daily_revenue_svg: chart_svg::daily_revenue_svg(&view.daily_revenue),
            top_products_svg: chart_svg::top_products_svg(&view.top_products),
        });

        let segmentation = dashboard
            .segmentation
            .as_ref()
            .map(|view| SegmentationSection {
                total_customers: view.total_customers,
                preview: view
                    .preview
                    .iter()
                    .map(|r| SegmentationPreviewRow {
                        customer_id: r.customer_id.clone(),
                        recency: r.recency,
                        frequency: r.frequency,
                        monetary: format!("{:.2}", r.monetary),
                        segment: r.segment.clone(),
                    })
                    .collect(),
                pie_svg: chart_svg::segment_pie_svg(&view.distribution),
            });

        let forecast = dashboard.forecast.as_ref().map(|points| ForecastSection {
            points: points.len(),
            chart_svg: chart_svg::forecast_svg(points),
        });

        Self {
            sales,
            segmentation,
            forecast,
        }
    }

    /// Compact HTMX fragment: headline numbers and charts without the
    /// preview tables.
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\">");

        if let Some(s) = &self.sales {
            html.push_str("<h2>Sales Over Time</h2>");
            html.push_str(&format!(
                "<p>Total revenue: ${}</p>",
                s.total_revenue
            ));
            html.push_str(&format!("<div class=\"chart\">{}</div>", s.daily_revenue_svg));
            html.push_str(&format!("<div class=\"chart\">{}</div>", s.top_products_svg));
        }

        if let Some(seg) = &self.segmentation {
            html.push_str("<h2>Customer Segmentation (RFM)</h2>");
            html.push_str(&format!(
                "<p>Total customers: {}</p>",
                seg.total_customers
            ));
            html.push_str(&format!("<div class=\"chart\">{}</div>", seg.pie_svg));
        }

        if let Some(f) = &self.forecast {
            html.push_str("<h2>Sales Forecast</h2>");
            html.push_str(&format!("<p>{} forecast points</p>", f.points));
            html.push_str(&format!("<div class=\"chart\">{}</div>", f.chart_svg));
        }

        html.push_str("</div>");
        html
    }
}

pub struct HtmlReportAdapter;

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(&self, dashboard: &Dashboard, output_path: &str) -> Result<(), DashboardError> {
        let template = DashboardTemplate::from_dashboard(dashboard);
        let html = template.render().map_err(|e| DashboardError::Render {
            reason: e.to_string(),
        })?;

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(DashboardError::Io)?;
        }
        fs::write(path, html).map_err(DashboardError::Io)?;

        Ok(())
    }
}
