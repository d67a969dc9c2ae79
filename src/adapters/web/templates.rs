//! HTML templates using Askama.
//!
//! The dashboard page itself lives in
//! [`crate::adapters::html_report_adapter::DashboardTemplate`] and is shared
//! with the file report adapter.

use askama::Template;

pub use crate::adapters::html_report_adapter::DashboardTemplate;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

impl IndexTemplate {
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\"><h1>Upload Your Data</h1>");
        html.push_str(
            "<form hx-post=\"/upload\" hx-target=\"#content\" hx-encoding=\"multipart/form-data\">",
        );
        html.push_str("<label>Cleaned Retail CSV: <input type=\"file\" name=\"sales\"></label><br>");
        html.push_str(
            "<label>RFM Segmentation CSV: <input type=\"file\" name=\"segmentation\"></label><br>",
        );
        html.push_str(
            "<label>Sales Forecast CSV: <input type=\"file\" name=\"forecast\"></label><br>",
        );
        html.push_str("<button type=\"submit\">Render Dashboard</button>");
        html.push_str("</form>");
        html.push_str("</div>");
        html
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
