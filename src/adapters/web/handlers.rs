//! HTTP request handlers for the web adapter.

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Form,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::csv_adapter::{self, CsvAdapter};
use crate::adapters::html_report_adapter::DashboardTemplate;
use crate::domain::dashboard::Dashboard;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

use super::{is_htmx_request, AppState, WebError};

pub async fn index(
    State(_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let template = super::templates::IndexTemplate;

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        Ok(template.into_response())
    }
}

/// Multipart upload of up to three CSV files. Empty file fields (a form
/// submitted with no file chosen) are treated as absent inputs.
pub async fn upload(
    State(_state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let mut sales = None;
    let mut segmentation = None;
    let mut forecast = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::bad_request(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| WebError::bad_request(format!("failed to read upload: {e}")))?;

        if data.is_empty() {
            continue;
        }

        match name.as_str() {
            "sales" => sales = Some(csv_adapter::parse_sales(&data, &file_name)?),
            "segmentation" => {
                segmentation = Some(csv_adapter::parse_segmentation(&data, &file_name)?)
            }
            "forecast" => forecast = Some(csv_adapter::parse_forecast(&data, &file_name)?),
            _ => {}
        }
    }

    let dashboard = Dashboard::build(sales, segmentation, forecast);
    respond_with_dashboard(&dashboard, &headers)
}

#[derive(Debug, serde::Deserialize)]
pub struct RenderPathsForm {
    #[serde(default)]
    pub sales: String,
    #[serde(default)]
    pub segmentation: String,
    #[serde(default)]
    pub forecast: String,
}

/// Render from CSV files already present on the server.
pub async fn render_paths(
    State(_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<RenderPathsForm>,
) -> Result<Response, WebError> {
    fn optional_path(value: &str) -> Option<PathBuf> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    let adapter = CsvAdapter::new(
        optional_path(&form.sales),
        optional_path(&form.segmentation),
        optional_path(&form.forecast),
    );
    render_from_port(&adapter, &headers)
}

/// Render from the input paths named in the server's config file.
pub async fn configured(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let configured_any = ["sales", "segmentation", "forecast"].iter().any(|key| {
        state
            .config
            .get_string("inputs", key)
            .is_some_and(|v| !v.trim().is_empty())
    });
    if !configured_any {
        return Err(WebError::bad_request(
            "no input paths configured under [inputs]",
        ));
    }

    render_from_port(&*state.data_port, &headers)
}

pub async fn not_found() -> Response {
    WebError::not_found("page not found").into_response()
}

fn render_from_port(
    data_port: &dyn DataPort,
    headers: &HeaderMap,
) -> Result<Response, WebError> {
    let sales = data_port.load_sales()?;
    let segmentation = data_port.load_segmentation()?;
    let forecast = data_port.load_forecast()?;

    let dashboard = Dashboard::build(sales, segmentation, forecast);
    respond_with_dashboard(&dashboard, headers)
}

fn respond_with_dashboard(
    dashboard: &Dashboard,
    headers: &HeaderMap,
) -> Result<Response, WebError> {
    let template = DashboardTemplate::from_dashboard(dashboard);

    if is_htmx_request(headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        Ok(template.into_response())
    }
}
