#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Index page renders the upload form
//! - Multipart upload renders the dashboard views for present inputs
//! - Schema errors surface as 422 responses
//! - Config-driven and path-driven rendering
//! - HTMX fragment vs full page responses

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use retaildash::adapters::web::{build_router, AppState};
use retaildash::ports::config_port::ConfigPort;
use std::fs;
use std::sync::Arc;
use tower::ServiceExt;

use common::*;

struct MockConfigPort;

impl ConfigPort for MockConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match (section, key) {
            ("web", "listen") => Some("127.0.0.1:0".to_string()),
            ("inputs", key) => Some(format!("data/{key}.csv")),
            _ => None,
        }
    }

    fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
        default
    }

    fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
        default
    }

    fn get_bool(&self, _section: &str, _key: &str, default: bool) -> bool {
        default
    }
}

fn create_test_app(port: MockDataPort) -> Router {
    let state = AppState {
        data_port: Arc::new(port),
        config: Arc::new(MockConfigPort),
    };
    build_router(state)
}

const BOUNDARY: &str = "X-RETAILDASH-BOUNDARY";

fn multipart_body(parts: &[(&str, &str, &str)]) -> (String, String) {
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
             filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

mod index_tests {
    use super::*;

    #[tokio::test]
    async fn index_renders_upload_form() {
        let app = create_test_app(MockDataPort::new());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Upload Your Data"));
        assert!(html.contains("name=\"sales\""));
        assert!(html.contains("name=\"forecast\""));
    }

    #[tokio::test]
    async fn index_htmx_fragment_excludes_html_wrapper() {
        let app = create_test_app(MockDataPort::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains("<div id=\"content\">"));
        assert!(!html.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = create_test_app(MockDataPort::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod upload_tests {
    use super::*;

    #[tokio::test]
    async fn upload_sales_renders_sales_view_only() {
        let app = create_test_app(MockDataPort::new());
        let (content_type, body) = multipart_body(&[("sales", "sales.csv", SALES_CSV)]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Daily Revenue Trend"));
        assert!(html.contains("Top 10 Selling Products"));
        assert!(!html.contains("Customer Segment Distribution"));
        assert!(!html.contains("Predicted Sales"));
    }

    #[tokio::test]
    async fn upload_all_three_renders_every_view() {
        let app = create_test_app(MockDataPort::new());
        let (content_type, body) = multipart_body(&[
            ("sales", "sales.csv", SALES_CSV),
            ("segmentation", "rfm.csv", RFM_CSV),
            ("forecast", "forecast.csv", FORECAST_CSV),
        ]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Daily Revenue Trend"));
        assert!(html.contains("Total Customers: 4"));
        assert!(html.contains("Predicted Sales for Next 90 Days"));
    }

    #[tokio::test]
    async fn upload_empty_file_field_is_treated_as_absent() {
        let app = create_test_app(MockDataPort::new());
        let (content_type, body) = multipart_body(&[
            ("sales", "sales.csv", SALES_CSV),
            ("segmentation", "", ""),
        ]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Daily Revenue Trend"));
        assert!(!html.contains("Customer Segment Distribution"));
    }

    #[tokio::test]
    async fn upload_with_missing_column_is_422() {
        let app = create_test_app(MockDataPort::new());
        let (content_type, body) = multipart_body(&[(
            "sales",
            "sales.csv",
            "Date,Item,Amount\n2024-01-01,Widget,10.0\n",
        )]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_string(response).await;
        assert!(html.contains("InvoiceDate"));
    }

    #[tokio::test]
    async fn upload_nothing_renders_static_page() {
        let app = create_test_app(MockDataPort::new());
        let (content_type, body) = multipart_body(&[]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(!html.contains("<svg"));
    }

    #[tokio::test]
    async fn upload_htmx_request_gets_fragment() {
        let app = create_test_app(MockDataPort::new());
        let (content_type, body) = multipart_body(&[("sales", "sales.csv", SALES_CSV)]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header("HX-Request", "true")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains("<div id=\"content\">"));
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Total revenue: $35.00"));
    }
}

mod configured_tests {
    use super::*;

    struct EmptyConfigPort;

    impl ConfigPort for EmptyConfigPort {
        fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
            None
        }

        fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
            default
        }

        fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
            default
        }

        fn get_bool(&self, _section: &str, _key: &str, default: bool) -> bool {
            default
        }
    }

    #[tokio::test]
    async fn configured_without_input_config_is_400() {
        let state = AppState {
            data_port: Arc::new(MockDataPort::new()),
            config: Arc::new(EmptyConfigPort),
        };
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/configured")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_string(response).await;
        assert!(html.contains("no input paths configured"));
    }

    #[tokio::test]
    async fn configured_renders_from_data_port() {
        let port = MockDataPort::new().with_segmentation(vec![
            make_segment("1", "A"),
            make_segment("2", "B"),
        ]);
        let app = create_test_app(port);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/configured")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Total Customers: 2"));
        assert!(html.contains("Customer Segment Distribution"));
    }

    #[tokio::test]
    async fn configured_data_port_error_is_422() {
        let port = MockDataPort::new().with_error("sales", "bad record");
        let app = create_test_app(port);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/configured")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod render_paths_tests {
    use super::*;

    #[tokio::test]
    async fn render_from_server_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let sales = dir.path().join("sales.csv");
        fs::write(&sales, SALES_CSV).unwrap();

        let app = create_test_app(MockDataPort::new());
        let form = format!("sales={}", sales.display());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/render")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Daily Revenue Trend"));
    }

    #[tokio::test]
    async fn render_with_blank_paths_renders_static_page() {
        let app = create_test_app(MockDataPort::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/render")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from("sales=&segmentation=&forecast="))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(!html.contains("<svg"));
    }
}
