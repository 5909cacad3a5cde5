#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Form page rendering (full page vs HTMX fragment)
//! - Partial transaction patches through POST /transaction
//! - Ticker selection and deselection
//! - Catalogue search API
//! - SVG export headers
//! - Logo proxy input validation

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sahamcard::adapters::web::{build_router, new_session_record, AppState};
use sahamcard::ports::config_port::ConfigPort;
use std::sync::Arc;
use tower::ServiceExt;

use common::*;

struct MockConfigPort;

impl ConfigPort for MockConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match (section, key) {
            ("logo", "base_url") => Some("http://127.0.0.1:1/logos".to_string()),
            _ => None,
        }
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        match (section, key) {
            ("logo", "timeout_secs") => 1,
            _ => default,
        }
    }

    fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
        default
    }

    fn get_bool(&self, _section: &str, _key: &str, default: bool) -> bool {
        default
    }
}

fn create_test_app() -> Router {
    let state = AppState {
        stocks: Arc::new(sample_port()),
        config: Arc::new(MockConfigPort),
        session: new_session_record(),
        http: reqwest::Client::new(),
    };
    build_router(state)
}

async fn body_string(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).into_owned()
}

fn form_post(uri: &str, body: &str, htmx: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

mod form_page_tests {
    use super::*;

    #[tokio::test]
    async fn form_page_renders_with_ok_status() {
        let app = create_test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn form_page_shows_the_default_record() {
        let app = create_test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("<html"));
        assert!(html.contains("Transaction Card Generator"));
        assert!(html.contains("APEX"));
        assert!(html.contains("738.000"));
    }

    #[tokio::test]
    async fn form_page_wires_the_ticker_autocomplete() {
        let app = create_test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        // The ticker input feeds its datalist from the search API.
        assert!(html.contains("list=\"stock-codes\""));
        assert!(html.contains("id=\"stock-codes\""));
        assert!(html.contains("/api/stocks?q="));
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = create_test_app();
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod transaction_tests {
    use super::*;

    #[tokio::test]
    async fn htmx_patch_returns_a_fragment() {
        let app = create_test_app();
        let response = app
            .oneshot(form_post("/transaction", "price=200", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("id=\"preview\""));
        assert!(!html.contains("<html"));
        // 200 * 60 lots * 100 shares
        assert!(html.contains("1.200.000"));
    }

    #[tokio::test]
    async fn non_htmx_patch_returns_the_full_page() {
        let app = create_test_app();
        let response = app
            .oneshot(form_post("/transaction", "price=200", false))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("<html"));
        assert!(html.contains("1.200.000"));
    }

    #[tokio::test]
    async fn patches_accumulate_across_requests() {
        let app = create_test_app();
        let first = app
            .clone()
            .oneshot(form_post("/transaction", "price=200", true))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(form_post("/transaction", "lot_done=10", true))
            .await
            .unwrap();
        let html = body_string(second).await;
        // 200 * 10 * 100, price kept from the first patch
        assert!(html.contains("200.000"));
        assert!(!html.contains("738.000"));
    }

    #[tokio::test]
    async fn garbage_numeric_input_is_coerced_to_zero() {
        let app = create_test_app();
        let response = app
            .oneshot(form_post("/transaction", "price=garbage", true))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("id=\"amount\">0<"));
    }
}

mod stock_selection_tests {
    use super::*;

    #[tokio::test]
    async fn selecting_a_ticker_updates_the_preview() {
        let app = create_test_app();
        let response = app
            .oneshot(form_post("/transaction/stock", "code=BBCA", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("BBCA"));
    }

    #[tokio::test]
    async fn unknown_ticker_is_a_404() {
        let app = create_test_app();
        let response = app
            .oneshot(form_post("/transaction/stock", "code=ZZZZ", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_code_deselects() {
        let app = create_test_app();
        let select = app
            .clone()
            .oneshot(form_post("/transaction/stock", "code=GIAA", true))
            .await
            .unwrap();
        assert_eq!(select.status(), StatusCode::OK);

        let deselect = app
            .oneshot(form_post("/transaction/stock", "code=", true))
            .await
            .unwrap();
        let html = body_string(deselect).await;
        assert!(!html.contains("Garuda"));
        // Numbers survive deselection.
        assert!(html.contains("738.000"));
    }
}

mod search_api_tests {
    use super::*;

    #[tokio::test]
    async fn search_returns_json_hits() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stocks?q=bank")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        let hits: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0]["code"], "BBCA");
        assert_eq!(hits[1]["board"], "Utama");
    }

    #[tokio::test]
    async fn search_respects_the_limit() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stocks?q=&limit=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_string(response).await;
        let hits: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(hits.len(), 2);
    }
}

mod export_tests {
    use super::*;

    #[tokio::test]
    async fn card_export_sets_svg_headers() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/card.svg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("SELL-APEX-2025-10-01.svg"));
        let svg = body_string(response).await;
        assert!(svg.starts_with("<svg"));
    }
}

mod logo_proxy_tests {
    use super::*;

    #[tokio::test]
    async fn overlong_ticker_is_rejected() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/logo/TOOLONGTICKER")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_internal_error() {
        // Config points the proxy at a closed port.
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/logo/APEX")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
