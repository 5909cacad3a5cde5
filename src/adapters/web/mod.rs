//! Web server adapter.
//!
//! Axum server with an HTMX-based frontend: a transaction form whose
//! field changes are posted as partial patches, a live card preview,
//! ticker autocomplete, a logo proxy, and SVG export.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::{Arc, Mutex};

use crate::domain::transaction::TransactionRecord;
use crate::ports::config_port::ConfigPort;
use crate::ports::stock_port::StockPort;

/// The single session record: one owner, replaced wholesale by each
/// recalculation.
pub type SessionRecord = Arc<Mutex<TransactionRecord>>;

pub fn new_session_record() -> SessionRecord {
    Arc::new(Mutex::new(TransactionRecord::default()))
}

pub struct AppState {
    pub stocks: Arc<dyn StockPort + Send + Sync>,
    pub config: Arc<dyn ConfigPort + Send + Sync>,
    pub session: SessionRecord,
    pub http: reqwest::Client,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::form_page))
        .route("/transaction", post(handlers::update_transaction))
        .route("/transaction/stock", post(handlers::select_stock))
        .route("/api/stocks", get(handlers::search_stocks))
        .route("/logo/{ticker}", get(handlers::logo_proxy))
        .route("/card.svg", get(handlers::export_card))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
