//! HTTP request handlers for web adapter.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::error::CardError;
use crate::domain::recalc::{parse_decimal_input, recalculate};
use crate::domain::stock::{Stock, SEARCH_LIMIT};
use crate::domain::transaction::{Side, TransactionPatch, TransactionRecord};

use super::templates::{CardView, FormPageTemplate, PreviewTemplate};
use super::{is_htmx_request, AppState, WebError};

const DEFAULT_LOGO_BASE: &str = "https://assets.stockbit.com/logos/companies";

pub async fn form_page(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let record = current_record(&state)?;
    let template = FormPageTemplate {
        view: CardView::from_record(&record),
    };
    Ok(template.into_response())
}

/// One form field (or several) changed; everything absent from the form
/// stays untouched.
#[derive(Debug, serde::Deserialize)]
pub struct TransactionFormData {
    pub side: Option<String>,
    pub company_name: Option<String>,
    pub date: Option<String>,
    pub price: Option<String>,
    pub lot_done: Option<String>,
    pub buy_price: Option<String>,
    pub icon_url: Option<String>,
}

pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<TransactionFormData>,
) -> Result<Response, WebError> {
    let patch = build_patch(&form);
    let record = apply_patch(&state, &patch)?;
    respond_with_preview(&headers, record)
}

#[derive(Debug, serde::Deserialize)]
pub struct StockSelectForm {
    pub code: String,
}

/// Ticker picked from the autocomplete, or cleared (empty code).
pub async fn select_stock(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<StockSelectForm>,
) -> Result<Response, WebError> {
    let code = form.code.trim();
    let patch = if code.is_empty() {
        TransactionPatch::from_selection(None)
    } else {
        let stock = state
            .stocks
            .lookup(code)?
            .ok_or_else(|| CardError::UnknownTicker {
                code: code.to_string(),
            })?;
        TransactionPatch::from_selection(Some(&stock))
    };
    let record = apply_patch(&state, &patch)?;
    respond_with_preview(&headers, record)
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

pub async fn search_stocks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Stock>>, WebError> {
    let hits = state.stocks.search(
        params.q.as_deref().unwrap_or(""),
        params.limit.unwrap_or(SEARCH_LIMIT),
    )?;
    Ok(Json(hits))
}

/// Pass-through proxy for company logos, so the card can embed them
/// without cross-origin trouble.
pub async fn logo_proxy(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Response, WebError> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() || ticker.len() > 6 || !ticker.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(WebError::bad_request("invalid ticker"));
    }

    let base = state
        .config
        .get_string("logo", "base_url")
        .unwrap_or_else(|| DEFAULT_LOGO_BASE.to_string());
    let timeout = state.config.get_int("logo", "timeout_secs", 10).max(1) as u64;
    let url = format!("{}/{}.png", base.trim_end_matches('/'), ticker);

    let response = state
        .http
        .get(&url)
        .timeout(Duration::from_secs(timeout))
        .send()
        .await
        .map_err(|e| WebError::internal(format!("failed to fetch logo: {}", e)))?;

    if !response.status().is_success() {
        return Err(WebError::not_found("Logo not found"));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| WebError::internal(format!("failed to fetch logo: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    )
        .into_response())
}

pub async fn export_card(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let record = current_record(&state)?;
    let view = CardView::from_record(&record);
    let disposition = format!("attachment; filename=\"{}\"", view.download_name);
    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        view.svg,
    )
        .into_response())
}

pub async fn not_found() -> Response {
    let template = super::templates::ErrorTemplate {
        message: "page not found",
        status: 404,
    };
    (StatusCode::NOT_FOUND, Html(template.fragment())).into_response()
}

fn current_record(state: &AppState) -> Result<TransactionRecord, WebError> {
    state
        .session
        .lock()
        .map(|record| record.clone())
        .map_err(|_| WebError::internal("session record poisoned"))
}

fn apply_patch(
    state: &AppState,
    patch: &TransactionPatch,
) -> Result<TransactionRecord, WebError> {
    let mut guard = state
        .session
        .lock()
        .map_err(|_| WebError::internal("session record poisoned"))?;
    let next = recalculate(&guard, patch);
    *guard = next.clone();
    Ok(next)
}

fn respond_with_preview(
    headers: &HeaderMap,
    record: TransactionRecord,
) -> Result<Response, WebError> {
    let view = CardView::from_record(&record);
    if is_htmx_request(headers) {
        let template = PreviewTemplate { view };
        Ok(Html(template.fragment()).into_response())
    } else {
        let template = FormPageTemplate { view };
        Ok(template.into_response())
    }
}

/// Translate raw form text into a patch. Numeric fields go through the
/// zero-coercing parser; unparseable sides and dates are dropped rather
/// than zeroed.
fn build_patch(form: &TransactionFormData) -> TransactionPatch {
    TransactionPatch {
        side: form.side.as_deref().and_then(Side::parse),
        ticker: None,
        company_name: form.company_name.clone(),
        board: None,
        date: form
            .date
            .as_deref()
            .and_then(|s| chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()),
        price: form.price.as_deref().map(parse_decimal_input),
        lot_done: form.lot_done.as_deref().map(parse_decimal_input),
        buy_price: form.buy_price.as_deref().map(parse_decimal_input),
        icon_url: form.icon_url.as_ref().map(|url| {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }),
    }
}
