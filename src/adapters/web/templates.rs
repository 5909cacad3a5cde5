//! HTML templates using Askama.

use askama::Template;

use crate::adapters::card_svg::render_card;
use crate::domain::format::{format_number, format_realized_gain};
use crate::domain::transaction::{Side, TransactionRecord};

/// Everything the form and preview need from the current record,
/// pre-formatted for display.
pub struct CardView {
    pub side: &'static str,
    pub ticker: String,
    pub company_name: String,
    pub board: &'static str,
    pub date_value: String,
    pub price: String,
    pub lot_done: String,
    pub buy_price: String,
    pub amount: String,
    pub total_fee: String,
    pub fee_label: &'static str,
    pub net_amount: String,
    pub realized_gain: String,
    pub is_sell: bool,
    pub download_name: String,
    pub svg: String,
}

impl CardView {
    pub fn from_record(record: &TransactionRecord) -> CardView {
        CardView {
            side: record.side.as_str(),
            ticker: record.ticker.clone(),
            company_name: record.company_name.clone(),
            board: record.board.as_str(),
            date_value: record.date.format("%Y-%m-%d").to_string(),
            price: trim_zero(record.price),
            lot_done: trim_zero(record.lot_done),
            buy_price: trim_zero(record.buy_price),
            amount: format_number(record.amount),
            total_fee: format_number(record.total_fee),
            fee_label: match record.side {
                Side::Sell => "0.35%",
                Side::Buy => "0.15%",
            },
            net_amount: format_number(record.net_amount),
            realized_gain: format_realized_gain(
                record.realized_gain,
                record.realized_gain_percent,
            ),
            is_sell: record.side == Side::Sell,
            download_name: format!(
                "{}-{}-{}.svg",
                record.side.as_str(),
                if record.ticker.is_empty() {
                    "XX"
                } else {
                    &record.ticker
                },
                record.date.format("%Y-%m-%d")
            ),
            svg: render_card(record),
        }
    }
}

/// Numeric inputs show "" for zero, like an empty form field.
fn trim_zero(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormPageTemplate {
    pub view: CardView,
}

// askama_axum only supports axum 0.7, so provide its blanket impl
// (render to Html, 500 on render failure) for axum 0.8 here.
impl axum::response::IntoResponse for FormPageTemplate {
    fn into_response(self) -> axum::response::Response {
        match self.render() {
            Ok(html) => axum::response::Html(html).into_response(),
            Err(err) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
            )
                .into_response(),
        }
    }
}

#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub view: CardView,
}

impl PreviewTemplate {
    /// HTMX fragment: the preview panel plus the read-only derived fields.
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"preview\">");
        html.push_str(&self.view.svg);
        html.push_str("<dl class=\"derived\">");
        html.push_str(&format!(
            "<dt>Amount</dt><dd id=\"amount\">{}</dd>",
            self.view.amount
        ));
        html.push_str(&format!(
            "<dt>Total Fee ({})</dt><dd id=\"total-fee\">{}</dd>",
            self.view.fee_label, self.view.total_fee
        ));
        html.push_str(&format!(
            "<dt>Net Amount</dt><dd id=\"net-amount\">{}</dd>",
            self.view.net_amount
        ));
        if self.view.is_sell {
            html.push_str(&format!(
                "<dt>Realized Gain</dt><dd id=\"realized-gain\">{}</dd>",
                self.view.realized_gain
            ));
        }
        html.push_str("</dl>");
        html.push_str(&format!(
            "<a href=\"/card.svg\" download=\"{}\">Download</a>",
            self.view.download_name
        ));
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

impl<'a> ErrorTemplate<'a> {
    pub fn fragment(&self) -> String {
        format!(
            "<div id=\"error\" class=\"error\"><h1>Error {}</h1><p>{}</p></div>",
            self.status,
            html_escape(self.message)
        )
    }
}

fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
