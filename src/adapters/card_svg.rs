//! SVG card rendering.
//!
//! Produces a self-contained SVG of one transaction, laid out like the
//! broker's confirmation dialog: title, stock row with icon and board
//! badge, then the value rows. The realized-gain row appears only on
//! SELL cards.

use crate::domain::format::{
    format_date, format_number, format_realized_gain, ticker_color, ticker_initials,
};
use crate::domain::transaction::{Board, Side, TransactionRecord};

const CARD_WIDTH: f64 = 520.0;
const PADDING: f64 = 20.0;
const ROW_HEIGHT: f64 = 25.0;
const PROFIT_COLOR: &str = "#00ab6b";
const LOSS_COLOR: &str = "#e84142";
const TEXT_COLOR: &str = "#333333";
const MUTED_COLOR: &str = "#b5b5b5";
const BORDER_COLOR: &str = "#ededed";

/// Render a record as an SVG document.
pub fn render_card(record: &TransactionRecord) -> String {
    let mut rows: Vec<(String, String, bool, &str)> = vec![
        ("Date".into(), format_date(record.date), false, TEXT_COLOR),
        ("Price".into(), format_number(record.price), false, TEXT_COLOR),
        (
            "Lot Done".into(),
            format_number(record.lot_done),
            false,
            TEXT_COLOR,
        ),
        (
            "Amount".into(),
            format_number(record.amount),
            false,
            TEXT_COLOR,
        ),
        (
            "Total Fee".into(),
            format_number(record.total_fee),
            false,
            TEXT_COLOR,
        ),
        (
            "Net Amount".into(),
            format_number(record.net_amount),
            true,
            TEXT_COLOR,
        ),
    ];

    if record.side == Side::Sell {
        let color = if record.realized_gain >= 0.0 {
            PROFIT_COLOR
        } else {
            LOSS_COLOR
        };
        rows.push((
            "Realized Gain".into(),
            format_realized_gain(record.realized_gain, record.realized_gain_percent),
            true,
            color,
        ));
    }

    let title_height = 56.0;
    let stock_box_height = 64.0;
    let rows_box_height = rows.len() as f64 * ROW_HEIGHT + 2.0 * 16.0;
    let card_height = title_height + stock_box_height + rows_box_height + 3.0 * PADDING;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="Helvetica, Arial, sans-serif">"#,
        w = CARD_WIDTH,
        h = card_height
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r##"  <rect width="{w:.0}" height="{h:.0}" rx="3" fill="#ffffff"/>"##,
        w = CARD_WIDTH,
        h = card_height
    ));
    svg.push('\n');

    // Title: "SELL APEX"
    svg.push_str(&format!(
        r#"  <text x="{x:.0}" y="36" text-anchor="middle" font-size="18" font-weight="600" fill="{color}">{title}</text>"#,
        x = CARD_WIDTH / 2.0,
        color = TEXT_COLOR,
        title = xml_escape(&format!("{} {}", record.side.as_str(), record.ticker)),
    ));
    svg.push('\n');

    // Stock row box
    let box_y = title_height;
    svg.push_str(&format!(
        r#"  <rect x="{x:.0}" y="{y:.0}" width="{w:.0}" height="{h:.0}" rx="4" fill="none" stroke="{stroke}"/>"#,
        x = PADDING,
        y = box_y,
        w = CARD_WIDTH - 2.0 * PADDING,
        h = stock_box_height,
        stroke = BORDER_COLOR
    ));
    svg.push('\n');
    svg.push_str(&render_icon(record, PADDING + 16.0 + 20.0, box_y + 32.0));

    let text_x = PADDING + 16.0 + 40.0 + 12.0;
    svg.push_str(&format!(
        r#"  <text x="{x:.0}" y="{y:.0}" font-size="14" font-weight="600" fill="{color}">{ticker}</text>"#,
        x = text_x,
        y = box_y + 28.0,
        color = TEXT_COLOR,
        ticker = xml_escape(&record.ticker),
    ));
    svg.push('\n');
    svg.push_str(&render_board_badge(
        record,
        text_x + 12.0 + record.ticker.chars().count() as f64 * 9.0,
        box_y + 28.0,
    ));
    svg.push_str(&format!(
        r#"  <text x="{x:.0}" y="{y:.0}" font-size="12" fill="{color}">{name}</text>"#,
        x = text_x,
        y = box_y + 47.0,
        color = MUTED_COLOR,
        name = xml_escape(&record.company_name),
    ));
    svg.push('\n');

    // Data rows box
    let rows_y = box_y + stock_box_height + PADDING;
    svg.push_str(&format!(
        r#"  <rect x="{x:.0}" y="{y:.0}" width="{w:.0}" height="{h:.0}" rx="4" fill="none" stroke="{stroke}"/>"#,
        x = PADDING,
        y = rows_y,
        w = CARD_WIDTH - 2.0 * PADDING,
        h = rows_box_height,
        stroke = BORDER_COLOR
    ));
    svg.push('\n');

    for (i, (label, value, bold, color)) in rows.iter().enumerate() {
        let y = rows_y + 16.0 + (i as f64 + 0.5) * ROW_HEIGHT + 5.0;
        let weight = if *bold { "600" } else { "400" };
        svg.push_str(&format!(
            r#"  <text x="{x:.0}" y="{y:.0}" font-size="14" font-weight="{weight}" fill="{fill}">{label}</text>"#,
            x = PADDING + 16.0,
            fill = TEXT_COLOR,
            label = xml_escape(label),
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{x:.0}" y="{y:.0}" text-anchor="end" font-size="14" font-weight="{weight}" fill="{fill}">{value}</text>"#,
            x = CARD_WIDTH - PADDING - 16.0,
            fill = color,
            value = xml_escape(value),
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Uploaded icon when present, otherwise a colored circle with the
/// ticker's initials.
fn render_icon(record: &TransactionRecord, cx: f64, cy: f64) -> String {
    match &record.icon_url {
        Some(url) => format!(
            r#"  <clipPath id="icon-clip"><circle cx="{cx:.0}" cy="{cy:.0}" r="20"/></clipPath>
  <image href="{href}" x="{x:.0}" y="{y:.0}" width="40" height="40" clip-path="url(#icon-clip)" preserveAspectRatio="xMidYMid slice"/>
"#,
            href = xml_escape(url),
            x = cx - 20.0,
            y = cy - 20.0,
        ),
        None => {
            let placeholder = if record.ticker.is_empty() {
                "XX".to_string()
            } else {
                ticker_initials(&record.ticker)
            };
            format!(
                r##"  <circle cx="{cx:.0}" cy="{cy:.0}" r="20" fill="{fill}"/>
  <text x="{cx:.0}" y="{ty:.0}" text-anchor="middle" font-size="14" font-weight="600" fill="#ffffff">{initials}</text>
"##,
                fill = ticker_color(&record.ticker),
                ty = cy + 5.0,
                initials = xml_escape(&placeholder),
            )
        }
    }
}

/// DBX tag for the development board, warning mark for special monitoring.
fn render_board_badge(record: &TransactionRecord, x: f64, y: f64) -> String {
    match record.board {
        Board::Pengembangan => format!(
            r#"  <rect x="{rx:.0}" y="{ry:.0}" width="32" height="16" rx="4" fill="none" stroke="{stroke}"/>
  <text x="{tx:.0}" y="{ty:.0}" text-anchor="middle" font-size="11" fill="{stroke}">DBX</text>
"#,
            rx = x,
            ry = y - 12.0,
            stroke = PROFIT_COLOR,
            tx = x + 16.0,
            ty = y,
        ),
        Board::PemantauanKhusus => format!(
            r##"  <text x="{x:.0}" y="{y:.0}" font-size="14" fill="#f5a623">&#9888;</text>
"##,
        ),
        Board::Utama | Board::Akselerasi => String::new(),
    }
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
