//! Display formatting for card values.
//!
//! Number formatting follows the Indonesian locale: dots for thousand
//! separators, comma for the decimal point (1.234.567,89). Rounding here
//! is display-only; the engine never rounds gain percentages.

/// Placeholder icon palette; a ticker hashes to one of these.
pub const ICON_COLORS: [&str; 5] = [
    "#f5a623", // orange
    "#1890ff", // blue
    "#00ab6b", // green
    "#722ed1", // purple
    "#e84142", // red
];

/// Format a whole currency amount with thousand separators: 738000 → "738.000".
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format with a fixed number of decimals: 4.2372 → "4,24" (2 decimals).
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Format a realized gain pair with explicit signs:
/// "+30.000,00 (+4,24%)" or "-5.000,00 (-2,50%)".
pub fn format_realized_gain(value: f64, percent: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    let percent_sign = if percent >= 0.0 { "+" } else { "" };
    format!(
        "{sign}{} ({percent_sign}{}%)",
        format_decimal(value, 2),
        format_decimal(percent, 2)
    )
}

/// "1 Oct 2025" style date.
pub fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Parse a formatted number back: "738.000,50" → 738000.5. Invalid input
/// maps to zero, matching the engine's input coercion policy.
pub fn parse_formatted_number(input: &str) -> f64 {
    let cleaned = input.trim().replace('.', "").replace(',', ".");
    cleaned.parse().unwrap_or(0.0)
}

/// Deterministic placeholder color for a ticker.
pub fn ticker_color(ticker: &str) -> &'static str {
    let mut hash: i32 = 0;
    for byte in ticker.bytes() {
        hash = (byte as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    ICON_COLORS[hash.unsigned_abs() as usize % ICON_COLORS.len()]
}

/// First two characters of the ticker, upper-cased, for the placeholder icon.
pub fn ticker_initials(ticker: &str) -> String {
    ticker.chars().take(2).collect::<String>().to_uppercase()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
