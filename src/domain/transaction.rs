//! Transaction record, patch, and listing-board types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::stock::Stock;

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    pub fn parse(input: &str) -> Option<Side> {
        match input.trim().to_uppercase().as_str() {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        }
    }
}

/// IDX listing board. Affects badge display only, never the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Board {
    Utama,
    Pengembangan,
    #[serde(rename = "Pemantauan Khusus")]
    PemantauanKhusus,
    Akselerasi,
}

impl Board {
    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Utama => "Utama",
            Board::Pengembangan => "Pengembangan",
            Board::PemantauanKhusus => "Pemantauan Khusus",
            Board::Akselerasi => "Akselerasi",
        }
    }

    pub fn parse(input: &str) -> Option<Board> {
        match input.trim() {
            "Utama" => Some(Board::Utama),
            "Pengembangan" => Some(Board::Pengembangan),
            "Pemantauan Khusus" => Some(Board::PemantauanKhusus),
            "Akselerasi" => Some(Board::Akselerasi),
            _ => None,
        }
    }
}

/// One buy/sell transaction as shown on the card.
///
/// `amount`, `total_fee`, `net_amount`, `realized_gain` and
/// `realized_gain_percent` are derived: they are only ever written by
/// [`recalculate`](super::recalc::recalculate), never by user input.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub side: Side,
    pub ticker: String,
    pub company_name: String,
    pub board: Board,
    pub date: NaiveDate,
    pub price: f64,
    pub lot_done: f64,
    pub amount: f64,
    pub total_fee: f64,
    pub net_amount: f64,
    pub buy_price: f64,
    pub realized_gain: f64,
    pub realized_gain_percent: f64,
    pub icon_url: Option<String>,
}

impl Default for TransactionRecord {
    /// The canonical example record:
    /// SELL APEX at 123, bought at 118, 60 lots.
    /// Amount = 123 × 60 × 100 = 738,000
    /// Fee (0.35%) = 2,583
    /// Net = 738,000 - 2,583 = 735,417
    /// Realized gain = (123 - 118) × 60 × 100 = 30,000
    fn default() -> Self {
        TransactionRecord {
            side: Side::Sell,
            ticker: "APEX".to_string(),
            company_name: "Apexindo Pratama Duta Tbk".to_string(),
            board: Board::Pengembangan,
            date: NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid default date"),
            price: 123.0,
            lot_done: 60.0,
            amount: 738_000.0,
            total_fee: 2_583.0,
            net_amount: 735_417.0,
            buy_price: 118.0,
            realized_gain: 30_000.0,
            realized_gain_percent: (123.0 - 118.0) / 118.0 * 100.0,
            icon_url: None,
        }
    }
}

/// A partial update to a [`TransactionRecord`]. `None` leaves the field
/// unchanged. Derived fields are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub side: Option<Side>,
    pub ticker: Option<String>,
    pub company_name: Option<String>,
    pub board: Option<Board>,
    pub date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub lot_done: Option<f64>,
    pub buy_price: Option<f64>,
    /// Outer `Some` means the icon is being patched; inner `None` clears it.
    pub icon_url: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == TransactionPatch::default()
    }

    /// Map a ticker selection to a patch.
    ///
    /// Selecting a stock copies its code, name and board; deselecting
    /// (passing `None`) clears ticker and company name and resets the
    /// board to Utama.
    pub fn from_selection(selection: Option<&Stock>) -> TransactionPatch {
        match selection {
            Some(stock) => TransactionPatch {
                ticker: Some(stock.code.clone()),
                company_name: Some(stock.name.clone()),
                board: Some(stock.board),
                ..TransactionPatch::default()
            },
            None => TransactionPatch {
                ticker: Some(String::new()),
                company_name: Some(String::new()),
                board: Some(Board::Utama),
                ..TransactionPatch::default()
            },
        }
    }
}
