#![allow(dead_code)]

use chrono::NaiveDate;
use sahamcard::domain::error::CardError;
use sahamcard::domain::stock::{lookup_stock, search_stocks, Stock};
use sahamcard::domain::transaction::{Board, TransactionRecord};
use sahamcard::ports::stock_port::StockPort;

pub struct MockStockPort {
    pub stocks: Vec<Stock>,
    pub error: Option<String>,
}

impl MockStockPort {
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            error: None,
        }
    }

    pub fn with_stock(mut self, code: &str, name: &str, board: Board) -> Self {
        self.stocks.push(Stock {
            code: code.to_string(),
            name: name.to_string(),
            board,
        });
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl StockPort for MockStockPort {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Stock>, CardError> {
        if let Some(reason) = &self.error {
            return Err(CardError::Catalogue {
                reason: reason.clone(),
            });
        }
        Ok(search_stocks(&self.stocks, query, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    fn lookup(&self, code: &str) -> Result<Option<Stock>, CardError> {
        if let Some(reason) = &self.error {
            return Err(CardError::Catalogue {
                reason: reason.clone(),
            });
        }
        Ok(lookup_stock(&self.stocks, code).cloned())
    }

    fn list_all(&self) -> Result<Vec<Stock>, CardError> {
        Ok(self.stocks.clone())
    }
}

pub fn sample_port() -> MockStockPort {
    MockStockPort::new()
        .with_stock("APEX", "Apexindo Pratama Duta Tbk", Board::Pengembangan)
        .with_stock("BBCA", "Bank Central Asia Tbk", Board::Utama)
        .with_stock("BBRI", "Bank Rakyat Indonesia (Persero) Tbk", Board::Utama)
        .with_stock("GIAA", "Garuda Indonesia (Persero) Tbk", Board::PemantauanKhusus)
        .with_stock("IRSX", "Aviana Sinar Abadi Tbk", Board::Akselerasi)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The canonical SELL APEX example every record starts from.
pub fn default_record() -> TransactionRecord {
    TransactionRecord::default()
}

pub const SAMPLE_CSV: &str = "\
code,name,board
APEX,Apexindo Pratama Duta Tbk,Pengembangan
BBCA,Bank Central Asia Tbk,Utama
GIAA,Garuda Indonesia (Persero) Tbk,Pemantauan Khusus
IRSX,Aviana Sinar Abadi Tbk,Akselerasi
";

pub const SAMPLE_JSON: &str = r#"[
  {"code": "APEX", "name": "Apexindo Pratama Duta Tbk", "board": "Pengembangan"},
  {"code": "BBCA", "name": "Bank Central Asia Tbk", "board": "Utama"},
  {"code": "GIAA", "name": "Garuda Indonesia (Persero) Tbk", "board": "Pemantauan Khusus"}
]"#;
