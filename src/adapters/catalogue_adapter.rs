//! In-memory stock catalogue adapter with CSV and JSON loaders.
//!
//! The catalogue is a flat list of IDX listings (`code,name,board`).
//! Duplicate codes keep the first occurrence; an unrecognized board name
//! is an error rather than a silent default.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::error::CardError;
use crate::domain::stock::{lookup_stock, search_stocks, Stock};
use crate::domain::transaction::Board;
use crate::ports::stock_port::StockPort;

/// Bundled sample catalogue, used when no catalogue path is configured.
const BUNDLED_CATALOGUE: &str = include_str!("../../data/stocks.csv");

#[derive(Debug)]
pub struct CatalogueAdapter {
    stocks: Vec<Stock>,
}

#[derive(Debug, Deserialize)]
struct JsonStock {
    code: String,
    name: String,
    board: Board,
}

impl CatalogueAdapter {
    pub fn from_stocks(stocks: Vec<Stock>) -> Self {
        Self {
            stocks: dedupe(stocks),
        }
    }

    /// The catalogue shipped with the binary.
    pub fn bundled() -> Result<Self, CardError> {
        Self::from_csv_str(BUNDLED_CATALOGUE)
    }

    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, CardError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CardError::Catalogue {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_csv_str(&content)
    }

    /// Parse a `code,name,board` CSV with a header row.
    pub fn from_csv_str(content: &str) -> Result<Self, CardError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut stocks = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CardError::Catalogue {
                reason: format!("CSV parse error: {}", e),
            })?;

            let code = record.get(0).ok_or_else(|| CardError::Catalogue {
                reason: "missing code column".into(),
            })?;
            let name = record.get(1).ok_or_else(|| CardError::Catalogue {
                reason: "missing name column".into(),
            })?;
            let board_str = record.get(2).ok_or_else(|| CardError::Catalogue {
                reason: "missing board column".into(),
            })?;
            let board = Board::parse(board_str).ok_or_else(|| CardError::InvalidBoard {
                value: board_str.to_string(),
            })?;

            stocks.push(Stock {
                code: code.trim().to_uppercase(),
                name: name.trim().to_string(),
                board,
            });
        }

        Ok(Self::from_stocks(stocks))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CardError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CardError::Catalogue {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a JSON array of `{code, name, board}` objects. Extra keys
    /// (listing date, share count) are ignored.
    pub fn from_json_str(content: &str) -> Result<Self, CardError> {
        let entries: Vec<JsonStock> =
            serde_json::from_str(content).map_err(|e| CardError::Catalogue {
                reason: format!("JSON parse error: {}", e),
            })?;
        let stocks = entries
            .into_iter()
            .map(|entry| Stock {
                code: entry.code.trim().to_uppercase(),
                name: entry.name.trim().to_string(),
                board: entry.board,
            })
            .collect();
        Ok(Self::from_stocks(stocks))
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

fn dedupe(stocks: Vec<Stock>) -> Vec<Stock> {
    let mut seen = HashSet::new();
    stocks
        .into_iter()
        .filter(|stock| seen.insert(stock.code.clone()))
        .collect()
}

impl StockPort for CatalogueAdapter {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Stock>, CardError> {
        Ok(search_stocks(&self.stocks, query, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    fn lookup(&self, code: &str) -> Result<Option<Stock>, CardError> {
        Ok(lookup_stock(&self.stocks, code).cloned())
    }

    fn list_all(&self) -> Result<Vec<Stock>, CardError> {
        Ok(self.stocks.clone())
    }
}
