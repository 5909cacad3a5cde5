//! IDX stock catalogue entries and search.

use serde::{Deserialize, Serialize};

use super::transaction::Board;

/// Number of hits a search returns at most, unless the caller asks for
/// fewer.
pub const SEARCH_LIMIT: usize = 50;

/// One listing in the ticker catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub code: String,
    pub name: String,
    pub board: Board,
}

/// Case-insensitive substring search over code and company name.
///
/// Result order follows catalogue order; output is capped at
/// `min(limit, SEARCH_LIMIT)`.
pub fn search_stocks<'a>(stocks: &'a [Stock], query: &str, limit: usize) -> Vec<&'a Stock> {
    let needle = query.trim().to_lowercase();
    stocks
        .iter()
        .filter(|stock| {
            stock.code.to_lowercase().contains(&needle)
                || stock.name.to_lowercase().contains(&needle)
        })
        .take(limit.min(SEARCH_LIMIT))
        .collect()
}

/// Exact (case-insensitive) code lookup.
pub fn lookup_stock<'a>(stocks: &'a [Stock], code: &str) -> Option<&'a Stock> {
    let code = code.trim();
    stocks
        .iter()
        .find(|stock| stock.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<Stock> {
        vec![
            Stock {
                code: "APEX".into(),
                name: "Apexindo Pratama Duta Tbk".into(),
                board: Board::Pengembangan,
            },
            Stock {
                code: "BBCA".into(),
                name: "Bank Central Asia Tbk".into(),
                board: Board::Utama,
            },
            Stock {
                code: "BBRI".into(),
                name: "Bank Rakyat Indonesia (Persero) Tbk".into(),
                board: Board::Utama,
            },
            Stock {
                code: "GOTO".into(),
                name: "GoTo Gojek Tokopedia Tbk".into(),
                board: Board::Utama,
            },
        ]
    }

    #[test]
    fn search_matches_code_case_insensitively() {
        let stocks = catalogue();
        let hits = search_stocks(&stocks, "bbca", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "BBCA");
    }

    #[test]
    fn search_matches_company_name() {
        let stocks = catalogue();
        let hits = search_stocks(&stocks, "bank", 10);
        let codes: Vec<&str> = hits.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["BBCA", "BBRI"]);
    }

    #[test]
    fn empty_query_matches_everything_up_to_limit() {
        let stocks = catalogue();
        assert_eq!(search_stocks(&stocks, "", 10).len(), 4);
        assert_eq!(search_stocks(&stocks, "", 2).len(), 2);
    }

    #[test]
    fn search_caps_at_global_limit() {
        let stocks: Vec<Stock> = (0..100)
            .map(|i| Stock {
                code: format!("AA{i:02}"),
                name: format!("Company {i}"),
                board: Board::Utama,
            })
            .collect();
        assert_eq!(search_stocks(&stocks, "AA", usize::MAX).len(), SEARCH_LIMIT);
    }

    #[test]
    fn search_no_hits() {
        let stocks = catalogue();
        assert!(search_stocks(&stocks, "ZZZZ", 10).is_empty());
    }

    #[test]
    fn lookup_is_exact_and_case_insensitive() {
        let stocks = catalogue();
        assert_eq!(lookup_stock(&stocks, "goto").map(|s| s.code.as_str()), Some("GOTO"));
        assert_eq!(lookup_stock(&stocks, " GOTO "), lookup_stock(&stocks, "GOTO"));
        assert!(lookup_stock(&stocks, "GO").is_none());
    }
}
