//! Stock catalogue port trait.

use crate::domain::error::CardError;
use crate::domain::stock::Stock;

pub trait StockPort {
    /// Substring search over ticker code and company name.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Stock>, CardError>;

    /// Exact ticker lookup.
    fn lookup(&self, code: &str) -> Result<Option<Stock>, CardError>;

    /// The whole catalogue, in listing order.
    fn list_all(&self) -> Result<Vec<Stock>, CardError>;
}
