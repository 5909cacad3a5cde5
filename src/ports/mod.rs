//! Port traits at the seams between domain and adapters.

pub mod config_port;
pub mod stock_port;
