//! Derived-field recalculation engine.
//!
//! A [`TransactionRecord`] carries five derived fields. This module keeps
//! them consistent: apply a [`TransactionPatch`] and recompute in a fixed
//! order so each step reads only fields already finalized before it:
//!
//! 1. amount        (price, lot_done)
//! 2. total_fee     (amount, side)
//! 3. net_amount    (amount, total_fee, side), always recomputed, since a
//!    bare side flip changes the sign rule with no upstream change
//! 4. realized gain (price, buy_price, lot_done), SELL with a positive
//!    cost basis only; otherwise prior values persist untouched
//!
//! The engine is pure and total: no I/O, no error cases, safe to run on
//! every keystroke.

use super::transaction::{Side, TransactionPatch, TransactionRecord};

/// One lot is 100 shares on the IDX.
pub const SHARES_PER_LOT: f64 = 100.0;

/// Broker fee rate on gross amount: 0.15% for BUY.
pub const BUY_FEE_RATE: f64 = 0.0015;

/// Broker fee rate on gross amount: 0.25% + 0.1% PPh = 0.35% for SELL.
pub const SELL_FEE_RATE: f64 = 0.0035;

pub fn fee_rate(side: Side) -> f64 {
    match side {
        Side::Buy => BUY_FEE_RATE,
        Side::Sell => SELL_FEE_RATE,
    }
}

/// Coerce user-entered numeric text to a non-negative value.
///
/// This is the field-parsing collaborator: invalid, empty, or negative
/// input silently maps to zero before it ever reaches the engine.
pub fn parse_decimal_input(input: &str) -> f64 {
    let value: f64 = input.trim().parse().unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Apply `patch` to `previous` and return a fully consistent record.
///
/// An empty patch returns a field-for-field copy of `previous`; the
/// derived fields are only recomputed when an upstream field was touched
/// (except `net_amount`, which is always re-derived).
pub fn recalculate(previous: &TransactionRecord, patch: &TransactionPatch) -> TransactionRecord {
    let touched_price = patch.price.is_some();
    let touched_lot = patch.lot_done.is_some();
    let touched_side = patch.side.is_some();

    let mut next = previous.clone();

    if let Some(side) = patch.side {
        next.side = side;
    }
    if let Some(ticker) = &patch.ticker {
        next.ticker = ticker.clone();
    }
    if let Some(name) = &patch.company_name {
        next.company_name = name.clone();
    }
    if let Some(board) = patch.board {
        next.board = board;
    }
    if let Some(date) = patch.date {
        next.date = date;
    }
    if let Some(price) = patch.price {
        next.price = price;
    }
    if let Some(lot_done) = patch.lot_done {
        next.lot_done = lot_done;
    }
    if let Some(buy_price) = patch.buy_price {
        next.buy_price = buy_price;
    }
    if let Some(icon_url) = &patch.icon_url {
        next.icon_url = icon_url.clone();
    }

    if touched_price || touched_lot {
        next.amount = next.price * next.lot_done * SHARES_PER_LOT;
    }

    if touched_price || touched_lot || touched_side {
        next.total_fee = (next.amount * fee_rate(next.side)).round();
    }

    next.net_amount = match next.side {
        Side::Sell => next.amount - next.total_fee,
        Side::Buy => next.amount + next.total_fee,
    };

    // Gated on buy_price > 0 so the percent formula can never divide by
    // zero. When the gate is closed the previous gain figures persist;
    // the card hides them for BUY anyway.
    if next.side == Side::Sell && next.buy_price > 0.0 {
        next.realized_gain = (next.price - next.buy_price) * next.lot_done * SHARES_PER_LOT;
        next.realized_gain_percent = (next.price - next.buy_price) / next.buy_price * 100.0;
    }

    next
}
