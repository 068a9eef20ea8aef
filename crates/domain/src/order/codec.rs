//! JSON encoding of order records at the store boundary.
//!
//! Records are JSON objects keyed by `OrderID`, `Owner`, `FoodID`,
//! `ConsumerID`, `ManufactureID`, `ExpirationDate`, `Value` and `Status`.
//! Records written by the legacy encoder used `OrederID` for the ID; those
//! still decode and are rewritten with `OrderID` on their next transition.

use thiserror::Error;

use super::Order;

/// Errors produced while encoding or decoding a stored order.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a JSON order record.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The record decoded but its owner contradicts its status.
    #[error("inconsistent record: {0}")]
    Inconsistent(String),

    /// The record is stored under a key other than its own ID.
    #[error("record for order {found} stored under key {key}")]
    KeyMismatch { key: String, found: String },
}

/// Serializes an order into its stored form.
pub fn encode(order: &Order) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(order)?)
}

/// Deserializes a stored order and checks its internal consistency.
pub fn decode(bytes: &[u8]) -> Result<Order, CodecError> {
    let order: Order = serde_json::from_slice(bytes)?;
    order.check_consistency().map_err(CodecError::Inconsistent)?;
    Ok(order)
}

/// Decodes the value stored under `key`, which must be the order's own ID.
pub fn decode_stored(key: &str, bytes: &[u8]) -> Result<Order, CodecError> {
    let order = decode(bytes)?;
    if order.order_id().as_str() != key {
        return Err(CodecError::KeyMismatch {
            key: key.to_string(),
            found: order.order_id().to_string(),
        });
    }
    Ok(order)
}
