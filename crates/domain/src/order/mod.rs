//! Order record and its lifecycle.

pub mod codec;
mod record;
mod service;
mod state;

pub use codec::CodecError;
pub use record::Order;
pub use service::OrderService;
pub use state::{OrderStatus, Owner};

use thiserror::Error;

/// Errors raised when an order rejects a command.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A required field was empty.
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },

    /// Order is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: OrderStatus,
        action: &'static str,
    },
}
