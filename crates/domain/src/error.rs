//! Domain error types.

use common::OrderId;
use record_store::StoreError;
use thiserror::Error;

use crate::order::{CodecError, OrderError};

/// Errors that can occur during order lifecycle operations.
///
/// Every variant names the operation that failed. None of them is retried
/// internally; [`DomainError::is_retryable`] tells the caller whether the
/// whole operation may be worth another attempt.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An order with this ID is already stored.
    #[error("{operation}: order {order_id} already exists")]
    AlreadyExists {
        operation: &'static str,
        order_id: OrderId,
    },

    /// No order with this ID is stored.
    #[error("{operation}: order {order_id} does not exist")]
    NotFound {
        operation: &'static str,
        order_id: OrderId,
    },

    /// The stored bytes for an order could not be decoded or encoded.
    #[error("{operation}: order {order_id} is corrupt: {source}")]
    Corrupt {
        operation: &'static str,
        order_id: OrderId,
        #[source]
        source: CodecError,
    },

    /// The order rejected the command.
    #[error("{operation}: order {order_id} rejected: {source}")]
    Rejected {
        operation: &'static str,
        order_id: OrderId,
        #[source]
        source: OrderError,
    },

    /// The record store failed.
    #[error("{operation}: store unavailable{}: {source}", describe_key(.order_id.as_ref()))]
    StoreUnavailable {
        operation: &'static str,
        order_id: Option<OrderId>,
        #[source]
        source: StoreError,
    },
}

fn describe_key(order_id: Option<&OrderId>) -> String {
    match order_id {
        Some(id) => format!(" for order {id}"),
        None => String::new(),
    }
}

impl DomainError {
    /// Returns the name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            DomainError::AlreadyExists { operation, .. }
            | DomainError::NotFound { operation, .. }
            | DomainError::Corrupt { operation, .. }
            | DomainError::Rejected { operation, .. }
            | DomainError::StoreUnavailable { operation, .. } => *operation,
        }
    }

    /// Returns the order the failure concerns, if it concerns a single order.
    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            DomainError::AlreadyExists { order_id, .. }
            | DomainError::NotFound { order_id, .. }
            | DomainError::Corrupt { order_id, .. }
            | DomainError::Rejected { order_id, .. } => Some(order_id),
            DomainError::StoreUnavailable { order_id, .. } => order_id.as_ref(),
        }
    }

    /// Returns a short, stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::AlreadyExists { .. } => "already_exists",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Corrupt { .. } => "corrupt",
            DomainError::Rejected {
                source: OrderError::MissingField { .. },
                ..
            } => "invalid_argument",
            DomainError::Rejected {
                source: OrderError::InvalidStateTransition { .. },
                ..
            } => "invalid_stage_transition",
            DomainError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    /// Returns true if repeating the whole operation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }
}
