//! Domain layer for the food supply order tracker.
//!
//! This crate provides:
//! - The [`Order`] record with its custody stages and transition rules
//! - The JSON codec used at the record store boundary
//! - [`OrderService`], the lifecycle operations over an injected
//!   [`record_store::RecordStore`]

pub mod error;
pub mod order;

pub use common::OrderId;
pub use error::DomainError;
pub use order::{CodecError, Order, OrderError, OrderService, OrderStatus, Owner};
