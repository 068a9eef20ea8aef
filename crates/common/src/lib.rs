//! Shared types for the food supply order tracker.

mod types;

pub use types::OrderId;
