//! Order custody stages.

use serde::{Deserialize, Serialize};

/// The custody holder of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// The company that took the order.
    Company,

    /// The manufacturer producing the food.
    Manufacture,

    /// The consumer who received the food.
    Consumer,
}

impl Owner {
    /// Returns the owner label as stored in records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Owner::Company => "Company",
            Owner::Manufacture => "Manufacture",
            Owner::Consumer => "Consumer",
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The stage of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Initialized ──► ManufactureProcess ──► ConsumerReceived
/// ```
/// Stages only move forward. Deleting the record is possible from any stage
/// and is not a status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum OrderStatus {
    /// Order has been set up and is held by the company.
    #[default]
    #[serde(rename = "Order init")]
    Initialized,

    /// The manufacturer has taken the order.
    #[serde(rename = "Manufacture process")]
    ManufactureProcess,

    /// The consumer has received the food (terminal state).
    #[serde(rename = "Consumer received")]
    ConsumerReceived,
}

impl OrderStatus {
    /// Returns the owner implied by this stage.
    pub fn owner(&self) -> Owner {
        match self {
            OrderStatus::Initialized => Owner::Company,
            OrderStatus::ManufactureProcess => Owner::Manufacture,
            OrderStatus::ConsumerReceived => Owner::Consumer,
        }
    }

    /// Returns true if manufacturing can start in this stage.
    pub fn can_start_manufacture(&self) -> bool {
        matches!(self, OrderStatus::Initialized)
    }

    /// Returns true if the order can be handed to a consumer in this stage.
    pub fn can_deliver(&self) -> bool {
        matches!(self, OrderStatus::ManufactureProcess)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::ConsumerReceived)
    }

    /// Returns the status label as stored in records.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Initialized => "Order init",
            OrderStatus::ManufactureProcess => "Manufacture process",
            OrderStatus::ConsumerReceived => "Consumer received",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
