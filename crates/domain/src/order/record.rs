//! The order record.

use common::OrderId;
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderStatus, Owner};

/// A food order as stored under its [`OrderId`].
///
/// Fields are private so that `owner` and `status` only ever change together,
/// through the transition methods below. Orders built by those methods keep
/// the fields of stages not yet reached empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "OrderID", alias = "OrederID")]
    order_id: OrderId,

    #[serde(rename = "Owner")]
    owner: Owner,

    #[serde(rename = "FoodID")]
    food_id: String,

    #[serde(rename = "ConsumerID", default)]
    consumer_id: String,

    #[serde(rename = "ManufactureID", default)]
    manufacture_id: String,

    #[serde(rename = "ExpirationDate", default)]
    expiration_date: String,

    #[serde(rename = "Value")]
    value: i64,

    #[serde(rename = "Status")]
    status: OrderStatus,
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Returns the current custody holder.
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Returns the current lifecycle stage.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the food ID.
    pub fn food_id(&self) -> &str {
        &self.food_id
    }

    /// Returns the order value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Returns the manufacturer ID, empty before manufacturing.
    pub fn manufacture_id(&self) -> &str {
        &self.manufacture_id
    }

    /// Returns the consumer ID, empty before delivery.
    pub fn consumer_id(&self) -> &str {
        &self.consumer_id
    }

    /// Returns the expiration date, empty before delivery.
    pub fn expiration_date(&self) -> &str {
        &self.expiration_date
    }

    /// Returns true if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Command methods
impl Order {
    /// Sets up a new order held by the company.
    pub fn new(
        order_id: impl Into<OrderId>,
        food_id: impl Into<String>,
        value: i64,
    ) -> Result<Self, OrderError> {
        let order_id = order_id.into();
        let food_id = food_id.into();

        if order_id.is_empty() {
            return Err(OrderError::MissingField { field: "OrderID" });
        }
        if food_id.is_empty() {
            return Err(OrderError::MissingField { field: "FoodID" });
        }

        let status = OrderStatus::Initialized;
        Ok(Self {
            order_id,
            owner: status.owner(),
            food_id,
            consumer_id: String::new(),
            manufacture_id: String::new(),
            expiration_date: String::new(),
            value,
            status,
        })
    }

    /// Hands the order to a manufacturer.
    pub fn start_manufacture(
        &mut self,
        manufacture_id: impl Into<String>,
    ) -> Result<(), OrderError> {
        if !self.status.can_start_manufacture() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "start manufacture",
            });
        }

        let manufacture_id = manufacture_id.into();
        if manufacture_id.is_empty() {
            return Err(OrderError::MissingField {
                field: "ManufactureID",
            });
        }

        self.manufacture_id = manufacture_id;
        self.advance(OrderStatus::ManufactureProcess);
        Ok(())
    }

    /// Hands the order to its consumer.
    pub fn deliver(
        &mut self,
        consumer_id: impl Into<String>,
        expiration_date: impl Into<String>,
    ) -> Result<(), OrderError> {
        if !self.status.can_deliver() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "deliver to consumer",
            });
        }

        let consumer_id = consumer_id.into();
        let expiration_date = expiration_date.into();
        if consumer_id.is_empty() {
            return Err(OrderError::MissingField {
                field: "ConsumerID",
            });
        }
        if expiration_date.is_empty() {
            return Err(OrderError::MissingField {
                field: "ExpirationDate",
            });
        }

        self.consumer_id = consumer_id;
        self.expiration_date = expiration_date;
        self.advance(OrderStatus::ConsumerReceived);
        Ok(())
    }

    fn advance(&mut self, status: OrderStatus) {
        self.status = status;
        self.owner = status.owner();
    }

    /// Checks that owner and status agree.
    ///
    /// Stage fields are not checked here: the transition methods keep fields
    /// of unreached stages empty, but records written before transitions were
    /// guarded can carry fields of a later stage, or lack fields of a reached
    /// one.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.owner != self.status.owner() {
            return Err(format!(
                "owner {} does not match status {}",
                self.owner, self.status
            ));
        }
        Ok(())
    }
}
