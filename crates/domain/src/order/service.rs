//! Order service exposing the lifecycle operations over a record store.

use common::OrderId;
use futures_util::StreamExt;
use record_store::{RecordStore, StoreError};

use crate::error::DomainError;

use super::{Order, OrderError, codec};

/// Service for managing orders.
///
/// The service holds no state besides the injected store handle. Each
/// operation touches a single key with at most one check followed by one
/// write, and writes only after every check has passed. Serializing
/// concurrent read-modify-write cycles on the same key is left to the store
/// or to whoever hosts the service.
pub struct OrderService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> OrderService<S> {
    /// Creates a new order service over the given record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns true if an order is stored under `order_id`.
    #[tracing::instrument(skip(self))]
    pub async fn exists(&self, order_id: &str) -> Result<bool, DomainError> {
        self.key_exists("exists", order_id).await
    }

    /// Sets up a new order held by the company.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        order_id: &str,
        food_id: &str,
        value: i64,
    ) -> Result<Order, DomainError> {
        const OPERATION: &str = "create";

        if self.key_exists(OPERATION, order_id).await? {
            return Err(failed(DomainError::AlreadyExists {
                operation: OPERATION,
                order_id: OrderId::from(order_id),
            }));
        }

        let order = Order::new(order_id, food_id, value)
            .map_err(|e| rejected(OPERATION, order_id, e))?;

        self.write(OPERATION, &order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(status = %order.status(), "order created");
        Ok(order)
    }

    /// Hands an order from the company to a manufacturer.
    #[tracing::instrument(skip(self))]
    pub async fn advance_to_manufacture(
        &self,
        order_id: &str,
        manufacture_id: &str,
    ) -> Result<Order, DomainError> {
        const OPERATION: &str = "advance_to_manufacture";

        let mut order = self.load(OPERATION, order_id).await?;
        order
            .start_manufacture(manufacture_id)
            .map_err(|e| rejected(OPERATION, order_id, e))?;

        self.write(OPERATION, &order).await?;
        record_transition(&order);
        Ok(order)
    }

    /// Hands a manufactured order to its consumer.
    #[tracing::instrument(skip(self))]
    pub async fn advance_to_consumer(
        &self,
        order_id: &str,
        consumer_id: &str,
        expiration_date: &str,
    ) -> Result<Order, DomainError> {
        const OPERATION: &str = "advance_to_consumer";

        let mut order = self.load(OPERATION, order_id).await?;
        order
            .deliver(consumer_id, expiration_date)
            .map_err(|e| rejected(OPERATION, order_id, e))?;

        self.write(OPERATION, &order).await?;
        record_transition(&order);
        Ok(order)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, order_id: &str) -> Result<Order, DomainError> {
        self.load("read", order_id).await
    }

    /// Removes an order. The record cannot be recovered afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, order_id: &str) -> Result<(), DomainError> {
        const OPERATION: &str = "delete";

        if !self.key_exists(OPERATION, order_id).await? {
            return Err(failed(DomainError::NotFound {
                operation: OPERATION,
                order_id: OrderId::from(order_id),
            }));
        }

        self.store
            .delete(order_id)
            .await
            .map_err(|e| unavailable(OPERATION, Some(order_id), e))?;

        metrics::counter!("orders_deleted_total").increment(1);
        tracing::info!("order deleted");
        Ok(())
    }

    /// Returns every stored order in ascending order ID.
    ///
    /// Fails on the first record that does not decode; nothing is skipped.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        const OPERATION: &str = "list_all";

        let mut records = self
            .store
            .scan_all()
            .await
            .map_err(|e| unavailable(OPERATION, None, e))?;

        let mut orders = Vec::new();
        while let Some(record) = records.next().await {
            let record = record.map_err(|e| unavailable(OPERATION, None, e))?;
            let order = codec::decode_stored(&record.key, &record.value)
                .map_err(|e| corrupt(OPERATION, &record.key, e))?;
            orders.push(order);
        }

        tracing::debug!(count = orders.len(), "listed orders");
        Ok(orders)
    }

    async fn key_exists(
        &self,
        operation: &'static str,
        order_id: &str,
    ) -> Result<bool, DomainError> {
        self.store
            .exists(order_id)
            .await
            .map_err(|e| unavailable(operation, Some(order_id), e))
    }

    async fn load(&self, operation: &'static str, order_id: &str) -> Result<Order, DomainError> {
        let bytes = self
            .store
            .get(order_id)
            .await
            .map_err(|e| unavailable(operation, Some(order_id), e))?
            .ok_or_else(|| {
                failed(DomainError::NotFound {
                    operation,
                    order_id: OrderId::from(order_id),
                })
            })?;

        codec::decode_stored(order_id, &bytes).map_err(|e| corrupt(operation, order_id, e))
    }

    async fn write(&self, operation: &'static str, order: &Order) -> Result<(), DomainError> {
        let key = order.order_id().as_str();
        let bytes = codec::encode(order).map_err(|e| corrupt(operation, key, e))?;

        self.store
            .put(key, bytes)
            .await
            .map_err(|e| unavailable(operation, Some(key), e))
    }
}

fn record_transition(order: &Order) {
    metrics::counter!("order_transitions_total", "status" => order.status().as_str())
        .increment(1);
    tracing::info!(status = %order.status(), owner = %order.owner(), "order advanced");
}

/// Records a failure before it is returned to the caller.
fn failed(err: DomainError) -> DomainError {
    metrics::counter!("order_errors_total", "kind" => err.kind()).increment(1);
    tracing::warn!(error = %err, kind = err.kind(), "order operation failed");
    err
}

fn rejected(operation: &'static str, order_id: &str, source: OrderError) -> DomainError {
    failed(DomainError::Rejected {
        operation,
        order_id: OrderId::from(order_id),
        source,
    })
}

fn corrupt(operation: &'static str, order_id: &str, source: codec::CodecError) -> DomainError {
    failed(DomainError::Corrupt {
        operation,
        order_id: OrderId::from(order_id),
        source,
    })
}

fn unavailable(
    operation: &'static str,
    order_id: Option<&str>,
    source: StoreError,
) -> DomainError {
    failed(DomainError::StoreUnavailable {
        operation,
        order_id: order_id.map(OrderId::from),
        source,
    })
}
