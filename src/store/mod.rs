use async_trait::async_trait;

use crate::domain::customer::{Customer, NewCustomer};

mod memory;
mod scylla_store;

pub use memory::InMemoryCustomerStore;
pub use scylla_store::ScyllaCustomerStore;

// ============================================================================
// Customer Store - Persistence Boundary
// ============================================================================
//
// The service only ever creates one record or reads the whole collection.
// Backends own identifier assignment and ordering.
//
// ============================================================================

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Persist a new customer and return it with its assigned id.
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError>;

    /// Every persisted customer, in the backend's natural order.
    async fn find_all(&self) -> Result<Vec<Customer>, StoreError>;
}

/// A store operation failed. Callers never branch on the cause.
#[derive(Debug, thiserror::Error)]
#[error("customer store failed to {operation}")]
pub struct StoreError {
    operation: &'static str,
    #[source]
    source: BoxError,
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl StoreError {
    pub fn new(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}
