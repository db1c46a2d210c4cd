use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CustomerStore, StoreError};
use crate::domain::customer::{Customer, NewCustomer};

/// Process-local store. Customers are listed in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let customer = customer.into_customer(Uuid::now_v7());
        self.customers.write().await.push(customer.clone());
        Ok(customer)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.customers.read().await.clone())
    }
}
