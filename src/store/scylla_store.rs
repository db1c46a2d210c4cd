use async_trait::async_trait;
use futures_util::TryStreamExt;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::statement::prepared::PreparedStatement;
use std::sync::Arc;
use uuid::Uuid;

use super::{CustomerStore, StoreError};
use crate::domain::customer::{Customer, Email, NewCustomer, PhoneNumber};

// ============================================================================
// ScyllaDB Customer Store
// ============================================================================
//
// Table layout:
//   customers (id uuid PRIMARY KEY, name text, email text, phone text)
//
// Ids are UUID v7 generated on insert. Listing is a full-table scan, so rows
// come back in token order.
//
// ============================================================================

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS customers (
    id uuid PRIMARY KEY,
    name text,
    email text,
    phone text
)";

const INSERT_CUSTOMER: &str = "INSERT INTO customers (id, name, email, phone) VALUES (?, ?, ?, ?)";

const SELECT_CUSTOMERS: &str = "SELECT id, name, email, phone FROM customers";

/// Column order shared by INSERT_CUSTOMER and SELECT_CUSTOMERS.
type CustomerRow = (Uuid, String, String, String);

fn customer_from_row((id, name, email, phone): CustomerRow) -> Customer {
    Customer {
        id,
        name,
        email: Email::new(email),
        phone: PhoneNumber::new(phone),
    }
}

fn insert_values(customer: &Customer) -> (Uuid, &str, &str, &str) {
    (
        customer.id,
        customer.name.as_str(),
        customer.email.as_str(),
        customer.phone.as_str(),
    )
}

pub struct ScyllaCustomerStore {
    session: Arc<Session>,
    insert: PreparedStatement,
}

impl ScyllaCustomerStore {
    /// Connect to the cluster and make sure the keyspace and table exist.
    pub async fn connect(nodes: &[String], keyspace: &str) -> Result<Self, StoreError> {
        tracing::info!(nodes = ?nodes, keyspace, "Connecting to ScyllaDB...");

        let session: Session = SessionBuilder::new()
            .known_nodes(nodes)
            .build()
            .await
            .map_err(|e| StoreError::new("connect", e))?;

        Self::init(Arc::new(session), keyspace).await
    }

    /// Prepare schema and statements on an existing session.
    ///
    /// `keyspace` is spliced into CQL and must be a plain identifier.
    pub async fn init(session: Arc<Session>, keyspace: &str) -> Result<Self, StoreError> {
        session
            .query_unpaged(
                format!(
                    "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH REPLICATION = \
                     {{'class': 'SimpleStrategy', 'replication_factor': 1}}"
                ),
                &[],
            )
            .await
            .map_err(|e| StoreError::new("create keyspace", e))?;

        session
            .use_keyspace(keyspace, false)
            .await
            .map_err(|e| StoreError::new("use keyspace", e))?;

        session
            .query_unpaged(CREATE_TABLE, &[])
            .await
            .map_err(|e| StoreError::new("create table", e))?;

        let insert = session
            .prepare(INSERT_CUSTOMER)
            .await
            .map_err(|e| StoreError::new("prepare insert", e))?;

        tracing::info!(keyspace, "✅ Customer table ready");

        Ok(Self { session, insert })
    }
}

#[async_trait]
impl CustomerStore for ScyllaCustomerStore {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let customer = customer.into_customer(Uuid::now_v7());

        self.session
            .execute_unpaged(&self.insert, insert_values(&customer))
            .await
            .map_err(|e| StoreError::new("create customer", e))?;

        tracing::debug!(customer_id = %customer.id, "Inserted customer row");
        Ok(customer)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, StoreError> {
        let pager = self
            .session
            .query_iter(SELECT_CUSTOMERS, &[])
            .await
            .map_err(|e| StoreError::new("list customers", e))?;

        let customers = pager
            .rows_stream::<CustomerRow>()
            .map_err(|e| StoreError::new("list customers", e))?
            .map_ok(customer_from_row)
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| StoreError::new("list customers", e))?;

        tracing::debug!(count = customers.len(), "Loaded customer rows");
        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(statement: &str, open: &str, close: &str) -> Vec<String> {
        let start = statement.find(open).unwrap() + open.len();
        let end = start + statement[start..].find(close).unwrap();
        statement[start..end]
            .split(',')
            .map(|c| c.trim().to_string())
            .collect()
    }

    #[test]
    fn test_insert_and_select_share_column_order() {
        let inserted = columns(INSERT_CUSTOMER, "customers (", ")");
        let selected = columns(SELECT_CUSTOMERS, "SELECT ", " FROM");

        assert_eq!(inserted, vec!["id", "name", "email", "phone"]);
        assert_eq!(inserted, selected);
        assert_eq!(INSERT_CUSTOMER.matches('?').count(), inserted.len());
    }

    #[test]
    fn test_table_declares_every_column() {
        for column in ["id uuid PRIMARY KEY", "name text", "email text", "phone text"] {
            assert!(CREATE_TABLE.contains(column), "missing {column}");
        }
    }

    #[test]
    fn test_row_maps_to_customer() {
        let id = Uuid::now_v7();
        let row: CustomerRow = (
            id,
            "John Doe".to_string(),
            "john.doe@example.com".to_string(),
            "+123456789".to_string(),
        );

        let customer = customer_from_row(row);
        assert_eq!(customer.id, id);
        assert_eq!(customer.name, "John Doe");
        assert_eq!(customer.email.as_str(), "john.doe@example.com");
        assert_eq!(customer.phone.as_str(), "+123456789");
    }

    #[test]
    fn test_insert_values_round_trip_through_row() {
        let customer = NewCustomer::new("Jane", "jane@example.com", "555").into_customer(Uuid::now_v7());

        let (id, name, email, phone) = insert_values(&customer);
        let row: CustomerRow = (id, name.to_string(), email.to_string(), phone.to_string());

        assert_eq!(customer_from_row(row), customer);
    }

    // Needs a running cluster: SCYLLA_NODES=127.0.0.1:9042 cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_create_then_find_all_against_cluster() {
        let nodes: Vec<String> = std::env::var("SCYLLA_NODES")
            .unwrap_or_else(|_| "127.0.0.1:9042".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();
        let store = ScyllaCustomerStore::connect(&nodes, "customers_it").await.unwrap();

        let created = store
            .create(NewCustomer::new("John Doe", "john.doe@example.com", "+123456789"))
            .await
            .unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.iter().filter(|c| **c == created).count(), 1);
    }
}
