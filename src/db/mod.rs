//! Employee record persistence.
//!
//! Three backends implement [`EmployeeStore`]. They differ in two documented
//! ways that callers must not paper over:
//!
//! - `list_employees` order: PostgreSQL returns newest id first, the in-memory
//!   store returns insertion order, DynamoDB returns scan order.
//! - `update_employee` on a missing id: PostgreSQL and DynamoDB return
//!   [`StoreError::NotFound`], the in-memory store does nothing.
//!
//! [`StoreError::NotFound`]: crate::errors::StoreError::NotFound

use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::config::{Config, StoreBackend};
use crate::errors::StoreResult;
use crate::models::employee::{Employee, EmployeeFields};

pub mod dynamo;
pub mod memory;
pub mod postgres;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;

    /// `Ok(None)` when no record has this id.
    async fn load_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>>;

    /// Inserts a record and returns its freshly assigned id.
    async fn add_employee(&self, fields: &EmployeeFields) -> StoreResult<String>;

    /// Replaces every mutable field of an existing record.
    async fn update_employee(&self, employee_id: &str, fields: &EmployeeFields) -> StoreResult<()>;

    /// Removes the record. Deleting an unknown id succeeds.
    async fn delete_employee(&self, employee_id: &str) -> StoreResult<()>;

    /// Bounded liveness probe. Never fails, only reports.
    async fn is_healthy(&self) -> bool;
}

pub async fn build_store(config: &Config) -> Arc<dyn EmployeeStore> {
    match &config.store {
        StoreBackend::Dynamo { table } => {
            info!("Using DynamoDB table '{}'", table);
            let sdk_config = crate::utils::aws::load_sdk_config(config).await;
            Arc::new(DynamoStore::new(
                aws_sdk_dynamodb::Client::new(&sdk_config),
                table.clone(),
            ))
        }
        StoreBackend::Postgres { database_url } => {
            info!("Using PostgreSQL employee store");
            Arc::new(PostgresStore::new(database_url.clone(), config.connect_timeout))
        }
        StoreBackend::Memory => {
            info!("No database configured, using in-memory employee store");
            Arc::new(MemoryStore::new())
        }
    }
}
