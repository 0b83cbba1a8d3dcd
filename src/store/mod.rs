use async_trait::async_trait;

use crate::models::service::{NewService, Service};

pub mod memory;
pub mod postgres;

/// One open session against the services table.
///
/// Every method issues exactly one statement. Update and delete return the
/// number of rows they touched.
#[async_trait]
pub trait ServiceStore: Send + Sized {
    async fn list_services(&mut self) -> anyhow::Result<Vec<Service>>;
    async fn insert_service(&mut self, svc: &NewService) -> anyhow::Result<String>;
    async fn update_service(&mut self, svc: &NewService) -> anyhow::Result<u64>;
    async fn delete_service(&mut self, id: &str) -> anyhow::Result<u64>;

    /// Release the session. Dropping it also releases it, just less politely.
    async fn close(self) -> anyhow::Result<()>;
}

/// Opens a fresh [`ServiceStore`] session for each invocation.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: ServiceStore;

    async fn connect(&self) -> anyhow::Result<Self::Session>;
}
