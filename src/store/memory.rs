//! In-process services table. Same contract as the Postgres store: unique
//! ids, listing by priority then newest first, full-row updates, and
//! zero-row updates/deletes that are not errors.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Connector, ServiceStore};
use crate::models::service::{NewService, Service};

#[derive(Debug, Clone)]
struct StoredRow {
    service: Service,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    // insertion order; breaks ties between identical timestamps
    seq: u64,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<StoredRow>,
    next_seq: u64,
}

/// Cloning shares the table, so every session sees the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Connector for MemoryStore {
    type Session = MemoryStore;

    async fn connect(&self) -> anyhow::Result<MemoryStore> {
        Ok(self.clone())
    }
}

#[async_trait]
impl ServiceStore for MemoryStore {
    async fn list_services(&mut self) -> anyhow::Result<Vec<Service>> {
        let table = self.table.read().await;
        let mut rows: Vec<&StoredRow> = table.rows.iter().collect();
        rows.sort_by_key(|r| {
            (
                Reverse(r.service.priority),
                Reverse(r.created_at),
                Reverse(r.seq),
            )
        });
        Ok(rows.into_iter().map(|r| r.service.clone()).collect())
    }

    async fn insert_service(&mut self, svc: &NewService) -> anyhow::Result<String> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|r| r.service.id == svc.id) {
            anyhow::bail!(
                "duplicate key value violates unique constraint \"services_pkey\": id {} already exists",
                svc.id
            );
        }

        let now = Utc::now();
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.push(StoredRow {
            service: svc.clone().into(),
            created_at: now,
            updated_at: now,
            seq,
        });
        Ok(svc.id.clone())
    }

    async fn update_service(&mut self, svc: &NewService) -> anyhow::Result<u64> {
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|r| r.service.id == svc.id) {
            Some(row) => {
                row.service = svc.clone().into();
                row.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_service(&mut self, id: &str) -> anyhow::Result<u64> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|r| r.service.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn close(self) -> anyhow::Result<()> {
        Ok(())
    }
}
