// src/infrastructure/repositories/mod.rs
mod sqlite_audit_log;
mod table;

pub use sqlite_audit_log::{AUDIT_TABLE, SqliteAuditLogRepository};
pub use table::Repository;

use crate::application::ports::store::EntityStore;
use crate::domain::audit::EntityType;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::Record;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// One repository per entity table.
#[derive(Clone, Debug)]
pub struct InventoryTables {
    pub users: Repository,
    pub products: Repository,
    pub brands: Repository,
    pub categories: Repository,
    pub locations: Repository,
    pub providers: Repository,
}

impl InventoryTables {
    pub fn new(pool: &SqlitePool) -> DomainResult<Self> {
        let repo = |entity: EntityType| Repository::new(pool.clone(), entity.table());
        Ok(Self {
            users: repo(EntityType::User)?,
            products: repo(EntityType::Product)?,
            brands: repo(EntityType::Brand)?,
            categories: repo(EntityType::Category)?,
            locations: repo(EntityType::Location)?,
            providers: repo(EntityType::Provider)?,
        })
    }

    pub fn get(&self, entity: EntityType) -> &Repository {
        match entity {
            EntityType::User => &self.users,
            EntityType::Product => &self.products,
            EntityType::Brand => &self.brands,
            EntityType::Category => &self.categories,
            EntityType::Location => &self.locations,
            EntityType::Provider => &self.providers,
        }
    }
}

#[async_trait]
impl EntityStore for InventoryTables {
    async fn find(&self, entity: EntityType, id: i64) -> DomainResult<Option<Record>> {
        self.get(entity).find_by_id(id).await
    }

    async fn insert(&self, entity: EntityType, data: Record) -> DomainResult<i64> {
        if data.is_empty() {
            return Err(DomainError::validation(format!(
                "no fields provided for {entity}"
            )));
        }
        self.get(entity).insert(data).await
    }

    async fn update(&self, entity: EntityType, id: i64, data: Record) -> DomainResult<u64> {
        self.get(entity).update(id, data).await
    }

    async fn deactivate(&self, entity: EntityType, id: i64) -> DomainResult<u64> {
        self.get(entity).soft_delete(id).await
    }
}
