use crate::domain::audit::EntityType;
use crate::domain::errors::DomainResult;
use crate::domain::record::Record;
use async_trait::async_trait;

/// Row-level access to every entity table, keyed by entity type.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn find(&self, entity: EntityType, id: i64) -> DomainResult<Option<Record>>;

    /// Returns the generated id.
    async fn insert(&self, entity: EntityType, data: Record) -> DomainResult<i64>;

    /// Returns the number of affected rows.
    async fn update(&self, entity: EntityType, id: i64, data: Record) -> DomainResult<u64>;

    /// Flags the row inactive (`status = 0`); returns the number of affected rows.
    async fn deactivate(&self, entity: EntityType, id: i64) -> DomainResult<u64>;
}
