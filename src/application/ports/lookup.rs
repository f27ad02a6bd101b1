use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Live existence check for one kind of entity, injected into the audit
/// recorder per entity type.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn exists(&self, id: i64) -> DomainResult<bool>;
}
