use crate::domain::audit::entity::{AuditEntryId, HistoryEntry, NewAuditEntry};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Which reference columns secondary history reads resolve against.
///
/// `Normalized` reads `entity_type`/`entity_id` for filtering and naming.
/// `Legacy` reads the `target_user`/`target_product` mirror only; entries
/// whose reference is neither a user nor a product never match a target
/// filter and get no `target_name` under it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceScheme {
    #[default]
    Normalized,
    Legacy,
}

impl FromStr for ReferenceScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normalized" => Ok(Self::Normalized),
            "legacy" => Ok(Self::Legacy),
            other => Err(DomainError::validation(format!(
                "unknown reference scheme: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryFilter {
    All,
    ActionType(String),
    TargetUser(i64),
    TargetProduct(i64),
    PerformedBy(UserId),
    /// Inclusive on both ends.
    CreatedBetween {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub filter: HistoryFilter,
    pub scheme: ReferenceScheme,
    pub limit: u32,
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<AuditEntryId>;

    /// Newest first, at most `query.limit` rows.
    async fn history(&self, query: HistoryQuery) -> DomainResult<Vec<HistoryEntry>>;
}
