use super::AuditQueryService;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::audit::{HistoryEntry, HistoryFilter, HistoryQuery, ReferenceScheme};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Most recent entries returned by any history read.
pub const HISTORY_LIMIT: u32 = 1000;

impl AuditQueryService {
    /// Full history, newest first, every reference resolved to a name.
    pub async fn get_history(&self) -> ApplicationResult<Vec<HistoryEntry>> {
        self.read(HistoryFilter::All, ReferenceScheme::Normalized)
            .await
    }

    /// Entries with the given action label.
    pub async fn logs_by_type(&self, action_type: &str) -> ApplicationResult<Vec<HistoryEntry>> {
        let action_type = action_type.trim();
        if action_type.is_empty() {
            return Err(ApplicationError::validation("action type is required"));
        }
        self.read(HistoryFilter::ActionType(action_type.to_owned()), self.scheme)
            .await
    }

    /// Entries whose target is the given user.
    pub async fn logs_by_user(&self, user_id: i64) -> ApplicationResult<Vec<HistoryEntry>> {
        self.read(HistoryFilter::TargetUser(user_id), self.scheme)
            .await
    }

    /// Entries whose target is the given product.
    pub async fn logs_by_product(&self, product_id: i64) -> ApplicationResult<Vec<HistoryEntry>> {
        self.read(HistoryFilter::TargetProduct(product_id), self.scheme)
            .await
    }

    /// Entries created within `[from, to]`.
    pub async fn logs_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApplicationResult<Vec<HistoryEntry>> {
        if from > to {
            return Err(ApplicationError::validation(
                "date range start must not be after its end",
            ));
        }
        self.read(HistoryFilter::CreatedBetween { from, to }, self.scheme)
            .await
    }

    /// Entries performed by the given actor.
    pub async fn logs_by_actor(&self, actor: i64) -> ApplicationResult<Vec<HistoryEntry>> {
        let actor = UserId::new(actor)?;
        self.read(HistoryFilter::PerformedBy(actor), self.scheme)
            .await
    }

    async fn read(
        &self,
        filter: HistoryFilter,
        scheme: ReferenceScheme,
    ) -> ApplicationResult<Vec<HistoryEntry>> {
        let entries = self
            .repo
            .history(HistoryQuery {
                filter,
                scheme,
                limit: HISTORY_LIMIT,
            })
            .await?;
        Ok(entries)
    }
}
