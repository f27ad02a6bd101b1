// src/application/commands/catalog/service.rs
use std::sync::Arc;

use crate::application::{
    commands::audit::{AuditRecorder, LogEvent},
    error::ApplicationResult,
    ports::EntityStorePort,
};
use crate::domain::audit::AuditEntryId;

pub(super) const ACTION_CREATE: &str = "create";
pub(super) const ACTION_UPDATE: &str = "update";
pub(super) const ACTION_DEACTIVATE: &str = "deactivate";

/// Mutations of inventory entities. Every successful mutation is followed by
/// one audit entry; the two writes are independent statements, business
/// write first.
pub struct CatalogCommandService {
    pub(super) store: Arc<EntityStorePort>,
    pub(super) recorder: Arc<AuditRecorder>,
}

impl CatalogCommandService {
    pub fn new(store: Arc<EntityStorePort>, recorder: Arc<AuditRecorder>) -> Self {
        Self { store, recorder }
    }

    pub(super) async fn record(&self, event: LogEvent) -> ApplicationResult<AuditEntryId> {
        let action = event.action_type.clone();
        self.recorder.register_log(event).await.inspect_err(|err| {
            tracing::error!(action = %action, error = %err, "mutation committed without audit entry");
        })
    }
}
