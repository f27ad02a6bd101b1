use super::event::LogEvent;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::{ClockPort, EntityLookupPort};
use crate::domain::audit::{AuditEntryId, AuditLogRepository, EntityRef, EntityType, NewAuditEntry};
use crate::domain::user::UserId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Writes exactly one audit entry per call.
///
/// The recorder is stateless between calls; it can be shared freely across
/// tasks. It runs after the business write has already been committed and
/// shares no transaction with it: if the audit insert fails the caller sees
/// the store error while the business change stays in place.
pub struct AuditRecorder {
    repo: Arc<dyn AuditLogRepository>,
    clock: Arc<ClockPort>,
    lookups: HashMap<EntityType, Arc<EntityLookupPort>>,
}

impl AuditRecorder {
    pub fn new(repo: Arc<dyn AuditLogRepository>, clock: Arc<ClockPort>) -> Self {
        Self {
            repo,
            clock,
            lookups: HashMap::new(),
        }
    }

    /// Registers a live existence check for references of `entity_type`.
    /// References to types without a lookup are stored unverified.
    pub fn with_lookup(mut self, entity_type: EntityType, lookup: Arc<EntityLookupPort>) -> Self {
        self.lookups.insert(entity_type, lookup);
        self
    }

    pub fn validates(&self, entity_type: EntityType) -> bool {
        self.lookups.contains_key(&entity_type)
    }

    pub async fn register_log(&self, event: LogEvent) -> ApplicationResult<AuditEntryId> {
        let performed_by = UserId::new(event.performed_by)?;
        required(&event.action_type, "action type")?;
        required(&event.description, "description")?;

        let entity = match event.reference() {
            Some(reference) => Some(self.verify(reference).await),
            None => None,
        };

        let entry = NewAuditEntry {
            action_type: event.action_type,
            performed_by,
            entity,
            old_value: event.old_value,
            new_value: event.new_value,
            description: event.description,
            created_at: self.clock.now(),
        };

        let id = self.repo.insert(entry).await?;
        debug!(audit_id = id.0, "audit entry recorded");
        Ok(id)
    }

    // A missing or unverifiable target never drops the entry; it only loses
    // its id.
    async fn verify(&self, reference: EntityRef) -> EntityRef {
        let (Some(id), Some(lookup)) = (
            reference.entity_id,
            self.lookups.get(&reference.entity_type),
        ) else {
            return reference;
        };

        match lookup.exists(id).await {
            Ok(true) => reference,
            Ok(false) => {
                warn!(
                    entity_type = %reference.entity_type,
                    entity_id = id,
                    "audit target not found; recording without entity id"
                );
                reference.dereferenced()
            }
            Err(err) => {
                warn!(
                    entity_type = %reference.entity_type,
                    entity_id = id,
                    error = %err,
                    "audit target lookup failed; recording without entity id"
                );
                reference.dereferenced()
            }
        }
    }
}

// Blank text is rejected; accepted text is stored exactly as given.
fn required(value: &str, name: &str) -> ApplicationResult<()> {
    if value.trim().is_empty() {
        Err(ApplicationError::validation(format!("{name} is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::lookup::EntityLookup;
    use crate::domain::audit::{HistoryEntry, HistoryQuery};
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::infrastructure::time::FixedClock;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingRepo {
        entries: Mutex<Vec<NewAuditEntry>>,
    }

    #[async_trait]
    impl AuditLogRepository for CapturingRepo {
        async fn insert(&self, entry: NewAuditEntry) -> DomainResult<AuditEntryId> {
            let mut entries = self.entries.lock().unwrap();
            entries.push(entry);
            Ok(AuditEntryId(entries.len() as i64))
        }

        async fn history(&self, _query: HistoryQuery) -> DomainResult<Vec<HistoryEntry>> {
            Ok(Vec::new())
        }
    }

    struct KnownIds(Vec<i64>);

    #[async_trait]
    impl EntityLookup for KnownIds {
        async fn exists(&self, id: i64) -> DomainResult<bool> {
            Ok(self.0.contains(&id))
        }
    }

    struct BrokenLookup;

    #[async_trait]
    impl EntityLookup for BrokenLookup {
        async fn exists(&self, _id: i64) -> DomainResult<bool> {
            Err(DomainError::Persistence(sqlx::Error::PoolTimedOut))
        }
    }

    fn recorder(repo: Arc<CapturingRepo>) -> AuditRecorder {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        AuditRecorder::new(repo, Arc::new(FixedClock(at)))
            .with_lookup(EntityType::User, Arc::new(KnownIds(vec![1, 2])))
            .with_lookup(EntityType::Product, Arc::new(KnownIds(vec![10])))
    }

    #[tokio::test]
    async fn missing_user_target_is_dereferenced_not_dropped() {
        let repo = Arc::new(CapturingRepo::default());
        let id = recorder(Arc::clone(&repo))
            .register_log(LogEvent::new("user updated", 1, "changed role").on(EntityType::User, 99))
            .await
            .unwrap();
        assert_eq!(id, AuditEntryId(1));

        let entries = repo.entries.lock().unwrap();
        let entry = &entries[0];
        assert_eq!(entry.entity_type(), Some(EntityType::User));
        assert_eq!(entry.entity_id(), None);
        assert_eq!(entry.action_type, "user updated");
        assert_eq!(i64::from(entry.performed_by), 1);
        assert_eq!(entry.description, "changed role");
    }

    #[tokio::test]
    async fn existing_product_target_is_kept_and_mirrored() {
        let repo = Arc::new(CapturingRepo::default());
        recorder(Arc::clone(&repo))
            .register_log(LogEvent::new("stock adjusted", 2, "recount").target_product(10))
            .await
            .unwrap();

        let entries = repo.entries.lock().unwrap();
        assert_eq!(entries[0].entity_id(), Some(10));
        assert_eq!(entries[0].target_product(), Some(10));
        assert_eq!(entries[0].target_user(), None);
    }

    #[tokio::test]
    async fn types_without_lookup_are_stored_unverified() {
        let repo = Arc::new(CapturingRepo::default());
        let recorder = recorder(Arc::clone(&repo));
        assert!(!recorder.validates(EntityType::Brand));
        recorder
            .register_log(LogEvent::new("brand renamed", 1, "rename").on(EntityType::Brand, 404))
            .await
            .unwrap();
        assert_eq!(repo.entries.lock().unwrap()[0].entity_id(), Some(404));
    }

    #[tokio::test]
    async fn lookup_errors_dereference_the_target() {
        let repo = Arc::new(CapturingRepo::default());
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        AuditRecorder::new(Arc::clone(&repo) as Arc<dyn AuditLogRepository>, Arc::new(FixedClock(at)))
            .with_lookup(EntityType::User, Arc::new(BrokenLookup))
            .register_log(LogEvent::new("user updated", 1, "x").target_user(1))
            .await
            .unwrap();
        assert_eq!(repo.entries.lock().unwrap()[0].entity_id(), None);
    }

    #[tokio::test]
    async fn created_at_comes_from_the_clock() {
        let repo = Arc::new(CapturingRepo::default());
        recorder(Arc::clone(&repo))
            .register_log(LogEvent::new("login", 1, "signed in"))
            .await
            .unwrap();
        let entries = repo.entries.lock().unwrap();
        assert_eq!(
            entries[0].created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
        assert!(entries[0].entity.is_none());
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_stored_unchanged() {
        let repo = Arc::new(CapturingRepo::default());
        recorder(Arc::clone(&repo))
            .register_log(LogEvent::new("Stock Adjusted ", 1, "  recount\n"))
            .await
            .unwrap();
        let entries = repo.entries.lock().unwrap();
        assert_eq!(entries[0].action_type, "Stock Adjusted ");
        assert_eq!(entries[0].description, "  recount\n");
        assert_eq!(i64::from(entries[0].performed_by), 1);
    }

    #[tokio::test]
    async fn blank_required_fields_write_nothing() {
        let repo = Arc::new(CapturingRepo::default());
        let recorder = recorder(Arc::clone(&repo));

        let err = recorder
            .register_log(LogEvent::new("  ", 1, "something"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));

        let err = recorder
            .register_log(LogEvent::new("login", 1, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));

        let err = recorder
            .register_log(LogEvent::new("login", 0, "signed in"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::Validation(_))));

        assert!(repo.entries.lock().unwrap().is_empty());
    }
}
