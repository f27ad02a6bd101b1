// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{audit::AuditRecorder, catalog::CatalogCommandService},
        ports::{ClockPort, EntityLookupPort, EntityStorePort},
        queries::audit::AuditQueryService,
    },
    domain::audit::{AuditLogRepository, EntityType, ReferenceScheme},
};

pub struct ApplicationServices {
    pub audit_recorder: Arc<AuditRecorder>,
    pub audit_queries: Arc<AuditQueryService>,
    pub catalog_commands: Arc<CatalogCommandService>,
}

impl ApplicationServices {
    /// Only users and products are validated before an audit reference is
    /// stored; other entity types are recorded as given.
    pub fn new(
        store: Arc<EntityStorePort>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        user_lookup: Arc<EntityLookupPort>,
        product_lookup: Arc<EntityLookupPort>,
        clock: Arc<ClockPort>,
        scheme: ReferenceScheme,
    ) -> Self {
        let audit_recorder = Arc::new(
            AuditRecorder::new(Arc::clone(&audit_log_repo), clock)
                .with_lookup(EntityType::User, user_lookup)
                .with_lookup(EntityType::Product, product_lookup),
        );
        let audit_queries = Arc::new(AuditQueryService::new(audit_log_repo, scheme));
        let catalog_commands = Arc::new(CatalogCommandService::new(
            store,
            Arc::clone(&audit_recorder),
        ));

        Self {
            audit_recorder,
            audit_queries,
            catalog_commands,
        }
    }
}
