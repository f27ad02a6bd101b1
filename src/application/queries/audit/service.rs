use std::sync::Arc;

use crate::domain::audit::{AuditLogRepository, ReferenceScheme};

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) scheme: ReferenceScheme,
}

impl AuditQueryService {
    /// `scheme` governs the secondary accessors only; `get_history` always
    /// resolves through the normalized reference.
    pub fn new(repo: Arc<dyn AuditLogRepository>, scheme: ReferenceScheme) -> Self {
        Self { repo, scheme }
    }
}
