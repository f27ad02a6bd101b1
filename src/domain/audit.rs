pub mod entity;
pub mod entity_type;
pub mod repository;

pub use entity::{AuditEntryId, EntityRef, HistoryEntry, NewAuditEntry};
pub use entity_type::EntityType;
pub use repository::{AuditLogRepository, HistoryFilter, HistoryQuery, ReferenceScheme};
