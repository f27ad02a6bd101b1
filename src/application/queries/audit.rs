mod history;
mod service;

pub use history::HISTORY_LIMIT;
pub use service::AuditQueryService;
