// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of the `created_at` stamp on audit entries.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
