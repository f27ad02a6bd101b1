mod event;
mod recorder;

pub use event::LogEvent;
pub use recorder::AuditRecorder;
