//! Statement building shared by every table repository.
mod builder;
mod condition;
mod row;
mod statement;

pub use builder::{Filter, JoinKind, QueryState, StatementBuilder};
pub use condition::{Condition, NOT_NULL};
pub use statement::{ExecOutcome, Statement};
