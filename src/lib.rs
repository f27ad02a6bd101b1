//! Inventory back-end core: a parameterized statement builder, a generic
//! table repository, and an append-only audit trail with name-resolving
//! history reads.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
