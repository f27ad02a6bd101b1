// src/application/ports/mod.rs
pub mod lookup;
pub mod store;
pub mod time;

pub type ClockPort = dyn time::Clock;
pub type EntityLookupPort = dyn lookup::EntityLookup;
pub type EntityStorePort = dyn store::EntityStore;
