pub mod database;
pub mod inventory;
pub mod query;
pub mod repositories;
pub mod time;
