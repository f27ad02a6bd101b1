pub mod audit;
pub mod errors;
pub mod record;
pub mod user;
