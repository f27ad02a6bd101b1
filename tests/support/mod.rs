// tests/support/mod.rs
// Shared by several integration test binaries; each one uses a subset.
#[allow(dead_code, unused_imports)]
pub mod builders;

#[allow(dead_code, unused_imports)]
pub mod db;

#[allow(dead_code, unused_imports)]
pub mod time;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use db::*;
#[allow(unused_imports)]
pub use time::*;
