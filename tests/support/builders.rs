// tests/support/builders.rs
use super::time::SteppingClock;
use inventory_core::application::ports::{ClockPort, EntityLookupPort, EntityStorePort};
use inventory_core::application::services::ApplicationServices;
use inventory_core::domain::audit::{AuditLogRepository, ReferenceScheme};
use inventory_core::infrastructure::repositories::{InventoryTables, SqliteAuditLogRepository};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Services wired against real SQLite repositories.
pub struct TestApp {
    pub pool: SqlitePool,
    pub tables: InventoryTables,
    pub services: ApplicationServices,
}

pub fn build_app(pool: SqlitePool, scheme: ReferenceScheme) -> TestApp {
    build_app_with_clock(pool, scheme, Arc::new(SteppingClock::new()))
}

pub fn build_app_with_clock(
    pool: SqlitePool,
    scheme: ReferenceScheme,
    clock: Arc<ClockPort>,
) -> TestApp {
    let tables = InventoryTables::new(&pool).expect("inventory tables");
    let store: Arc<EntityStorePort> = Arc::new(tables.clone());
    let audit_repo: Arc<dyn AuditLogRepository> =
        Arc::new(SqliteAuditLogRepository::new(pool.clone()).expect("audit repository"));
    let user_lookup: Arc<EntityLookupPort> = Arc::new(tables.users.clone());
    let product_lookup: Arc<EntityLookupPort> = Arc::new(tables.products.clone());

    let services = ApplicationServices::new(
        store,
        audit_repo,
        user_lookup,
        product_lookup,
        clock,
        scheme,
    );

    TestApp {
        pool,
        tables,
        services,
    }
}
