// tests/support/db.rs
use inventory_core::domain::record::Record;
use inventory_core::infrastructure::database;
use inventory_core::infrastructure::repositories::{AUDIT_TABLE, InventoryTables, Repository};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh migrated in-memory database. A single connection that never
/// expires keeps the schema alive for the whole test.
pub async fn migrated_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    database::run_migrations(&pool)
        .await
        .expect("run migrations");
    pool
}

/// Raw access to the audit table, bypassing the recorder.
pub fn audit_table(pool: &SqlitePool) -> Repository {
    Repository::new(pool.clone(), AUDIT_TABLE).expect("audit table")
}

/// One row of every entity type, all active.
#[derive(Debug, Clone, Copy)]
pub struct Seeded {
    pub user: i64,
    pub product: i64,
    pub brand: i64,
    pub category: i64,
    pub location: i64,
    pub provider: i64,
}

pub async fn seed_catalog(tables: &InventoryTables) -> Seeded {
    let user = tables
        .users
        .insert(
            Record::new()
                .with("name", "Ada Admin")
                .with("email", "ada@example.com")
                .with("role", "admin"),
        )
        .await
        .expect("seed user");
    let brand = tables
        .brands
        .insert(Record::new().with("name", "Acme"))
        .await
        .expect("seed brand");
    let category = tables
        .categories
        .insert(Record::new().with("name", "Tools"))
        .await
        .expect("seed category");
    let location = tables
        .locations
        .insert(Record::new().with("name", "Warehouse A"))
        .await
        .expect("seed location");
    let provider = tables
        .providers
        .insert(
            Record::new()
                .with("name", "Globex Supply")
                .with("contact", "orders@globex.test"),
        )
        .await
        .expect("seed provider");
    let product = tables
        .products
        .insert(
            Record::new()
                .with("name", "Hammer")
                .with("sku", "HAM-001")
                .with("brand_id", brand)
                .with("category_id", category)
                .with("location_id", location)
                .with("provider_id", provider)
                .with("stock", 12)
                .with("price", 9.5),
        )
        .await
        .expect("seed product");

    Seeded {
        user,
        product,
        brand,
        category,
        location,
        provider,
    }
}
