mod support;

use inventory_core::domain::errors::DomainError;
use inventory_core::domain::record::{Record, SqlValue};
use inventory_core::infrastructure::inventory;
use inventory_core::infrastructure::query::Condition;
use inventory_core::infrastructure::repositories::{InventoryTables, Repository};
use support::{migrated_pool, seed_catalog};

#[tokio::test]
async fn sequential_inserts_do_not_share_state() {
    let pool = migrated_pool().await;
    let brands = Repository::new(pool, "brands").unwrap();

    let first = brands.insert(Record::new().with("name", "Acme")).await.unwrap();
    let second = brands
        .insert(Record::new().with("name", "Globex").with("status", 0))
        .await
        .unwrap();
    assert_eq!(second, first + 1);

    let acme = brands.find_by_id(first).await.unwrap().unwrap();
    assert_eq!(acme.get_str("name"), Some("Acme"));
    assert_eq!(acme.get_i64("status"), Some(1));
    let globex = brands.find_by_id(second).await.unwrap().unwrap();
    assert_eq!(globex.get_i64("status"), Some(0));
}

#[tokio::test]
async fn filtered_select_reads_only_matching_rows() {
    let pool = migrated_pool().await;
    let brands = Repository::new(pool, "brands").unwrap();
    for (name, status) in [("Acme", 1), ("Globex", 0), ("Initech", 1)] {
        brands
            .insert(Record::new().with("name", name).with("status", status))
            .await
            .unwrap();
    }

    let active = brands
        .filter([("status", 1)])
        .order_by(["name DESC"])
        .get()
        .await
        .unwrap();
    let names: Vec<_> = active.iter().filter_map(|r| r.get_str("name")).collect();
    assert_eq!(names, ["Initech", "Acme"]);

    // a previous chain leaves nothing behind
    assert_eq!(brands.find_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn null_tests_bind_nothing_and_match_nulls() {
    let pool = migrated_pool().await;
    let users = Repository::new(pool, "users").unwrap();
    users
        .insert(Record::new().with("name", "no mail"))
        .await
        .unwrap();
    users
        .insert(Record::new().with("name", "mail").with("email", "m@example.com"))
        .await
        .unwrap();

    let builder = users.filter([("email", SqlValue::Null, "IS")]);
    assert_eq!(builder.compile_select().sql(), "SELECT * FROM users WHERE email IS NULL");
    assert!(builder.compile_select().params().is_empty());
    let rows = builder.get().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("name"), Some("no mail"));

    let rows = users
        .filter([Condition::is_not_null("email")])
        .get()
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("email"), Some("m@example.com"));
}

#[tokio::test]
async fn update_delete_and_soft_delete_by_id() {
    let pool = migrated_pool().await;
    let categories = Repository::new(pool, "categories").unwrap();
    let id = categories
        .insert(Record::new().with("name", "Tools"))
        .await
        .unwrap();
    let other = categories
        .insert(Record::new().with("name", "Paint"))
        .await
        .unwrap();

    let changed = categories
        .update(id, Record::new().with("name", "Hand tools"))
        .await
        .unwrap();
    assert_eq!(changed, 1);
    let row = categories.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(row.get_str("name"), Some("Hand tools"));

    assert_eq!(categories.soft_delete(id).await.unwrap(), 1);
    let row = categories.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(row.get_i64("status"), Some(0));

    assert_eq!(categories.delete(other).await.unwrap(), 1);
    assert!(categories.find_by_id(other).await.unwrap().is_none());
    assert_eq!(categories.delete(other).await.unwrap(), 0);
}

#[tokio::test]
async fn update_without_data_is_rejected() {
    let pool = migrated_pool().await;
    let brands = Repository::new(pool, "brands").unwrap();
    let err = brands.update(1, Record::new()).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn store_errors_propagate_untranslated() {
    let pool = migrated_pool().await;
    let missing = Repository::new(pool, "no_such_table").unwrap();
    let err = missing.find_all().await.unwrap_err();
    assert!(matches!(err, DomainError::Persistence(_)));
}

#[tokio::test]
async fn raw_statements_run_verbatim() {
    let pool = migrated_pool().await;
    let locations = Repository::new(pool, "locations").unwrap();
    let outcome = locations
        .execute(
            "INSERT INTO locations (name) VALUES (?), (?)",
            [SqlValue::from("Dock"), SqlValue::from("Shelf 3")],
        )
        .await
        .unwrap();
    assert_eq!(outcome.rows_affected, 2);

    let rows = locations
        .fetch(
            "SELECT name FROM locations WHERE name LIKE ? ORDER BY id",
            [SqlValue::from("S%")],
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("name"), Some("Shelf 3"));
}

#[tokio::test]
async fn inventory_queries_join_and_aggregate() {
    let pool = migrated_pool().await;
    let tables = InventoryTables::new(&pool).unwrap();
    let seeded = seed_catalog(&tables).await;
    tables
        .products
        .insert(
            Record::new()
                .with("name", "Nails")
                .with("location_id", seeded.location)
                .with("stock", 2),
        )
        .await
        .unwrap();
    let empty = tables
        .locations
        .insert(Record::new().with("name", "Annex"))
        .await
        .unwrap();

    let products = inventory::products_with_relations(&tables.products)
        .await
        .unwrap();
    assert_eq!(products.len(), 2);
    let hammer = &products[0];
    assert_eq!(hammer.get_str("name"), Some("Hammer"));
    assert_eq!(hammer.get_str("brand"), Some("Acme"));
    assert_eq!(hammer.get_str("provider"), Some("Globex Supply"));
    assert!(products[1].get("brand").is_some_and(SqlValue::is_null));

    let low = inventory::low_stock(&tables.products, 5).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].get_str("name"), Some("Nails"));

    let by_location = inventory::stock_by_location(&tables.locations)
        .await
        .unwrap();
    assert_eq!(by_location.len(), 2);
    assert_eq!(by_location[0].get_i64("id"), Some(empty));
    assert_eq!(by_location[0].get_i64("units"), Some(0));
    assert_eq!(by_location[1].get_i64("products"), Some(2));
    assert_eq!(by_location[1].get_i64("units"), Some(14));

    let found = inventory::find_by_name(&tables.brands, "Acme")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.get_i64("id"), Some(seeded.brand));

    tables.brands.soft_delete(seeded.brand).await.unwrap();
    assert!(inventory::list_active(&tables.brands).await.unwrap().is_empty());
}
