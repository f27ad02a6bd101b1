//! Entity-specific queries, written as free functions over [`Repository`].
use crate::domain::errors::DomainResult;
use crate::domain::record::{Record, SqlValue};
use crate::infrastructure::query::{Condition, JoinKind, StatementBuilder};
use crate::infrastructure::repositories::Repository;

const ACTIVE: i64 = 1;

/// Rows whose `status` flag is set, by name.
pub async fn list_active(repo: &Repository) -> DomainResult<Vec<Record>> {
    repo.filter([("status", ACTIVE)])
        .order_by(["name ASC", "id ASC"])
        .get()
        .await
}

pub async fn find_by_name(repo: &Repository, name: &str) -> DomainResult<Option<Record>> {
    repo.filter([("name", name)]).first().await
}

/// Active products with the names of their brand, category, location and
/// provider. `products` must be the products repository.
pub async fn products_with_relations(products: &Repository) -> DomainResult<Vec<Record>> {
    StatementBuilder::new(products.pool(), format!("{} p", products.table()))
        .select([
            "p.id AS id",
            "p.name AS name",
            "p.sku AS sku",
            "p.stock AS stock",
            "p.price AS price",
            "b.name AS brand",
            "c.name AS category",
            "l.name AS location",
            "pr.name AS provider",
        ])
        .join_kind("brands b", "b.id = p.brand_id", JoinKind::Left)
        .join_kind("categories c", "c.id = p.category_id", JoinKind::Left)
        .join_kind("locations l", "l.id = p.location_id", JoinKind::Left)
        .join_kind("providers pr", "pr.id = p.provider_id", JoinKind::Left)
        .filter([("p.status", ACTIVE)])
        .order_by(["p.name ASC", "p.id ASC"])
        .get()
        .await
}

/// Active products at or below `threshold` units, lowest stock first.
pub async fn low_stock(products: &Repository, threshold: i64) -> DomainResult<Vec<Record>> {
    products
        .filter(vec![
            Condition::eq("status", ACTIVE),
            Condition::new("stock", threshold, "<="),
        ])
        .order_by(["stock ASC", "id ASC"])
        .get()
        .await
}

// The status test belongs in the join predicate so that empty locations
// still report zero; the builder's single WHERE cannot express that.
const STOCK_BY_LOCATION: &str = "SELECT l.id AS id, l.name AS name, \
     COUNT(p.id) AS products, COALESCE(SUM(p.stock), 0) AS units \
     FROM locations l \
     LEFT JOIN products p ON p.location_id = l.id AND p.status = ? \
     WHERE l.status = ? \
     GROUP BY l.id, l.name \
     ORDER BY l.name ASC";

/// Product count and total units per active location.
pub async fn stock_by_location(locations: &Repository) -> DomainResult<Vec<Record>> {
    locations
        .fetch(
            STOCK_BY_LOCATION,
            [SqlValue::Integer(ACTIVE), SqlValue::Integer(ACTIVE)],
        )
        .await
}
