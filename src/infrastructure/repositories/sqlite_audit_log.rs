use super::table::Repository;
use crate::domain::audit::{
    AuditEntryId, AuditLogRepository, EntityType, HistoryEntry, HistoryFilter, HistoryQuery,
    NewAuditEntry, ReferenceScheme,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::Record;
use crate::infrastructure::query::{Condition, JoinKind, StatementBuilder};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, SqlitePool};

pub const AUDIT_TABLE: &str = "audit_logs";

const ACTOR_TABLE: &str = "users";

const STORED_COLUMNS: [&str; 11] = [
    "id",
    "action_type",
    "performed_by",
    "entity_type",
    "entity_id",
    "target_user",
    "target_product",
    "old_value",
    "new_value",
    "description",
    "created_at",
];

#[derive(Clone, Debug)]
pub struct SqliteAuditLogRepository {
    logs: Repository,
}

impl SqliteAuditLogRepository {
    pub fn new(pool: SqlitePool) -> DomainResult<Self> {
        Ok(Self {
            logs: Repository::new(pool, AUDIT_TABLE)?,
        })
    }

    fn history_statement(&self, query: &HistoryQuery) -> StatementBuilder<'_> {
        let mut fields: Vec<String> = STORED_COLUMNS
            .iter()
            .map(|column| format!("l.{column} AS {column}"))
            .collect();
        fields.push("actor.name AS performed_by_name".to_owned());
        fields.push(format!("{} AS target_name", target_name_expr(query.scheme)));

        let mut builder = StatementBuilder::new(self.logs.pool(), format!("{AUDIT_TABLE} l"))
            .select(fields)
            .join_kind(
                format!("{ACTOR_TABLE} actor"),
                "actor.id = l.performed_by",
                JoinKind::Left,
            );
        for (table, predicate) in target_joins(query.scheme) {
            builder = builder.join_kind(table, predicate, JoinKind::Left);
        }
        builder
            .filter(filter_conditions(&query.filter, query.scheme))
            .order_by(["l.created_at DESC", "l.id DESC"])
            .limit(u64::from(query.limit))
    }
}

// Read-time polymorphic resolution: one LEFT JOIN per entity type, each
// guarded by the stored tag so at most one of them matches a row.
fn target_joins(scheme: ReferenceScheme) -> Vec<(String, String)> {
    match scheme {
        ReferenceScheme::Normalized => EntityType::ALL
            .into_iter()
            .map(|entity| {
                let alias = entity.join_alias();
                (
                    format!("{} {alias}", entity.table()),
                    format!(
                        "{alias}.id = l.entity_id AND l.entity_type = '{}'",
                        entity.as_str()
                    ),
                )
            })
            .collect(),
        ReferenceScheme::Legacy => [
            (EntityType::User, "l.target_user"),
            (EntityType::Product, "l.target_product"),
        ]
        .into_iter()
        .map(|(entity, column)| {
            let alias = entity.join_alias();
            (
                format!("{} {alias}", entity.table()),
                format!("{alias}.id = {column}"),
            )
        })
        .collect(),
    }
}

fn target_name_expr(scheme: ReferenceScheme) -> String {
    match scheme {
        ReferenceScheme::Normalized => {
            let arms: Vec<String> = EntityType::ALL
                .into_iter()
                .map(|entity| {
                    format!(
                        "WHEN '{}' THEN {}.{}",
                        entity.as_str(),
                        entity.join_alias(),
                        entity.display_column()
                    )
                })
                .collect();
            format!("CASE l.entity_type {} ELSE NULL END", arms.join(" "))
        }
        ReferenceScheme::Legacy => format!(
            "COALESCE({}.{}, {}.{})",
            EntityType::User.join_alias(),
            EntityType::User.display_column(),
            EntityType::Product.join_alias(),
            EntityType::Product.display_column()
        ),
    }
}

fn filter_conditions(filter: &HistoryFilter, scheme: ReferenceScheme) -> Vec<Condition> {
    let target = |entity: EntityType, legacy_column: &str, id: i64| match scheme {
        ReferenceScheme::Normalized => vec![
            Condition::eq("l.entity_type", entity.as_str()),
            Condition::eq("l.entity_id", id),
        ],
        ReferenceScheme::Legacy => vec![Condition::eq(legacy_column, id)],
    };
    match filter {
        HistoryFilter::All => Vec::new(),
        HistoryFilter::ActionType(action) => vec![Condition::eq("l.action_type", action.as_str())],
        HistoryFilter::TargetUser(id) => target(EntityType::User, "l.target_user", *id),
        HistoryFilter::TargetProduct(id) => target(EntityType::Product, "l.target_product", *id),
        HistoryFilter::PerformedBy(user) => vec![Condition::eq("l.performed_by", i64::from(*user))],
        HistoryFilter::CreatedBetween { from, to } => vec![
            Condition::new("l.created_at", *from, ">="),
            Condition::new("l.created_at", *to, "<="),
        ],
    }
}

fn snapshot_text(value: Option<Value>) -> Option<String> {
    value.map(|v| v.to_string())
}

#[derive(Debug, FromRow)]
struct HistoryRow {
    id: i64,
    action_type: String,
    performed_by: i64,
    entity_type: Option<String>,
    entity_id: Option<i64>,
    target_user: Option<i64>,
    target_product: Option<i64>,
    old_value: Option<String>,
    new_value: Option<String>,
    description: String,
    created_at: DateTime<Utc>,
    performed_by_name: Option<String>,
    target_name: Option<String>,
}

fn parse_snapshot(raw: Option<String>) -> Option<Value> {
    raw.map(|text| serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        let entity_type = row.entity_type.as_deref().and_then(|tag| {
            tag.parse::<EntityType>()
                .map_err(|err| {
                    tracing::warn!(audit_id = row.id, error = %err, "unrecognised entity type in audit row");
                })
                .ok()
        });
        HistoryEntry {
            id: AuditEntryId(row.id),
            action_type: row.action_type,
            performed_by: row.performed_by,
            entity_type,
            entity_id: row.entity_id,
            target_user: row.target_user,
            target_product: row.target_product,
            old_value: parse_snapshot(row.old_value),
            new_value: parse_snapshot(row.new_value),
            description: row.description,
            created_at: row.created_at,
            performed_by_name: row.performed_by_name,
            target_name: row.target_name,
        }
    }
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn insert(&self, entry: NewAuditEntry) -> DomainResult<AuditEntryId> {
        let record = Record::new()
            .with("action_type", entry.action_type.clone())
            .with("performed_by", i64::from(entry.performed_by))
            .with("entity_type", entry.entity_type().map(EntityType::as_str))
            .with("entity_id", entry.entity_id())
            .with("target_user", entry.target_user())
            .with("target_product", entry.target_product())
            .with("old_value", snapshot_text(entry.old_value))
            .with("new_value", snapshot_text(entry.new_value))
            .with("description", entry.description)
            .with("created_at", entry.created_at);

        let id = self.logs.insert(record).await?;
        Ok(AuditEntryId(id))
    }

    async fn history(&self, query: HistoryQuery) -> DomainResult<Vec<HistoryEntry>> {
        if query.limit == 0 {
            return Err(DomainError::validation("history limit must be positive"));
        }
        let rows = self
            .history_statement(&query)
            .fetch_as::<HistoryRow>()
            .await?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
