use crate::application::ports::lookup::EntityLookup;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{Record, SqlValue};
use crate::infrastructure::query::{Condition, ExecOutcome, Statement, StatementBuilder};
use async_trait::async_trait;
use sqlx::SqlitePool;

const ID_COLUMN: &str = "id";
const STATUS_COLUMN: &str = "status";

/// Generic access to one table. Every entity shares this type; entity
/// specific queries are free functions over it (see `infrastructure::inventory`).
///
/// Each builder entry point (`query`, `select`, `filter`, ...) starts a fresh
/// [`StatementBuilder`], so a repository can be cloned into and used from
/// concurrent tasks without clauses bleeding between operations.
#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
    table: String,
}

impl Repository {
    pub fn new(pool: SqlitePool, table: impl Into<String>) -> DomainResult<Self> {
        let table = table.into();
        if table.trim().is_empty() {
            return Err(DomainError::validation("repository requires a table name"));
        }
        Ok(Self { pool, table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn query(&self) -> StatementBuilder<'_> {
        StatementBuilder::new(&self.pool, self.table.as_str())
    }

    pub fn select<I, S>(&self, fields: I) -> StatementBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query().select(fields)
    }

    pub fn filter<I, C>(&self, conditions: I) -> StatementBuilder<'_>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        self.query().filter(conditions)
    }

    pub fn order_by<I, S>(&self, fields: I) -> StatementBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query().order_by(fields)
    }

    pub fn limit(&self, limit: u64) -> StatementBuilder<'_> {
        self.query().limit(limit)
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<Option<Record>> {
        self.filter([(ID_COLUMN, id)]).first().await
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Record>> {
        self.query().get().await
    }

    /// Returns the generated id.
    pub async fn insert(&self, data: Record) -> DomainResult<i64> {
        self.query().insert(data).await
    }

    pub async fn update(&self, id: i64, data: Record) -> DomainResult<u64> {
        self.filter([(ID_COLUMN, id)]).update(data).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<u64> {
        self.filter([(ID_COLUMN, id)]).delete().await
    }

    /// Marks the row inactive instead of removing it.
    pub async fn soft_delete(&self, id: i64) -> DomainResult<u64> {
        self.update(id, Record::new().with(STATUS_COLUMN, 0)).await
    }

    /// Runs caller-written SQL verbatim with bound `params`.
    pub async fn execute(
        &self,
        sql: &str,
        params: impl IntoIterator<Item = SqlValue>,
    ) -> DomainResult<ExecOutcome> {
        self.query().execute(sql, params).await
    }

    /// Runs caller-written SQL verbatim and returns its rows.
    pub async fn fetch(
        &self,
        sql: &str,
        params: impl IntoIterator<Item = SqlValue>,
    ) -> DomainResult<Vec<Record>> {
        Statement::raw(sql, params).fetch_all(&self.pool).await
    }
}

#[async_trait]
impl EntityLookup for Repository {
    async fn exists(&self, id: i64) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
