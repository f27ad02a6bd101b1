use crate::domain::errors::DomainResult;
use crate::domain::record::{Record, SqlValue};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Arguments, FromRow, SqlitePool};

/// Result metadata of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: i64,
}

/// Parameterized SQL text plus its bound values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    /// Wraps caller-written SQL. The text is sent as-is; only `params` are
    /// bound.
    pub fn raw(sql: impl Into<String>, params: impl IntoIterator<Item = SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params: params.into_iter().collect(),
        }
    }

    pub(crate) fn new(sql: String, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    fn arguments(&self) -> Result<SqliteArguments<'_>, sqlx::Error> {
        let mut args = SqliteArguments::default();
        for value in &self.params {
            let added = match value {
                SqlValue::Null => args.add(Option::<i64>::None),
                SqlValue::Integer(v) => args.add(*v),
                SqlValue::Real(v) => args.add(*v),
                SqlValue::Text(v) => args.add(v.as_str()),
                SqlValue::Bool(v) => args.add(*v),
                SqlValue::Blob(v) => args.add(v.as_slice()),
            };
            added.map_err(sqlx::Error::Encode)?;
        }
        Ok(args)
    }

    pub async fn execute(&self, pool: &SqlitePool) -> DomainResult<ExecOutcome> {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "execute");
        let result = sqlx::query_with(&self.sql, self.arguments()?)
            .execute(pool)
            .await?;
        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        })
    }

    pub async fn fetch_all(&self, pool: &SqlitePool) -> DomainResult<Vec<Record>> {
        self.fetch_as::<Record>(pool).await
    }

    pub async fn fetch_optional(&self, pool: &SqlitePool) -> DomainResult<Option<Record>> {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "fetch optional");
        let row = sqlx::query_as_with::<_, Record, _>(&self.sql, self.arguments()?)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn fetch_as<T>(&self, pool: &SqlitePool) -> DomainResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "fetch");
        let rows = sqlx::query_as_with::<_, T, _>(&self.sql, self.arguments()?)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
