use super::condition::Condition;
use super::statement::{ExecOutcome, Statement};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{Record, SqlValue};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

const DEFAULT_FIELDS: &str = "*";
const DEFAULT_FILTER: &str = "1=1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

/// Compiled `WHERE` clause: the `AND` of its conditions, `1=1` when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    clause: String,
    bound: Vec<SqlValue>,
}

impl Filter {
    pub fn new<I, C>(conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        let mut clause = String::new();
        let mut bound = Vec::new();
        for (index, condition) in conditions.into_iter().enumerate() {
            if index > 0 {
                clause.push_str(" AND ");
            }
            condition.into().render_into(&mut clause, &mut bound);
        }
        if clause.is_empty() {
            return Self::default();
        }
        Self { clause, bound }
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn bound_values(&self) -> &[SqlValue] {
        &self.bound
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            clause: DEFAULT_FILTER.to_owned(),
            bound: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Join {
    table: String,
    predicate: String,
    kind: JoinKind,
}

/// Clauses accumulated by one builder chain.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    table: String,
    fields: Vec<String>,
    joins: Vec<Join>,
    filter: Filter,
    group: Option<String>,
    order: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl QueryState {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            fields: vec![DEFAULT_FIELDS.to_owned()],
            joins: Vec::new(),
            filter: Filter::default(),
            group: None,
            order: None,
            limit: None,
            offset: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// True when nothing but the table has been configured.
    pub fn is_default(&self) -> bool {
        *self == QueryState::new(self.table.clone())
    }

    fn tail_clauses(&self, sql: &mut String) {
        if let Some(group) = &self.group {
            sql.push_str(" GROUP BY ");
            sql.push_str(group);
        }
        if let Some(order) = &self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => {
                sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"))
            }
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }
    }
}

/// Single-use statement builder over one table.
///
/// Configuration methods take and return the builder by value; terminal
/// methods (`get`, `fetch_as`, `first`, `insert`, `update`, `delete`, `execute`)
/// consume it, so no clause can leak from one logical operation into the next.
///
/// Table names, fields, join predicates, `order_by` and `group_by` fragments
/// and condition operators are trusted text spliced into the statement.
/// Only condition values and insert/update data are bound as parameters.
/// Filters support `AND` of simple terms only: no `OR`, no nesting. Use
/// [`Statement::raw`] for anything beyond that.
#[must_use = "a statement builder does nothing until a terminal method consumes it"]
#[derive(Debug, Clone)]
pub struct StatementBuilder<'p> {
    pool: &'p SqlitePool,
    state: QueryState,
}

impl<'p> StatementBuilder<'p> {
    pub fn new(pool: &'p SqlitePool, table: impl Into<String>) -> Self {
        Self {
            pool,
            state: QueryState::new(table),
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Replaces the field list; an empty list selects `*`.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.state.fields = if fields.is_empty() {
            vec![DEFAULT_FIELDS.to_owned()]
        } else {
            fields
        };
        self
    }

    pub fn join(self, table: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.join_kind(table, predicate, JoinKind::Inner)
    }

    pub fn join_kind(
        mut self,
        table: impl Into<String>,
        predicate: impl Into<String>,
        kind: JoinKind,
    ) -> Self {
        self.state.joins.push(Join {
            table: table.into(),
            predicate: predicate.into(),
            kind,
        });
        self
    }

    /// Replaces any previous filter with the `AND` of `conditions`.
    pub fn filter<I, C>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        self.state.filter = Filter::new(conditions);
        self
    }

    pub fn order_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.order = join_fragment(fields);
        self
    }

    pub fn group_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.group = join_fragment(fields);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.state.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.state.offset = Some(offset);
        self
    }

    pub fn compile_select(&self) -> Statement {
        let state = &self.state;
        let mut sql = format!("SELECT {} FROM {}", state.fields.join(", "), state.table);
        for join in &state.joins {
            sql.push(' ');
            sql.push_str(join.kind.keyword());
            sql.push(' ');
            sql.push_str(&join.table);
            sql.push_str(" ON ");
            sql.push_str(&join.predicate);
        }
        sql.push_str(" WHERE ");
        sql.push_str(state.filter.clause());
        state.tail_clauses(&mut sql);
        Statement::new(sql, state.filter.bound_values().to_vec())
    }

    pub fn compile_insert(&self, data: &Record) -> Statement {
        if data.is_empty() {
            return Statement::new(
                format!("INSERT INTO {} DEFAULT VALUES", self.state.table),
                Vec::new(),
            );
        }
        let columns: Vec<&str> = data.columns().map(|(name, _)| name).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.state.table,
            columns.join(", "),
            placeholders
        );
        let params = data.columns().map(|(_, value)| value.clone()).collect();
        Statement::new(sql, params)
    }

    /// Data values are bound first, then the filter's values.
    pub fn compile_update(&self, data: &Record) -> DomainResult<Statement> {
        if data.is_empty() {
            return Err(DomainError::validation("no fields provided for update"));
        }
        let assignments: Vec<String> = data
            .columns()
            .map(|(name, _)| format!("{name} = ?"))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.state.table,
            assignments.join(", "),
            self.state.filter.clause()
        );
        let mut params: Vec<SqlValue> = data.columns().map(|(_, value)| value.clone()).collect();
        params.extend(self.state.filter.bound_values().iter().cloned());
        Ok(Statement::new(sql, params))
    }

    pub fn compile_delete(&self) -> Statement {
        Statement::new(
            format!(
                "DELETE FROM {} WHERE {}",
                self.state.table,
                self.state.filter.clause()
            ),
            self.state.filter.bound_values().to_vec(),
        )
    }

    pub async fn get(self) -> DomainResult<Vec<Record>> {
        self.compile_select().fetch_all(self.pool).await
    }

    pub async fn fetch_as<T>(self) -> DomainResult<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        self.compile_select().fetch_as::<T>(self.pool).await
    }

    pub async fn first(self) -> DomainResult<Option<Record>> {
        let builder = self.limit(1);
        builder.compile_select().fetch_optional(builder.pool).await
    }

    /// Returns the generated row id.
    pub async fn insert(self, data: Record) -> DomainResult<i64> {
        let outcome = self.compile_insert(&data).execute(self.pool).await?;
        Ok(outcome.last_insert_id)
    }

    /// Returns the number of affected rows. Without a filter every row of
    /// the table is updated.
    pub async fn update(self, data: Record) -> DomainResult<u64> {
        let outcome = self.compile_update(&data)?.execute(self.pool).await?;
        Ok(outcome.rows_affected)
    }

    /// Returns the number of affected rows. Without a filter every row of
    /// the table is deleted.
    pub async fn delete(self) -> DomainResult<u64> {
        let outcome = self.compile_delete().execute(self.pool).await?;
        Ok(outcome.rows_affected)
    }

    /// Runs `sql` verbatim, ignoring any configured clauses.
    pub async fn execute(
        self,
        sql: &str,
        params: impl IntoIterator<Item = SqlValue>,
    ) -> DomainResult<ExecOutcome> {
        Statement::raw(sql, params).execute(self.pool).await
    }
}

fn join_fragment<I, S>(fields: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let parts: Vec<String> = fields.into_iter().map(Into::into).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
