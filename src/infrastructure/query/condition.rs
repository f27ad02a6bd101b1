use crate::domain::record::SqlValue;

/// Value that turns `field IS <value>` into `field IS NOT NULL`.
pub const NOT_NULL: &str = "NOT NULL";

const DEFAULT_OPERATOR: &str = "=";

/// One `field <op> value` term of a filter.
///
/// `field` and `operator` are written into the statement verbatim and must
/// never carry user input; only `value` is bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    field: String,
    value: SqlValue,
    operator: String,
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<SqlValue>,
        operator: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: operator.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, DEFAULT_OPERATOR)
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, SqlValue::Null, "IS")
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::new(field, NOT_NULL, "IS")
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn value(&self) -> &SqlValue {
        &self.value
    }

    /// Null tests compile to keywords and bind nothing.
    pub fn binds_value(&self) -> bool {
        self.null_test().is_none()
    }

    fn null_test(&self) -> Option<&'static str> {
        let op = self.operator.trim();
        if op.eq_ignore_ascii_case("IS") {
            match &self.value {
                SqlValue::Null => Some("IS NULL"),
                SqlValue::Text(text) if text.trim().eq_ignore_ascii_case(NOT_NULL) => {
                    Some("IS NOT NULL")
                }
                _ => None,
            }
        } else if op.eq_ignore_ascii_case("IS NOT") && self.value.is_null() {
            Some("IS NOT NULL")
        } else {
            None
        }
    }

    /// Appends `field <op> ?` (or the null test) and pushes the bound value.
    pub(crate) fn render_into(&self, sql: &mut String, params: &mut Vec<SqlValue>) {
        sql.push_str(&self.field);
        sql.push(' ');
        match self.null_test() {
            Some(test) => sql.push_str(test),
            None => {
                sql.push_str(self.operator.trim());
                sql.push_str(" ?");
                params.push(self.value.clone());
            }
        }
    }
}

impl<F, V> From<(F, V)> for Condition
where
    F: Into<String>,
    V: Into<SqlValue>,
{
    fn from((field, value): (F, V)) -> Self {
        Condition::eq(field, value)
    }
}

impl<F, V, O> From<(F, V, O)> for Condition
where
    F: Into<String>,
    V: Into<SqlValue>,
    O: Into<String>,
{
    fn from((field, value, operator): (F, V, O)) -> Self {
        Condition::new(field, value, operator)
    }
}
