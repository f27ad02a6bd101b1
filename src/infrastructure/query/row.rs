use crate::domain::record::{Record, SqlValue};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, FromRow, Row, TypeInfo, ValueRef};

impl<'r> FromRow<'r, SqliteRow> for Record {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut record = Record::new();
        for column in row.columns() {
            let value = decode_column(row, column.ordinal())?;
            record.set(column.name(), value);
        }
        Ok(record)
    }
}

// SQLite is dynamically typed: decode by the storage class of the value,
// not by the declared column type.
fn decode_column(row: &SqliteRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let info = raw.type_info();
    let value = match info.name() {
        "INTEGER" | "BIGINT" | "INT" | "BOOLEAN" => {
            SqlValue::Integer(row.try_get_unchecked::<i64, _>(index)?)
        }
        "REAL" | "NUMERIC" | "FLOAT" | "DOUBLE" => {
            SqlValue::Real(row.try_get_unchecked::<f64, _>(index)?)
        }
        "BLOB" => SqlValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        _ => SqlValue::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}
