//! The `Executor` trait — the one capability the repositories need from the
//! database: run SQL text with positional parameters and hand back rows.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo};
use tracing::debug;

use crate::sql::SqlValue;
use crate::DbError;

/// One result row, keyed by column label.
pub type Row = Map<String, Value>;

#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute `sql`, binding `params[i]` to `$(i + 1)`, and return every row
    /// the statement produced (including `RETURNING` rows).
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError>;
}

#[async_trait]
impl Executor for PgPool {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError> {
        debug!(sql = sql.trim(), params = params.len(), "executing query");

        let query = params.iter().fold(sqlx::query(sql), bind_param);
        let rows = query.fetch_all(self).await?;

        rows.iter().map(decode_row).collect()
    }
}

fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        // int8 is assignment-castable to integer, numeric and text columns.
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Bool(v) => query.bind(*v),
        SqlValue::Int(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Decimal(v) => query.bind(*v),
    }
}

fn decode_row(row: &PgRow) -> Result<Row, DbError> {
    let mut out = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let type_name = column.type_info().name();
        let value = match type_name {
            "BOOL" => row.try_get::<Option<bool>, _>(idx)?.map(Value::Bool),
            "INT2" => row.try_get::<Option<i16>, _>(idx)?.map(Value::from),
            "INT4" => row.try_get::<Option<i32>, _>(idx)?.map(Value::from),
            "INT8" => row.try_get::<Option<i64>, _>(idx)?.map(Value::from),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(idx)?
                .and_then(|v| Number::from_f64(f64::from(v)))
                .map(Value::Number),
            "FLOAT8" => row
                .try_get::<Option<f64>, _>(idx)?
                .and_then(Number::from_f64)
                .map(Value::Number),
            "NUMERIC" => row
                .try_get::<Option<Decimal>, _>(idx)?
                .map(|v| Value::String(v.to_string())),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                row.try_get::<Option<String>, _>(idx)?.map(Value::String)
            }
            other => {
                return Err(DbError::UnsupportedColumn {
                    column: column.name().to_owned(),
                    type_name: other.to_owned(),
                })
            }
        };
        out.insert(column.name().to_owned(), value.unwrap_or(Value::Null));
    }
    Ok(out)
}

/// Map a row onto a record type via its serde field names.
pub fn from_row<T: serde::de::DeserializeOwned>(row: Row) -> Result<T, DbError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}
