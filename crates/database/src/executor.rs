use crate::DbError;
use chrono::NaiveDateTime;
use query_compiler::{RenderedQuery, ScalarValue};
use serde_json::{Map, Value};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Column, Row, TypeInfo};

/// The `TradeStore` is the storage-side collaborator of the query compiler.
/// It accepts rendered query text plus its ordered parameters, runs it
/// against Postgres, and hands back the result rows as alias -> value maps.
/// It knows nothing about how the query was built.
#[derive(Debug, Clone)]
pub struct TradeStore {
    pool: PgPool,
}

impl TradeStore {
    pub fn new(pool: PgPool) -> Self {
        TradeStore { pool }
    }

    /// Executes a rendered analytics query and collects all result rows.
    ///
    /// Every parameter is bound positionally; the query text never contains
    /// request values, so nothing here needs escaping.
    pub async fn execute(&self, query: &RenderedQuery) -> Result<Vec<Map<String, Value>>, DbError> {
        tracing::debug!(sql = %query.sql, params = query.params.len(), "executing analytics query");

        let mut prepared = sqlx::query(&query.sql);
        for param in &query.params {
            prepared = match param {
                ScalarValue::Int(v) => prepared.bind(*v),
                ScalarValue::Text(v) => prepared.bind(v.clone()),
                ScalarValue::Timestamp(v) => prepared.bind(*v),
            };
        }

        let rows = prepared.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_object).collect()
    }
}

/// Decodes one result row into a JSON object keyed by output column alias.
///
/// Only the types our compiled queries can produce are handled: the integer
/// family (rank cutoffs, time buckets), the float family (price/volume
/// aggregates, vwap), the text family (group-by values), and timestamps.
/// Anything else is reported rather than silently stringified.
fn row_to_object(row: &PgRow) -> Result<Map<String, Value>, DbError> {
    let mut object = Map::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let value = match column.type_info().name() {
            "INT2" => row.try_get::<Option<i16>, _>(idx)?.map_or(Value::Null, Value::from),
            "INT4" => row.try_get::<Option<i32>, _>(idx)?.map_or(Value::Null, Value::from),
            "INT8" => row.try_get::<Option<i64>, _>(idx)?.map_or(Value::Null, Value::from),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(idx)?
                .map_or(Value::Null, |v| Value::from(f64::from(v))),
            // A vwap group with zero total volume comes back as NULL/NaN
            // depending on the engine; both map to JSON null here.
            "FLOAT8" => row.try_get::<Option<f64>, _>(idx)?.map_or(Value::Null, Value::from),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
                .try_get::<Option<String>, _>(idx)?
                .map_or(Value::Null, Value::from),
            "TIMESTAMP" => row
                .try_get::<Option<NaiveDateTime>, _>(idx)?
                .map_or(Value::Null, |v| Value::from(v.format("%Y-%m-%d %H:%M:%S").to_string())),
            other => {
                return Err(DbError::UnsupportedColumn {
                    column: column.name().to_string(),
                    pg_type: other.to_string(),
                });
            }
        };
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}
