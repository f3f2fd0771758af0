//! # Query Executor
//!
//! Generic "run a statement / fetch rows" access over the pool, for
//! listings and maintenance statements that don't deserve a typed
//! repository method.
//!
//! ## Rendering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SQLite value        Rendered cell                                      │
//! │  ────────────        ─────────────                                      │
//! │  NULL                ""                                                 │
//! │  INTEGER 7           "7"                                                │
//! │  REAL 2.0            "2.0"                                              │
//! │  REAL 2.5            "2.5"                                              │
//! │  TEXT 'Widget'       "Widget"                                           │
//! │  BLOB                lossy UTF-8                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are always bound positionally (`?1`, `?2`, ...); statement text is
//! never assembled from user input.

use retail_core::Table;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

use crate::error::DbResult;

// =============================================================================
// Parameters
// =============================================================================

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

fn bind_all<'q>(sql: &'q str, params: &'q [SqlValue]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params
        .iter()
        .fold(sqlx::query::<Sqlite>(sql), |query, param| match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        })
}

// =============================================================================
// Executor
// =============================================================================

/// Runs arbitrary parameterized statements.
///
/// ## Usage
/// ```rust,ignore
/// let executor = db.executor();
///
/// let changed = executor
///     .execute_update("UPDATE Users SET type = ?1 WHERE userID = ?2", &["manager".into(), 3_i64.into()])
///     .await?;
///
/// let table = executor
///     .execute_query_table("SELECT * FROM Warehouse ORDER BY warehouseID", &[])
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    pool: SqlitePool,
}

impl QueryExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        QueryExecutor { pool }
    }

    /// Applies a mutating statement and returns the number of affected rows.
    pub async fn execute_update(&self, sql: &str, params: &[SqlValue]) -> DbResult<u64> {
        debug!(sql = %sql, params = params.len(), "Executing update");

        let result = bind_all(sql, params).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Runs a query and returns how many rows it produced.
    ///
    /// Meant for existence checks; rows are not rendered.
    pub async fn execute_query(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize> {
        debug!(sql = %sql, params = params.len(), "Executing query");

        let rows = bind_all(sql, params).fetch_all(&self.pool).await?;

        Ok(rows.len())
    }

    /// Runs a query and renders every column of every row as text.
    pub async fn execute_query_rows(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> DbResult<Vec<Vec<String>>> {
        let table = self.execute_query_table(sql, params).await?;
        Ok(table.rows)
    }

    /// Runs a query and returns its column names plus rendered rows.
    ///
    /// A query without rows yields an empty table without column names.
    pub async fn execute_query_table(&self, sql: &str, params: &[SqlValue]) -> DbResult<Table> {
        debug!(sql = %sql, params = params.len(), "Executing table query");

        let rows = bind_all(sql, params).fetch_all(&self.pool).await?;

        let columns = rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut table = Table::new(columns);
        for row in &rows {
            table.push_row(render_row(row)?);
        }

        debug!(rows = table.row_count(), "Table query returned rows");
        Ok(table)
    }
}

// =============================================================================
// Row Rendering
// =============================================================================

fn render_row(row: &SqliteRow) -> DbResult<Vec<String>> {
    (0..row.len()).map(|index| render_cell(row, index)).collect()
}

/// Decodes by the runtime storage class of the value, not the declared
/// column type; expressions like `COUNT(*)` have no declared type.
fn render_cell(row: &SqliteRow, index: usize) -> DbResult<String> {
    let kind = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(String::new());
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let cell = match kind.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get_unchecked::<i64, _>(index)?.to_string(),
        "REAL" => format_real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => String::from_utf8_lossy(&row.try_get_unchecked::<Vec<u8>, _>(index)?).into_owned(),
        _ => row.try_get_unchecked::<String, _>(index)?,
    };

    Ok(cell)
}

fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn executor() -> QueryExecutor {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.executor()
    }

    #[tokio::test]
    async fn test_update_then_query() {
        let executor = executor().await;

        let inserted = executor
            .execute_update(
                "INSERT INTO Warehouse (area, latitude, longitude) VALUES (?1, ?2, ?3)",
                &["North".into(), 12.5_f64.into(), 40.0_f64.into()],
            )
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let count = executor
            .execute_query(
                "SELECT warehouseID FROM Warehouse WHERE area = ?1",
                &["North".into()],
            )
            .await
            .unwrap();
        assert_eq!(count, 1);

        let missing = executor
            .execute_query(
                "SELECT warehouseID FROM Warehouse WHERE area = ?1",
                &["South".into()],
            )
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }

    #[tokio::test]
    async fn test_rows_render_each_storage_class() {
        let executor = executor().await;

        let rows = executor
            .execute_query_rows(
                "SELECT ?1 AS i, ?2 AS r, ?3 AS h, ?4 AS t, ?5 AS n",
                &[
                    7_i64.into(),
                    2.0_f64.into(),
                    2.5_f64.into(),
                    "Widget".into(),
                    SqlValue::Null,
                ],
            )
            .await
            .unwrap();

        assert_eq!(rows, vec![vec!["7", "2.0", "2.5", "Widget", ""]]);
    }

    #[tokio::test]
    async fn test_table_carries_column_names() {
        let executor = executor().await;

        let table = executor
            .execute_query_table("SELECT 1 AS storeID, 'Corner' AS name", &[])
            .await
            .unwrap();

        assert_eq!(table.columns, vec!["storeID", "name"]);
        assert_eq!(table.row_count(), 1);

        let empty = executor
            .execute_query_table("SELECT * FROM Store", &[])
            .await
            .unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.render(), "");
    }

    #[tokio::test]
    async fn test_constraint_violation_is_an_error() {
        let executor = executor().await;

        // managerID references a user that does not exist.
        let result = executor
            .execute_update(
                "INSERT INTO Store (name, managerID, latitude, longitude, dateEstablished) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    "Ghost".into(),
                    999_i64.into(),
                    1.0_f64.into(),
                    1.0_f64.into(),
                    "2020-01-01".into(),
                ],
            )
            .await;

        assert!(matches!(
            result,
            Err(crate::error::DbError::ForeignKeyViolation { .. })
        ));
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".to_string()));
    }
}
