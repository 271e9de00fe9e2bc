//! # MySQL Connector
//!
//! `Connector` implementation over a single, unpooled `sqlx` MySQL connection.
//! Cells are decoded by SQL type into JSON scalars.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use sqlx::mysql::types::MySqlTime;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use super::config::DatabaseConfig;
use super::connector::{Connection, Connector};
use super::errors::{DbError, DbResult};
use super::row::{bytes_value, f32_value, float_value, ResultSet, Row};

/// Opens MySQL connections from a `DatabaseConfig`
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    options: MySqlConnectOptions,
    connect_timeout_ms: u64,
    query_timeout_ms: u64,
    target: String,
}

impl MySqlConnector {
    pub fn new(config: &DatabaseConfig) -> Self {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.name);
        if !config.password.is_empty() {
            options = options.password(&config.password);
        }

        Self {
            options,
            connect_timeout_ms: config.connect_timeout_ms,
            query_timeout_ms: config.query_timeout_ms,
            target: config.target(),
        }
    }

    /// Build from ready-made sqlx options, e.g. parsed from a `mysql://` URL
    pub fn from_options(
        options: MySqlConnectOptions,
        connect_timeout_ms: u64,
        query_timeout_ms: u64,
    ) -> Self {
        let target = format!(
            "{}:{}/{}",
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or_default()
        );
        Self {
            options,
            connect_timeout_ms,
            query_timeout_ms,
            target,
        }
    }

    /// `host:port/name` this connector points at
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Connector for MySqlConnector {
    type Connection = MySqlConn;

    async fn connect(&self) -> DbResult<MySqlConn> {
        let connect = <MySqlConnection as sqlx::Connection>::connect_with(&self.options);
        let conn = tokio::time::timeout(Duration::from_millis(self.connect_timeout_ms), connect)
            .await
            .map_err(|_| DbError::connect_timeout(self.connect_timeout_ms))?
            .map_err(|e| DbError::Connect(driver_message(&e)))?;

        tracing::debug!(target_db = %self.target, "database connection opened");

        Ok(MySqlConn {
            conn,
            query_timeout_ms: self.query_timeout_ms,
        })
    }
}

/// An open MySQL connection
#[derive(Debug)]
pub struct MySqlConn {
    conn: MySqlConnection,
    query_timeout_ms: u64,
}

impl Connection for MySqlConn {
    async fn fetch_rows(&mut self, sql: &str) -> DbResult<ResultSet> {
        let fetch = sqlx::query(sql).fetch_all(&mut self.conn);
        let rows = tokio::time::timeout(Duration::from_millis(self.query_timeout_ms), fetch)
            .await
            .map_err(|_| DbError::query_timeout(self.query_timeout_ms))?
            .map_err(|e| DbError::Query(driver_message(&e)))?;

        Ok(rows.iter().map(mysql_row_to_json).collect())
    }

    async fn close(self) {
        if let Err(e) = sqlx::Connection::close(self.conn).await {
            // The socket is gone either way.
            tracing::debug!(error = %e, "database connection closed uncleanly");
        }
    }
}

/// Prefer the server's own message ("Table 'x.products' doesn't exist")
/// over sqlx's wrapper text.
fn driver_message(err: &sqlx::Error) -> String {
    match err.as_database_error() {
        Some(db_err) => db_err.message().to_string(),
        None => err.to_string(),
    }
}

fn mysql_row_to_json(row: &MySqlRow) -> Row {
    let mut out = Row::with_capacity(row.columns().len());
    for (idx, column) in row.columns().iter().enumerate() {
        let value = mysql_cell_to_json(row, idx, column.type_info().name());
        out.insert(column.name().to_string(), value);
    }
    out
}

/// How a column's cells are decoded, keyed on sqlx's MySQL type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Bool,
    Signed,
    Unsigned,
    Year,
    Float,
    Double,
    Date,
    DateTime,
    Time,
    /// Sent as text on the wire; decoded without sqlx's type check.
    Text,
    Bytes,
    Other,
}

impl CellKind {
    fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "BOOLEAN" => Self::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => Self::Signed,
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => Self::Unsigned,
            "YEAR" => Self::Year,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "DATE" => Self::Date,
            "DATETIME" | "TIMESTAMP" => Self::DateTime,
            "TIME" => Self::Time,
            "DECIMAL" | "JSON" | "ENUM" | "SET" => Self::Text,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
            | "GEOMETRY" => Self::Bytes,
            _ => Self::Other,
        }
    }
}

fn mysql_cell_to_json(row: &MySqlRow, idx: usize, type_name: &str) -> Value {
    match row.try_get_raw(idx) {
        Ok(raw) if !raw.is_null() => {}
        _ => return Value::Null,
    }

    let kind = CellKind::from_type_name(type_name);
    let decoded: Result<Value, sqlx::Error> = match kind {
        CellKind::Bool => row.try_get::<bool, _>(idx).map(Value::Bool),
        CellKind::Signed => row.try_get::<i64, _>(idx).map(Value::from),
        CellKind::Unsigned => row.try_get::<u64, _>(idx).map(Value::from),
        CellKind::Year => row.try_get_unchecked::<u16, _>(idx).map(Value::from),
        CellKind::Float => row.try_get::<f32, _>(idx).map(f32_value),
        CellKind::Double => row.try_get::<f64, _>(idx).map(float_value),
        CellKind::Date => row
            .try_get::<NaiveDate, _>(idx)
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .or_else(|_| temporal_fallback(row, idx, kind)),
        CellKind::DateTime => row
            .try_get::<NaiveDateTime, _>(idx)
            .map(|dt| Value::String(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()))
            .or_else(|_| temporal_fallback(row, idx, kind)),
        CellKind::Time => row.try_get::<MySqlTime, _>(idx).map(|t| {
            Value::String(time_text(
                t.is_negative(),
                t.hours(),
                t.minutes(),
                t.seconds(),
                t.microseconds(),
            ))
        }),
        CellKind::Text => row.try_get_unchecked::<String, _>(idx).map(Value::String),
        CellKind::Bytes => row.try_get_unchecked::<Vec<u8>, _>(idx).map(bytes_value),
        CellKind::Other => row
            .try_get::<String, _>(idx)
            .map(Value::String)
            .or_else(|_| row.try_get_unchecked::<Vec<u8>, _>(idx).map(bytes_value)),
    };

    decoded.unwrap_or_else(|e| {
        tracing::warn!(column = idx, sql_type = type_name, error = %e, "undecodable cell, returning null");
        Value::Null
    })
}

/// Zero and partial-zero dates (`0000-00-00`, `2024-00-00`) have no chrono
/// representation, so they are rendered from the cell's own bytes.
fn temporal_fallback(
    row: &MySqlRow,
    idx: usize,
    kind: CellKind,
) -> Result<Value, sqlx::Error> {
    let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
    Ok(match binary_temporal_text(kind, &bytes) {
        Some(text) => Value::String(text),
        None => bytes_value(bytes),
    })
}

/// Format a binary-protocol DATE / DATETIME cell.
///
/// Layout: `[len, year (u16 LE), month, day, hour, minute, second, micros (u32 LE)]`,
/// truncated after `len` bytes; `len` is 0, 4, 7 or 11. Returns `None` for
/// anything else (text-protocol cells are already MySQL-formatted strings).
fn binary_temporal_text(kind: CellKind, bytes: &[u8]) -> Option<String> {
    let (&len, body) = bytes.split_first()?;
    if usize::from(len) != body.len() || !matches!(len, 0 | 4 | 7 | 11) {
        return None;
    }

    let mut f = [0u8; 11];
    f[..body.len()].copy_from_slice(body);

    let year = u16::from_le_bytes([f[0], f[1]]);
    let date = format!("{:04}-{:02}-{:02}", year, f[2], f[3]);
    if kind == CellKind::Date {
        return Some(date);
    }

    let micros = u32::from_le_bytes([f[7], f[8], f[9], f[10]]);
    let mut text = format!("{} {:02}:{:02}:{:02}", date, f[4], f[5], f[6]);
    if micros != 0 {
        text.push_str(&format!(".{:06}", micros));
    }
    Some(text)
}

/// MySQL-style TIME text; hours run past 24 and the value may be negative.
fn time_text(negative: bool, hours: u32, minutes: u8, seconds: u8, micros: u32) -> String {
    let sign = if negative { "-" } else { "" };
    let mut text = format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds);
    if micros != 0 {
        text.push_str(&format!(".{:06}", micros));
    }
    text
}
