//! Dynamic row model
//!
//! The handler has no compile-time knowledge of the table's columns, so a row
//! is an ordered map from column name to a JSON scalar. Column order follows
//! the result set (serde_json is built with `preserve_order`).

use serde_json::{Map, Number, Value};

/// One database record
pub type Row = Map<String, Value>;

/// All records produced by one query, in database order
pub type ResultSet = Vec<Row>;

/// Convert a float cell, mapping NaN and infinities to `null`
pub fn float_value(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

/// Convert a FLOAT cell through its shortest decimal text, so `19.99` stays
/// `19.99` instead of the widened `19.989999771118164`
pub fn f32_value(v: f32) -> Value {
    v.to_string()
        .parse::<f64>()
        .map(float_value)
        .unwrap_or(Value::Null)
}

/// Convert a byte cell to a string when it is valid UTF-8
pub fn bytes_value(bytes: Vec<u8>) -> Value {
    String::from_utf8(bytes).map(Value::String).unwrap_or(Value::Null)
}
