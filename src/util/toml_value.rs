use serde_json::{Map, Number, Value};

/// Converts TOML into the JSON value model used for frontmatter.
/// Native TOML dates become their RFC 3339 text so they go through the same date coercion as YAML strings.
pub fn to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        toml::Value::Table(table) => Value::Object(table_to_json(table)),
    }
}

pub fn table_to_json(table: toml::Table) -> Map<String, Value> {
    table.into_iter()
        .map(|(k, v)| (k, to_json(v)))
        .collect()
}
