use crate::node::{Node, Scalar, Value};
use serde_json::json;

/// Converts a tree into JSON, keeping mapping keys in key-index order.
/// Non-finite floats become `null`.
pub fn to_json(node: &Node) -> serde_json::Value {
    match node.value() {
        Value::Scalar(Scalar::Null) => serde_json::Value::Null,
        Value::Scalar(Scalar::Str(s)) => json!(s),
        Value::Scalar(Scalar::Int(v)) => json!(*v),
        Value::Scalar(Scalar::Float(v)) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Scalar(Scalar::Bool(v)) => serde_json::Value::Bool(*v),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Mapping(m) => {
            let mut map = serde_json::Map::with_capacity(m.len());
            for (key, child) in m.iter() {
                map.insert(key.name.clone(), to_json(child));
            }
            serde_json::Value::Object(map)
        }
    }
}
