// Response-schema builders in the endpoint's OpenAPI-subset dialect
// (upper-case type names, `propertyOrdering` to keep field order stable).

use serde_json::{json, Map, Value};

pub fn string() -> Value {
    json!({"type": "STRING"})
}

pub fn integer() -> Value {
    json!({"type": "INTEGER"})
}

pub fn number() -> Value {
    json!({"type": "NUMBER"})
}

pub fn string_array() -> Value {
    json!({"type": "ARRAY", "items": {"type": "STRING"}})
}

/// An object schema in which every listed property is required.
pub fn object(fields: &[(&str, Value)]) -> Value {
    let mut properties = Map::new();
    for (name, schema) in fields {
        properties.insert(name.to_string(), schema.clone());
    }
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": names,
        "propertyOrdering": names,
    })
}
