use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One recorded page visit.
///
/// Stored as written: `{ "url": ..., "timestamp": ... }` for visits this
/// service records, with `timestamp` an ISO-8601 UTC string in millisecond
/// precision (`2024-05-01T12:00:00.000Z`). Elements already in the file are
/// kept verbatim whatever their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Visit(Value);

/// A named data item, normally `{ "id": <integer>, "name": <string> }`.
///
/// Key order and any extra keys survive a rewrite; an element whose `id` is
/// not an integer simply never matches an id lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataItem(Value);

impl Visit {
    pub fn new(url: String, timestamp: String) -> Self {
        Self(json!({ "url": url, "timestamp": timestamp }))
    }

    #[cfg(test)]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl DataItem {
    pub fn new(id: i64, name: String) -> Self {
        Self(json!({ "id": id, "name": name }))
    }

    /// The integer id, also accepting integral floats such as `3.0`.
    pub fn id(&self) -> Option<i64> {
        let id = self.0.get("id")?;
        id.as_i64().or_else(|| {
            id.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    pub fn has_id(&self, id: Option<i64>) -> bool {
        id.is_some() && self.id() == id
    }

    /// Replace `name` in place, or append it if the item has none.
    pub fn set_name(&mut self, name: &str) {
        if let Value::Object(fields) = &mut self.0 {
            fields.insert("name".to_string(), Value::String(name.to_string()));
        }
    }

    #[cfg(test)]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}
