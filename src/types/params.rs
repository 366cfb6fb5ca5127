//! Request parameter maps.

use serde_json::{Map, Value};

/// Parameters for a single request
///
/// Absent values are never stored: `None` and JSON `null` are dropped on
/// insert, so the service never receives a null-valued key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParameters(Map<String, Value>);

impl RequestParameters {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, dropping `null`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        if !value.is_null() {
            self.0.insert(key.into(), value);
        }
    }

    /// Insert an optional value
    pub fn insert_opt<V: Into<Value>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Builder form of [`insert_opt`](Self::insert_opt)
    pub fn with<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    /// Add pass-through parameters; keys already set are kept
    pub fn extend_extra(&mut self, extra: impl IntoIterator<Item = (String, Value)>) {
        for (key, value) in extra {
            if !value.is_null() && !self.0.contains_key(&key) {
                self.0.insert(key, value);
            }
        }
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check for a key
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a key
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no parameter is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Encode as query string pairs; arrays repeat the key
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                Value::Array(items) => {
                    for item in items {
                        pairs.push((key.clone(), scalar_to_string(item)));
                    }
                }
                other => pairs.push((key.clone(), scalar_to_string(other))),
            }
        }
        pairs
    }

    /// Encode as multipart text fields; non-string values are JSON-encoded
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| {
                let encoded = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), encoded)
            })
            .collect()
    }

    /// Convert into a JSON object body
    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
