use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::{Field, FieldType, Form};

/// Live values keyed by field id. Missing entries are unset.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Current value of one field.
///
/// Checkboxes hold `Bool`, text inputs hold `Text`. Anything else a host
/// hands over (numbers, null, arrays) is kept as `Other` so it can be
/// carried without failing the whole value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    Other(Value),
}

impl FieldValue {
    /// Only the literal `true` counts as checked.
    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Other(Value::Null))
    }

    /// Loose truthiness used when a renderer coerces a stored value into a
    /// checkbox state. Empty text, zero and null are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(value) => *value,
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Other(Value::Null) => false,
            FieldValue::Other(Value::Bool(value)) => *value,
            FieldValue::Other(Value::Number(number)) => {
                number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan())
            }
            FieldValue::Other(Value::String(text)) => !text.is_empty(),
            FieldValue::Other(_) => true,
        }
    }

    /// Text rendering of the value for text inputs.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Other(Value::Null) => String::new(),
            FieldValue::Other(Value::String(text)) => text.clone(),
            FieldValue::Other(other) => other.to_string(),
        }
    }

    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(value) => FieldValue::Bool(value),
            Value::String(text) => FieldValue::Text(text),
            other => FieldValue::Other(other),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Builds a value map from an arbitrary JSON document. Non-object input
/// yields an empty map.
pub fn values_from_json(value: &Value) -> FormValues {
    value
        .as_object()
        .map(|object| {
            object
                .iter()
                .map(|(id, value)| (id.clone(), FieldValue::from_json(value.clone())))
                .collect()
        })
        .unwrap_or_default()
}

fn empty_value(kind: FieldType) -> FieldValue {
    match kind {
        FieldType::Checkbox => FieldValue::Bool(false),
        FieldType::Text => FieldValue::Text(String::new()),
    }
}

/// Reads a field's value in the shape its input expects.
pub fn field_value(field: &Field, values: &FormValues) -> FieldValue {
    match values.get(&field.id) {
        None => empty_value(field.kind),
        Some(value) if value.is_null() => empty_value(field.kind),
        Some(value) => match field.kind {
            FieldType::Checkbox => FieldValue::Bool(value.is_truthy()),
            FieldType::Text => FieldValue::Text(value.to_text()),
        },
    }
}

/// Initial values for a fresh render: unchecked boxes and empty text.
pub fn default_values(form: &Form) -> FormValues {
    form.elements
        .iter()
        .map(|element| (element.id.clone(), empty_value(element.kind)))
        .collect()
}
