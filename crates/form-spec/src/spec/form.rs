use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::{Field, FieldType};

/// Top-level form definition as stored and exchanged with the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Form {
    pub fn new(id: impl Into<String>, name: impl Into<String>, elements: Vec<Field>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            elements,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn element(&self, id: &str) -> Option<&Field> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn required_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| element.is_required)
            .count()
    }

    pub fn elements_of(&self, kind: FieldType) -> impl Iterator<Item = &Field> {
        self.elements
            .iter()
            .filter(move |element| element.kind == kind)
    }
}
