use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::logic::ConditionalLogic;

/// Supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Checkbox,
}

impl FieldType {
    /// Label used by builder lists ("Text Field", "Checkbox").
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Field",
            FieldType::Checkbox => "Checkbox",
        }
    }
}

/// One entry of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    #[serde(default)]
    pub is_required: bool,
    /// Visibility rule; `None` means the field is always shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<ConditionalLogic>,
}

impl Field {
    pub fn new(id: impl Into<String>, kind: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            is_required: false,
            conditional_logic: None,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldType::Text, label)
    }

    pub fn checkbox(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldType::Checkbox, label)
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn with_logic(mut self, logic: ConditionalLogic) -> Self {
        self.conditional_logic = Some(logic);
        self
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.kind, FieldType::Checkbox)
    }

    /// `"<label> - <type>"`, with a `(Required)` suffix when applicable.
    pub fn display_name(&self) -> String {
        let required = if self.is_required { " (Required)" } else { "" };
        format!("{} - {}{}", self.label, self.kind.display_name(), required)
    }
}
