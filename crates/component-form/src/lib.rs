use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use form_spec::{
    Form, FormValues, compute_visibility_map, default_values as form_default_values,
    field_value, should_show_element, validate_form, values_from_json,
};

const DEFAULT_FORM: &str = include_str!("../../form-spec/tests/fixtures/alchemy_form.json");

#[derive(Debug, Error)]
enum ComponentError {
    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("failed to parse form: {0}")]
    FormParse(#[source] serde_json::Error),
    #[error("form '{0}' is not available")]
    FormUnavailable(String),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ComponentConfig {
    #[serde(default)]
    form_json: Option<String>,
}

fn load_form(config_json: &str) -> Result<Form, ComponentError> {
    let config = if config_json.trim().is_empty() {
        ComponentConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(ComponentError::ConfigParse)?
    };

    let form_json = config.form_json.as_deref().unwrap_or(DEFAULT_FORM);

    serde_json::from_str(form_json).map_err(ComponentError::FormParse)
}

fn ensure_form(form_id: &str, config_json: &str) -> Result<Form, ComponentError> {
    let form = load_form(config_json)?;
    if form.id != form_id {
        Err(ComponentError::FormUnavailable(form_id.to_string()))
    } else {
        Ok(form)
    }
}

/// Malformed or non-object input counts as "nothing entered yet".
fn parse_values(values_json: &str) -> FormValues {
    serde_json::from_str::<Value>(values_json)
        .map(|value| values_from_json(&value))
        .unwrap_or_default()
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

/// Returns the form definition, rules in their general shape.
pub fn describe(form_id: &str, config_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|form| {
        serde_json::to_value(form).map_err(ComponentError::JsonEncode)
    }))
}

/// Visibility for every field plus the visible ids in form order.
pub fn visibility(form_id: &str, config_json: &str, values_json: &str) -> String {
    respond(ensure_form(form_id, config_json).map(|form| {
        let values = parse_values(values_json);
        let map = compute_visibility_map(&form.elements, &values);
        let visible: Vec<&str> = form
            .elements
            .iter()
            .filter(|field| map.get(&field.id).copied().unwrap_or(true))
            .map(|field| field.id.as_str())
            .collect();
        json!({
            "form_id": form.id,
            "visibility": map,
            "visible": visible,
        })
    }))
}

/// Definition checks for the configured form.
pub fn check_form(form_id: &str, config_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|form| {
        serde_json::to_value(validate_form(&form)).map_err(ComponentError::JsonEncode)
    }))
}

/// Initial values for every field.
pub fn default_values(form_id: &str, config_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|form| {
        serde_json::to_value(form_default_values(&form)).map_err(ComponentError::JsonEncode)
    }))
}

/// Values coerced to each field's input type, visible fields only.
pub fn render_values(form_id: &str, config_json: &str, values_json: &str) -> String {
    respond(ensure_form(form_id, config_json).map(|form| {
        let values = parse_values(values_json);
        let mut rendered = Map::new();
        for field in &form.elements {
            if should_show_element(field, &values) {
                let value = field_value(field, &values);
                rendered.insert(
                    field.id.clone(),
                    serde_json::to_value(value).unwrap_or(Value::Null),
                );
            }
        }
        Value::Object(rendered)
    }))
}
