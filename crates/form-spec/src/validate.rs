use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::spec::{Condition, Field, FieldType, Form};

pub const MAX_FORM_NAME_LEN: usize = 100;
pub const MAX_LABEL_LEN: usize = 200;

/// One problem found in a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    /// Problems that do not block saving, such as rules on text fields
    /// (text values always read as unchecked).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn errors_under<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |error| error.path.starts_with(prefix))
    }
}

/// Checks that a form definition is well formed: a usable name, labelled
/// elements with unique ids, and rules that point at other fields.
/// Rules on non-checkbox fields are reported as warnings.
pub fn validate_form(form: &Form) -> ValidationResult {
    let mut errors = validate_form_name(&form.name);

    if form.elements.is_empty() {
        errors.push(base_error(
            "elements",
            "Form must have at least one element",
            "no_elements",
        ));
    }

    let kinds: BTreeMap<&str, FieldType> = form
        .elements
        .iter()
        .map(|element| (element.id.as_str(), element.kind))
        .collect();
    let mut seen = BTreeSet::new();
    let mut warnings = Vec::new();

    for (index, element) in form.elements.iter().enumerate() {
        let base = format!("elements[{}]", index);

        if !seen.insert(element.id.as_str()) {
            errors.push(base_error(
                &format!("{}.id", base),
                &format!("Element id '{}' is used more than once", element.id),
                "duplicate_id",
            ));
        }

        for error in validate_element(element) {
            errors.push(ValidationError {
                path: format!("{}.{}", base, error.path),
                ..error
            });
        }

        if let Some(logic) = &element.conditional_logic {
            check_conditions(
                &logic.rules,
                &element.id,
                &kinds,
                &format!("{}.conditionalLogic", base),
                &mut Findings {
                    errors: &mut errors,
                    warnings: &mut warnings,
                },
            );
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

pub fn validate_form_name(name: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(base_error("name", "Form name is required", "required"));
    }
    if name.chars().count() > MAX_FORM_NAME_LEN {
        errors.push(base_error(
            "name",
            "Form name must be 100 characters or less",
            "max_length",
        ));
    }
    errors
}

/// Label checks for a single element; paths are relative to the element.
pub fn validate_element(element: &Field) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if element.label.trim().is_empty() {
        errors.push(base_error("label", "Element label is required", "required"));
    }
    if element.label.chars().count() > MAX_LABEL_LEN {
        errors.push(base_error(
            "label",
            "Element label must be 200 characters or less",
            "max_length",
        ));
    }
    errors
}

struct Findings<'a> {
    errors: &'a mut Vec<ValidationError>,
    warnings: &'a mut Vec<ValidationError>,
}

fn check_conditions(
    conditions: &[Condition],
    owner: &str,
    kinds: &BTreeMap<&str, FieldType>,
    base: &str,
    findings: &mut Findings<'_>,
) {
    for (index, condition) in conditions.iter().enumerate() {
        let path = format!("{}.rules[{}]", base, index);
        match condition {
            Condition::Group(group) => {
                check_conditions(&group.rules, owner, kinds, &path, findings)
            }
            Condition::Rule(rule) => {
                if rule.depends_on == owner {
                    findings.errors.push(base_error(
                        &path,
                        "Element cannot depend on itself",
                        "self_reference",
                    ));
                    continue;
                }
                match kinds.get(rule.depends_on.as_str()) {
                    None => findings.errors.push(base_error(
                        &path,
                        &format!("Rule depends on unknown element '{}'", rule.depends_on),
                        "unknown_dependency",
                    )),
                    Some(FieldType::Checkbox) => {}
                    Some(_) => findings.warnings.push(base_error(
                        &path,
                        &format!(
                            "Rule depends on '{}', which is not a checkbox",
                            rule.depends_on
                        ),
                        "non_checkbox_dependency",
                    )),
                }
            }
        }
    }
}

fn base_error(path: &str, message: &str, code: &str) -> ValidationError {
    ValidationError {
        path: path.into(),
        message: message.into(),
        code: code.into(),
    }
}
