//! Conditional visibility evaluation.
//!
//! Every function here is pure and total: dangling dependencies, stray value
//! types and empty rule lists all resolve to a boolean.

use crate::spec::{Condition, ConditionalLogic, ConditionalRule, Field, Operator};
use crate::values::{FieldValue, FormValues};

pub const DEFAULT_OPERATOR: Operator = Operator::And;

/// Compares a raw value, read as a checkbox, with the expected state.
///
/// Unset values and anything other than a literal `true` read as unchecked.
pub fn is_field_satisfied(value: Option<&FieldValue>, show_when: bool) -> bool {
    value.is_some_and(FieldValue::is_checked) == show_when
}

pub fn evaluate_rule(rule: &ConditionalRule, values: &FormValues) -> bool {
    is_field_satisfied(values.get(&rule.depends_on), rule.show_when)
}

fn evaluate_condition(condition: &Condition, values: &FormValues) -> bool {
    match condition {
        Condition::Rule(rule) => evaluate_rule(rule, values),
        Condition::Group(group) => evaluate_conditional_logic(group, values),
    }
}

/// Combines the rule list with its operator. An empty list holds.
pub fn evaluate_conditional_logic(logic: &ConditionalLogic, values: &FormValues) -> bool {
    if logic.rules.is_empty() {
        return true;
    }

    let mut results = logic
        .rules
        .iter()
        .map(|condition| evaluate_condition(condition, values));
    match logic.effective_operator() {
        Operator::And => results.all(|satisfied| satisfied),
        Operator::Or => results.any(|satisfied| satisfied),
    }
}

/// Fields without conditional logic are always shown.
pub fn should_show_element(field: &Field, values: &FormValues) -> bool {
    field
        .conditional_logic
        .as_ref()
        .is_none_or(|logic| evaluate_conditional_logic(logic, values))
}
