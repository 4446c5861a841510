#![allow(missing_docs)]

pub mod builder;
pub mod conditional;
pub mod spec;
pub mod store;
pub mod validate;
pub mod values;
pub mod visibility;

pub use builder::{
    DraftForm, ElementPatch, available_checkboxes, default_conditional_logic, default_rule,
    has_available_checkboxes,
};
pub use conditional::{
    DEFAULT_OPERATOR, evaluate_conditional_logic, evaluate_rule, is_field_satisfied,
    should_show_element,
};
pub use spec::{Condition, ConditionalLogic, ConditionalRule, Field, FieldType, Form, Operator};
pub use store::{FormStore, FormUpdate, MemoryFormStore, StoreError};
pub use validate::{ValidationError, ValidationResult, validate_form};
pub use values::{FieldValue, FormValues, default_values, field_value, values_from_json};
pub use visibility::{VisibilityMap, compute_visibility_map, visible_field_ids};
