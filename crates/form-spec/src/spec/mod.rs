pub mod field;
pub mod form;
pub mod logic;

pub use field::{Field, FieldType};
pub use form::Form;
pub use logic::{Condition, ConditionalLogic, ConditionalRule, Operator};
