use tracing::debug;

use crate::conditional::should_show_element;
use crate::spec::Field;
use crate::values::FormValues;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Visibility of every field, keyed by id.
///
/// Each entry depends on the raw values only, never on another field's
/// computed visibility, so field order does not matter.
pub fn compute_visibility_map(fields: &[Field], values: &FormValues) -> VisibilityMap {
    let mut map = VisibilityMap::new();

    for field in fields {
        map.insert(field.id.clone(), should_show_element(field, values));
    }

    debug!(
        fields = fields.len(),
        visible = map.values().filter(|visible| **visible).count(),
        "computed visibility"
    );
    map
}

/// Ids of the visible fields in form order.
pub fn visible_field_ids(fields: &[Field], values: &FormValues) -> Vec<String> {
    fields
        .iter()
        .filter(|field| should_show_element(field, values))
        .map(|field| field.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ConditionalLogic, ConditionalRule};

    #[test]
    fn map_covers_every_field() {
        let fields = vec![
            Field::checkbox("cb", "Toggle"),
            Field::text("details", "Details")
                .with_logic(ConditionalLogic::all([ConditionalRule::new("cb", true)])),
        ];
        let map = compute_visibility_map(&fields, &FormValues::new());
        assert_eq!(map.len(), 2);
        assert!(map["cb"]);
        assert!(!map["details"]);
        assert_eq!(visible_field_ids(&fields, &FormValues::new()), vec!["cb"]);
    }
}
