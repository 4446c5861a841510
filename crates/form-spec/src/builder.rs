use tracing::debug;

use crate::conditional::DEFAULT_OPERATOR;
use crate::spec::{ConditionalLogic, ConditionalRule, Field, FieldType, Form};

pub const DRAFT_FORM_ID: &str = "draft";

/// Checkbox fields a rule on `current_id` may depend on. The field itself
/// is never offered.
pub fn available_checkboxes<'a>(elements: &'a [Field], current_id: &str) -> Vec<&'a Field> {
    elements
        .iter()
        .filter(|element| element.is_checkbox() && element.id != current_id)
        .collect()
}

pub fn has_available_checkboxes(elements: &[Field], current_id: &str) -> bool {
    elements
        .iter()
        .any(|element| element.is_checkbox() && element.id != current_id)
}

pub fn default_rule(checkbox_id: &str) -> ConditionalRule {
    ConditionalRule::new(checkbox_id, true)
}

/// Logic a builder attaches when conditional logic is first enabled.
pub fn default_conditional_logic(checkbox_id: &str) -> ConditionalLogic {
    ConditionalLogic::new(DEFAULT_OPERATOR, [default_rule(checkbox_id)])
}

/// Partial update applied to an element. `conditional_logic: Some(None)`
/// removes the element's logic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub label: Option<String>,
    pub kind: Option<FieldType>,
    pub is_required: Option<bool>,
    pub conditional_logic: Option<Option<ConditionalLogic>>,
}

impl ElementPatch {
    fn apply(self, element: &mut Field) {
        if let Some(label) = self.label {
            element.label = label;
        }
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
        if let Some(is_required) = self.is_required {
            element.is_required = is_required;
        }
        if let Some(logic) = self.conditional_logic {
            element.conditional_logic = logic;
        }
    }
}

/// In-progress copy of a form being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftForm {
    id: String,
    name: String,
    elements: Vec<Field>,
    selected: Option<String>,
    dirty: bool,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftForm {
    pub fn new() -> Self {
        Self {
            id: DRAFT_FORM_ID.into(),
            name: String::new(),
            elements: Vec::new(),
            selected: None,
            dirty: false,
        }
    }

    /// Starts editing an existing form; the draft begins clean.
    pub fn from_form(form: &Form) -> Self {
        Self {
            id: form.id.clone(),
            name: form.name.clone(),
            elements: form.elements.clone(),
            selected: None,
            dirty: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &[Field] {
        &self.elements
    }

    pub fn selected(&self) -> Option<&Field> {
        let selected = self.selected.as_deref()?;
        self.elements.iter().find(|element| element.id == selected)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.dirty = true;
    }

    pub fn set_elements(&mut self, elements: Vec<Field>) {
        self.elements = elements;
        self.dirty = true;
    }

    /// Appends the element and selects it.
    pub fn add_element(&mut self, element: Field) {
        debug!(element = %element.id, "adding element to draft");
        self.selected = Some(element.id.clone());
        self.elements.push(element);
        self.dirty = true;
    }

    /// Applies `patch` to the element with `id`. The id itself never
    /// changes. Returns false when no such element exists.
    pub fn update_element(&mut self, id: &str, patch: ElementPatch) -> bool {
        self.dirty = true;
        match self.elements.iter_mut().find(|element| element.id == id) {
            Some(element) => {
                patch.apply(element);
                true
            }
            None => false,
        }
    }

    /// Removes the element, clearing the selection if it pointed at it.
    pub fn remove_element(&mut self, id: &str) -> Option<Field> {
        self.dirty = true;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        let index = self.elements.iter().position(|element| element.id == id)?;
        debug!(element = %id, "removing element from draft");
        Some(self.elements.remove(index))
    }

    /// Moves the element at `start` to `end`. An out-of-range `start`
    /// leaves the order untouched; `end` is clamped to the list length.
    pub fn reorder_elements(&mut self, start: usize, end: usize) {
        self.dirty = true;
        if start >= self.elements.len() {
            return;
        }
        let element = self.elements.remove(start);
        let end = end.min(self.elements.len());
        self.elements.insert(end, element);
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    /// Resets to an empty, clean draft.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn to_form(&self) -> Form {
        Form::new(self.id.clone(), self.name.clone(), self.elements.clone())
    }

    pub fn into_form(self) -> Form {
        Form::new(self.id, self.name, self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Operator;

    fn sample() -> DraftForm {
        let form = Form::new(
            "42",
            "Sample",
            vec![
                Field::text("a", "A"),
                Field::checkbox("b", "B"),
                Field::checkbox("c", "C"),
            ],
        );
        DraftForm::from_form(&form)
    }

    #[test]
    fn available_checkboxes_exclude_self_and_text() {
        let draft = sample();
        let ids: Vec<_> = available_checkboxes(draft.elements(), "b")
            .into_iter()
            .map(|element| element.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c"]);
        assert!(has_available_checkboxes(draft.elements(), "a"));
        assert!(!has_available_checkboxes(&[Field::checkbox("only", "Only")], "only"));
    }

    #[test]
    fn default_logic_is_single_and_rule() {
        let logic = default_conditional_logic("b");
        assert_eq!(logic.operator, Some(Operator::And));
        assert_eq!(logic.to_rule_list(), vec![&ConditionalRule::new("b", true)]);
    }

    #[test]
    fn from_form_starts_clean_and_edits_mark_dirty() {
        let mut draft = sample();
        assert!(!draft.is_dirty());
        draft.set_name("Renamed");
        assert!(draft.is_dirty());
        draft.mark_clean();
        assert!(!draft.is_dirty());
    }

    #[test]
    fn add_selects_and_remove_clears_selection() {
        let mut draft = DraftForm::new();
        assert_eq!(draft.id(), DRAFT_FORM_ID);
        draft.add_element(Field::checkbox("x", "X"));
        assert_eq!(draft.selected_id(), Some("x"));
        assert_eq!(draft.selected().map(|element| element.label.as_str()), Some("X"));

        let removed = draft.remove_element("x").expect("removed");
        assert_eq!(removed.id, "x");
        assert_eq!(draft.selected_id(), None);
        assert!(draft.remove_element("x").is_none());
    }

    #[test]
    fn update_keeps_id_and_can_clear_logic() {
        let mut draft = sample();
        let updated = draft.update_element(
            "a",
            ElementPatch {
                label: Some("Alpha".into()),
                is_required: Some(true),
                conditional_logic: Some(Some(default_conditional_logic("b"))),
                ..Default::default()
            },
        );
        assert!(updated);
        let element = &draft.elements()[0];
        assert_eq!(element.id, "a");
        assert_eq!(element.label, "Alpha");
        assert!(element.is_required);
        assert!(element.conditional_logic.is_some());

        draft.update_element(
            "a",
            ElementPatch {
                conditional_logic: Some(None),
                ..Default::default()
            },
        );
        assert!(draft.elements()[0].conditional_logic.is_none());
        assert!(!draft.update_element("missing", ElementPatch::default()));
    }

    #[test]
    fn reorder_moves_elements() {
        let mut draft = sample();
        draft.reorder_elements(0, 2);
        let ids: Vec<_> = draft.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        draft.reorder_elements(9, 0);
        let ids: Vec<_> = draft.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = sample();
        draft.select(Some("a"));
        draft.clear();
        assert_eq!(draft, DraftForm::new());
        assert!(draft.into_form().elements.is_empty());
    }
}
