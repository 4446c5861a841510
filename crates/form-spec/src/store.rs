use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::spec::{Field, Form};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("form name is required")]
    MissingName,
    #[error("form '{0}' not found")]
    NotFound(String),
}

/// Fields replaced by [`FormStore::update`]; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Field>>,
}

/// Create/read/update/delete access to saved forms, keyed by id.
pub trait FormStore {
    fn create(&mut self, name: &str, elements: Vec<Field>) -> Result<Form, StoreError>;
    fn get(&self, id: &str) -> Result<Form, StoreError>;
    fn list(&self) -> Vec<Form>;
    fn update(&mut self, id: &str, update: FormUpdate) -> Result<Form, StoreError>;
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// In-process store handing out sequential ids starting at `"1"`.
#[derive(Debug, Default)]
pub struct MemoryFormStore {
    forms: BTreeMap<u64, Form>,
    next_id: u64,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, assigning fresh ids in input order.
    pub fn with_forms<I>(forms: I) -> Self
    where
        I: IntoIterator<Item = Form>,
    {
        let mut store = Self::new();
        for mut form in forms {
            let id = store.allocate_id();
            form.id = id.to_string();
            store.forms.insert(id, form);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Only the canonical decimal spelling of an id matches.
    fn key(id: &str) -> Result<u64, StoreError> {
        id.parse::<u64>()
            .ok()
            .filter(|key| key.to_string() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl FormStore for MemoryFormStore {
    fn create(&mut self, name: &str, elements: Vec<Field>) -> Result<Form, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::MissingName);
        }
        let id = self.allocate_id();
        let form = Form::new(id.to_string(), name, elements);
        debug!(form = %form.id, elements = form.elements.len(), "created form");
        self.forms.insert(id, form.clone());
        Ok(form)
    }

    fn get(&self, id: &str) -> Result<Form, StoreError> {
        self.forms
            .get(&Self::key(id)?)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self) -> Vec<Form> {
        self.forms.values().cloned().collect()
    }

    fn update(&mut self, id: &str, update: FormUpdate) -> Result<Form, StoreError> {
        let form = self
            .forms
            .get_mut(&Self::key(id)?)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(name) = update.name {
            form.name = name;
        }
        if let Some(elements) = update.elements {
            form.elements = elements;
        }
        debug!(form = %id, "updated form");
        Ok(form.clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.forms
            .remove(&Self::key(id)?)
            .map(|_| debug!(form = %id, "deleted form"))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_sequential_ids() {
        let mut store = MemoryFormStore::new();
        let first = store.create("First", vec![]).expect("create");
        let second = store
            .create("Second", vec![Field::checkbox("cb", "Box")])
            .expect("create");
        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("2").expect("get").elements.len(), 1);
    }

    #[test]
    fn create_requires_name() {
        let mut store = MemoryFormStore::new();
        assert_eq!(store.create("  ", vec![]), Err(StoreError::MissingName));
        assert!(store.is_empty());
    }

    #[test]
    fn update_replaces_only_given_fields() {
        let mut store = MemoryFormStore::new();
        let form = store
            .create("Original", vec![Field::text("t", "Text")])
            .expect("create");
        let updated = store
            .update(
                &form.id,
                FormUpdate {
                    name: Some("Renamed".into()),
                    elements: None,
                },
            )
            .expect("update");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.elements, form.elements);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let mut store = MemoryFormStore::with_forms([Form::new("x", "Seed", vec![])]);
        assert_eq!(store.list()[0].id, "1");
        assert_eq!(store.get("9"), Err(StoreError::NotFound("9".into())));
        assert_eq!(store.get("abc"), Err(StoreError::NotFound("abc".into())));
        assert!(store.update("9", FormUpdate::default()).is_err());
        store.delete("1").expect("delete");
        assert_eq!(store.delete("1"), Err(StoreError::NotFound("1".into())));
    }

    #[test]
    fn ids_match_exactly() {
        let mut store = MemoryFormStore::new();
        store.create("First", vec![]).expect("create");
        for alias in ["01", "+1", " 1", "001"] {
            assert_eq!(store.get(alias), Err(StoreError::NotFound(alias.into())));
            assert!(store.update(alias, FormUpdate::default()).is_err());
            assert_eq!(store.delete(alias), Err(StoreError::NotFound(alias.into())));
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").expect("get").name, "First");
    }
}
