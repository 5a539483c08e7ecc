//! Live form state: values, displayed errors and derived validity
//!
//! `FormState` is a cheap clonable handle over single-threaded shared state,
//! the same way a UI signal is. Every mutation re-validates only the touched
//! field and then notifies subscribers.

use crate::validation::{FieldDescriptor, ValidationSchema};
use crate::{Error, Result};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use tracing::debug;

/// Stored value of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    /// Empty text, or an unchecked box
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Bool(b) => !b,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Snapshot of every field value, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    entries: Vec<(String, FieldValue)>,
}

impl FormValues {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Why a submit attempt did not reach the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("form has validation errors")]
    Invalid,
    #[error("a submission is already in progress")]
    InProgress,
}

#[derive(Debug, Clone)]
struct FieldEntry {
    value: FieldValue,
    /// Displayed error; stays empty until the field is first changed
    error: Option<String>,
    /// Schema verdict on the current value, kept even while `error` is hidden
    valid: bool,
}

impl FieldEntry {
    fn pristine(descriptor: &FieldDescriptor) -> Self {
        let value = descriptor.default_value.clone();
        let valid = descriptor.validate(&value).is_none() && descriptor.is_satisfied(&value);
        Self {
            value,
            error: None,
            valid,
        }
    }
}

struct FormInner {
    schema: ValidationSchema,
    entries: Vec<FieldEntry>,
    submitting: bool,
    listeners: Vec<Rc<dyn Fn()>>,
}

impl FormInner {
    fn index_of(&self, name: &str) -> Result<usize> {
        self.schema
            .fields()
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }
}

#[derive(Clone)]
pub struct FormState {
    inner: Rc<RefCell<FormInner>>,
}

impl FormState {
    /// Creates the state and resets every field to its default
    pub fn new(schema: ValidationSchema) -> Self {
        let entries = schema.fields().iter().map(FieldEntry::pristine).collect();
        Self {
            inner: Rc::new(RefCell::new(FormInner {
                schema,
                entries,
                submitting: false,
                listeners: Vec::new(),
            })),
        }
    }

    /// Restores descriptor defaults, hides every error and clears the submitting flag
    pub fn reset(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            let entries = inner
                .schema
                .fields()
                .iter()
                .map(FieldEntry::pristine)
                .collect();
            inner.entries = entries;
            inner.submitting = false;
        }
        self.notify();
    }

    /// Runs `listener` after every mutation
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Stores `value` and re-validates that field only
    pub fn set_field_value(&self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        {
            let mut inner = self.inner.borrow_mut();
            let index = inner.index_of(name)?;
            let descriptor = &inner.schema.fields()[index];

            if !descriptor.kind.accepts(&value) {
                return Err(Error::ValueKindMismatch {
                    field: name.to_string(),
                    expected: descriptor.kind.value_kind(),
                });
            }

            let error = descriptor.validate(&value);
            let valid = error.is_none() && descriptor.is_satisfied(&value);
            debug!(field = name, valid, "field changed");

            let entry = &mut inner.entries[index];
            entry.value = value;
            entry.error = error;
            entry.valid = valid;
        }
        self.notify();
        Ok(())
    }

    pub fn value(&self, name: &str) -> Option<FieldValue> {
        let inner = self.inner.borrow();
        let index = inner.index_of(name).ok()?;
        Some(inner.entries[index].value.clone())
    }

    /// Displayed error for `name`, if any
    pub fn error(&self, name: &str) -> Option<String> {
        let inner = self.inner.borrow();
        let index = inner.index_of(name).ok()?;
        inner.entries[index].error.clone()
    }

    pub fn descriptor(&self, name: &str) -> Option<FieldDescriptor> {
        self.inner.borrow().schema.field(name).cloned()
    }

    /// True iff every field passes the schema and every required field is filled
    pub fn is_valid(&self) -> bool {
        self.inner.borrow().entries.iter().all(|e| e.valid)
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.borrow().submitting
    }

    pub fn values(&self) -> FormValues {
        let inner = self.inner.borrow();
        FormValues {
            entries: inner
                .schema
                .fields()
                .iter()
                .zip(&inner.entries)
                .map(|(f, e)| (f.name.clone(), e.value.clone()))
                .collect(),
        }
    }

    /// Marks a submission in flight. Returns false if one already is.
    pub fn begin_submit(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.submitting {
                return false;
            }
            inner.submitting = true;
        }
        self.notify();
        true
    }

    pub fn end_submit(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.submitting {
                return;
            }
            inner.submitting = false;
        }
        self.notify();
    }

    /// Shows the current schema verdict for every field, touched or not
    pub fn reveal_errors(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            let FormInner {
                schema, entries, ..
            } = &mut *inner;
            for (descriptor, entry) in schema.fields().iter().zip(entries.iter_mut()) {
                entry.error = descriptor.validate(&entry.value);
            }
        }
        self.notify();
    }

    /// Calls `handler` with the current values, bracketed by begin/end submit.
    ///
    /// The handler runs synchronously inside this call; the returned future
    /// resolves with the handler's output and ends the submission when it
    /// completes or is dropped.
    pub fn submit<F, Fut, T>(
        &self,
        handler: F,
    ) -> std::result::Result<LocalBoxFuture<'static, T>, SubmitRejected>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = T> + 'static,
        T: 'static,
    {
        if self.is_submitting() {
            debug!("submit rejected: already submitting");
            return Err(SubmitRejected::InProgress);
        }
        if !self.is_valid() {
            debug!("submit rejected: form invalid");
            self.reveal_errors();
            return Err(SubmitRejected::Invalid);
        }

        self.begin_submit();
        let guard = SubmitGuard { form: self.clone() };
        let pending = handler(self.values());

        Ok(async move {
            let _guard = guard;
            pending.await
        }
        .boxed_local())
    }

    fn notify(&self) {
        let listeners = self.inner.borrow().listeners.clone();
        for listener in listeners {
            listener();
        }
    }
}

impl std::fmt::Debug for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FormState")
            .field("entries", &inner.entries)
            .field("submitting", &inner.submitting)
            .finish()
    }
}

struct SubmitGuard {
    form: FormState,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.form.end_submit();
    }
}
