//! Minimal stand-in for the page the submitter is wired into: a set of named
//! text elements that can be read as a prompt source or written as an output
//! sink.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Something the current prompt text can be read from.
pub trait PromptSource: Send + Sync {
    fn value(&self) -> String;
}

/// Something the submitter writes its placeholder and final text into.
pub trait OutputSink: Send + Sync {
    fn set_text(&self, text: &str);
}

/// A shared text cell. Clones refer to the same element.
#[derive(Clone, Debug, Default)]
pub struct TextElement {
    text: Arc<Mutex<String>>,
}

impl TextElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            text: Arc::new(Mutex::new(value.into())),
        }
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.lock() = value.into();
    }

    // A panic while holding the lock cannot leave a String half-written.
    fn lock(&self) -> MutexGuard<'_, String> {
        self.text.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PromptSource for TextElement {
    fn value(&self) -> String {
        self.lock().clone()
    }
}

impl OutputSink for TextElement {
    fn set_text(&self, text: &str) {
        *self.lock() = text.to_string();
    }
}

/// Registry of elements keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: HashMap<String, TextElement>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `element` under `id`, returning a handle to it.
    pub fn insert(&mut self, id: impl Into<String>, element: TextElement) -> TextElement {
        self.elements.insert(id.into(), element.clone());
        element
    }

    pub fn element(&self, id: &str) -> Option<TextElement> {
        self.elements.get(id).cloned()
    }
}
