//! # Selection Tracking
//!
//! Ordered set of selected element ids. The first id still selected is the
//! primary selection (the one property panels edit).
//!
//! The tracker does not validate ids against the tree. The session keeps
//! it consistent by calling `on_element_removed` / `retain` whenever
//! elements leave the document.

use indexmap::IndexSet;
use pagesmith_document::ElementId;
use serde::{Deserialize, Serialize};

/// How a click on an element changes the selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Select only the clicked element
    #[default]
    Replace,
    /// Add or remove the clicked element (modifier held)
    Toggle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: IndexSet<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with `{id}`
    pub fn select(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Flip membership of `id` in `Toggle` mode, otherwise same as `select`
    pub fn toggle(&mut self, id: ElementId, mode: SelectionMode) {
        match mode {
            SelectionMode::Replace => self.select(id),
            SelectionMode::Toggle => {
                if !self.ids.shift_remove(&id) {
                    self.ids.insert(id);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn on_element_removed(&mut self, id: &ElementId) {
        self.ids.shift_remove(id);
    }

    /// Keep only ids for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&ElementId) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn primary(&self) -> Option<&ElementId> {
        self.ids.first()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<ElementId> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
