//! # Edit Session
//!
//! One user's editing state for one document: the live tree with its
//! undo history, the selection, the active breakpoint, and the autosave
//! scheduler.
//!
//! Every edit runs the same sequence:
//!
//! ```text
//! compute new tree ──► record history ──► swap in ──► fix selection ──► request save
//! ```
//!
//! The new tree is computed before anything is recorded, so a rejected
//! edit leaves history, selection and the save queue untouched.

use crate::config::EditorConfig;
use crate::mutations::{Mutation, MutationResult};
use crate::persistence::{DocumentId, DocumentStore};
use crate::scheduler::{SaveScheduler, SaveStatus};
use crate::selection::{Selection, SelectionMode};
use crate::undo_stack::UndoStack;
use crate::EditorError;
use pagesmith_document::{
    styles, tree, Breakpoint, DocumentTree, Element, ElementId, ElementKind, ElementPatch,
    StyleMap, TreeError,
};
use std::sync::Arc;
use tokio::sync::watch;

pub struct EditSession {
    document_id: DocumentId,
    history: UndoStack,
    selection: Selection,
    breakpoint: Breakpoint,
    scheduler: SaveScheduler,

    /// Increments on every change to the live tree
    version: u64,
}

impl EditSession {
    /// Session over an already loaded tree
    pub fn new(
        document_id: DocumentId,
        tree: DocumentTree,
        scheduler: SaveScheduler,
        config: &EditorConfig,
    ) -> Self {
        Self {
            document_id,
            history: UndoStack::with_max_levels(tree, config.history_limit),
            selection: Selection::new(),
            breakpoint: config.initial_breakpoint,
            scheduler,
            version: 0,
        }
    }

    /// Load `document_id` from `store` and start autosaving back to it
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        document_id: DocumentId,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        let tree = store.load(&document_id).await?;
        tracing::info!(
            document_id = %document_id,
            elements = tree::count(&tree),
            "document loaded"
        );

        let scheduler = SaveScheduler::spawn(store, config.autosave_debounce);
        Ok(Self::new(document_id, tree, scheduler, &config))
    }

    /// Switch to another document. History and selection start empty; a
    /// save still pending for the previous document goes to that document.
    pub fn reset(&mut self, document_id: DocumentId, tree: DocumentTree) {
        tracing::info!(from = %self.document_id, to = %document_id, "switching document");
        self.document_id = document_id;
        self.history.reset(tree);
        self.selection.clear();
        self.version = 0;
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn tree(&self) -> &DocumentTree {
        self.history.present()
    }

    pub fn find(&self, id: &ElementId) -> Option<&Element> {
        tree::find(self.tree(), id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    pub fn save_status(&self) -> SaveStatus {
        self.scheduler.status()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.scheduler.subscribe()
    }

    /// Effective styles of `id` at the active breakpoint
    pub fn resolved_styles(&self, id: &ElementId) -> Result<StyleMap, EditorError> {
        let element = self
            .find(id)
            .ok_or_else(|| TreeError::ElementNotFound(id.clone()))?;
        Ok(styles::resolve(element, self.breakpoint))
    }

    // ---- Element edits ----------------------------------------------------

    /// Insert `element` under `parent_id` (root when `None`) and select it
    pub fn add_element(
        &mut self,
        element: Element,
        parent_id: Option<&ElementId>,
    ) -> Result<ElementId, EditorError> {
        let id = element.id.clone();
        let description = format!("Add {}", element.kind);

        let next = tree::insert(self.tree(), element, parent_id)
            .map_err(|e| self.rejected(&description, e))?;

        self.commit(description, next);
        self.selection.select(id.clone());
        Ok(id)
    }

    /// Insert a new `kind` element with library defaults
    pub fn create_element(
        &mut self,
        kind: ElementKind,
        parent_id: Option<&ElementId>,
    ) -> Result<ElementId, EditorError> {
        self.add_element(Element::new(kind), parent_id)
    }

    pub fn update_element(&mut self, id: &ElementId, changes: &ElementPatch) -> Result<(), EditorError> {
        let next = tree::update(self.tree(), id, changes)
            .map_err(|e| self.rejected("Update element", e))?;

        if !changes.is_empty() {
            self.commit("Update element", next);
        }
        Ok(())
    }

    /// Remove `id` and its subtree, dropping all of them from the selection
    pub fn delete_element(&mut self, id: &ElementId) -> Result<(), EditorError> {
        let removed = match self.find(id) {
            Some(element) => element.subtree_ids(),
            None => {
                return Err(self.rejected("Delete element", TreeError::ElementNotFound(id.clone())))
            }
        };

        let next = tree::remove(self.tree(), id);
        self.commit("Delete element", next);
        for id in &removed {
            self.selection.on_element_removed(id);
        }
        Ok(())
    }

    pub fn move_element(
        &mut self,
        id: &ElementId,
        new_parent_id: Option<&ElementId>,
        index: Option<usize>,
    ) -> Result<(), EditorError> {
        let next = tree::move_element(self.tree(), id, new_parent_id, index)
            .map_err(|e| self.rejected("Move element", e))?;

        self.commit("Move element", next);
        Ok(())
    }

    /// Set (or clear, with an empty value) one style property
    pub fn set_style(
        &mut self,
        id: &ElementId,
        breakpoint: Breakpoint,
        property: &str,
        value: &str,
    ) -> Result<(), EditorError> {
        let changes = ElementPatch::new().style(breakpoint, property, value);
        let next = tree::update(self.tree(), id, &changes)
            .map_err(|e| self.rejected("Set style", e))?;

        self.commit(format!("Set {}", property), next);
        Ok(())
    }

    /// Canvas drag: pin `left`/`top` for the active breakpoint
    pub fn set_position(&mut self, id: &ElementId, x: f64, y: f64) -> Result<(), EditorError> {
        let changes = ElementPatch::new()
            .style(self.breakpoint, "left", format!("{}px", x))
            .style(self.breakpoint, "top", format!("{}px", y));
        let next = tree::update(self.tree(), id, &changes)
            .map_err(|e| self.rejected("Move on canvas", e))?;

        self.commit("Move on canvas", next);
        Ok(())
    }

    pub fn reorder(&mut self, id: &ElementId, order: i64) -> Result<(), EditorError> {
        let next = tree::update(self.tree(), id, &ElementPatch::new().order(order))
            .map_err(|e| self.rejected("Reorder element", e))?;

        self.commit("Reorder element", next);
        Ok(())
    }

    /// Delete every selected element as one undo step. Returns how many
    /// deletions happened (descendants of another selected element go with
    /// their ancestor).
    pub fn delete_selected(&mut self) -> Result<usize, EditorError> {
        let ids = self.selection.to_vec();
        if ids.is_empty() {
            return Ok(0);
        }

        self.batch(format!("Delete {} elements", ids.len()), |session| {
            let mut deleted = 0;
            for id in &ids {
                if session.find(id).is_some() {
                    session.delete_element(id)?;
                    deleted += 1;
                }
            }
            Ok(deleted)
        })
    }

    /// Run `edits` as one undo step. If it fails, the tree is rolled back
    /// to where it was before the batch.
    pub fn batch<T>(
        &mut self,
        description: impl Into<String>,
        edits: impl FnOnce(&mut Self) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        if self.history.in_batch() {
            return edits(self);
        }

        self.history.begin_batch(description);
        match edits(self) {
            Ok(value) => {
                self.history.end_batch();
                Ok(value)
            }
            Err(e) => {
                if self.history.abort_batch() {
                    tracing::warn!(document_id = %self.document_id, error = %e, "batch rolled back");
                    self.version += 1;
                    self.prune_selection();
                    self.request_save();
                }
                Err(e)
            }
        }
    }

    /// Apply a serialized mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let created = match mutation {
            Mutation::CreateElement { kind, parent_id, id } => {
                let mut element = Element::new(kind);
                if let Some(id) = id {
                    element.id = id;
                }
                Some(self.add_element(element, parent_id.as_ref())?)
            }
            Mutation::AddElement { element, parent_id } => {
                Some(self.add_element(element, parent_id.as_ref())?)
            }
            Mutation::UpdateElement { node_id, changes } => {
                self.update_element(&node_id, &changes)?;
                None
            }
            Mutation::DeleteElement { node_id } => {
                self.delete_element(&node_id)?;
                None
            }
            Mutation::MoveElement {
                node_id,
                new_parent_id,
                index,
            } => {
                self.move_element(&node_id, new_parent_id.as_ref(), index)?;
                None
            }
            Mutation::SetStyle {
                node_id,
                breakpoint,
                property,
                value,
            } => {
                self.set_style(&node_id, breakpoint, &property, &value)?;
                None
            }
            Mutation::SetPosition { node_id, x, y } => {
                self.set_position(&node_id, x, y)?;
                None
            }
            Mutation::Reorder { node_id, order } => {
                self.reorder(&node_id, order)?;
                None
            }
        };

        Ok(MutationResult {
            version: self.version,
            created,
        })
    }

    // ---- Selection --------------------------------------------------------

    pub fn select(&mut self, id: ElementId, mode: SelectionMode) {
        self.selection.toggle(id, mode);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ---- History ----------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        tracing::debug!(document_id = %self.document_id, "undo");
        self.after_history_step();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        tracing::debug!(document_id = %self.document_id, "redo");
        self.after_history_step();
        true
    }

    // ---- Saving -----------------------------------------------------------

    /// Save now instead of waiting for the quiet period
    pub async fn flush(&self) -> Result<(), EditorError> {
        self.scheduler.flush().await
    }

    /// Flush, then stop the autosave worker
    pub async fn close(self) -> Result<(), EditorError> {
        let result = self.scheduler.flush().await;
        self.scheduler.shutdown().await;
        result
    }

    // ---- Internals --------------------------------------------------------

    fn commit(&mut self, description: impl Into<String>, next: DocumentTree) {
        let description = description.into();
        tracing::debug!(document_id = %self.document_id, action = %description, "edit applied");

        self.history.record_before_mutation(description);
        self.history.set_present(next);
        self.version += 1;
        self.request_save();
    }

    fn after_history_step(&mut self) {
        self.version += 1;
        self.prune_selection();
        self.request_save();
    }

    /// Drop selected ids that are no longer in the tree
    fn prune_selection(&mut self) {
        let present = self.history.present();
        self.selection.retain(|id| tree::contains(present, id));
    }

    fn request_save(&self) {
        self.scheduler
            .request_save(self.document_id.clone(), self.history.present().clone());
    }

    fn rejected(&self, action: &str, error: TreeError) -> EditorError {
        tracing::warn!(document_id = %self.document_id, action, error = %error, "edit rejected");
        EditorError::Tree(error)
    }
}
