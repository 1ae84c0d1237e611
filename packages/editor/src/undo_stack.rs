//! # Undo/Redo Stack
//!
//! Snapshot-based linear history around the live document tree.
//!
//! ## Design
//!
//! - `past` holds trees from before each user action (oldest first)
//! - `present` is the live tree
//! - `future` holds trees undone since the last edit (next redo first)
//! - Recording a new action clears `future`
//! - Batches group several edits into one undo step
//! - Past depth is capped at `max_levels`; oldest entries are evicted first
//!
//! ## Example
//!
//! ```rust
//! use pagesmith_editor::UndoStack;
//! use pagesmith_document::{tree, Element, ElementKind};
//!
//! let mut stack = UndoStack::new(vec![]);
//!
//! let next = tree::insert(stack.present(), Element::with_id("a", ElementKind::Text), None)?;
//! stack.record_before_mutation("Add text");
//! stack.set_present(next);
//!
//! assert!(stack.undo());
//! assert!(stack.present().is_empty());
//! assert!(stack.redo());
//! assert_eq!(stack.present().len(), 1);
//! # Ok::<(), pagesmith_document::TreeError>(())
//! ```

use crate::config::DEFAULT_HISTORY_LIMIT;
use pagesmith_document::DocumentTree;
use std::collections::VecDeque;

/// A stored tree plus the label of the action it brackets
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tree: DocumentTree,
    pub description: String,
}

#[derive(Debug, Clone)]
struct OpenBatch {
    description: String,
    recorded: bool,

    /// What the first recording displaced, put back if the batch aborts
    displaced_future: VecDeque<Snapshot>,
    evicted: Option<Snapshot>,
}

#[derive(Debug)]
pub struct UndoStack {
    past: VecDeque<Snapshot>,
    present: DocumentTree,
    future: VecDeque<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Stack with the default cap
    pub fn new(present: DocumentTree) -> Self {
        Self::with_max_levels(present, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(present: DocumentTree, max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
            max_levels,
            current_batch: None,
        }
    }

    pub fn present(&self) -> &DocumentTree {
        &self.present
    }

    /// Replace the live tree without touching history. Call
    /// `record_before_mutation` first for undoable edits.
    pub fn set_present(&mut self, tree: DocumentTree) {
        self.present = tree;
    }

    /// Push the live tree onto `past` and drop the redo branch.
    ///
    /// Inside a batch only the first call records; later ones are folded
    /// into the same step.
    pub fn record_before_mutation(&mut self, description: impl Into<String>) {
        let description = match &self.current_batch {
            Some(batch) if batch.recorded => return,
            Some(batch) => batch.description.clone(),
            None => description.into(),
        };

        self.past.push_back(Snapshot {
            tree: self.present.clone(),
            description,
        });

        let evicted = if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.pop_front()
        } else {
            None
        };
        let future = std::mem::take(&mut self.future);

        if let Some(batch) = &mut self.current_batch {
            batch.recorded = true;
            batch.displaced_future = future;
            batch.evicted = evicted;
        }
    }

    /// Start grouping edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.current_batch = Some(OpenBatch {
            description: description.into(),
            recorded: false,
            displaced_future: VecDeque::new(),
            evicted: None,
        });
    }

    pub fn end_batch(&mut self) {
        self.current_batch = None;
    }

    /// Close the batch and restore the tree from before it started,
    /// along with the redo branch and any undo level it pushed out.
    /// Returns true if anything was rolled back.
    pub fn abort_batch(&mut self) -> bool {
        let Some(batch) = self.current_batch.take() else {
            return false;
        };
        if !batch.recorded {
            return false;
        }
        let Some(snapshot) = self.past.pop_back() else {
            return false;
        };

        self.present = snapshot.tree;
        if let Some(evicted) = batch.evicted {
            self.past.push_front(evicted);
        }
        self.future = batch.displaced_future;
        true
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Step back one action. No-op (false) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.current_batch = None;

        let Some(previous) = self.past.pop_back() else {
            return false;
        };

        let replaced = std::mem::replace(&mut self.present, previous.tree);
        self.future.push_front(Snapshot {
            tree: replaced,
            description: previous.description,
        });
        true
    }

    /// Re-apply the most recently undone action. No-op (false) when the
    /// redo branch is empty.
    pub fn redo(&mut self) -> bool {
        self.current_batch = None;

        let Some(next) = self.future.pop_front() else {
            return false;
        };

        let replaced = std::mem::replace(&mut self.present, next.tree);
        self.past.push_back(Snapshot {
            tree: replaced,
            description: next.description,
        });
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Description of the action `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.past.back().map(|s| s.description.as_str())
    }

    /// Description of the action `redo` would re-apply
    pub fn redo_description(&self) -> Option<&str> {
        self.future.front().map(|s| s.description.as_str())
    }

    /// Drop all history and start over from `present`
    pub fn reset(&mut self, present: DocumentTree) {
        self.past.clear();
        self.future.clear();
        self.current_batch = None;
        self.present = present;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DocumentTree::new())
    }
}
