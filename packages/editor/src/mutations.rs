//! # Editor Mutations
//!
//! Serializable, intent-level edits. Each one maps onto a single
//! `EditorSession` operation and therefore onto a single undo step.
//!
//! ## Mutation Semantics
//!
//! ### Create / Add
//! - Appends under the parent (root when omitted) and selects the new element
//! - Fails on a missing parent or an id already in the document
//!
//! ### Update / SetStyle
//! - Key-by-key merge into props and per-breakpoint styles
//! - Children are never touched
//!
//! ### Delete
//! - Removes the node and all descendants, and drops them from the selection
//!
//! ### Move
//! - Atomic relocation of the subtree
//! - Fails if it would create a cycle

use pagesmith_document::{Breakpoint, Element, ElementId, ElementKind, ElementPatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// New element with library defaults
    CreateElement {
        kind: ElementKind,
        #[serde(default)]
        parent_id: Option<ElementId>,
        /// Explicit id; generated when omitted
        #[serde(default)]
        id: Option<ElementId>,
    },

    /// Insert a fully specified element (and its subtree)
    AddElement {
        element: Element,
        #[serde(default)]
        parent_id: Option<ElementId>,
    },

    UpdateElement {
        node_id: ElementId,
        changes: ElementPatch,
    },

    DeleteElement {
        node_id: ElementId,
    },

    /// Relocate a subtree; `None` parent means the root list
    MoveElement {
        node_id: ElementId,
        #[serde(default)]
        new_parent_id: Option<ElementId>,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Set one style property on one breakpoint (empty value clears it)
    SetStyle {
        node_id: ElementId,
        breakpoint: Breakpoint,
        property: String,
        value: String,
    },

    /// Canvas drag: `left`/`top` on the session's active breakpoint
    SetPosition {
        node_id: ElementId,
        x: f64,
        y: f64,
    },

    /// Set the advisory sibling order hint
    Reorder {
        node_id: ElementId,
        order: i64,
    },
}

impl Mutation {
    /// Short label shown next to undo/redo
    pub fn description(&self) -> String {
        match self {
            Mutation::CreateElement { kind, .. } => format!("Add {}", kind),
            Mutation::AddElement { element, .. } => format!("Add {}", element.kind),
            Mutation::UpdateElement { .. } => "Update element".to_string(),
            Mutation::DeleteElement { .. } => "Delete element".to_string(),
            Mutation::MoveElement { .. } => "Move element".to_string(),
            Mutation::SetStyle { property, .. } => format!("Set {}", property),
            Mutation::SetPosition { .. } => "Move on canvas".to_string(),
            Mutation::Reorder { .. } => "Reorder element".to_string(),
        }
    }

    /// Element the mutation acts on, when it already exists
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Mutation::CreateElement { .. } | Mutation::AddElement { .. } => None,
            Mutation::UpdateElement { node_id, .. }
            | Mutation::DeleteElement { node_id }
            | Mutation::MoveElement { node_id, .. }
            | Mutation::SetStyle { node_id, .. }
            | Mutation::SetPosition { node_id, .. }
            | Mutation::Reorder { node_id, .. } => Some(node_id),
        }
    }
}

/// Result of applying a mutation through the session
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Session version after the edit
    pub version: u64,

    /// Id of the element a create/add produced
    pub created: Option<ElementId>,
}
