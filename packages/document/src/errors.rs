//! Error types for tree edits

use crate::ElementId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Parent not found: {0}")]
    ParentNotFound(ElementId),

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("Cannot move {node_id} beneath its own descendant {new_parent_id}")]
    CyclicMove {
        node_id: ElementId,
        new_parent_id: ElementId,
    },
}

pub type TreeResult<T> = Result<T, TreeError>;
