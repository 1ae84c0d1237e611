//! Error types for the editor

use crate::persistence::PersistenceError;
use pagesmith_document::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Save scheduler has shut down")]
    SchedulerClosed,
}

impl EditorError {
    /// The underlying tree error, if this is one
    pub fn as_tree_error(&self) -> Option<&TreeError> {
        match self {
            EditorError::Tree(e) => Some(e),
            _ => None,
        }
    }
}
