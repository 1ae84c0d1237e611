use pagesmith_editor::{DocumentId, PersistenceError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Invalid document id {id:?}: {reason}")]
    InvalidDocumentId { id: String, reason: &'static str },

    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    #[error("Document already exists: {0}")]
    AlreadyExists(DocumentId),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Corrupt document {path}: {source}")]
    CorruptDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

impl From<WorkspaceError> for PersistenceError {
    fn from(error: WorkspaceError) -> Self {
        match error {
            WorkspaceError::NotFound(id) => PersistenceError::NotFound(id),
            WorkspaceError::Io(e) => PersistenceError::Io(e),
            WorkspaceError::Serialization(e) => PersistenceError::Serialization(e),
            other => PersistenceError::Failed(other.to_string()),
        }
    }
}
