//! # File Store
//!
//! Keeps each document in `<root>/<document_id>.json`:
//!
//! ```json
//! { "id": "landing", "updatedAt": "2024-05-01T12:00:00Z", "structure": [ ... ] }
//! ```
//!
//! Writes go to `<document_id>.json.tmp` first and are renamed over the
//! real file, so a crash mid-write never leaves a truncated document.

use crate::errors::{WorkspaceError, WorkspaceResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagesmith_document::DocumentTree;
use pagesmith_editor::{DocumentId, DocumentStore, PersistenceError};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = ".tmp";

/// One document as it sits on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: DocumentId,
    pub updated_at: DateTime<Utc>,
    pub structure: DocumentTree,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &DocumentId) -> WorkspaceResult<PathBuf> {
        validate_document_id(id.as_str())?;
        Ok(self.root.join(format!("{}.{}", id, EXTENSION)))
    }

    pub async fn exists(&self, id: &DocumentId) -> WorkspaceResult<bool> {
        let path = self.path_for(id)?;
        Ok(fs::try_exists(&path).await?)
    }

    pub async fn read(&self, id: &DocumentId) -> WorkspaceResult<StoredDocument> {
        let path = self.path_for(id)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WorkspaceError::NotFound(id.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map_err(|source| WorkspaceError::CorruptDocument { path, source })
    }

    /// Replace the stored tree of `id`, creating the document if needed
    pub async fn write(&self, id: &DocumentId, tree: &DocumentTree) -> WorkspaceResult<()> {
        let path = self.path_for(id)?;
        let document = StoredDocument {
            id: id.clone(),
            updated_at: Utc::now(),
            structure: tree.clone(),
        };
        let json = serde_json::to_string_pretty(&document)?;

        fs::create_dir_all(&self.root).await?;
        let temp_path = temp_path(&path);
        fs::write(&temp_path, json).await?;
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(document_id = %id, path = %path.display(), "document written");
        Ok(())
    }

    /// Create an empty document. With `force`, an existing document is
    /// overwritten.
    pub async fn create(&self, id: &DocumentId, force: bool) -> WorkspaceResult<()> {
        if !force && self.exists(id).await? {
            return Err(WorkspaceError::AlreadyExists(id.clone()));
        }

        self.write(id, &Vec::new()).await?;
        tracing::info!(document_id = %id, "document created");
        Ok(())
    }

    /// Every readable document, sorted by id. Files that are not
    /// documents are skipped.
    pub async fn list(&self) -> WorkspaceResult<Vec<StoredDocument>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_document_id(id).is_err() {
                continue;
            }

            match self.read(&DocumentId::from(id)).await {
                Ok(document) => documents.push(document),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document"),
            }
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self, id: &DocumentId) -> Result<DocumentTree, PersistenceError> {
        Ok(self.read(id).await?.structure)
    }

    async fn save(&self, id: &DocumentId, tree: &DocumentTree) -> Result<(), PersistenceError> {
        Ok(self.write(id, tree).await?)
    }
}

/// Document ids become file names, so they may not name anything outside
/// the store's root
pub fn validate_document_id(id: &str) -> WorkspaceResult<()> {
    let reason = if id.is_empty() {
        Some("must not be empty")
    } else if id.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if id.starts_with('.') {
        Some("must not start with '.'")
    } else if id.chars().any(char::is_control) {
        Some("must not contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(WorkspaceError::InvalidDocumentId {
            id: id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}
