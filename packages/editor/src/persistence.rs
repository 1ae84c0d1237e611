//! # Persistence Collaborator
//!
//! The editor only needs two calls from whatever stores documents:
//! `load(id)` and `save(id, tree)`. Transport, auth and storage format are
//! the implementor's business.

use async_trait::async_trait;
use pagesmith_document::DocumentTree;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Identifies one stored page document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    #[error("Save failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Remote (or local) home of page documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self, id: &DocumentId) -> Result<DocumentTree, PersistenceError>;

    async fn save(&self, id: &DocumentId, tree: &DocumentTree) -> Result<(), PersistenceError>;
}

/// In-process store for tests and dry runs.
///
/// Records every successful save and can be told to fail upcoming saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<DocumentId, DocumentTree>>,
    saves: Mutex<Vec<(DocumentId, DocumentTree)>>,
    failures: Mutex<VecDeque<String>>,
    attempts: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one document
    pub fn with_document(id: impl Into<DocumentId>, tree: DocumentTree) -> Self {
        let store = Self::new();
        store.insert(id, tree);
        store
    }

    pub fn insert(&self, id: impl Into<DocumentId>, tree: DocumentTree) {
        lock(&self.documents).insert(id.into(), tree);
    }

    pub fn get(&self, id: &DocumentId) -> Option<DocumentTree> {
        lock(&self.documents).get(id).cloned()
    }

    /// Make the next save fail with `reason`
    pub fn fail_next(&self, reason: impl Into<String>) {
        lock(&self.failures).push_back(reason.into());
    }

    /// Successful saves, oldest first
    pub fn saves(&self) -> Vec<(DocumentId, DocumentTree)> {
        lock(&self.saves).clone()
    }

    pub fn save_count(&self) -> usize {
        lock(&self.saves).len()
    }

    /// Save calls including failed ones
    pub fn save_attempts(&self) -> usize {
        *lock(&self.attempts)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, id: &DocumentId) -> Result<DocumentTree, PersistenceError> {
        self.get(id).ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }

    async fn save(&self, id: &DocumentId, tree: &DocumentTree) -> Result<(), PersistenceError> {
        *lock(&self.attempts) += 1;

        if let Some(reason) = lock(&self.failures).pop_front() {
            return Err(PersistenceError::Failed(reason));
        }

        lock(&self.documents).insert(id.clone(), tree.clone());
        lock(&self.saves).push((id.clone(), tree.clone()));
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_document::{Element, ElementKind};

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let id = DocumentId::from("home");
        let tree = vec![Element::with_id("a", ElementKind::Text)];

        store.save(&id, &tree).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), tree);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_missing_document() {
        let store = MemoryStore::new();
        let result = store.load(&"nope".into()).await;
        assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_injected_failure_is_one_shot() {
        let store = MemoryStore::new();
        let id = DocumentId::from("home");
        store.fail_next("offline");

        let first = store.save(&id, &vec![]).await;
        assert!(matches!(first, Err(PersistenceError::Failed(ref r)) if r == "offline"));
        assert!(store.save(&id, &vec![]).await.is_ok());
        assert_eq!(store.save_attempts(), 2);
        assert_eq!(store.save_count(), 1);
    }
}
