//! File store driven through the editor session

use pagesmith_document::{Element, ElementKind};
use pagesmith_editor::{DocumentStore, EditSession, EditorConfig, EditorError, PersistenceError};
use pagesmith_workspace::{FileStore, StoredDocument, WorkspaceError};
use std::sync::Arc;
use tempfile::TempDir;

fn store() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("pages"));
    (dir, store)
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let (_dir, store) = store();
    let tree = vec![Element::with_id("hero", ElementKind::Container)
        .with_children(vec![Element::with_id("title", ElementKind::Heading)
            .with_prop("content", "Hello")])];

    store.save(&"home".into(), &tree).await.unwrap();

    assert_eq!(store.load(&"home".into()).await.unwrap(), tree);
}

#[tokio::test]
async fn test_file_layout() {
    let (_dir, store) = store();
    store
        .save(&"home".into(), &vec![Element::with_id("a", ElementKind::Text)])
        .await
        .unwrap();

    let path = store.root().join("home.json");
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(raw["id"], "home");
    assert!(raw["updatedAt"].is_string());
    assert_eq!(raw["structure"][0]["type"], "text");
    assert!(!store.root().join("home.json.tmp").exists());
}

#[tokio::test]
async fn test_load_missing_document() {
    let (_dir, store) = store();

    let result = store.load(&"ghost".into()).await;

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[tokio::test]
async fn test_invalid_id_never_touches_disk() {
    let (dir, store) = store();

    let result = store.save(&"../escape".into(), &vec![]).await;

    assert!(matches!(result, Err(PersistenceError::Failed(_))));
    assert!(!dir.path().join("escape.json").exists());
}

#[tokio::test]
async fn test_create_refuses_to_overwrite() {
    let (_dir, store) = store();
    store.create(&"home".into(), false).await.unwrap();
    store
        .save(&"home".into(), &vec![Element::with_id("a", ElementKind::Text)])
        .await
        .unwrap();

    let again = store.create(&"home".into(), false).await;
    assert!(matches!(again, Err(WorkspaceError::AlreadyExists(_))));
    assert_eq!(store.load(&"home".into()).await.unwrap().len(), 1);

    store.create(&"home".into(), true).await.unwrap();
    assert!(store.load(&"home".into()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_documents() {
    let (_dir, store) = store();
    assert!(store.list().await.unwrap().is_empty());

    store.create(&"pricing".into(), false).await.unwrap();
    store.create(&"about".into(), false).await.unwrap();
    std::fs::write(store.root().join("notes.txt"), "not a document").unwrap();
    std::fs::write(store.root().join("broken.json"), "{").unwrap();

    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|document: StoredDocument| document.id.to_string())
        .collect();

    assert_eq!(ids, vec!["about", "pricing"]);
}

#[tokio::test]
async fn test_corrupt_document() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.root()).unwrap();
    std::fs::write(store.root().join("home.json"), "[]").unwrap();

    assert!(matches!(
        store.read(&"home".into()).await,
        Err(WorkspaceError::CorruptDocument { .. })
    ));
}

#[tokio::test]
async fn test_session_autosaves_to_disk() {
    let (_dir, store) = store();
    store.create(&"home".into(), false).await.unwrap();
    let shared: Arc<dyn DocumentStore> = Arc::new(store.clone());

    let mut session = EditSession::open(shared, "home".into(), EditorConfig::default())
        .await
        .unwrap();
    let id = session.create_element(ElementKind::Button, None).unwrap();
    session.flush().await.unwrap();

    let stored = store.read(&"home".into()).await.unwrap();
    assert_eq!(stored.structure.len(), 1);
    assert_eq!(stored.structure[0].id, id);

    session.undo();
    session.close().await.unwrap();
    assert!(store.load(&"home".into()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_session_open_missing_file() {
    let (_dir, store) = store();

    let result = EditSession::open(Arc::new(store), "nope".into(), EditorConfig::default()).await;

    assert!(matches!(
        result,
        Err(EditorError::Persistence(PersistenceError::NotFound(_)))
    ));
}
