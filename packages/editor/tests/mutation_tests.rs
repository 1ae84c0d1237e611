//! Serialized mutations applied through the session

use pagesmith_document::{Breakpoint, ElementId, ElementKind};
use pagesmith_editor::{
    DocumentStore, EditSession, EditorConfig, EditorError, MemoryStore, Mutation, SaveScheduler,
};
use std::sync::Arc;

fn empty_session() -> EditSession {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let config = EditorConfig::default();
    let scheduler = SaveScheduler::spawn(store, config.autosave_debounce);
    EditSession::new("page".into(), vec![], scheduler, &config)
}

#[tokio::test]
async fn test_script_builds_page() {
    let script = r##"[
        { "CreateElement": { "kind": "container", "id": "hero" } },
        { "CreateElement": { "kind": "heading", "id": "title", "parent_id": "hero" } },
        { "CreateElement": { "kind": "button", "id": "cta", "parent_id": "hero" } },
        { "UpdateElement": { "node_id": "title", "changes": { "props": { "content": "Welcome" } } } },
        { "SetStyle": { "node_id": "cta", "breakpoint": "mobile", "property": "width", "value": "100%" } },
        { "MoveElement": { "node_id": "cta", "index": 0 } },
        { "Reorder": { "node_id": "title", "order": 1 } }
    ]"##;
    let mutations: Vec<Mutation> = serde_json::from_str(script).unwrap();

    let mut session = empty_session();
    for mutation in mutations {
        session.apply(mutation).unwrap();
    }

    let tree = session.tree();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].id, ElementId::from("cta"));
    assert_eq!(tree[0].styles[&Breakpoint::Mobile]["width"], "100%");

    let title = session.find(&"title".into()).unwrap();
    assert_eq!(title.props["content"], "Welcome");
    assert_eq!(title.props["level"], 1);
    assert_eq!(title.order, Some(1));
    assert_eq!(session.history().undo_levels(), 7);
}

#[tokio::test]
async fn test_apply_reports_created_id_and_version() {
    let mut session = empty_session();

    let first = session
        .apply(Mutation::CreateElement {
            kind: ElementKind::Gallery,
            parent_id: None,
            id: None,
        })
        .unwrap();
    let created = first.created.clone().unwrap();
    assert_eq!(first.version, 1);
    assert_eq!(session.find(&created).unwrap().kind, ElementKind::Gallery);

    let second = session
        .apply(Mutation::SetPosition { node_id: created, x: 10.0, y: 20.0 })
        .unwrap();
    assert_eq!(second.version, 2);
    assert_eq!(second.created, None);
}

#[tokio::test]
async fn test_failed_mutation_keeps_version() {
    let mut session = empty_session();

    let result = session.apply(Mutation::DeleteElement { node_id: "missing".into() });

    assert!(matches!(result, Err(EditorError::Tree(_))));
    assert_eq!(session.version(), 0);
}

#[tokio::test]
async fn test_create_under_missing_parent() {
    let mut session = empty_session();

    let result = session.apply(Mutation::CreateElement {
        kind: ElementKind::Text,
        parent_id: Some("nope".into()),
        id: None,
    });

    assert!(result.is_err());
    assert!(session.tree().is_empty());
    assert!(session.selection().is_empty());
}
