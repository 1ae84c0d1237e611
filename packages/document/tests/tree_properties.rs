//! Property and scenario tests for the tree model

use pagesmith_document::{tree, DocumentTree, Element, ElementId, ElementKind, ElementPatch, TreeError};
use proptest::prelude::*;

#[test]
fn test_cascading_delete_scenario() {
    let doc: DocumentTree = vec![];

    let doc = tree::insert(&doc, Element::with_id("a", ElementKind::Container), None).unwrap();
    assert_eq!(doc.len(), 1);

    let doc = tree::insert(&doc, Element::with_id("b", ElementKind::Text), Some(&"a".into())).unwrap();
    assert_eq!(doc[0].children()[0].id, ElementId::from("b"));

    let doc = tree::remove(&doc, &"a".into());
    assert!(doc.is_empty());
    assert!(tree::find(&doc, &"b".into()).is_none());
}

#[test]
fn test_move_ancestor_under_descendant_leaves_tree_unchanged() {
    let doc = vec![Element::with_id("b", ElementKind::Container)
        .with_children(vec![Element::with_id("a", ElementKind::Container)])];

    let result = tree::move_element(&doc, &"b".into(), Some(&"a".into()), None);

    assert!(matches!(result, Err(TreeError::CyclicMove { .. })));
    assert_eq!(doc[0].children()[0].id, ElementId::from("a"));
}

#[derive(Debug, Clone)]
enum Op {
    Insert { id: u8, parent: Option<u8> },
    Remove { id: u8 },
    Update { id: u8, order: i64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..24, proptest::option::of(0u8..24)).prop_map(|(id, parent)| Op::Insert { id, parent }),
        (0u8..24).prop_map(|id| Op::Remove { id }),
        (0u8..24, any::<i64>()).prop_map(|(id, order)| Op::Update { id, order }),
    ]
}

fn eid(n: u8) -> ElementId {
    ElementId::new(format!("el-{}", n))
}

proptest! {
    /// An inserted element stays findable until it (or an ancestor) is removed
    #[test]
    fn prop_find_after_insert(ops in proptest::collection::vec(op(), 1..60)) {
        let mut doc: DocumentTree = Vec::new();

        for op in ops {
            match op {
                Op::Insert { id, parent } => {
                    let parent = parent.map(eid);
                    let element = Element::with_id(eid(id), ElementKind::Container);
                    if let Ok(next) = tree::insert(&doc, element, parent.as_ref()) {
                        doc = next;
                        prop_assert!(tree::find(&doc, &eid(id)).is_some());
                    }
                }
                Op::Remove { id } => {
                    doc = tree::remove(&doc, &eid(id));
                    prop_assert!(tree::find(&doc, &eid(id)).is_none());
                }
                Op::Update { id, order } => {
                    let existed = tree::contains(&doc, &eid(id));
                    match tree::update(&doc, &eid(id), &ElementPatch::new().order(order)) {
                        Ok(next) => {
                            prop_assert!(existed);
                            doc = next;
                            prop_assert_eq!(tree::find(&doc, &eid(id)).unwrap().order, Some(order));
                        }
                        Err(err) => {
                            prop_assert!(!existed);
                            prop_assert_eq!(err, TreeError::ElementNotFound(eid(id)));
                        }
                    }
                }
            }

            // Ids stay unique
            let ids = tree::ids(&doc);
            let unique: std::collections::HashSet<_> = ids.iter().collect();
            prop_assert_eq!(ids.len(), unique.len());
        }
    }
}
