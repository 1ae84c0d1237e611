//! # Tree Operations
//!
//! Pure functions over a `DocumentTree`. Edits take the current tree by
//! reference and return a new one, leaving the input untouched, so callers
//! can keep the old value as a history snapshot.
//!
//! ## Semantics
//!
//! ### Remove
//! - Removes the node and its whole subtree
//! - Missing ids are a no-op
//!
//! ### Insert
//! - Appends to the root list or to the parent's children
//! - Fails if the parent is missing or any incoming id already exists
//!
//! ### Move
//! - Atomic relocation of a subtree
//! - Fails if it would put a node beneath itself

use crate::element::collect_ids;
use crate::{DocumentTree, Element, ElementId, ElementPatch, TreeError, TreeResult};
use std::collections::HashSet;

/// Depth-first lookup
pub fn find<'a>(elements: &'a [Element], id: &ElementId) -> Option<&'a Element> {
    for element in elements {
        if element.id == *id {
            return Some(element);
        }
        if let Some(found) = find(element.children(), id) {
            return Some(found);
        }
    }
    None
}

pub fn find_mut<'a>(elements: &'a mut [Element], id: &ElementId) -> Option<&'a mut Element> {
    for element in elements.iter_mut() {
        if element.id == *id {
            return Some(element);
        }
        if let Some(children) = element.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

pub fn contains(elements: &[Element], id: &ElementId) -> bool {
    find(elements, id).is_some()
}

/// Every id in the tree, depth-first
pub fn ids(elements: &[Element]) -> Vec<ElementId> {
    let mut ids = Vec::new();
    collect_ids(elements, &mut ids);
    ids
}

pub fn count(elements: &[Element]) -> usize {
    elements.iter().map(|e| 1 + count(e.children())).sum()
}

/// Parent of `id`: `Ok(None)` for root-level elements
pub fn parent_id(elements: &[Element], id: &ElementId) -> TreeResult<Option<ElementId>> {
    if elements.iter().any(|e| e.id == *id) {
        return Ok(None);
    }
    locate_parent(elements, id)
        .map(|parent| Some(parent.id.clone()))
        .ok_or_else(|| TreeError::ElementNotFound(id.clone()))
}

fn locate_parent<'a>(elements: &'a [Element], id: &ElementId) -> Option<&'a Element> {
    for element in elements {
        if element.children().iter().any(|c| c.id == *id) {
            return Some(element);
        }
        if let Some(parent) = locate_parent(element.children(), id) {
            return Some(parent);
        }
    }
    None
}

/// Tree without `id` and its subtree. Unchanged if `id` is absent.
pub fn remove(elements: &[Element], id: &ElementId) -> DocumentTree {
    let mut next = elements.to_vec();
    take(&mut next, id);
    next
}

/// Tree with `element` appended under `parent_id` (or at the root)
pub fn insert(
    elements: &[Element],
    element: Element,
    parent_id: Option<&ElementId>,
) -> TreeResult<DocumentTree> {
    if let Some(parent_id) = parent_id {
        if !contains(elements, parent_id) {
            return Err(TreeError::ParentNotFound(parent_id.clone()));
        }
    }

    let mut existing: HashSet<ElementId> = ids(elements).into_iter().collect();
    for id in element.subtree_ids() {
        // Also catches ids repeated inside the incoming subtree
        if !existing.insert(id.clone()) {
            return Err(TreeError::DuplicateId(id));
        }
    }

    let mut next = elements.to_vec();
    siblings_mut(&mut next, parent_id)?.push(element);
    Ok(next)
}

/// Tree with `changes` merged into the element's own fields
pub fn update(
    elements: &[Element],
    id: &ElementId,
    changes: &ElementPatch,
) -> TreeResult<DocumentTree> {
    let mut next = elements.to_vec();
    let element = find_mut(&mut next, id).ok_or_else(|| TreeError::ElementNotFound(id.clone()))?;
    changes.apply_to(element);
    Ok(next)
}

/// Tree with the subtree rooted at `id` relocated under `new_parent_id`
/// (root when `None`) at `index`, clamped to the sibling count. Appends
/// when `index` is `None`. The index counts siblings after the node has
/// been taken out of its old position.
pub fn move_element(
    elements: &[Element],
    id: &ElementId,
    new_parent_id: Option<&ElementId>,
    index: Option<usize>,
) -> TreeResult<DocumentTree> {
    let node = find(elements, id).ok_or_else(|| TreeError::ElementNotFound(id.clone()))?;

    if let Some(parent_id) = new_parent_id {
        if parent_id == id || contains(node.children(), parent_id) {
            return Err(TreeError::CyclicMove {
                node_id: id.clone(),
                new_parent_id: parent_id.clone(),
            });
        }
        if !contains(elements, parent_id) {
            return Err(TreeError::ParentNotFound(parent_id.clone()));
        }
    }

    let mut next = elements.to_vec();
    let node = take(&mut next, id).ok_or_else(|| TreeError::ElementNotFound(id.clone()))?;
    let siblings = siblings_mut(&mut next, new_parent_id)?;
    let at = index.map_or(siblings.len(), |i| i.min(siblings.len()));
    siblings.insert(at, node);
    Ok(next)
}

/// Child list of `parent_id` (created on demand), or the root list
fn siblings_mut<'a>(
    elements: &'a mut Vec<Element>,
    parent_id: Option<&ElementId>,
) -> TreeResult<&'a mut Vec<Element>> {
    match parent_id {
        None => Ok(elements),
        Some(parent_id) => {
            let parent = find_mut(elements, parent_id)
                .ok_or_else(|| TreeError::ParentNotFound(parent_id.clone()))?;
            Ok(parent.children.get_or_insert_with(Vec::new))
        }
    }
}

/// Detach `id` wherever it sits and return it
fn take(elements: &mut Vec<Element>, id: &ElementId) -> Option<Element> {
    if let Some(pos) = elements.iter().position(|e| e.id == *id) {
        return Some(elements.remove(pos));
    }

    for element in elements.iter_mut() {
        if let Some(children) = element.children.as_mut() {
            if let Some(removed) = take(children, id) {
                return Some(removed);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;

    fn id(s: &str) -> ElementId {
        ElementId::from(s)
    }

    fn sample() -> DocumentTree {
        vec![
            Element::with_id("a", ElementKind::Container).with_children(vec![
                Element::with_id("b", ElementKind::Text),
                Element::with_id("c", ElementKind::Container)
                    .with_children(vec![Element::with_id("d", ElementKind::Image)]),
            ]),
            Element::with_id("e", ElementKind::Button),
        ]
    }

    #[test]
    fn test_find_nested() {
        let tree = sample();
        assert_eq!(find(&tree, &id("d")).unwrap().kind, ElementKind::Image);
        assert!(find(&tree, &id("zz")).is_none());
    }

    #[test]
    fn test_ids_visit_every_element_once() {
        let tree = sample();
        assert_eq!(ids(&tree), vec![id("a"), id("b"), id("c"), id("d"), id("e")]);
        assert_eq!(count(&tree), 5);
    }

    #[test]
    fn test_parent_id() {
        let tree = sample();
        assert_eq!(parent_id(&tree, &id("d")), Ok(Some(id("c"))));
        assert_eq!(parent_id(&tree, &id("e")), Ok(None));
        assert_eq!(parent_id(&tree, &id("x")), Err(TreeError::ElementNotFound(id("x"))));
    }

    #[test]
    fn test_remove_cascades() {
        let tree = sample();
        let next = remove(&tree, &id("c"));
        assert!(find(&next, &id("c")).is_none());
        assert!(find(&next, &id("d")).is_none());
        assert_eq!(count(&next), 3);
        // Input is untouched
        assert_eq!(count(&tree), 5);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let tree = sample();
        assert_eq!(remove(&tree, &id("nope")), tree);
    }

    #[test]
    fn test_insert_creates_children_list_for_leaf() {
        let tree = sample();
        let next = insert(&tree, Element::with_id("f", ElementKind::Icon), Some(&id("e"))).unwrap();
        assert_eq!(find(&next, &id("e")).unwrap().children()[0].id, id("f"));
    }

    #[test]
    fn test_insert_rejects_missing_parent() {
        let tree = sample();
        let result = insert(&tree, Element::with_id("f", ElementKind::Icon), Some(&id("zz")));
        assert_eq!(result, Err(TreeError::ParentNotFound(id("zz"))));
    }

    #[test]
    fn test_insert_rejects_duplicate_in_incoming_subtree() {
        let tree = sample();
        let incoming = Element::with_id("f", ElementKind::Container)
            .with_children(vec![Element::with_id("d", ElementKind::Text)]);
        assert_eq!(insert(&tree, incoming, None), Err(TreeError::DuplicateId(id("d"))));

        let self_dup = Element::with_id("g", ElementKind::Container)
            .with_children(vec![Element::with_id("g", ElementKind::Text)]);
        assert_eq!(insert(&tree, self_dup, None), Err(TreeError::DuplicateId(id("g"))));
    }

    #[test]
    fn test_update_missing_element() {
        let tree = sample();
        let result = update(&tree, &id("zz"), &ElementPatch::new().order(1));
        assert_eq!(result, Err(TreeError::ElementNotFound(id("zz"))));
    }

    #[test]
    fn test_move_to_root_at_index() {
        let tree = sample();
        let next = move_element(&tree, &id("d"), None, Some(0)).unwrap();
        assert_eq!(next[0].id, id("d"));
        assert!(find(&next, &id("c")).unwrap().children().is_empty());
    }

    #[test]
    fn test_move_index_is_clamped() {
        let tree = sample();
        let next = move_element(&tree, &id("e"), Some(&id("a")), Some(99)).unwrap();
        let a = find(&next, &id("a")).unwrap();
        assert_eq!(a.children().last().unwrap().id, id("e"));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_move_within_same_parent() {
        let tree = sample();
        let next = move_element(&tree, &id("c"), Some(&id("a")), Some(0)).unwrap();
        let order: Vec<_> = find(&next, &id("a")).unwrap().children().iter().map(|e| e.id.clone()).collect();
        assert_eq!(order, vec![id("c"), id("b")]);
    }

    #[test]
    fn test_move_under_descendant_is_cyclic() {
        let tree = sample();
        let result = move_element(&tree, &id("a"), Some(&id("d")), None);
        assert_eq!(
            result,
            Err(TreeError::CyclicMove { node_id: id("a"), new_parent_id: id("d") })
        );

        let onto_self = move_element(&tree, &id("c"), Some(&id("c")), None);
        assert!(matches!(onto_self, Err(TreeError::CyclicMove { .. })));
    }

    #[test]
    fn test_move_missing_node_or_parent() {
        let tree = sample();
        assert_eq!(
            move_element(&tree, &id("zz"), None, None),
            Err(TreeError::ElementNotFound(id("zz")))
        );
        assert_eq!(
            move_element(&tree, &id("b"), Some(&id("zz")), None),
            Err(TreeError::ParentNotFound(id("zz")))
        );
    }
}
