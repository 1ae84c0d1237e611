//! Per-breakpoint style lookup.
//!
//! Desktop is the base tier. Tablet and mobile blocks override desktop
//! property by property: a key missing from the requested block falls back
//! to desktop's value for that key.

use crate::{Breakpoint, Element, StyleMap};

/// Effective styles of `element` at `breakpoint`
pub fn resolve(element: &Element, breakpoint: Breakpoint) -> StyleMap {
    let mut resolved = element
        .styles
        .get(&Breakpoint::Desktop)
        .cloned()
        .unwrap_or_default();

    if breakpoint != Breakpoint::Desktop {
        if let Some(overrides) = element.styles.get(&breakpoint) {
            resolved.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    resolved
}

/// Effective value of a single property
pub fn resolve_property<'a>(
    element: &'a Element,
    breakpoint: Breakpoint,
    property: &str,
) -> Option<&'a str> {
    element
        .styles
        .get(&breakpoint)
        .and_then(|block| block.get(property))
        .or_else(|| {
            element
                .styles
                .get(&Breakpoint::Desktop)
                .and_then(|block| block.get(property))
        })
        .map(String::as_str)
}
