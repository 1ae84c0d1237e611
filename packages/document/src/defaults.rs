//! Default props and styles for freshly created elements.
//!
//! These mirror what the component library hands to the canvas when an
//! element is dropped: a generated id, kind-specific props, and a desktop
//! style block.

use crate::{Breakpoint, Element, ElementId, ElementKind, Props, ResponsiveStyles, StyleMap};
use serde_json::json;

impl Element {
    /// New element of `kind` with a generated id and library defaults
    pub fn new(kind: ElementKind) -> Self {
        let mut styles = ResponsiveStyles::new();
        styles.insert(Breakpoint::Desktop, default_styles(kind));

        Self {
            id: ElementId::generate(),
            kind,
            props: default_props(kind),
            styles,
            children: kind.is_container().then(Vec::new),
            order: None,
        }
    }
}

pub fn default_props(kind: ElementKind) -> Props {
    let value = match kind {
        ElementKind::Heading => json!({ "content": "Heading Text", "level": 1 }),
        ElementKind::Text => json!({
            "content": "Lorem ipsum dolor sit amet, consectetur adipiscing elit."
        }),
        ElementKind::Image => json!({
            "src": "https://via.placeholder.com/400x300",
            "alt": "Placeholder image"
        }),
        ElementKind::Button => json!({ "content": "Click Me", "href": "#" }),
        _ => json!({}),
    };

    match value {
        serde_json::Value::Object(map) => map,
        _ => Props::new(),
    }
}

pub fn default_styles(kind: ElementKind) -> StyleMap {
    let base: &[(&str, &str)] = &[("margin", "0"), ("padding", "16px")];

    let specific: &[(&str, &str)] = match kind {
        ElementKind::Heading => &[
            ("fontSize", "32px"),
            ("fontWeight", "700"),
            ("color", "#0a0a0a"),
            ("lineHeight", "1.2"),
            ("width", "100%"),
        ],
        ElementKind::Text => &[
            ("fontSize", "14px"),
            ("color", "#404040"),
            ("lineHeight", "1.6"),
            ("width", "100%"),
        ],
        ElementKind::Image => &[("width", "100%"), ("height", "auto"), ("borderRadius", "8px")],
        ElementKind::Button => {
            return to_map(&[
                ("padding", "10px 20px"),
                ("backgroundColor", "#6C5CE7"),
                ("color", "#ffffff"),
                ("borderRadius", "6px"),
                ("fontSize", "14px"),
                ("fontWeight", "500"),
                ("cursor", "pointer"),
                ("border", "none"),
                ("display", "inline-block"),
            ])
        }
        ElementKind::Container | ElementKind::Form => &[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("gap", "16px"),
            ("backgroundColor", "#fafafa"),
            ("borderRadius", "8px"),
            ("minHeight", "200px"),
            ("width", "100%"),
        ],
        ElementKind::Grid | ElementKind::Gallery => &[
            ("display", "grid"),
            ("gridTemplateColumns", "repeat(3, 1fr)"),
            ("gap", "16px"),
            ("width", "100%"),
        ],
        ElementKind::Spacer => {
            return to_map(&[("height", "40px"), ("margin", "0"), ("padding", "0"), ("width", "100%")])
        }
        ElementKind::Separator => {
            return to_map(&[
                ("height", "1px"),
                ("margin", "16px 0"),
                ("padding", "0"),
                ("width", "100%"),
                ("backgroundColor", "#e5e5e5"),
            ])
        }
        _ => &[("width", "100%")],
    };

    let mut styles = to_map(base);
    styles.extend(to_map(specific));
    styles
}

fn to_map(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
