//! # Page Elements
//!
//! The recursive node type of a page document and the small value types
//! hanging off it (ids, kinds, breakpoints, style maps).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque property bag. The tree engine copies and merges it but never
/// interprets its values.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Style property name → CSS value
pub type StyleMap = BTreeMap<String, String>;

/// Per-breakpoint style maps
pub type ResponsiveStyles = BTreeMap<Breakpoint, StyleMap>;

/// A document is an ordered forest of root-level elements.
pub type DocumentTree = Vec<Element>;

/// Stable element identifier, assigned at creation and never reused
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for a newly created element
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Closed set of element kinds offered by the component library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Text,
    Image,
    Button,
    Container,
    Grid,
    Spacer,
    Separator,
    Input,
    Form,
    Video,
    Gallery,
    Slider,
    #[serde(rename = "html", alias = "html-snippet")]
    HtmlSnippet,
    Icon,
    Map,
}

impl ElementKind {
    pub const ALL: [ElementKind; 16] = [
        ElementKind::Heading,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Button,
        ElementKind::Container,
        ElementKind::Grid,
        ElementKind::Spacer,
        ElementKind::Separator,
        ElementKind::Input,
        ElementKind::Form,
        ElementKind::Video,
        ElementKind::Gallery,
        ElementKind::Slider,
        ElementKind::HtmlSnippet,
        ElementKind::Icon,
        ElementKind::Map,
    ];

    /// Kinds that hold children in the canvas.
    ///
    /// Advisory only: the tree model creates a children list on demand for
    /// any kind.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ElementKind::Container
                | ElementKind::Grid
                | ElementKind::Form
                | ElementKind::Gallery
                | ElementKind::Slider
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Heading => "heading",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Container => "container",
            ElementKind::Grid => "grid",
            ElementKind::Spacer => "spacer",
            ElementKind::Separator => "separator",
            ElementKind::Input => "input",
            ElementKind::Form => "form",
            ElementKind::Video => "video",
            ElementKind::Gallery => "gallery",
            ElementKind::Slider => "slider",
            ElementKind::HtmlSnippet => "html",
            ElementKind::Icon => "icon",
            ElementKind::Map => "map",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Responsive viewport tier
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Breakpoint::Desktop),
            "tablet" => Ok(Breakpoint::Tablet),
            "mobile" => Ok(Breakpoint::Mobile),
            other => Err(format!(
                "Invalid breakpoint: {}. Use: desktop, tablet, or mobile",
                other
            )),
        }
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    #[serde(default)]
    pub props: Props,

    #[serde(default)]
    pub styles: ResponsiveStyles,

    /// Owned children; `None` for leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Element>>,

    /// Advisory sibling-ordering hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl Element {
    /// Bare element with an explicit id and no props, styles or children
    pub fn with_id(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            props: Props::new(),
            styles: ResponsiveStyles::new(),
            children: None,
            order: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_style(
        mut self,
        breakpoint: Breakpoint,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.styles
            .entry(breakpoint)
            .or_default()
            .insert(property.into(), value.into());
        self
    }

    /// Children slice (empty for leaves)
    pub fn children(&self) -> &[Element] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Ids of this element and every descendant, depth-first
    pub fn subtree_ids(&self) -> Vec<ElementId> {
        let mut ids = Vec::new();
        collect_ids(std::slice::from_ref(self), &mut ids);
        ids
    }
}

pub(crate) fn collect_ids(elements: &[Element], ids: &mut Vec<ElementId>) {
    for element in elements {
        ids.push(element.id.clone());
        collect_ids(element.children(), ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_serialization_shape() {
        let element = Element::with_id("a", ElementKind::HtmlSnippet)
            .with_prop("content", "<b>hi</b>")
            .with_style(Breakpoint::Mobile, "fontSize", "12px");

        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "html");
        assert_eq!(json["styles"]["mobile"]["fontSize"], "12px");
        assert!(json.get("children").is_none());
        assert!(json.get("order").is_none());
    }

    #[test]
    fn test_element_deserializes_with_missing_maps() {
        let json = r#"{ "id": "x", "type": "html-snippet", "children": [{ "id": "y", "type": "text" }] }"#;
        let element: Element = serde_json::from_str(json).unwrap();

        assert_eq!(element.kind, ElementKind::HtmlSnippet);
        assert!(element.props.is_empty());
        assert_eq!(element.children().len(), 1);
        assert_eq!(element.subtree_ids(), vec![ElementId::from("x"), ElementId::from("y")]);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ElementId::generate();
        let b = ElementId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_breakpoint_parse() {
        assert_eq!("tablet".parse::<Breakpoint>(), Ok(Breakpoint::Tablet));
        assert!("watch".parse::<Breakpoint>().is_err());
    }
}
