//! # Partial Element Updates
//!
//! An `ElementPatch` carries the fields an update wants to change. Merging
//! is shallow on the element but key-by-key inside `props` and inside each
//! breakpoint's style map, so editing `color` keeps an earlier `fontSize`.
//!
//! Removal markers:
//! - a `null` prop value deletes that prop
//! - a `null` order clears the ordering hint
//! - an empty style value deletes that style property (and the breakpoint
//!   block once it is empty, so lookups fall back to desktop again)

use crate::{Breakpoint, Element, ElementKind, Props, ResponsiveStyles};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,

    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,

    #[serde(default, skip_serializing_if = "ResponsiveStyles::is_empty")]
    pub styles: ResponsiveStyles,

    /// `Some(None)` clears the hint
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<Option<i64>>,
}

/// Tells an explicit `null` (`Some(None)`) apart from an absent field (`None`)
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn style(
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

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(Some(order));
        self
    }

    pub fn clear_order(mut self) -> Self {
        self.order = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.props.is_empty() && self.styles.is_empty() && self.order.is_none()
    }

    /// Merge into `element`. Never touches `id` or `children`.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(kind) = self.kind {
            element.kind = kind;
        }

        for (name, value) in &self.props {
            if value.is_null() {
                element.props.remove(name);
            } else {
                element.props.insert(name.clone(), value.clone());
            }
        }

        for (breakpoint, changes) in &self.styles {
            let block = element.styles.entry(*breakpoint).or_default();
            for (property, value) in changes {
                if value.is_empty() {
                    block.remove(property);
                } else {
                    block.insert(property.clone(), value.clone());
                }
            }
            if block.is_empty() {
                element.styles.remove(breakpoint);
            }
        }

        if let Some(order) = self.order {
            element.order = order;
        }
    }
}
