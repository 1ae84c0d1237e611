//! # Pagesmith Document
//!
//! The page document model: a recursive tree of elements with
//! per-breakpoint styles, plus pure helpers that search and edit it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Element tree + pure tree edits    │
//! │  - find / insert / update / remove / move   │
//! │  - per-breakpoint style resolution          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session, selection, history, save   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagesmith_document::{tree, Element, ElementId, ElementKind};
//!
//! let doc = tree::insert(&[], Element::with_id("a", ElementKind::Container), None)?;
//! let doc = tree::insert(&doc, Element::with_id("b", ElementKind::Text), Some(&"a".into()))?;
//! assert!(tree::find(&doc, &ElementId::from("b")).is_some());
//!
//! let doc = tree::remove(&doc, &"a".into());
//! assert!(doc.is_empty());
//! # Ok::<(), pagesmith_document::TreeError>(())
//! ```

mod defaults;
mod element;
mod errors;
mod patch;
pub mod styles;
pub mod tree;

pub use defaults::{default_props, default_styles};
pub use element::{
    Breakpoint, DocumentTree, Element, ElementId, ElementKind, Props, ResponsiveStyles, StyleMap,
};
pub use errors::{TreeError, TreeResult};
pub use patch::ElementPatch;
