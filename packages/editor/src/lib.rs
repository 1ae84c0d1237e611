//! # Pagesmith Editor
//!
//! Document editing engine for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI / drag-and-drop / scripts                │
//! └─────────────────────────────────────────────┘
//!                     ↓ Mutation / session calls
//! ┌─────────────────────────────────────────────┐
//! │ EditSession                                 │
//! │  - pure tree edits (pagesmith-document)     │
//! │  - UndoStack: past / present / future       │
//! │  - Selection: ordered ids, primary first    │
//! └─────────────────────────────────────────────┘
//!                     ↓ request_save(tree)
//! ┌─────────────────────────────────────────────┐
//! │ SaveScheduler: debounce, one save in flight │
//! └─────────────────────────────────────────────┘
//!                     ↓ save(id, tree)
//! ┌─────────────────────────────────────────────┐
//! │ DocumentStore (injected)                    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Edits are synchronous**: tree, selection and history change
//!    run-to-completion on the caller's thread
//! 2. **Saving never blocks editing**: persistence failures only show up in
//!    the observable `SaveStatus`
//! 3. **Linear history**: a new edit discards the redo branch
//! 4. **Selection follows the tree**: ids that leave the document leave the
//!    selection in the same step
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagesmith_editor::{EditSession, EditorConfig, MemoryStore};
//! use pagesmith_document::ElementKind;
//!
//! let store = Arc::new(MemoryStore::with_document("home", vec![]));
//! let mut session = EditSession::open(store, "home".into(), EditorConfig::default()).await?;
//!
//! let section = session.create_element(ElementKind::Container, None)?;
//! session.create_element(ElementKind::Heading, Some(&section))?;
//! session.undo();
//!
//! session.close().await?;
//! ```

mod config;
mod errors;
mod mutations;
mod persistence;
mod scheduler;
mod selection;
mod session;
mod undo_stack;

pub use config::{
    EditorConfig, DEFAULT_AUTOSAVE_DEBOUNCE, DEFAULT_HISTORY_LIMIT, MAX_AUTOSAVE_DEBOUNCE,
};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationResult};
pub use persistence::{DocumentId, DocumentStore, MemoryStore, PersistenceError};
pub use scheduler::{SaveScheduler, SaveStatus};
pub use selection::{Selection, SelectionMode};
pub use session::EditSession;
pub use undo_stack::{Snapshot, UndoStack};
