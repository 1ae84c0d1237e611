//! # Pagesmith Workspace
//!
//! On-disk side of the editor: a `DocumentStore` that keeps one JSON file
//! per document, plus the `pagesmith.config.json` settings file.

pub mod config;
pub mod errors;
pub mod file_store;

pub use config::{WorkspaceConfig, DEFAULT_CONFIG_NAME};
pub use errors::{WorkspaceError, WorkspaceResult};
pub use file_store::{validate_document_id, FileStore, StoredDocument};
