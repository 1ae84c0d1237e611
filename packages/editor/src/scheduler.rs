//! # Autosave Scheduler
//!
//! Collapses bursts of edits into occasional `save` calls.
//!
//! ## Protocol
//!
//! ```text
//! request_save ──► pending (latest tree wins) ──► quiet period D ──► save
//!                        ▲                                          │
//!                        └──── requests arriving while saving ◄─────┘
//! ```
//!
//! - Trailing-edge debounce: every request restarts the quiet period and
//!   replaces the pending tree
//! - At most one save is in flight. Requests that arrive meanwhile are
//!   held; once the save completes, the latest one fires as soon as its own
//!   quiet period has elapsed (immediately if it already has)
//! - Failures set the status to `Error` and are not retried on a timer.
//!   The failed tree is kept per document until a newer request for that
//!   document replaces it or an explicit `flush` writes it. The status stays
//!   `Error` while any document has an unsaved failed tree
//! - Switching to another document writes the old document's pending tree
//!   right away instead of dropping it
//! - When the handle goes away, pending and failed trees get one last
//!   write before the worker exits

use crate::config::MAX_AUTOSAVE_DEBOUNCE;
use crate::persistence::{DocumentId, DocumentStore, PersistenceError};
use crate::EditorError;
use pagesmith_document::{tree, DocumentTree};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Save state observed by the UI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Saved,
    Saving,
    Error { reason: String },
}

impl SaveStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, SaveStatus::Error { .. })
    }
}

enum Command {
    Request {
        document_id: DocumentId,
        tree: DocumentTree,
        requested_at: Instant,
    },
    Flush {
        reply: oneshot::Sender<Result<(), PersistenceError>>,
    },
}

/// Handle to the autosave worker task
pub struct SaveScheduler {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<SaveStatus>,
    worker: JoinHandle<()>,
    debounce: Duration,
}

impl SaveScheduler {
    /// Start the worker on the current tokio runtime. `debounce` is capped
    /// at `MAX_AUTOSAVE_DEBOUNCE`.
    pub fn spawn(store: Arc<dyn DocumentStore>, debounce: Duration) -> Self {
        if debounce > MAX_AUTOSAVE_DEBOUNCE {
            tracing::warn!(
                requested_ms = debounce.as_millis() as u64,
                max_ms = MAX_AUTOSAVE_DEBOUNCE.as_millis() as u64,
                "autosave debounce too long, capping"
            );
        }
        let debounce = debounce.min(MAX_AUTOSAVE_DEBOUNCE);
        let (commands, receiver) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(SaveStatus::Saved);

        let worker = SaveWorker {
            store,
            debounce,
            status: status_tx,
            pending: None,
            failed: BTreeMap::new(),
            revision: 0,
        };
        let worker = tokio::spawn(worker.run(receiver));

        Self {
            commands,
            status,
            worker,
            debounce,
        }
    }

    /// Queue `tree` as the latest state of `document_id` and restart the
    /// quiet period
    pub fn request_save(&self, document_id: DocumentId, tree: DocumentTree) {
        let command = Command::Request {
            document_id,
            tree,
            requested_at: Instant::now(),
        };
        if self.commands.send(command).is_err() {
            tracing::warn!("autosave worker is gone; save request dropped");
        }
    }

    /// Write the pending tree now (or retry the last failed one) and wait
    /// for the outcome
    pub async fn flush(&self) -> Result<(), EditorError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::Flush { reply })
            .map_err(|_| EditorError::SchedulerClosed)?;

        outcome
            .await
            .map_err(|_| EditorError::SchedulerClosed)?
            .map_err(EditorError::from)
    }

    pub fn status(&self) -> SaveStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Stop accepting requests, write whatever is pending, and wait for
    /// the worker to finish
    pub async fn shutdown(self) {
        let SaveScheduler {
            commands, worker, ..
        } = self;
        drop(commands);

        if let Err(e) = worker.await {
            tracing::error!("autosave worker panicked: {}", e);
        }
    }
}

struct Pending {
    document_id: DocumentId,
    tree: DocumentTree,
    deadline: Instant,
}

struct FailedSave {
    pending: Pending,
    reason: String,
}

enum Wake {
    Command(Option<Command>),
    Deadline,
}

struct SaveWorker {
    store: Arc<dyn DocumentStore>,
    debounce: Duration,
    status: watch::Sender<SaveStatus>,
    pending: Option<Pending>,

    /// Latest failed tree per document, waiting for a flush or a newer tree
    failed: BTreeMap<DocumentId, FailedSave>,
    revision: u64,
}

impl SaveWorker {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let wake = match self.pending.as_ref().map(|p| p.deadline) {
                Some(deadline) => tokio::select! {
                    // Drain queued requests before firing so a stale tree
                    // is never sent ahead of a newer one
                    biased;
                    command = commands.recv() => Wake::Command(command),
                    _ = time::sleep_until(deadline) => Wake::Deadline,
                },
                None => Wake::Command(commands.recv().await),
            };

            match wake {
                Wake::Deadline => {
                    if let Some(pending) = self.pending.take() {
                        let _ = self.save(pending).await;
                    }
                }
                Wake::Command(Some(Command::Request {
                    document_id,
                    tree,
                    requested_at,
                })) => {
                    self.arm(document_id, tree, requested_at).await;
                }
                Wake::Command(Some(Command::Flush { reply })) => {
                    let outcome = self.flush().await;
                    let _ = reply.send(outcome);
                }
                Wake::Command(None) => {
                    let _ = self.flush().await;
                    if !self.failed.is_empty() {
                        tracing::error!(
                            documents = self.failed.len(),
                            "autosave worker stopped with unsaved documents"
                        );
                    }
                    tracing::debug!("autosave worker stopped");
                    return;
                }
            }
        }
    }

    async fn arm(&mut self, document_id: DocumentId, tree: DocumentTree, requested_at: Instant) {
        if let Some(previous) = self.pending.take() {
            if previous.document_id != document_id {
                tracing::debug!(
                    from = %previous.document_id,
                    to = %document_id,
                    "document switched; writing pending save now"
                );
                let _ = self.save(previous).await;
            }
        }

        if self.failed.remove(&document_id).is_some() {
            tracing::debug!(document_id = %document_id, "newer tree replaces failed save");
        }

        let deadline = requested_at
            .checked_add(self.debounce)
            .unwrap_or_else(|| Instant::now() + MAX_AUTOSAVE_DEBOUNCE);
        tracing::debug!(document_id = %document_id, "autosave armed");
        self.pending = Some(Pending {
            document_id,
            tree,
            deadline,
        });
    }

    /// Write the pending tree, then retry every failed one. Returns the
    /// first error.
    async fn flush(&mut self) -> Result<(), PersistenceError> {
        let retries = std::mem::take(&mut self.failed);

        let mut outcome = match self.pending.take() {
            Some(pending) => self.save(pending).await,
            None => Ok(()),
        };
        for (_, failed) in retries {
            let result = self.save(failed.pending).await;
            outcome = outcome.and(result);
        }
        outcome
    }

    async fn save(&mut self, pending: Pending) -> Result<(), PersistenceError> {
        self.revision += 1;
        let revision = self.revision;

        self.status.send_replace(SaveStatus::Saving);
        tracing::info!(
            document_id = %pending.document_id,
            revision,
            elements = tree::count(&pending.tree),
            "saving document"
        );

        match self.store.save(&pending.document_id, &pending.tree).await {
            Ok(()) => {
                tracing::info!(document_id = %pending.document_id, revision, "document saved");
                let status = match self.failed.values().next() {
                    Some(failed) => SaveStatus::Error {
                        reason: failed.reason.clone(),
                    },
                    None => SaveStatus::Saved,
                };
                self.status.send_replace(status);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    document_id = %pending.document_id,
                    revision,
                    error = %e,
                    "save failed"
                );
                let reason = e.to_string();
                self.status.send_replace(SaveStatus::Error {
                    reason: reason.clone(),
                });
                self.failed
                    .insert(pending.document_id.clone(), FailedSave { pending, reason });
                Err(e)
            }
        }
    }
}
