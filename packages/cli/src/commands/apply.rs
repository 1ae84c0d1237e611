use crate::context::Context;
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_document::tree;
use pagesmith_editor::{
    DocumentId, DocumentStore, EditSession, MemoryStore, Mutation, PersistenceError, SaveStatus,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document id
    pub id: String,

    /// JSON file holding an array of mutations
    pub script: PathBuf,

    /// Undo this many steps after the script runs
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Run against an in-memory copy and leave the stored document alone
    #[arg(long)]
    pub in_memory: bool,
}

pub async fn apply(args: ApplyArgs, context: &Context) -> Result<()> {
    let content = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read script {}", args.script.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutation script {}", args.script.display()))?;

    let id = DocumentId::from(args.id);
    let store = open_store(&id, args.in_memory, context).await?;
    let mut session = EditSession::open(store, id.clone(), context.config.editor_config()).await?;

    println!(
        "{}",
        format!("🔧 Applying {} mutations to {}...", mutations.len(), id)
            .bright_blue()
            .bold()
    );

    let mut failed = 0;
    for mutation in mutations {
        let description = mutation.description();
        match session.apply(mutation) {
            Ok(_) => println!("  {} {}", "✓".green(), description),
            Err(e) => {
                failed += 1;
                eprintln!("  {} {} - {}", "✗".red(), description, e.to_string().red());
            }
        }
    }

    let mut undone = 0;
    while undone < args.undo && session.undo() {
        undone += 1;
    }
    if undone > 0 {
        println!("  {} Undid {} steps", "↶".yellow(), undone);
    }

    let elements = tree::count(session.tree());
    let status = session.subscribe_status();
    let closed = session.close().await;
    let status = status.borrow().clone();

    println!();
    match (&closed, status) {
        (Ok(()), SaveStatus::Saved) => println!(
            "{} {} elements{}",
            "✅ Saved".green().bold(),
            elements,
            if args.in_memory { " (in memory)" } else { "" }
        ),
        (_, SaveStatus::Error { reason }) => {
            println!("{} {}", "❌ Save failed:".red().bold(), reason)
        }
        _ => println!("{}", "Saving...".yellow()),
    }
    if failed > 0 {
        println!("{}", format!("{} mutations failed", failed).yellow());
    }

    closed.map_err(Into::into)
}

/// The file store, or for a dry run a memory store seeded from it
async fn open_store(
    id: &DocumentId,
    in_memory: bool,
    context: &Context,
) -> Result<Arc<dyn DocumentStore>> {
    let files = context.store();
    if !in_memory {
        return Ok(Arc::new(files));
    }

    let tree = match files.load(id).await {
        Ok(tree) => tree,
        Err(PersistenceError::NotFound(_)) => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    Ok(Arc::new(MemoryStore::with_document(id.clone(), tree)))
}
