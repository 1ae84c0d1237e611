use crate::context::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_editor::DocumentId;
use pagesmith_workspace::WorkspaceError;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Document id (becomes <data-dir>/<id>.json)
    pub id: String,

    /// Overwrite an existing document
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, context: &Context) -> Result<()> {
    let id = DocumentId::from(args.id);
    let store = context.store();

    match store.create(&id, args.force).await {
        Ok(()) => {
            println!("  {} Created {}", "✓".green(), store.path_for(&id)?.display());
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(id)) => {
            println!("{} {} already exists", "⚠️".yellow(), id.as_str().bright_white());
            println!("Use --force to overwrite");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
