use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use pagesmith_document::tree;

pub async fn list(context: &Context) -> Result<()> {
    let documents = context.store().list().await?;

    if documents.is_empty() {
        println!("{}", format!("No documents in {}", context.data_dir.display()).yellow());
        return Ok(());
    }

    for document in &documents {
        println!(
            "  {:<24} {:>4} elements   {}",
            document.id.as_str().bright_white(),
            tree::count(&document.structure),
            document.updated_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }

    Ok(())
}
