use crate::context::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_document::{styles, tree, Breakpoint, Element};
use pagesmith_editor::DocumentId;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document id
    pub id: String,

    /// Breakpoint to resolve styles for (desktop, tablet, mobile)
    #[arg(short, long)]
    pub breakpoint: Option<Breakpoint>,
}

pub async fn show(args: ShowArgs, context: &Context) -> Result<()> {
    let id = DocumentId::from(args.id);
    let document = context.store().read(&id).await?;
    let breakpoint = args
        .breakpoint
        .unwrap_or(context.config.default_breakpoint);

    println!(
        "{} {} ({} elements, {})",
        "📄".bright_blue(),
        document.id.as_str().bold(),
        tree::count(&document.structure),
        breakpoint
    );

    let mut lines = Vec::new();
    outline(&document.structure, breakpoint, 0, &mut lines);
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

/// One line per element, children indented under their parent
fn outline(elements: &[Element], breakpoint: Breakpoint, depth: usize, out: &mut Vec<String>) {
    for element in elements {
        let resolved = styles::resolve(element, breakpoint);
        let styles = resolved
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ");

        let mut line = format!(
            "{}{} {}",
            "  ".repeat(depth + 1),
            element.kind.to_string().cyan(),
            element.id
        );
        if let Some(order) = element.order {
            line.push_str(&format!(" #{}", order));
        }
        if !styles.is_empty() {
            line.push_str(&format!("  {}", format!("{{ {} }}", styles).dimmed()));
        }
        out.push(line);

        outline(element.children(), breakpoint, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_document::ElementKind;

    #[test]
    fn test_outline_resolves_breakpoint() {
        colored::control::set_override(false);
        let tree = vec![Element::with_id("hero", ElementKind::Container)
            .with_style(Breakpoint::Desktop, "padding", "40px")
            .with_style(Breakpoint::Mobile, "padding", "8px")
            .with_children(vec![Element::with_id("title", ElementKind::Heading)])];

        let mut lines = Vec::new();
        outline(&tree, Breakpoint::Mobile, 0, &mut lines);

        assert_eq!(
            lines,
            vec![
                "  container hero  { padding: 8px }".to_string(),
                "    heading title".to_string(),
            ]
        );
    }
}
