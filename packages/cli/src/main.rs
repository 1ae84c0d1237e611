mod commands;
mod context;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, list, show, ApplyArgs, InitArgs, ShowArgs};
use context::{Context, GlobalArgs};
use tracing_subscriber::EnvFilter;

/// Pagesmith CLI - edit page documents from the command line
#[derive(Parser, Debug)]
#[command(name = "pagesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty document
    Init(InitArgs),

    /// Print a document's element outline
    Show(ShowArgs),

    /// Apply a JSON script of mutations to a document
    Apply(ApplyArgs),

    /// List stored documents
    List,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let context = Context::load(&cli.global)?;

    match cli.command {
        Command::Init(args) => init(args, &context).await,
        Command::Show(args) => show(args, &context).await,
        Command::Apply(args) => apply(args, &context).await,
        Command::List => list(&context).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
