use anyhow::{Context as _, Result};
use clap::Args;
use pagesmith_workspace::{FileStore, WorkspaceConfig};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Document directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to ./pagesmith.config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Settings every command runs with
#[derive(Debug)]
pub struct Context {
    pub config: WorkspaceConfig,
    pub data_dir: PathBuf,
}

impl Context {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Cannot get current directory")?;
        Self::load_in(args, cwd)
    }

    pub fn load_in(args: &GlobalArgs, cwd: PathBuf) -> Result<Self> {
        let config = match &args.config {
            Some(path) => WorkspaceConfig::load_from(&cwd.join(path))?,
            None => WorkspaceConfig::load(&cwd)?,
        };

        let data_dir = match &args.data_dir {
            Some(dir) => cwd.join(dir),
            None => config.data_dir(&cwd),
        };

        tracing::debug!(data_dir = %data_dir.display(), "workspace context loaded");
        Ok(Self { config, data_dir })
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}
