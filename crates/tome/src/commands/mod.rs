//! CLI command implementations.

mod check;
mod export;
mod list;
mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tome_config::{CliSettings, Config};
use tome_corpus::Loader;
use tome_storage::Storage;
use tome_storage_fs::FsStorage;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use list::ListArgs;
pub(crate) use show::ShowArgs;

/// Options shared by every command that reads content.
#[derive(Args)]
pub(crate) struct ContentArgs {
    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long, env = "TOME_SOURCE_DIR")]
    source_dir: Option<PathBuf>,
}

impl ContentArgs {
    /// Load configuration with the shared overrides plus command-specific ones.
    fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Create a loader over the configured content directory.
fn loader(config: &Config) -> Loader {
    tracing::debug!(
        source_dir = %config.content_resolved.source_dir.display(),
        manifest = %config.content_resolved.manifest_name,
        "Opening content storage"
    );
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_manifest_name(
        config.content_resolved.source_dir.clone(),
        &config.content_resolved.manifest_name,
    ));
    Loader::new(storage)
}
