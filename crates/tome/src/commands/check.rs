//! `tome check` command implementation.

use clap::Args;
use tome_config::CliSettings;

use super::{ContentArgs, loader};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    content: ContentArgs,

    /// Language to check (repeatable; overrides config).
    #[arg(short, long = "language", value_name = "LANGUAGE")]
    languages: Vec<String>,

    /// Fail on warnings as well as errors.
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or validation finds violations that
    /// are not allowed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.content.load_config(CliSettings {
            languages: (!self.languages.is_empty()).then_some(self.languages),
            deny_warnings: self.deny_warnings.then_some(true),
            ..CliSettings::default()
        })?;

        output.info(&format!(
            "Source: {}",
            config.content_resolved.source_dir.display()
        ));

        let corpus = loader(&config).load_corpus(config.content_resolved.languages.as_deref())?;
        let report = corpus
            .validate()
            .into_result(config.validation.deny_warnings)?;

        for warning in report.warnings() {
            output.warning(&format!("warning: {warning}"));
        }

        output.separator();
        output.success(&format!(
            "Checked {} language(s), {} entries: {} warning(s)",
            corpus.languages().len(),
            corpus.entry_count(),
            report.warnings().count()
        ));
        Ok(())
    }
}
