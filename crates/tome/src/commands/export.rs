//! `tome export` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tome_config::CliSettings;
use tome_corpus::{Language, validate};

use super::{ContentArgs, loader};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Language to export.
    language: String,

    #[command(flatten)]
    content: ContentArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

/// Serialize an assembled language.
fn to_json(language: &Language, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(language)
    } else {
        serde_json::to_string_pretty(language)
    }
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// The language is validated first; nothing is written if it has errors.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, validation, serialization or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.content.load_config(CliSettings::default())?;
        let assembly = loader(&config).load_language(&self.language)?;

        let report = validate(&assembly).into_result(config.validation.deny_warnings)?;
        for warning in report.warnings() {
            output.warning(&format!("warning: {warning}"));
        }

        let mut json = to_json(assembly.language(), self.compact)?;
        json.push('\n');

        match &self.output {
            Some(path) => {
                std::fs::write(path, &json)?;
                output.success(&format!(
                    "Exported {} ({} entries) to {}",
                    assembly.id(),
                    assembly.language().entry_count(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tome_corpus::{Category, CategoryId, LanguageId, LanguageMeta};

    use super::*;

    fn language() -> Language {
        Language {
            meta: LanguageMeta {
                id: LanguageId::new("javascript"),
                label: "JavaScript".to_owned(),
                icon: String::new(),
                color: String::new(),
                official_url: String::new(),
                tagline: String::new(),
                playground_url: String::new(),
                execution_api_id: String::new(),
            },
            categories: vec![Category {
                id: CategoryId::new("basics"),
                label: "Basics".to_owned(),
                icon: String::new(),
                entries: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_to_json_compact_is_single_line() {
        let json = to_json(&language(), true).unwrap();

        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"id":"javascript""#));
    }

    #[test]
    fn test_to_json_pretty_round_trips() {
        let json = to_json(&language(), false).unwrap();

        assert!(json.contains("\n  \"label\": \"JavaScript\""));
        let back: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(back, language());
    }
}
